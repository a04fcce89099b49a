//! Errors of the loaders and of whole plotting runs.

use std::path::PathBuf;
use thiserror::Error;
use crate::plot;

/// Failure to turn an input file into records.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("File '{}' not found.", .0.display())]
    NotFound(PathBuf),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error("missing column '{0}'")]
    MissingColumn(&'static str),
    #[error("expected a single column but found {found} on line {line}")]
    Columns { line: u64, found: usize },
    #[error("could not convert string to float: '{value}' on line {line}")]
    Float { line: u64, value: String },
    #[error("No columns to parse from file")]
    Empty,
}

/// Reason a plotting run stopped.  The binaries print it and exit
/// with [`Failure::exit_code`].
#[derive(Debug, Error)]
pub enum Failure {
    #[error("{0}")]
    Usage(&'static str),
    #[error("Error: File '{}' not found.\n{}", .path.display(), .hint)]
    MissingInput { path: PathBuf, hint: &'static str },
    #[error("Error reading CSV: {0}")]
    MalformedInput(#[source] LoadError),
    #[error("Error: {0}")]
    Render(#[from] plot::Error),
}

impl Failure {
    pub fn exit_code(&self) -> u8 {
        match self {
            Failure::Render(_) => 1,
            Failure::Usage(_) => 2,
            Failure::MissingInput { .. } => 3,
            Failure::MalformedInput(_) => 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_input_message() {
        let f = Failure::MissingInput { path: "results.txt".into(),
                                        hint: "Run it first." };
        assert_eq!(f.to_string(),
                   "Error: File 'results.txt' not found.\nRun it first.");
        assert_eq!(f.exit_code(), 3);
    }

    #[test]
    fn distinct_exit_codes() {
        let codes = [Failure::Render(plot::Error::PermissionError),
                     Failure::Usage("usage"),
                     Failure::MissingInput { path: "a".into(), hint: "" },
                     Failure::MalformedInput(LoadError::Empty)]
            .map(|f| f.exit_code());
        assert_eq!(codes, [1, 2, 3, 4]);
    }

    #[test]
    fn malformed_message_keeps_cause() {
        let f = Failure::MalformedInput(LoadError::Empty);
        assert_eq!(f.to_string(),
                   "Error reading CSV: No columns to parse from file");
    }
}
