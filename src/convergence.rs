//! Residual histories of iterative solvers, overlaid on one chart.
//!
//! Each input file holds one relative residual per line, the first
//! line being iteration 1.  Files are given on the command line as
//! `(file, label)` pairs; a pair whose file is missing or unreadable
//! is reported and skipped without stopping the run.

use std::{
    fs::File,
    io::Read,
    path::{Path, PathBuf},
};
use csv::{ReaderBuilder, Trim};
use log::{debug, info, warn};
use crate::{
    chart::{Annotation, Chart, Scale, Series},
    error::{Failure, LoadError},
    plot::{Color, LineStyle},
};

pub const OUTPUT: &str = "convergence_comparison.png";
pub const USAGE: &str =
    "Usage: plot_convergence file1 Label1 [file2 Label2 ...]";

pub const TITLE: &str = "Convergence History Comparison";
pub const X_LABEL: &str = "Iteration";
pub const Y_LABEL: &str = "Relative Residual ||r||/||b||";

pub const COLORS: [Color; 7] = [Color::Blue, Color::Red, Color::Green,
                                Color::Cyan, Color::Magenta, Color::Yellow,
                                Color::Black];
pub const STYLES: [LineStyle; 4] = [LineStyle::Solid, LineStyle::Dashed,
                                    LineStyle::DashDot, LineStyle::Dotted];
pub const LINE_WIDTH: f64 = 2.;
/// Offset, in points, of the final value's label from the last point.
pub const ANNOTATION_OFFSET: (f64, f64) = (10., 0.);

/// A residual file and its legend label.
#[derive(Debug, Clone, PartialEq)]
pub struct Pair {
    pub path: PathBuf,
    pub label: String,
}

/// Split `file label file label ...` arguments into pairs.  Anything
/// but a positive even number of arguments is a usage error.
pub fn pairs<S: AsRef<str>>(args: &[S]) -> Result<Vec<Pair>, Failure> {
    if args.is_empty() || args.len() % 2 != 0 {
        return Err(Failure::Usage(USAGE));
    }
    Ok(args.chunks_exact(2)
       .map(|p| Pair { path: PathBuf::from(p[0].as_ref()),
                       label: p[1].as_ref().to_string() })
       .collect())
}

/// Color and line style of the pair at `position` among all supplied
/// pairs, skipped ones included.
pub fn appearance(position: usize) -> (Color, LineStyle) {
    (COLORS[position % COLORS.len()], STYLES[position % STYLES.len()])
}

/// Format `v` in scientific notation with two decimals and a signed
/// exponent of at least two digits (`1.00e-02`).
pub fn format_residual(v: f64) -> String {
    if v.is_nan() {
        return "nan".to_string();
    }
    if v.is_infinite() {
        return if v > 0. { "inf" } else { "-inf" }.to_string();
    }
    let s = format!("{:.2e}", v);
    match s.split_once('e') {
        Some((mantissa, exp)) => {
            let (sign, digits) = match exp.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exp),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => s,
    }
}

/// Parse a headerless single column of floats.
pub fn parse_residuals<R: Read>(input: R) -> Result<Vec<f64>, LoadError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(input);
    let mut residuals = vec![];
    for record in rdr.records() {
        let record = record?;
        let line = record.position().map_or(0, |p| p.line());
        if record.len() != 1 {
            return Err(LoadError::Columns { line, found: record.len() });
        }
        let value = &record[0];
        residuals.push(value.parse::<f64>().map_err(|_| {
            LoadError::Float { line, value: value.to_string() }
        })?);
    }
    if residuals.is_empty() {
        return Err(LoadError::Empty);
    }
    Ok(residuals)
}

pub fn read_residuals(path: &Path) -> Result<Vec<f64>, LoadError> {
    if !path.exists() {
        return Err(LoadError::NotFound(path.to_path_buf()));
    }
    parse_residuals(File::open(path)?)
}

/// Residual-vs-iteration series of the pair at `position`, its final
/// value written next to the last point.
pub fn series(position: usize, label: &str, residuals: Vec<f64>) -> Series {
    let x = (1..=residuals.len()).map(|i| i as f64).collect();
    let (color, style) = appearance(position);
    let mut s = Series::new(label, x, residuals);
    s.color = Some(color);
    s.line_style = Some(style);
    s.line_width = Some(LINE_WIDTH);
    s.annotation = s.last().map(|(x, y)| {
        Annotation { text: format_residual(y), at: (x, y),
                     offset: ANNOTATION_OFFSET }
    });
    s
}

/// What became of one pair.
#[derive(Debug)]
pub enum Outcome {
    Plotted(Series),
    Missing(PathBuf),
    Unreadable { path: PathBuf, cause: LoadError },
}

impl Outcome {
    /// Message reported for a pair that was not plotted.
    pub fn diagnostic(&self) -> Option<String> {
        match self {
            Outcome::Plotted(_) => None,
            Outcome::Missing(path) =>
                Some(format!("Warning: File '{}' not found. Skipping.",
                             path.display())),
            Outcome::Unreadable { path, cause } =>
                Some(format!("Error reading {}: {}", path.display(), cause)),
        }
    }
}

/// Read every pair, in order.
pub fn load(pairs: &[Pair]) -> Vec<Outcome> {
    pairs.iter().enumerate().map(|(position, pair)| {
        match read_residuals(&pair.path) {
            Ok(residuals) => {
                debug!("{}: {} iterations", pair.path.display(),
                       residuals.len());
                Outcome::Plotted(series(position, &pair.label, residuals))
            }
            Err(LoadError::NotFound(path)) => Outcome::Missing(path),
            Err(cause) => Outcome::Unreadable { path: pair.path.clone(),
                                                cause },
        }
    }).collect()
}

/// Chart of the plotted outcomes: linear iterations, log residuals.
pub fn chart(outcomes: Vec<Outcome>) -> Chart {
    let mut chart = Chart::new(TITLE, X_LABEL, Y_LABEL)
        .x_scale(Scale::Linear)
        .y_scale(Scale::Log);
    for outcome in outcomes {
        if let Outcome::Plotted(s) = outcome {
            chart.push(s)
        }
    }
    chart
}

/// Plot the `file label ...` arguments `args` into `output`.
///
/// Pairs that cannot be read are reported and left out; the chart is
/// written even when none is left.
pub fn run<S: AsRef<str>>(args: &[S], output: &Path) -> Result<(), Failure> {
    let pairs = pairs(args)?;
    let outcomes = load(&pairs);
    for outcome in &outcomes {
        if let Some(msg) = outcome.diagnostic() {
            println!("{}", msg);
        }
    }
    let chart = chart(outcomes);
    if chart.series.is_empty() {
        warn!("no residual history could be read, {} has no curve",
              output.display());
    }
    chart.save(output)?;
    info!("wrote {} ({} curves)", output.display(), chart.series.len());
    println!("Combined plot saved to {}", output.display());
    Ok(())
}
