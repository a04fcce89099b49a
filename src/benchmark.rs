//! Execution time of the direct solvers against the matrix size.
//!
//! The input is the CSV table written by the benchmark script:
//!
//! ```text
//! Method,Size,Time(ms)
//! 0,100,0.012
//! 1,100,0.003
//! ```

use std::{
    borrow::Cow,
    collections::BTreeMap,
    fs::File,
    io::Read,
    path::Path,
};
use csv::{ReaderBuilder, Trim};
use log::{debug, info};
use serde::Deserialize;
use crate::{
    chart::{Chart, Scale, Series},
    error::{Failure, LoadError},
    plot::Marker,
};

pub const DEFAULT_INPUT: &str = "benchmark_results.txt";
pub const OUTPUT: &str = "benchmark_plot.png";
pub const MISSING_HINT: &str =
    "Please run the benchmark script first: ./scripts/benchmark_direct.sh";

pub const TITLE: &str = "Poisson 1D Direct Solver Performance";
pub const X_LABEL: &str = "Matrix Size (N)";
pub const Y_LABEL: &str = "Execution Time (ms)";

const COLUMNS: [&str; 3] = ["Method", "Size", "Time(ms)"];

/// One timing measurement.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Record {
    #[serde(rename = "Method")]
    pub method: u32,
    #[serde(rename = "Size")]
    pub size: u64,
    #[serde(rename = "Time(ms)")]
    pub time_ms: f64,
}

/// Legend entry of the solver variant `method`.
pub fn method_label(method: u32) -> Cow<'static, str> {
    match method {
        0 => "LAPACK dgbtrf (Band)".into(),
        1 => "Custom Tridiagonal".into(),
        2 => "LAPACK dgbsv (Simple Driver)".into(),
        id => format!("Method {id}").into(),
    }
}

/// Parse a benchmark table.  Columns other than `Method`, `Size` and
/// `Time(ms)` are ignored.
pub fn parse<R: Read>(input: R) -> Result<Vec<Record>, LoadError> {
    let mut rdr = ReaderBuilder::new().trim(Trim::All).from_reader(input);
    let headers = rdr.headers()?;
    if headers.is_empty() {
        return Err(LoadError::Empty);
    }
    if let Some(col) = COLUMNS.iter().find(|c| !headers.iter().any(|h| h == **c)) {
        return Err(LoadError::MissingColumn(*col));
    }
    let records = rdr.deserialize().collect::<Result<Vec<Record>, _>>()?;
    Ok(records)
}

pub fn read(path: &Path) -> Result<Vec<Record>, LoadError> {
    if !path.exists() {
        return Err(LoadError::NotFound(path.to_path_buf()));
    }
    parse(File::open(path)?)
}

/// Records of each method, by ascending method id, each group sorted
/// by size.  The sort is stable: equal sizes keep their file order.
pub fn group_by_method(records: &[Record]) -> BTreeMap<u32, Vec<Record>> {
    let mut groups: BTreeMap<u32, Vec<Record>> = BTreeMap::new();
    for r in records {
        groups.entry(r.method).or_default().push(*r);
    }
    for group in groups.values_mut() {
        group.sort_by_key(|r| r.size);
    }
    groups
}

/// Log-log chart with one marked line per method.
pub fn chart(records: &[Record]) -> Chart {
    let mut chart = Chart::new(TITLE, X_LABEL, Y_LABEL)
        .x_scale(Scale::Log)
        .y_scale(Scale::Log);
    for (method, group) in group_by_method(records) {
        let x = group.iter().map(|r| r.size as f64).collect();
        let y = group.iter().map(|r| r.time_ms).collect();
        let mut series = Series::new(method_label(method), x, y);
        series.marker = Some(Marker::Circle);
        debug!("method {}: {} points", method, group.len());
        chart.push(series);
    }
    chart
}

/// Plot the table at `input` into `output`.
pub fn run(input: &Path, output: &Path) -> Result<(), Failure> {
    let records = read(input).map_err(|e| match e {
        LoadError::NotFound(path) =>
            Failure::MissingInput { path, hint: MISSING_HINT },
        e => Failure::MalformedInput(e),
    })?;
    debug!("{} records read from {}", records.len(), input.display());
    chart(&records).save(output)?;
    info!("wrote {}", output.display());
    println!("Plot saved to {}", output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{plot, testing};

    const SAMPLE: &str = "\
Method,Size,Time(ms)
2,1000,0.9
0,1000,0.5
1,10000,0.2
0,100,0.05
1,100,0.002
0,10000,4.8
1,1000,0.02
2,100,0.07
";

    #[test]
    fn labels() {
        assert_eq!(method_label(0), "LAPACK dgbtrf (Band)");
        assert_eq!(method_label(1), "Custom Tridiagonal");
        assert_eq!(method_label(2), "LAPACK dgbsv (Simple Driver)");
        assert_eq!(method_label(7), "Method 7");
    }

    #[test]
    fn parse_sample() -> Result<(), LoadError> {
        let records = parse(SAMPLE.as_bytes())?;
        assert_eq!(records.len(), 8);
        assert_eq!(records[0], Record { method: 2, size: 1000, time_ms: 0.9 });
        Ok(())
    }

    #[test]
    fn parse_tolerates_spaces_and_extra_columns() -> Result<(), LoadError> {
        let input = "Run, Method, Size, Time(ms)\n3, 1, 50, 0.25\n";
        let records = parse(input.as_bytes())?;
        assert_eq!(records, [Record { method: 1, size: 50, time_ms: 0.25 }]);
        Ok(())
    }

    #[test]
    fn parse_errors() {
        assert!(matches!(parse("Method,Size\n0,100\n".as_bytes()),
                         Err(LoadError::MissingColumn("Time(ms)"))));
        assert!(matches!(parse("Method,Size,Time(ms)\n0,big,1.0\n".as_bytes()),
                         Err(LoadError::Csv(_))));
        assert!(matches!(parse("".as_bytes()), Err(LoadError::Empty)));
    }

    #[test]
    fn groups_sorted_by_size() -> Result<(), LoadError> {
        let groups = group_by_method(&parse(SAMPLE.as_bytes())?);
        assert_eq!(groups.keys().copied().collect::<Vec<_>>(), [0, 1, 2]);
        for group in groups.values() {
            assert!(group.windows(2).all(|w| w[0].size <= w[1].size));
        }
        let times: Vec<_> = groups[&0].iter().map(|r| r.time_ms).collect();
        assert_eq!(times, [0.05, 0.5, 4.8]);
        Ok(())
    }

    #[test]
    fn chart_has_one_series_per_method() -> Result<(), LoadError> {
        let chart = chart(&parse(SAMPLE.as_bytes())?);
        assert_eq!(chart.labels().collect::<Vec<_>>(),
                   ["LAPACK dgbtrf (Band)", "Custom Tridiagonal",
                    "LAPACK dgbsv (Simple Driver)"]);
        assert_eq!((chart.x_scale, chart.y_scale), (Scale::Log, Scale::Log));
        let custom = &chart.series[1];
        assert_eq!(custom.x, [100., 1000., 10000.]);
        assert_eq!(custom.y, [0.002, 0.02, 0.2]);
        assert!(chart.series.iter().all(|s| s.marker == Some(Marker::Circle)));
        Ok(())
    }

    #[test]
    fn header_only_gives_empty_chart() -> Result<(), LoadError> {
        let chart = chart(&parse("Method,Size,Time(ms)\n".as_bytes())?);
        assert!(chart.series.is_empty());
        Ok(())
    }

    #[test]
    fn missing_input_writes_nothing() {
        let input = testing::scratch("no_benchmark_results.txt");
        let output = testing::scratch("missing_benchmark_plot.png");
        let err = run(&input, &output).unwrap_err();
        assert_eq!(err.exit_code(), 3);
        assert_eq!(err.to_string(),
                   format!("Error: File '{}' not found.\n{}",
                           input.display(), MISSING_HINT));
        assert!(!output.exists());
    }

    #[test]
    fn malformed_input() {
        let input = testing::write("bad_benchmark.txt", "Method;Size\n0;1\n");
        let output = testing::scratch("bad_benchmark_plot.png");
        let err = run(&input, &output).unwrap_err();
        assert_eq!(err.exit_code(), 4);
        assert!(err.to_string().starts_with("Error reading CSV: "));
        assert!(!output.exists());
    }

    #[test]
    fn run_writes_png() {
        let input = testing::write("benchmark_results.txt", SAMPLE);
        let output = testing::scratch("benchmark_plot.png");
        match run(&input, &output) {
            Err(Failure::Render(plot::Error::NoMatplotlib)) => (),
            r => {
                assert!(r.is_ok(), "{:?}", r);
                assert!(output.exists());
            }
        }
    }
}
