use std::{path::{Path, PathBuf}, process::ExitCode};
use clap::{Parser, ValueHint};
use poisson_plots::benchmark;

#[derive(Parser, Debug)]
#[command(version, about = "Plot direct solver timings against the matrix size")]
struct Cli {
    /// Benchmark results (CSV with a `Method,Size,Time(ms)` header)
    #[arg(default_value = benchmark::DEFAULT_INPUT, value_hint = ValueHint::FilePath)]
    input: PathBuf,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    match benchmark::run(&cli.input, Path::new(benchmark::OUTPUT)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            println!("{}", e);
            ExitCode::from(e.exit_code())
        }
    }
}
