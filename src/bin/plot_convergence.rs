use std::{path::Path, process::ExitCode};
use clap::Parser;
use poisson_plots::convergence;

#[derive(Parser, Debug)]
#[command(version, about = "Overlay the residual histories of iterative solvers")]
struct Cli {
    /// Residual files, each followed by its legend label
    #[arg(value_name = "FILE LABEL", allow_hyphen_values = true)]
    args: Vec<String>,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    match convergence::run(&cli.args, Path::new(convergence::OUTPUT)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            println!("{}", e);
            ExitCode::from(e.exit_code())
        }
    }
}
