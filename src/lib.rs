//! Comparison charts for the results of a Poisson 1D solver.
//!
//! Two command line tools are built on this crate:
//!
//! - `plot_benchmark [input]` draws the execution time of the direct
//!   solvers against the matrix size (log-log) into
//!   `benchmark_plot.png`, see [`benchmark`];
//! - `plot_convergence file1 label1 [file2 label2 ...]` overlays the
//!   residual histories of iterative solvers into
//!   `convergence_comparison.png`, see [`convergence`].
//!
//! Both assemble a [`chart::Chart`] that is rendered with
//! [Matplotlib][] through the [`plot`] bindings.
//!
//! [Matplotlib]: https://matplotlib.org/

pub mod benchmark;
pub mod chart;
pub mod convergence;
pub mod error;
pub mod plot;

#[cfg(test)]
mod testing;

pub use error::{Failure, LoadError};
