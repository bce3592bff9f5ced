//! Command implementations

pub mod check;
pub mod coverage;
pub mod simple;

pub use check::{CheckError, CheckResult, check_guess};
pub use coverage::{CoverageReport, CoverageRow, run_coverage};
pub use simple::run_simple;
