//! Terminal output formatting
//!
//! Display utilities for CLI results and the line-mode board.

pub mod display;
pub mod formatters;

pub use display::{
    print_board, print_check_result, print_coverage_report, print_notice, print_outcome,
    print_profile,
};
