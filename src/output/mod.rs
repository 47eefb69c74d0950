//! Output formatting for assignment results.
//!
//! - [`summary`] - Summary table of assigned CIDRs
//! - [`terminal`] - Terminal output helpers

mod summary;
mod terminal;

pub use summary::{print_allocation, subnet_sources, write_allocation, Source};
pub use terminal::format_field;
