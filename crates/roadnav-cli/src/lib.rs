//! roadnav CLI library.
//!
//! Command handlers, output formatting and logging setup for the `roadnav`
//! binary. All routing logic lives in `roadnav-lib`.

pub mod commands;
pub mod logging;
pub mod output;
