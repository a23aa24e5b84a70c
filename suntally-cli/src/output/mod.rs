//! Report output for CLI.

pub mod csv;
