//! Binary interface
//!
//! This module handles the `cmdshell` binary's own options and runs one
//! command line against a configured command tree.

pub mod app;

// Re-export main types
pub use app::*;
