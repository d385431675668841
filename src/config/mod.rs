//! Configuration parsing and tree building
//!
//! This module handles parsing of cmdshell.yml files and turning them into
//! a command tree.

pub mod parse;
pub mod schema;
pub mod types;

// Re-export main types
pub use parse::*;
pub use schema::*;
pub use types::*;
