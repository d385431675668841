//! Running commands
//!
//! This module ties the command tree to handlers: a [`Shell`] resolves a
//! tokenized line, parses its arguments and calls the matched handler with a
//! [`Context`].

pub mod context;
pub mod dispatch;
pub mod interpolate;

// Re-export main types
pub use context::*;
pub use dispatch::*;
pub use interpolate::*;
