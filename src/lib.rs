//! cmdshell - command trees and typed argument parsing for line-oriented shells
//!
//! A host registers a tree of [`Command`]s, each declaring typed
//! [`Argument`]s. A tokenized input line is resolved to the deepest matching
//! command, and the remaining tokens are parsed into [`ParsedArgument`]s
//! before the command's handler runs.

// Public modules
pub mod cli;
pub mod command;
pub mod config;
pub mod error;
pub mod shell;

// Re-export commonly used types
pub use command::{ArgKind, Argument, Command, ParsedArgument};
pub use error::{Result, ShellError};
pub use shell::{Context, Shell, Verbosity};
