//! Command tree and argument parsing
//!
//! A [`Command`] owns its subcommands and an ordered list of [`Argument`]
//! declarations. [`Command::resolve`] walks a token list down the tree, and
//! [`Command::parse_args`] turns the leftover tokens into [`ParsedArgument`]s.

pub mod argument;
pub mod help;
pub mod parse;
pub mod token;
pub mod tree;

// Re-export main types
pub use argument::*;
pub use token::*;
pub use tree::*;
