//! Error types for cmdshell

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for shell operations
pub type Result<T> = std::result::Result<T, ShellError>;

/// Main error type for cmdshell
#[derive(Error, Debug)]
pub enum ShellError {
    /// Malformed argument declarations
    #[error("Invalid declaration: {0}")]
    Declaration(#[from] DeclarationError),

    /// Token stream did not fit a command's declarations
    #[error("{0}")]
    Parse(#[from] ParseError),

    /// Command tree mutations that would break lookup
    #[error("Registration error: {0}")]
    Registration(#[from] RegistrationError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// No command matched the first token
    #[error("Unknown command '{0}'")]
    UnknownCommand(String),

    /// A registered handler failed
    #[error("Command '{command}' failed: {error}")]
    Handler {
        command: String,
        #[source]
        error: anyhow::Error,
    },

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Construction-time rejection of an argument declaration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeclarationError {
    #[error("Flag '{0}' is not a valid parameter")]
    InvalidShortFlag(String),

    #[error("longFlag cannot be empty")]
    EmptyLongFlag,

    #[error("'{0}' is not a valid key for a positional argument")]
    InvalidPositionalKey(String),

    #[error("Positional argument '{0}' cannot be a boolean")]
    BooleanPositional(String),

    #[error("LongFlag '{0}' is not a valid parameter")]
    InvalidLongFlag(String),

    #[error("Type '{0}' is not a valid argument type, use int, string or bool")]
    UnknownKind(String),
}

/// Failures while interpreting a token stream against declarations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid argument {token}")]
    UnrecognizedArgument { token: String },

    #[error("String {token} is not a valid integer for argument '{key}'")]
    InvalidIntegerValue { token: String, key: String },

    #[error("Parameter '{flag}' is missing a value")]
    MissingValue { flag: String },

    #[error("{key} is a required argument")]
    MissingRequiredArgument { key: String },

    #[error("There cannot be multiple instances of {key}")]
    DuplicateArgument { key: String },

    #[error("Argument '{key}' requires a value")]
    EmptyValue { key: String },
}

/// Command tree registration errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("alias conflict: '{alias}' refers to both '{existing}' and '{command}'")]
    AliasCollision {
        alias: String,
        existing: String,
        command: String,
    },

    #[error("argument '{flag}' is declared twice on command '{command}'")]
    DuplicateFlag { flag: String, command: String },
}

/// Configuration file discovery and loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to find config file (searched: {0})")]
    NotFound(String),

    #[error("Failed to read '{path}': {error}")]
    Read { path: PathBuf, error: io::Error },

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Command '{command}': {error}")]
    Declaration {
        command: String,
        error: DeclarationError,
    },

    #[error("Command '{command}': {error}")]
    Registration {
        command: String,
        error: RegistrationError,
    },

    #[error("Command '{command}': template uses '${{{name}}}' but no argument is named '{name}'")]
    UnknownPlaceholder { command: String, name: String },
}

/// Specialized result type for argument declarations
pub type DeclarationResult<T> = std::result::Result<T, DeclarationError>;

/// Specialized result type for argument parsing
pub type ParseResult<T> = std::result::Result<T, ParseError>;

/// Specialized result type for tree registration
pub type RegistrationResult<T> = std::result::Result<T, RegistrationError>;

/// Specialized result type for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Whether an error comes from user input rather than from how the shell was built.
///
/// Input errors are worth a usage hint; build errors are bugs in the host.
pub fn is_input_error(err: &ShellError) -> bool {
    matches!(err, ShellError::Parse(_) | ShellError::UnknownCommand(_))
}
