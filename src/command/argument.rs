//! Argument declarations and parsed occurrences
//!
//! An [`Argument`] describes one accepted argument of a command. It is either
//! a flag (`-x` / `--long-name`) or a positional keyed by a bare name.
//! Declarations are validated when they are built, so an invalid one is
//! never stored on a command.

use crate::command::token::is_long_flag;
use crate::error::{DeclarationError, DeclarationResult};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::str::FromStr;

static SHORT_FLAG_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-[a-zA-Z0-9]$").expect("short flag pattern"));

static LONG_FLAG_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^--[a-zA-Z0-9][a-zA-Z0-9_-]+$").expect("long flag pattern"));

static POSITIONAL_KEY_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9][a-zA-Z0-9_-]+$").expect("positional key pattern"));

/// Value type of an argument
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgKind {
    Integer,
    String,
    Boolean,
}

impl ArgKind {
    /// Whether occurrences of this kind carry a value token
    pub fn takes_value(self) -> bool {
        !matches!(self, ArgKind::Boolean)
    }
}

impl fmt::Display for ArgKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ArgKind::Integer => "int",
            ArgKind::String => "string",
            ArgKind::Boolean => "bool",
        };
        f.write_str(name)
    }
}

impl FromStr for ArgKind {
    type Err = DeclarationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "int" | "integer" => Ok(ArgKind::Integer),
            "string" | "str" => Ok(ArgKind::String),
            "bool" | "boolean" => Ok(ArgKind::Boolean),
            other => Err(DeclarationError::UnknownKind(other.to_string())),
        }
    }
}

/// A validated argument declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    short_flag: Option<String>,
    long_flag: String,
    kind: ArgKind,
    positional: bool,
    can_have_multiple: bool,
    required: bool,
}

impl Argument {
    /// Build a declaration, rejecting anything that could not be matched later.
    ///
    /// `short_flag` is either empty or a dash plus one alphanumeric (`-x`).
    /// `long_flag` is the key: `--name` for a flag, or a bare `name` for a
    /// positional (only when `short_flag` is empty).
    pub fn new(
        short_flag: &str,
        long_flag: &str,
        kind: ArgKind,
        can_have_multiple: bool,
        required: bool,
    ) -> DeclarationResult<Self> {
        if !short_flag.is_empty() && !SHORT_FLAG_REGEX.is_match(short_flag) {
            return Err(DeclarationError::InvalidShortFlag(short_flag.to_string()));
        }
        if long_flag.is_empty() {
            return Err(DeclarationError::EmptyLongFlag);
        }

        let positional = !is_long_flag(long_flag) && short_flag.is_empty();

        if positional {
            if !POSITIONAL_KEY_REGEX.is_match(long_flag) {
                return Err(DeclarationError::InvalidPositionalKey(long_flag.to_string()));
            }
            if kind == ArgKind::Boolean {
                return Err(DeclarationError::BooleanPositional(long_flag.to_string()));
            }
        } else if !(long_flag.len() > 3 && LONG_FLAG_REGEX.is_match(long_flag)) {
            return Err(DeclarationError::InvalidLongFlag(long_flag.to_string()));
        }

        Ok(Argument {
            short_flag: (!short_flag.is_empty()).then(|| short_flag.to_string()),
            long_flag: long_flag.to_string(),
            kind,
            positional,
            can_have_multiple,
            required,
        })
    }

    /// Same as [`Argument::new`], with the kind given by name (`int`, `string`, `bool`).
    pub fn parse_kind(
        short_flag: &str,
        long_flag: &str,
        kind: &str,
        can_have_multiple: bool,
        required: bool,
    ) -> DeclarationResult<Self> {
        let kind = kind.parse::<ArgKind>()?;
        Self::new(short_flag, long_flag, kind, can_have_multiple, required)
    }

    pub fn short_flag(&self) -> Option<&str> {
        self.short_flag.as_deref()
    }

    /// The canonical key, also used as `ParsedArgument::key`
    pub fn long_flag(&self) -> &str {
        &self.long_flag
    }

    /// The key without leading dashes (`--count` -> `count`)
    pub fn name(&self) -> &str {
        self.long_flag.trim_start_matches('-')
    }

    pub fn kind(&self) -> ArgKind {
        self.kind
    }

    pub fn is_positional(&self) -> bool {
        self.positional
    }

    pub fn can_have_multiple(&self) -> bool {
        self.can_have_multiple
    }

    pub fn is_required(&self) -> bool {
        self.required
    }
}

/// One resolved occurrence of a declared argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedArgument {
    /// Index of the declaration on the owning command
    pub index: usize,
    /// The declaration's `long_flag`
    pub key: String,
    pub kind: ArgKind,
    /// Raw value; empty for booleans
    pub value: String,
}

impl ParsedArgument {
    pub(crate) fn for_declaration(index: usize, arg: &Argument) -> Self {
        ParsedArgument {
            index,
            key: arg.long_flag.clone(),
            kind: arg.kind,
            value: String::new(),
        }
    }

    /// Integer value, if this occurrence is an integer argument
    pub fn as_int(&self) -> Option<i64> {
        match self.kind {
            ArgKind::Integer => self.value.parse().ok(),
            _ => None,
        }
    }

    /// The key without leading dashes
    pub fn name(&self) -> &str {
        self.key.trim_start_matches('-')
    }
}
