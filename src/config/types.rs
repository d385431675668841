//! Configuration types
//!
//! This module defines the data structures that represent a cmdshell.yml file.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Top-level configuration structure; describes the root command
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    /// Root command name (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Root help text (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,

    /// Longer root help text (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long_help: Option<String>,

    /// Top-level commands by name
    #[serde(default)]
    pub commands: BTreeMap<String, CommandConfig>,
}

/// A command definition
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CommandConfig {
    /// Alternate names
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,

    /// One-line help for the parent's listing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,

    /// Longer help for the command's own help text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long_help: Option<String>,

    /// Argument declarations; order decides positional assignment
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<ArgConfig>,

    /// Template printed when the command runs, with `${name}` placeholders
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub echo: Option<String>,

    /// Subcommands by name
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub commands: BTreeMap<String, CommandConfig>,
}

/// An argument declaration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ArgConfig {
    /// Short flag such as `-n`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short: Option<String>,

    /// `--name` for a flag, bare `name` for a positional
    pub long: String,

    /// Value type: int, string or bool
    #[serde(rename = "type", default = "default_arg_type")]
    pub arg_type: String,

    /// Whether the argument may occur more than once
    #[serde(default)]
    pub multiple: bool,

    /// Whether the argument must occur
    #[serde(default)]
    pub required: bool,
}

fn default_arg_type() -> String {
    "string".to_string()
}
