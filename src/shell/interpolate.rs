//! `${name}` placeholders in template handlers
//!
//! Values come only from the parsed arguments of the running command.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::HashMap;

static PLACEHOLDER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{([^}]+)\}").expect("placeholder pattern"));

/// Replace every `${name}` that has a value; unknown placeholders stay as written.
///
/// Substitution is a single pass, so a value containing `${...}` is not expanded again.
pub fn interpolate(template: &str, vars: &HashMap<String, String>) -> String {
    PLACEHOLDER_REGEX
        .replace_all(template, |caps: &Captures| match vars.get(&caps[1]) {
            Some(value) => value.clone(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// Names referenced by `${...}` placeholders, in order of appearance
pub fn placeholders(template: &str) -> Vec<&str> {
    PLACEHOLDER_REGEX
        .captures_iter(template)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect()
}
