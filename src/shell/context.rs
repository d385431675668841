//! Handler context
//!
//! The context carries everything a handler needs about one dispatched line:
//! the resolved command, its raw argument tokens, the parsed occurrences and
//! where to write output.

use crate::command::{ArgKind, Command, ParsedArgument};
use std::collections::HashMap;
use std::io::{self, Write};

/// Verbosity levels for output
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Verbosity {
    Silent = 0,
    Quiet = 1,
    #[default]
    Normal = 2,
    Verbose = 3,
}

/// State handed to a command handler
pub struct Context<'a> {
    /// The command being run
    pub command: &'a Command,

    /// Tokens after the command path, before parsing
    pub args: Vec<String>,

    /// Parsed occurrences, in input order
    pub parsed: Vec<ParsedArgument>,

    /// Verbosity level
    pub verbosity: Verbosity,

    root: &'a Command,
    out: &'a mut dyn Write,
}

impl<'a> Context<'a> {
    pub fn new(root: &'a Command, command: &'a Command, out: &'a mut dyn Write) -> Self {
        Context {
            command,
            args: Vec::new(),
            parsed: Vec::new(),
            verbosity: Verbosity::Normal,
            root,
            out,
        }
    }

    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    pub fn with_parsed(mut self, parsed: Vec<ParsedArgument>) -> Self {
        self.parsed = parsed;
        self
    }

    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Root of the tree the command was resolved from
    pub fn root(&self) -> &'a Command {
        self.root
    }

    fn last(&self, key: &str) -> Option<&ParsedArgument> {
        self.parsed.iter().rev().find(|p| has_key(p, key))
    }

    /// Last value given for `key` (`--count` or `count`)
    pub fn get(&self, key: &str) -> Option<&str> {
        self.last(key).map(|p| p.value.as_str())
    }

    /// Every value given for `key`, in input order
    pub fn get_all(&self, key: &str) -> Vec<&str> {
        self.parsed
            .iter()
            .filter(|p| has_key(p, key))
            .map(|p| p.value.as_str())
            .collect()
    }

    /// Last value for `key` as an integer
    pub fn get_int(&self, key: &str) -> Option<i64> {
        self.last(key).and_then(ParsedArgument::as_int)
    }

    /// Whether `key` occurred at all; the way to read boolean flags
    pub fn is_present(&self, key: &str) -> bool {
        self.last(key).is_some()
    }

    /// Parsed values by name, for template interpolation.
    ///
    /// Booleans read `true`, repeated values are joined with a space.
    pub fn vars(&self) -> HashMap<String, String> {
        let mut vars: HashMap<String, String> = HashMap::new();
        for p in &self.parsed {
            let value = match p.kind {
                ArgKind::Boolean => "true",
                _ => p.value.as_str(),
            };
            vars.entry(p.name().to_string())
                .and_modify(|v| {
                    v.push(' ');
                    v.push_str(value);
                })
                .or_insert_with(|| value.to_string());
        }
        vars
    }

    /// Write to the command output
    pub fn print(&mut self, text: &str) -> io::Result<()> {
        self.out.write_all(text.as_bytes())
    }

    /// Write a line to the command output
    pub fn println(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{}", text)
    }

    /// Print debug message (only in verbose mode)
    pub fn print_debug(&self, message: &str) {
        if self.verbosity >= Verbosity::Verbose {
            eprintln!("[DEBUG] {}", message);
        }
    }
}

fn has_key(parsed: &ParsedArgument, key: &str) -> bool {
    parsed.key == key || parsed.name() == key
}
