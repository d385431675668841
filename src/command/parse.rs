//! Argument parsing against a command's declarations
//!
//! Parsing runs in three steps:
//! 1. short-flag clusters are expanded (`-yz` -> `-y`, `-z`);
//! 2. tokens are consumed left to right, matching flags, flag values and
//!    positionals;
//! 3. occurrence counts are checked for required and single-valued
//!    declarations.
//!
//! All per-call state lives in [`ParseState`], so one command can be used to
//! parse many inputs concurrently.

use crate::command::argument::{ArgKind, Argument, ParsedArgument};
use crate::command::token::{expand_short_clusters, Token};
use crate::command::tree::Command;
use crate::error::{ParseError, ParseResult};

/// Scan state for one `parse_args` call
#[derive(Debug)]
struct ParseState {
    /// Occurrences seen so far per declaration index
    mask: Vec<usize>,
    /// A value-taking flag waiting for its value token
    pending: Option<ParsedArgument>,
    parsed: Vec<ParsedArgument>,
}

impl ParseState {
    fn new(declarations: usize) -> Self {
        ParseState {
            mask: vec![0; declarations],
            pending: None,
            parsed: Vec::new(),
        }
    }

    fn emit(&mut self, occurrence: ParsedArgument) {
        tracing::trace!(key = %occurrence.key, value = %occurrence.value, "parsed argument");
        self.mask[occurrence.index] += 1;
        self.parsed.push(occurrence);
    }
}

impl Command {
    /// Parse the tokens left over after resolution into typed occurrences.
    ///
    /// Occurrences are returned in the order their tokens were consumed.
    /// Parsing stops at the first error.
    pub fn parse_args<S: AsRef<str>>(&self, tokens: &[S]) -> ParseResult<Vec<ParsedArgument>> {
        let tokens = expand_short_clusters(tokens);
        let declarations = self.arguments();
        let mut state = ParseState::new(declarations.len());

        for raw in &tokens {
            let token = Token::classify(raw);

            if let Some(index) = self.find_flag(token) {
                let arg = &declarations[index];
                // A boolean leaves any pending flag waiting; a value-taking
                // flag replaces it.
                let occurrence = ParsedArgument::for_declaration(index, arg);
                if arg.kind().takes_value() {
                    state.pending = Some(occurrence);
                } else {
                    state.emit(occurrence);
                }
                continue;
            }

            if let Some(mut occurrence) = state.pending.take() {
                check_value(raw, occurrence.kind, &occurrence.key)?;
                occurrence.value = raw.clone();
                state.emit(occurrence);
                continue;
            }

            let Some(index) = find_positional(declarations, &state.mask) else {
                return Err(ParseError::UnrecognizedArgument { token: raw.clone() });
            };
            let arg = &declarations[index];
            check_value(raw, arg.kind(), arg.long_flag())?;

            let mut occurrence = ParsedArgument::for_declaration(index, arg);
            occurrence.value = raw.clone();
            state.emit(occurrence);
        }

        if let Some(pending) = state.pending {
            return Err(ParseError::MissingValue { flag: pending.key });
        }

        validate(declarations, &state.mask, &state.parsed)?;

        tracing::debug!(
            command = %self.name(),
            occurrences = state.parsed.len(),
            "parsed arguments"
        );
        Ok(state.parsed)
    }
}

/// First positional, in declaration order, that is still empty or takes many values
fn find_positional(declarations: &[Argument], mask: &[usize]) -> Option<usize> {
    declarations
        .iter()
        .enumerate()
        .find(|(i, arg)| arg.is_positional() && (mask[*i] == 0 || arg.can_have_multiple()))
        .map(|(i, _)| i)
}

/// Integer arguments must get a base-10 integer
fn check_value(value: &str, kind: ArgKind, key: &str) -> ParseResult<()> {
    if kind == ArgKind::Integer && value.parse::<i64>().is_err() {
        return Err(ParseError::InvalidIntegerValue {
            token: value.to_string(),
            key: key.to_string(),
        });
    }
    Ok(())
}

/// Check required and single-valued declarations against the final counts
fn validate(
    declarations: &[Argument],
    mask: &[usize],
    parsed: &[ParsedArgument],
) -> ParseResult<()> {
    if let Some(empty) = parsed
        .iter()
        .find(|p| p.kind.takes_value() && p.value.is_empty())
    {
        return Err(ParseError::EmptyValue {
            key: empty.key.clone(),
        });
    }

    for (arg, &count) in declarations.iter().zip(mask) {
        if arg.is_required() && count == 0 {
            return Err(ParseError::MissingRequiredArgument {
                key: arg.long_flag().to_string(),
            });
        }
        if !arg.can_have_multiple() && count > 1 {
            return Err(ParseError::DuplicateArgument {
                key: arg.long_flag().to_string(),
            });
        }
    }

    Ok(())
}
