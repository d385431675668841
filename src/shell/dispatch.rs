//! Line dispatch: resolve, parse, invoke

use crate::command::{ArgKind, Argument, Command, HELP_COMMAND};
use crate::error::{Result, ShellError};
use crate::shell::context::{Context, Verbosity};
use std::io::Write;

/// A command tree ready to run already-tokenized lines
#[derive(Debug, Clone)]
pub struct Shell {
    root: Command,
    verbosity: Verbosity,
}

impl Shell {
    /// Create a shell whose root carries the built-in `help` command
    pub fn new(name: impl Into<String>) -> Result<Self> {
        Self::from_root(Command::new(name))
    }

    /// Wrap an existing tree, adding `help` unless the tree defines its own
    pub fn from_root(mut root: Command) -> Result<Self> {
        if root.child(HELP_COMMAND).is_none() {
            root.add_child(help_command()?)?;
        }
        Ok(Shell {
            root,
            verbosity: Verbosity::Normal,
        })
    }

    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    pub fn root(&self) -> &Command {
        &self.root
    }

    /// Register a top-level command
    pub fn add_command(&mut self, command: Command) -> Result<()> {
        self.root.add_child(command)?;
        Ok(())
    }

    /// Run one tokenized line, writing command output to `out`.
    ///
    /// The deepest command matched by the leading tokens receives the rest as
    /// arguments. When nothing matches, a root handler gets the whole line;
    /// without one the line is an unknown command. A command without a handler
    /// prints its help.
    pub fn dispatch<S: AsRef<str>>(&self, tokens: &[S], out: &mut dyn Write) -> Result<()> {
        let Some(first) = tokens.first() else {
            return Ok(());
        };

        let (command, rest) = match self.root.resolve(tokens) {
            (Some(command), rest) => (command, rest),
            (None, rest) if self.root.handler().is_some() => (&self.root, rest),
            (None, _) => return Err(ShellError::UnknownCommand(first.as_ref().to_string())),
        };

        let parsed = command.parse_args(rest)?;
        let args = rest.iter().map(|s| s.as_ref().to_string()).collect();
        tracing::debug!(command = %command.name(), "dispatching");

        let mut ctx = Context::new(&self.root, command, out)
            .with_args(args)
            .with_parsed(parsed)
            .with_verbosity(self.verbosity);
        ctx.print_debug(&format!("Running command: {}", command.name()));

        match command.handler() {
            Some(handler) => handler(&mut ctx).map_err(|error| ShellError::Handler {
                command: command.name().to_string(),
                error,
            }),
            None => {
                ctx.print(&command.help_text())?;
                Ok(())
            }
        }
    }
}

/// `help [command...]`: help text of the named command, or of the root
fn help_command() -> Result<Command> {
    let command = Command::new(HELP_COMMAND)
        .with_help("display help")
        .with_argument(Argument::new("", "command", ArgKind::String, true, false)?)?
        .with_handler(|ctx| {
            let text = match ctx.root().resolve(&ctx.args) {
                (Some(target), rest) if rest.is_empty() => target.help_text(),
                (_, []) => ctx.root().help_text(),
                (_, rest) => anyhow::bail!("no help for unknown command '{}'", rest.join(" ")),
            };
            ctx.print(&text)?;
            Ok(())
        });
    Ok(command)
}
