//! Command tree registration and resolution

use crate::command::argument::Argument;
use crate::command::token::Token;
use crate::error::{RegistrationError, RegistrationResult};
use crate::shell::Context;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

/// Name of the built-in help command; a lone `help` child is not a subcommand for display.
pub const HELP_COMMAND: &str = "help";

/// Function invoked with the parsed arguments of a resolved command
pub type Handler = Arc<dyn Fn(&mut Context<'_>) -> anyhow::Result<()> + Send + Sync>;

/// A node in the command tree
///
/// Children are keyed by name and iterate in lexicographic order. Argument
/// declarations keep their registration order, which is the order positional
/// tokens are assigned in; `flag_index` only speeds up flag lookup.
#[derive(Clone, Default)]
pub struct Command {
    name: String,
    aliases: Vec<String>,
    help: String,
    long_help: String,
    handler: Option<Handler>,
    children: BTreeMap<String, Command>,
    arguments: Vec<Argument>,
    flag_index: HashMap<String, usize>,
}

impl Command {
    pub fn new(name: impl Into<String>) -> Self {
        Command {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases.extend(aliases.into_iter().map(Into::into));
        self
    }

    /// One-line help shown in the parent's command listing
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = help.into();
        self
    }

    /// Longer help shown when this command's own help is requested
    pub fn with_long_help(mut self, long_help: impl Into<String>) -> Self {
        self.long_help = long_help.into();
        self
    }

    pub fn with_handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&mut Context<'_>) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.handler = Some(Arc::new(handler));
        self
    }

    /// Builder form of [`Command::add_argument`]
    pub fn with_argument(mut self, arg: Argument) -> RegistrationResult<Self> {
        self.add_argument(arg)?;
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn help(&self) -> &str {
        &self.help
    }

    pub fn long_help(&self) -> &str {
        &self.long_help
    }

    pub fn handler(&self) -> Option<&Handler> {
        self.handler.as_ref()
    }

    /// Declarations in registration order
    pub fn arguments(&self) -> &[Argument] {
        &self.arguments
    }

    /// Append a declaration. Its index is its position in [`Command::arguments`].
    ///
    /// Fails if its long or short flag is already declared on this command.
    pub fn add_argument(&mut self, arg: Argument) -> RegistrationResult<()> {
        let index = self.arguments.len();
        let keys: Vec<String> = std::iter::once(arg.long_flag())
            .chain(arg.short_flag())
            .map(str::to_string)
            .collect();

        if let Some(taken) = keys.iter().find(|k| self.flag_index.contains_key(*k)) {
            return Err(RegistrationError::DuplicateFlag {
                flag: taken.clone(),
                command: self.name.clone(),
            });
        }

        for key in keys {
            self.flag_index.insert(key, index);
        }
        self.arguments.push(arg);
        Ok(())
    }

    /// Index of the declaration a flag token names.
    ///
    /// Long tokens only match long flags and short tokens only short flags;
    /// bare tokens never match.
    pub fn find_flag(&self, token: Token<'_>) -> Option<usize> {
        let index = match token {
            Token::Long(s) => *self.flag_index.get(s)?,
            Token::Short(s) => *self.flag_index.get(s)?,
            Token::Bare(_) => return None,
        };

        let arg = &self.arguments[index];
        let matches = match token {
            Token::Long(s) => !arg.is_positional() && arg.long_flag() == s,
            Token::Short(s) => arg.short_flag() == Some(s),
            Token::Bare(_) => false,
        };
        matches.then_some(index)
    }

    /// Insert `child` under its name, returning any command it replaced.
    ///
    /// A name already in use is overwritten. An alias that collides with a
    /// sibling's name or alias is rejected.
    pub fn add_child(&mut self, child: Command) -> RegistrationResult<Option<Command>> {
        for sibling in self.children.values() {
            if sibling.name == child.name {
                continue;
            }
            if sibling.aliases.iter().any(|a| *a == child.name) {
                return Err(RegistrationError::AliasCollision {
                    alias: child.name.clone(),
                    existing: sibling.name.clone(),
                    command: child.name.clone(),
                });
            }
            if let Some(alias) = child
                .aliases
                .iter()
                .find(|a| **a == sibling.name || sibling.aliases.contains(a))
            {
                return Err(RegistrationError::AliasCollision {
                    alias: alias.clone(),
                    existing: sibling.name.clone(),
                    command: child.name.clone(),
                });
            }
        }

        tracing::debug!(parent = %self.name, child = %child.name, "registering command");
        Ok(self.children.insert(child.name.clone(), child))
    }

    /// Remove a child by exact name (aliases are not consulted)
    pub fn delete_child(&mut self, name: &str) -> Option<Command> {
        self.children.remove(name)
    }

    /// Child with this exact name
    pub fn child(&self, name: &str) -> Option<&Command> {
        self.children.get(name)
    }

    /// Child whose name or one of whose aliases equals `token`
    pub fn find_child(&self, token: &str) -> Option<&Command> {
        if let Some(cmd) = self.children.get(token) {
            return Some(cmd);
        }
        self.children
            .values()
            .find(|cmd| cmd.aliases.iter().any(|a| a == token))
    }

    /// Children ordered by name
    pub fn children_sorted(&self) -> Vec<&Command> {
        self.children.values().collect()
    }

    /// Whether there is anything to list under `Commands:` in help output
    pub fn has_displayable_subcommands(&self) -> bool {
        match self.children.len() {
            0 => false,
            1 => !self.children.contains_key(HELP_COMMAND),
            _ => true,
        }
    }

    /// Walk `tokens` down the tree one child per token.
    ///
    /// Returns the deepest matched command (`None` if the first token matches
    /// no child) and the tokens from the first unmatched one on.
    pub fn resolve<'t, S: AsRef<str>>(&self, tokens: &'t [S]) -> (Option<&Command>, &'t [S]) {
        let mut current = self;
        let mut matched = None;

        for (i, token) in tokens.iter().enumerate() {
            match current.find_child(token.as_ref()) {
                Some(child) => {
                    current = child;
                    matched = Some(child);
                }
                None => {
                    tracing::debug!(
                        command = matched.map(|c: &Command| c.name.as_str()),
                        remaining = tokens.len() - i,
                        "resolved command"
                    );
                    return (matched, &tokens[i..]);
                }
            }
        }

        (matched, &tokens[tokens.len()..])
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("aliases", &self.aliases)
            .field("help", &self.help)
            .field("handler", &self.handler.is_some())
            .field("arguments", &self.arguments)
            .field("children", &self.children.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::ArgKind;

    fn new_cmd(name: &str, help: &str) -> Command {
        Command::new(name).with_help(help)
    }

    #[test]
    fn test_add_command() {
        let mut cmd = new_cmd("root", "");
        assert_eq!(cmd.children_sorted().len(), 0);
        cmd.add_child(new_cmd("child", "")).unwrap();
        assert_eq!(cmd.children_sorted().len(), 1);
    }

    #[test]
    fn test_delete_command() {
        let mut cmd = new_cmd("root", "");
        cmd.add_child(new_cmd("child", "")).unwrap();
        assert!(cmd.delete_child("child").is_some());
        assert!(cmd.children_sorted().is_empty());
        assert!(cmd.delete_child("child").is_none());
    }

    #[test]
    fn test_delete_by_alias_is_noop() {
        let mut cmd = new_cmd("root", "");
        cmd.add_child(new_cmd("child", "").with_aliases(["c"])).unwrap();
        assert!(cmd.delete_child("c").is_none());
        assert!(cmd.child("child").is_some());
    }

    #[test]
    fn test_last_registration_wins() {
        let mut cmd = new_cmd("root", "");
        cmd.add_child(new_cmd("child", "first")).unwrap();
        let replaced = cmd.add_child(new_cmd("child", "second")).unwrap();
        assert_eq!(replaced.map(|c| c.help), Some("first".to_string()));
        assert_eq!(cmd.child("child").unwrap().help(), "second");
    }

    #[test]
    fn test_replacing_command_may_keep_its_aliases() {
        let mut cmd = new_cmd("root", "");
        cmd.add_child(new_cmd("child", "").with_aliases(["c"])).unwrap();
        cmd.add_child(new_cmd("child", "").with_aliases(["c"])).unwrap();
        assert_eq!(cmd.find_child("c").unwrap().name(), "child");
    }

    #[test]
    fn test_alias_collisions_rejected() {
        let mut cmd = new_cmd("root", "");
        cmd.add_child(new_cmd("alpha", "").with_aliases(["a"])).unwrap();

        let err = cmd
            .add_child(new_cmd("beta", "").with_aliases(["a"]))
            .unwrap_err();
        assert!(matches!(err, RegistrationError::AliasCollision { .. }));

        let err = cmd
            .add_child(new_cmd("gamma", "").with_aliases(["alpha"]))
            .unwrap_err();
        assert!(matches!(err, RegistrationError::AliasCollision { .. }));

        let err = cmd.add_child(new_cmd("a", "")).unwrap_err();
        assert!(err.to_string().contains("alias conflict"));

        assert_eq!(cmd.children_sorted().len(), 1);
    }

    #[test]
    fn test_children_sorted() {
        let mut cmd = new_cmd("root", "");
        cmd.add_child(new_cmd("child2", "")).unwrap();
        cmd.add_child(new_cmd("child1", "")).unwrap();
        cmd.add_child(new_cmd("a-child", "")).unwrap();
        let names: Vec<&str> = cmd.children_sorted().iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["a-child", "child1", "child2"]);
    }

    #[test]
    fn test_has_displayable_subcommands() {
        let mut cmd = new_cmd("root", "");
        assert!(!cmd.has_displayable_subcommands());

        cmd.add_child(new_cmd(HELP_COMMAND, "")).unwrap();
        assert!(!cmd.has_displayable_subcommands());

        cmd.add_child(new_cmd("child", "")).unwrap();
        assert!(cmd.has_displayable_subcommands());

        cmd.delete_child(HELP_COMMAND);
        assert!(cmd.has_displayable_subcommands());
    }

    #[test]
    fn test_resolve_nested() {
        let mut sub = new_cmd("sub", "");
        sub.add_child(new_cmd("leaf", "")).unwrap();
        let mut root = new_cmd("root", "");
        root.add_child(sub).unwrap();

        let tokens = ["sub", "leaf", "-x", "1"];
        let (cmd, rest) = root.resolve(&tokens);
        assert_eq!(cmd.map(|c| c.name()), Some("leaf"));
        assert_eq!(rest, &["-x", "1"]);

        let tokens = ["sub", "other"];
        let (cmd, rest) = root.resolve(&tokens);
        assert_eq!(cmd.map(|c| c.name()), Some("sub"));
        assert_eq!(rest, &["other"]);
    }

    #[test]
    fn test_resolve_all_consumed() {
        let mut root = new_cmd("root", "");
        root.add_child(new_cmd("child1", "")).unwrap();
        let tokens = ["child1"];
        let (cmd, rest) = root.resolve(&tokens);
        assert_eq!(cmd.map(|c| c.name()), Some("child1"));
        assert!(rest.is_empty());
    }

    #[test]
    fn test_resolve_unknown_first_token() {
        let mut root = new_cmd("root", "");
        root.add_child(new_cmd("child1", "")).unwrap();
        let tokens = ["child3", "x"];
        let (cmd, rest) = root.resolve(&tokens);
        assert!(cmd.is_none());
        assert_eq!(rest, &["child3", "x"]);
    }

    #[test]
    fn test_resolve_is_case_sensitive() {
        let mut root = new_cmd("root", "");
        root.add_child(new_cmd("child", "")).unwrap();
        let (cmd, _) = root.resolve(&["Child"]);
        assert!(cmd.is_none());
    }

    #[test]
    fn test_duplicate_flag_rejected() {
        let mut cmd = new_cmd("root", "");
        cmd.add_argument(Argument::new("-x", "--test1", ArgKind::Integer, false, false).unwrap())
            .unwrap();

        let err = cmd
            .add_argument(Argument::new("-x", "--test2", ArgKind::String, false, false).unwrap())
            .unwrap_err();
        assert_eq!(
            err,
            RegistrationError::DuplicateFlag {
                flag: "-x".to_string(),
                command: "root".to_string()
            }
        );

        let err = cmd
            .add_argument(Argument::new("", "--test1", ArgKind::String, false, false).unwrap())
            .unwrap_err();
        assert!(matches!(err, RegistrationError::DuplicateFlag { .. }));
        assert_eq!(cmd.arguments().len(), 1);
    }

    #[test]
    fn test_find_flag_respects_token_shape() {
        let cmd = new_cmd("root", "")
            .with_argument(Argument::new("-x", "--test1", ArgKind::Integer, false, false).unwrap())
            .unwrap()
            .with_argument(Argument::new("", "test2", ArgKind::String, false, false).unwrap())
            .unwrap();

        assert_eq!(cmd.find_flag(Token::classify("-x")), Some(0));
        assert_eq!(cmd.find_flag(Token::classify("--test1")), Some(0));
        assert_eq!(cmd.find_flag(Token::classify("-y")), None);
        // A positional key is never a flag, whatever its spelling.
        assert_eq!(cmd.find_flag(Token::classify("test2")), None);
    }
}
