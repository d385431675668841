//! Building a command tree from configuration
//!
//! Every declaration goes through [`Argument::parse_kind`] and every child
//! through [`Command::add_child`], so a configured tree obeys the same rules
//! as one built in code.

use crate::command::{Argument, Command};
use crate::config::types::{ArgConfig, CommandConfig, Config};
use crate::error::{ConfigError, ConfigResult, Result};
use crate::shell::{interpolate, placeholders, Shell};

/// Root name used when the configuration has none
pub const DEFAULT_ROOT_NAME: &str = "cmdshell";

/// Build the root command described by `config`
pub fn build_tree(config: &Config) -> ConfigResult<Command> {
    let name = config.name.as_deref().unwrap_or(DEFAULT_ROOT_NAME);
    let mut root = Command::new(name)
        .with_help(config.help.clone().unwrap_or_default())
        .with_long_help(config.long_help.clone().unwrap_or_default());

    for (child_name, child) in &config.commands {
        let command = build_command(child_name, child_name, child)?;
        root.add_child(command)
            .map_err(|error| ConfigError::Registration {
                command: child_name.clone(),
                error,
            })?;
    }

    Ok(root)
}

/// Build a ready-to-dispatch shell from `config`
pub fn build_shell(config: &Config) -> Result<Shell> {
    Shell::from_root(build_tree(config)?)
}

/// Check a configuration without keeping the tree
pub fn validate_config(config: &Config) -> ConfigResult<()> {
    build_tree(config).map(|_| ())
}

fn build_command(path: &str, name: &str, config: &CommandConfig) -> ConfigResult<Command> {
    let mut command = Command::new(name)
        .with_aliases(config.aliases.iter().cloned())
        .with_help(config.help.clone().unwrap_or_default())
        .with_long_help(config.long_help.clone().unwrap_or_default());

    for arg in &config.args {
        let arg = build_argument(arg).map_err(|error| ConfigError::Declaration {
            command: path.to_string(),
            error,
        })?;
        command
            .add_argument(arg)
            .map_err(|error| ConfigError::Registration {
                command: path.to_string(),
                error,
            })?;
    }

    if let Some(template) = &config.echo {
        if let Some(unknown) = placeholders(template)
            .into_iter()
            .find(|p| !command.arguments().iter().any(|a| a.name() == *p))
        {
            return Err(ConfigError::UnknownPlaceholder {
                command: path.to_string(),
                name: unknown.to_string(),
            });
        }

        let template = template.clone();
        command = command.with_handler(move |ctx| {
            let text = interpolate(&template, &ctx.vars());
            ctx.println(&text)?;
            Ok(())
        });
    }

    for (child_name, child) in &config.commands {
        let child_path = format!("{} {}", path, child_name);
        let child = build_command(&child_path, child_name, child)?;
        command
            .add_child(child)
            .map_err(|error| ConfigError::Registration {
                command: child_path,
                error,
            })?;
    }

    Ok(command)
}

fn build_argument(config: &ArgConfig) -> crate::error::DeclarationResult<Argument> {
    Argument::parse_kind(
        config.short.as_deref().unwrap_or(""),
        &config.long,
        &config.arg_type,
        config.multiple,
        config.required,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::ArgKind;
    use crate::config::parse_config;
    use crate::error::{DeclarationError, RegistrationError};

    #[test]
    fn test_build_tree() {
        let config = parse_config(
            r#"
name: demo
help: Demo shell
commands:
  greet:
    aliases: [hi]
    help: Greet someone
    args:
      - long: name
        required: true
      - short: -t
        long: --times
        type: int
    echo: "Hello ${name}"
  remote:
    help: Manage remotes
    commands:
      add:
        help: Add a remote
"#,
        )
        .unwrap();

        let root = build_tree(&config).unwrap();
        assert_eq!(root.name(), "demo");
        assert_eq!(root.help(), "Demo shell");

        let greet = root.find_child("hi").unwrap();
        assert_eq!(greet.name(), "greet");
        assert_eq!(greet.arguments().len(), 2);
        assert!(greet.arguments()[0].is_positional());
        assert_eq!(greet.arguments()[1].kind(), ArgKind::Integer);
        assert!(greet.handler().is_some());

        let (cmd, rest) = root.resolve(&["remote", "add", "origin"]);
        assert_eq!(cmd.map(|c| c.name()), Some("add"));
        assert_eq!(rest, &["origin"]);
    }

    #[test]
    fn test_default_root_name() {
        let root = build_tree(&Config::default()).unwrap();
        assert_eq!(root.name(), DEFAULT_ROOT_NAME);
    }

    #[test]
    fn test_invalid_declaration_names_command() {
        let config = parse_config(
            r#"
commands:
  remote:
    commands:
      add:
        args:
          - long: verbose
            type: bool
"#,
        )
        .unwrap();

        match build_tree(&config) {
            Err(ConfigError::Declaration { command, error }) => {
                assert_eq!(command, "remote add");
                assert_eq!(error, DeclarationError::BooleanPositional("verbose".to_string()));
            }
            other => panic!("expected declaration error, got: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_type_rejected() {
        let config = parse_config(
            r#"
commands:
  calc:
    args:
      - long: --ratio
        type: float
"#,
        )
        .unwrap();

        assert!(matches!(
            build_tree(&config),
            Err(ConfigError::Declaration {
                error: DeclarationError::UnknownKind(_),
                ..
            })
        ));
    }

    #[test]
    fn test_alias_collision_rejected() {
        let config = parse_config(
            r#"
commands:
  list:
    aliases: [ls]
  lsof:
    aliases: [ls]
"#,
        )
        .unwrap();

        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::Registration {
                error: RegistrationError::AliasCollision { .. },
                ..
            })
        ));
    }

    #[test]
    fn test_unknown_placeholder_rejected() {
        let config = parse_config(
            r#"
commands:
  greet:
    echo: "Hello ${nobody}"
"#,
        )
        .unwrap();

        match validate_config(&config) {
            Err(ConfigError::UnknownPlaceholder { command, name }) => {
                assert_eq!(command, "greet");
                assert_eq!(name, "nobody");
            }
            other => panic!("expected placeholder error, got: {other:?}"),
        }
    }

    #[test]
    fn test_build_shell_adds_help() {
        let shell = build_shell(&Config::default()).unwrap();
        assert!(shell.root().child("help").is_some());
    }
}
