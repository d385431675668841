//! Main CLI application

use crate::config::{build_shell, parse_config_auto, parse_config_file};
use crate::error::ShellError;
use crate::shell::{Shell, Verbosity};
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

/// CLI application
pub struct App {
    /// Shell built from the configuration
    shell: Shell,
    /// Config file path
    config_path: PathBuf,
}

impl App {
    /// Create a new app from the discovered configuration file
    pub fn new() -> Result<Self, ShellError> {
        let (config, config_path) = parse_config_auto()?;
        let shell = build_shell(&config)?;
        Ok(App { shell, config_path })
    }

    /// Create app with a specific config file
    pub fn with_config_file(path: PathBuf) -> Result<Self, ShellError> {
        let config = parse_config_file(&path)?;
        let shell = build_shell(&config)?;
        Ok(App {
            shell,
            config_path: path,
        })
    }

    /// Set verbosity level
    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.shell = self.shell.with_verbosity(verbosity);
        self
    }

    pub fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    /// Run one tokenized command line; no tokens prints the root help
    pub fn run<S: AsRef<str>>(&self, tokens: &[S], out: &mut dyn Write) -> Result<(), ShellError> {
        if tokens.is_empty() {
            out.write_all(self.shell.root().help_text().as_bytes())?;
            return Ok(());
        }
        self.shell.dispatch(tokens, out)
    }
}

/// Build the clap command for the binary's own options
pub fn build_cli() -> Command {
    Command::new("cmdshell")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Run commands from a cmdshell.yml command tree")
        .arg(
            Arg::new("file")
                .short('f')
                .long("file")
                .value_name("FILE")
                .value_parser(clap::value_parser!(PathBuf))
                .help("Path to cmdshell.yml config file"),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .help("Only print command output and errors")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("silent")
                .short('s')
                .long("silent")
                .help("Print no diagnostics")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Print verbose output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("tokens")
                .value_name("COMMAND")
                .help("Command path followed by its arguments")
                .num_args(0..)
                .trailing_var_arg(true)
                .allow_hyphen_values(true),
        )
}

/// Get verbosity level from matches
fn get_verbosity(matches: &ArgMatches) -> Verbosity {
    if matches.get_flag("silent") {
        Verbosity::Silent
    } else if matches.get_flag("quiet") {
        Verbosity::Quiet
    } else if matches.get_flag("verbose") {
        Verbosity::Verbose
    } else {
        Verbosity::Normal
    }
}

/// Log filter used when `RUST_LOG` is not set
fn default_log_filter(verbosity: Verbosity) -> &'static str {
    match verbosity {
        Verbosity::Silent => "off",
        Verbosity::Quiet => "error",
        Verbosity::Normal => "warn",
        Verbosity::Verbose => "debug",
    }
}

fn init_tracing(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_log_filter(verbosity)));
    fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .init();
}

/// Run the CLI application with the process arguments
pub fn run() -> Result<(), ShellError> {
    let matches = build_cli().get_matches();
    let verbosity = get_verbosity(&matches);
    init_tracing(verbosity);

    let app = match matches.get_one::<PathBuf>("file") {
        Some(path) => App::with_config_file(path.clone())?,
        None => App::new()?,
    };
    let app = app.with_verbosity(verbosity);
    tracing::debug!(config = %app.config_path().display(), "loaded config");

    let tokens: Vec<String> = matches
        .get_many::<String>("tokens")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    app.run(&tokens, &mut out)?;
    out.flush()?;
    Ok(())
}
