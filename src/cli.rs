use std::ffi::OsString;

use clap::error::ErrorKind;
use clap::{Parser, Subcommand};

/// Argument surface of the `commands` binary.
///
/// Dokku invokes every plugin's `commands` binary with the raw subcommand
/// as the first argument. Only the `arangodb-plugin:*` family belongs to
/// this plugin; anything else must be answered with the dedicated
/// "not implemented" exit status so Dokku keeps probing other plugins.
#[derive(Debug, Parser)]
#[command(
    name = "commands",
    disable_help_flag = true,
    disable_help_subcommand = true,
    disable_version_flag = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<PluginCommand>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum PluginCommand {
    /// Create the service container for an application.
    #[command(name = "arangodb-plugin:create")]
    Create {
        app: String,
        /// Free-form service label, echoed back in the command output.
        service: Option<String>,
    },

    /// Stop and remove the service container together with its data.
    #[command(name = "arangodb-plugin:delete")]
    Delete { app: String },

    /// Print connection details for a running service container.
    #[command(name = "arangodb-plugin:info")]
    Info { app: String },

    /// Link an application to its service container.
    #[command(name = "arangodb-plugin:link")]
    Link { app: String },

    /// Unlink an application from its service container.
    #[command(name = "arangodb-plugin:unlink")]
    Unlink { app: String },

    /// Display plugin usage.
    #[command(name = "arangodb-plugin:help", alias = "help")]
    Help,

    /// Print a fixed line proving the plugin is wired up.
    #[command(name = "arangodb-plugin:test")]
    Test,
}

/// What the process should do with an argument vector.
#[derive(Debug)]
pub enum Invocation {
    /// One of ours; dispatch it.
    Command(PluginCommand),
    /// Some other plugin's subcommand (or none at all).
    NotImplemented,
    /// One of ours, called incorrectly. The message is clap's rendering.
    UsageError(String),
}

/// Sort an argument vector into one of the three protocol outcomes.
pub fn classify<I, T>(argv: I) -> Invocation
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match Cli::try_parse_from(argv) {
        Ok(Cli { command: Some(command) }) => Invocation::Command(command),
        Ok(Cli { command: None }) => Invocation::NotImplemented,
        Err(err) if err.kind() == ErrorKind::InvalidSubcommand => Invocation::NotImplemented,
        Err(err) => Invocation::UsageError(err.to_string()),
    }
}
