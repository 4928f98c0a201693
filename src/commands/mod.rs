// Command handlers. One module per subcommand; the dispatcher resolves
// shared dependencies and returns the text destined for stdout.

mod create;
mod delete;
mod info;
mod link;
mod usage;

use anyhow::Result;

use crate::cli::PluginCommand;
use crate::config::Settings;
use crate::engine::ContainerEngine;
use crate::orchestrator::ConfigStore;

/// Output of `arangodb-plugin:test`. Install checks grep for this line,
/// so it must stay byte-for-byte stable.
pub const TEST_MESSAGE: &str = "triggered arangodb-plugin from: commands";

/// Output for subcommands that consume no settings, engine, or store.
///
/// These must answer even when the plugin config file does not parse.
pub fn standalone_output(command: &PluginCommand) -> Option<String> {
    match command {
        PluginCommand::Help => Some(usage::render()),
        PluginCommand::Test => Some(TEST_MESSAGE.to_string()),
        _ => None,
    }
}

/// Routes parsed subcommands to their handlers.
pub struct Dispatcher<'a> {
    settings: &'a Settings,
    engine: &'a dyn ContainerEngine,
    store: &'a dyn ConfigStore,
}

impl<'a> Dispatcher<'a> {
    pub fn new(
        settings: &'a Settings,
        engine: &'a dyn ContainerEngine,
        store: &'a dyn ConfigStore,
    ) -> Self {
        Self {
            settings,
            engine,
            store,
        }
    }

    /// Execute one subcommand and return what to print on stdout.
    pub fn run(&self, command: &PluginCommand) -> Result<String> {
        match command {
            PluginCommand::Create { app, service } => {
                create::run(self.settings, self.engine, self.store, app, service.as_deref())
            }
            PluginCommand::Delete { app } => {
                delete::run(self.settings, self.engine, self.store, app)
            }
            PluginCommand::Info { app } => info::run(self.settings, self.engine, app),
            PluginCommand::Link { app } => link::link(self.settings, self.engine, self.store, app),
            PluginCommand::Unlink { app } => link::unlink(self.store, app),
            PluginCommand::Help => Ok(usage::render()),
            PluginCommand::Test => Ok(TEST_MESSAGE.to_string()),
        }
    }
}

/// Stop the named container if it is running, optionally removing it.
///
/// A failed stop is an error. A failed removal is logged and swallowed;
/// the daemon keeps the name reserved, so a relaunch under the same name
/// reports the collision itself.
fn stop_service_container(engine: &dyn ContainerEngine, name: &str, remove: bool) -> Result<()> {
    let Some(id) = engine.find_container(name)? else {
        return Ok(());
    };
    engine.stop(&id)?;
    tracing::info!(container = name, %id, "stopped service container");
    if remove
        && let Err(err) = engine.remove(&id)
    {
        tracing::warn!(container = name, "could not remove stopped container: {err:#}");
    }
    Ok(())
}
