// Orchestrator seam. Configuration keys and container links are pushed
// back into Dokku through the `ConfigStore` trait.

mod dokku;

use anyhow::Result;

pub use dokku::DokkuCli;

/// Application-level state the plugin registers with the orchestrator.
pub trait ConfigStore {
    /// Set `key=value` on the application's environment.
    fn set(&self, app: &str, key: &str, value: &str) -> Result<()>;

    /// Remove `key` from the application's environment.
    fn unset(&self, app: &str, key: &str) -> Result<()>;

    /// Record a link between the application and a service container.
    fn create_link(&self, app: &str, service: &str) -> Result<()>;

    /// Remove a previously recorded link.
    fn delete_link(&self, app: &str, service: &str) -> Result<()>;
}
