use std::path::PathBuf;
use std::time::Duration;

/// Root under which Dokku keeps per-application state.
pub const DEFAULT_DOKKU_ROOT: &str = "/home/dokku";

/// Exit status reported for subcommands this plugin does not implement,
/// unless `DOKKU_NOT_IMPLEMENTED_EXIT` overrides it.
pub const DEFAULT_NOT_IMPLEMENTED_EXIT: u8 = 10;

/// Optional plugin configuration file, looked up under the Dokku root.
pub const CONFIG_FILE_NAME: &str = ".arangodb-plugin.yml";

/// Everything a command handler needs to know about its host.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Per-application state lives under this directory.
    pub dokku_root: PathBuf,
    pub service: ServiceConfig,
}

/// How the service container is provisioned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Image reference the container is started from.
    pub image: String,
    /// Database port, published on the host and reported by `info`.
    pub port: u16,
    /// Path inside the container where the database keeps its files.
    pub data_mount: String,
    /// Host data directories are handed to this user after creation.
    pub service_user: String,
    /// Extra arguments spliced into `docker run`, shell-split from the
    /// config file.
    pub extra_run_args: Vec<String>,
    /// How often to re-read the logs while waiting for the generated
    /// root password.
    pub log_poll_attempts: u32,
    pub log_poll_interval: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            image: "arangodb/arangodb".to_string(),
            port: 8529,
            data_mount: "/var/lib/arangodb3".to_string(),
            service_user: "dokku".to_string(),
            extra_run_args: Vec::new(),
            log_poll_attempts: 10,
            log_poll_interval: Duration::from_millis(500),
        }
    }
}
