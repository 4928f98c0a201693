use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::warn;

use super::types::{
    CONFIG_FILE_NAME, DEFAULT_DOKKU_ROOT, DEFAULT_NOT_IMPLEMENTED_EXIT, ServiceConfig, Settings,
};

/// Subset of [`ServiceConfig`] an operator may override from the config
/// file. Anything left out keeps its default.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub image: Option<String>,
    pub port: Option<u16>,
    pub data_mount: Option<String>,
    pub service_user: Option<String>,
    pub extra_run_args: Option<String>,
    pub log_poll_attempts: Option<u32>,
    pub log_poll_interval_ms: Option<u64>,
}

impl ConfigFile {
    /// Load overrides from a `.arangodb-plugin.yml` file in the given
    /// directory.
    pub fn load(dir: &std::path::Path) -> Result<Option<Self>> {
        let path = dir.join(CONFIG_FILE_NAME);
        if !path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("could not read {}", path.display()))?;
        let config: ConfigFile = serde_yaml::from_str(&contents)
            .with_context(|| format!("could not parse {}", path.display()))?;
        Ok(Some(config))
    }

    fn apply(self, service: &mut ServiceConfig) -> Result<()> {
        if let Some(image) = self.image {
            service.image = image;
        }
        if let Some(port) = self.port {
            service.port = port;
        }
        if let Some(mount) = self.data_mount {
            service.data_mount = mount;
        }
        if let Some(user) = self.service_user {
            service.service_user = user;
        }
        if let Some(args) = self.extra_run_args {
            service.extra_run_args =
                shell_words::split(&args).context("invalid extra_run_args in plugin config")?;
        }
        if let Some(attempts) = self.log_poll_attempts {
            service.log_poll_attempts = attempts;
        }
        if let Some(ms) = self.log_poll_interval_ms {
            service.log_poll_interval = Duration::from_millis(ms);
        }
        Ok(())
    }
}

impl Settings {
    /// Resolve settings from the process environment and the optional
    /// plugin config file under the Dokku root.
    pub fn load() -> Result<Self> {
        Self::from_root(env::var("DOKKU_ROOT").ok())
    }

    fn from_root(root: Option<String>) -> Result<Self> {
        let dokku_root = root
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DOKKU_ROOT));

        let mut service = ServiceConfig::default();
        if let Some(overrides) = ConfigFile::load(&dokku_root)? {
            overrides.apply(&mut service)?;
        }

        Ok(Self {
            dokku_root,
            service,
        })
    }
}

/// Exit status for subcommands that belong to some other plugin.
///
/// Dokku publishes the expected status in `DOKKU_NOT_IMPLEMENTED_EXIT`; a
/// missing or unparseable value falls back to the conventional 10.
pub fn not_implemented_exit() -> u8 {
    parse_exit_code(env::var("DOKKU_NOT_IMPLEMENTED_EXIT").ok().as_deref())
}

fn parse_exit_code(raw: Option<&str>) -> u8 {
    let Some(raw) = raw else {
        return DEFAULT_NOT_IMPLEMENTED_EXIT;
    };
    match raw.trim().parse() {
        Ok(code) => code,
        Err(_) => {
            warn!(value = raw, "DOKKU_NOT_IMPLEMENTED_EXIT is not an exit code; using the default");
            DEFAULT_NOT_IMPLEMENTED_EXIT
        }
    }
}
