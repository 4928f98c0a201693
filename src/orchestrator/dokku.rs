use anyhow::Result;

use super::ConfigStore;
use crate::engine::exec::run_capture;

/// [`ConfigStore`] backed by the `dokku` command line client.
pub struct DokkuCli;

impl DokkuCli {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DokkuCli {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for DokkuCli {
    fn set(&self, app: &str, key: &str, value: &str) -> Result<()> {
        run_capture("dokku", &config_set_args(app, key, value))?;
        Ok(())
    }

    fn unset(&self, app: &str, key: &str) -> Result<()> {
        run_capture("dokku", &config_unset_args(app, key))?;
        Ok(())
    }

    fn create_link(&self, app: &str, service: &str) -> Result<()> {
        run_capture("dokku", &link_create_args(app, service))?;
        Ok(())
    }

    fn delete_link(&self, app: &str, service: &str) -> Result<()> {
        run_capture("dokku", &link_delete_args(app, service))?;
        Ok(())
    }
}

fn config_set_args(app: &str, key: &str, value: &str) -> Vec<String> {
    vec!["config:set".into(), app.into(), format!("{key}={value}")]
}

fn config_unset_args(app: &str, key: &str) -> Vec<String> {
    vec!["config:unset".into(), app.into(), key.into()]
}

fn link_create_args(app: &str, service: &str) -> Vec<String> {
    vec!["link:create".into(), app.into(), service.into()]
}

fn link_delete_args(app: &str, service: &str) -> Vec<String> {
    vec!["link:delete".into(), app.into(), service.into()]
}
