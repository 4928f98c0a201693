use anyhow::{Context, Result};
use tracing::warn;

use super::stop_service_container;
use crate::config::Settings;
use crate::engine::ContainerEngine;
use crate::orchestrator::ConfigStore;
use crate::service;

/// Tear down the service container, its data directory and the registered
/// configuration key.
///
/// Teardown keeps going past individual failures so a half-broken engine
/// cannot strand the data directory; whatever failed is reported at the
/// end. Deleting a service that never existed is a no-op.
pub(super) fn run(
    settings: &Settings,
    engine: &dyn ContainerEngine,
    store: &dyn ConfigStore,
    app: &str,
) -> Result<String> {
    let name = service::container_name(app);

    if let Err(err) = stop_service_container(engine, &name, true) {
        warn!(container = %name, "could not stop the service container: {err:#}");
    }

    let data_dir = service::data_dir(&settings.dokku_root, app);
    let removed = service::remove_data_dir(&data_dir);
    let unset = store.unset(app, service::ENV_KEY);

    removed?;
    unset.with_context(|| format!("could not unregister {} for {app}", service::ENV_KEY))?;

    Ok(format!("Container deleted: {name}"))
}
