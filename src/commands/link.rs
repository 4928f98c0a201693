use anyhow::{Context, Result, anyhow};
use tracing::warn;

use crate::config::Settings;
use crate::engine::ContainerEngine;
use crate::orchestrator::ConfigStore;
use crate::service;

/// Link an application to its running service container and register the
/// connection URL on it.
pub(super) fn link(
    settings: &Settings,
    engine: &dyn ContainerEngine,
    store: &dyn ConfigStore,
    app: &str,
) -> Result<String> {
    let name = service::container_name(app);
    let id = engine.find_container(&name)?.ok_or_else(|| {
        anyhow!("no running container `{name}`; create it with arangodb-plugin:create {app}")
    })?;

    // The password only shows up in the logs of a first boot. Linking a
    // pre-existing database still works, just without credentials.
    let logs = match engine.logs(&id) {
        Ok(logs) => logs,
        Err(err) => {
            warn!(container = %name, "could not read container logs: {err:#}");
            String::new()
        }
    };
    let password = service::parse_generated_password(&logs);
    if password.is_none() {
        warn!(container = %name, "no generated root password in the logs; linking without credentials");
    }

    let ip = engine
        .ip_address(&id)?
        .ok_or_else(|| anyhow!("container `{name}` has no network address"))?;
    let url = service::connection_url(&ip, settings.service.port, password.as_deref());

    store
        .create_link(app, &name)
        .with_context(|| format!("could not link {app} to {name}"))?;
    store
        .set(app, service::ENV_KEY, &url)
        .with_context(|| format!("could not register {} for {app}", service::ENV_KEY))?;

    Ok(format!("{app} linked to {name}\nENV: {}", service::ENV_KEY))
}

/// Undo a link. Nothing here is fatal: unlink is cleanup, and the pieces
/// may already be gone.
pub(super) fn unlink(store: &dyn ConfigStore, app: &str) -> Result<String> {
    let name = service::container_name(app);

    if let Err(err) = store.delete_link(app, &name) {
        warn!(app, "could not remove the link: {err:#}");
    }
    if let Err(err) = store.unset(app, service::ENV_KEY) {
        warn!(app, "could not unregister {}: {err:#}", service::ENV_KEY);
    }

    Ok(format!("{app} unlinked from {name}"))
}
