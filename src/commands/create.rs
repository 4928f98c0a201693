use anyhow::{Context, Result, bail};
use tracing::{debug, info, warn};

use super::stop_service_container;
use crate::config::{ServiceConfig, Settings};
use crate::engine::{ContainerEngine, ContainerId, RunRequest};
use crate::orchestrator::ConfigStore;
use crate::service;

/// Provision the service container for an application.
///
/// The host data directory is created first and survives container churn,
/// so recreating the service keeps the database. A stale container holding
/// the name is stopped and removed before starting the new one. Once the
/// container is up, failures while recovering the generated password or
/// registering the connection URL do not undo it; the warnings tell the
/// operator what to finish by hand.
pub(super) fn run(
    settings: &Settings,
    engine: &dyn ContainerEngine,
    store: &dyn ConfigStore,
    app: &str,
    service_label: Option<&str>,
) -> Result<String> {
    let name = service::container_name(app);
    let image = &settings.service.image;

    if !engine.image_present(image)? {
        bail!("image `{image}` not found; install it first (dokku plugin:install)");
    }

    // A leftover container would make `docker run` refuse the name.
    stop_service_container(engine, &name, true)?;

    let data_dir = service::data_dir(&settings.dokku_root, app);
    service::ensure_data_dir(&data_dir, &settings.service.service_user)?;

    let request = RunRequest {
        name: name.clone(),
        image: image.clone(),
        env: vec![("ARANGO_RANDOM_ROOT_PASSWORD".to_string(), "1".to_string())],
        ports: vec![(settings.service.port, settings.service.port)],
        binds: vec![(data_dir, settings.service.data_mount.clone())],
        extra_args: settings.service.extra_run_args.clone(),
    };
    let id = engine
        .run(&request)
        .with_context(|| format!("could not start service container `{name}`"))?;
    info!(container = %name, %id, "service container started");

    let password = wait_for_password(engine, &id, &settings.service);
    if password.is_none() {
        warn!("no generated root password in the logs; registering the URL without credentials");
    }
    let registered =
        register_connection_url(engine, store, settings, app, &id, password.as_deref());

    let mut lines = Vec::new();
    if let Some(label) = service_label {
        lines.push(format!("Service: {label}"));
    }
    lines.push(format!("Container created: {name}"));
    if registered {
        lines.push(format!("ENV: {}", service::ENV_KEY));
    }
    Ok(lines.join("\n"))
}

/// Poll the logs until the startup banner shows up.
///
/// The entrypoint needs a moment to generate the password on first boot,
/// and on a reused volume no banner will ever appear, so the wait is
/// bounded.
fn wait_for_password(
    engine: &dyn ContainerEngine,
    id: &ContainerId,
    config: &ServiceConfig,
) -> Option<String> {
    for attempt in 0..config.log_poll_attempts {
        if attempt > 0 {
            std::thread::sleep(config.log_poll_interval);
        }
        match engine.logs(id) {
            Ok(logs) => {
                if let Some(password) = service::parse_generated_password(&logs) {
                    return Some(password);
                }
            }
            Err(err) => debug!("logs not readable yet: {err:#}"),
        }
    }
    None
}

/// Register the connection URL on the application.
///
/// Best-effort: the container is already running, so problems here are
/// reported rather than unwound.
fn register_connection_url(
    engine: &dyn ContainerEngine,
    store: &dyn ConfigStore,
    settings: &Settings,
    app: &str,
    id: &ContainerId,
    password: Option<&str>,
) -> bool {
    let ip = match engine.ip_address(id) {
        Ok(Some(ip)) => ip,
        Ok(None) => {
            warn!(app, "container has no network address yet; skipping URL registration");
            return false;
        }
        Err(err) => {
            warn!(app, "could not inspect the container: {err:#}");
            return false;
        }
    };

    let url = service::connection_url(&ip, settings.service.port, password);
    match store.set(app, service::ENV_KEY, &url) {
        Ok(()) => {
            info!(app, key = service::ENV_KEY, "registered connection URL");
            true
        }
        Err(err) => {
            warn!(app, "could not register {}: {err:#}", service::ENV_KEY);
            false
        }
    }
}
