use anyhow::Result;

use crate::config::Settings;
use crate::engine::ContainerEngine;
use crate::service;

/// Report where the service container can be reached.
///
/// A missing container is an answer, not an error. The address can lag
/// behind container startup, in which case it reads `unknown`.
pub(super) fn run(settings: &Settings, engine: &dyn ContainerEngine, app: &str) -> Result<String> {
    let name = service::container_name(app);

    let Some(id) = engine.find_container(&name)? else {
        return Ok(format!("Container {name} is not running"));
    };

    let host = engine
        .ip_address(&id)?
        .unwrap_or_else(|| "unknown".to_string());

    Ok(format!(
        "       Host: {host}\n       Private ports: {}",
        settings.service.port
    ))
}
