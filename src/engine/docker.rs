use std::collections::HashMap;

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use super::exec::run_capture;
use super::{ContainerEngine, ContainerId, RunRequest};

/// [`ContainerEngine`] backed by the `docker` command line client.
pub struct DockerCli;

impl DockerCli {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DockerCli {
    fn default() -> Self {
        Self::new()
    }
}

impl ContainerEngine for DockerCli {
    fn image_present(&self, image: &str) -> Result<bool> {
        let ids = run_capture("docker", &images_args(image))?;
        Ok(!ids.is_empty())
    }

    fn find_container(&self, name: &str) -> Result<Option<ContainerId>> {
        let listing = run_capture("docker", &ps_args())?;
        Ok(find_by_name(&listing, name).map(ContainerId::new))
    }

    fn run(&self, request: &RunRequest) -> Result<ContainerId> {
        let output = run_capture("docker", &run_args(request))?;
        // The id is the last stdout line; pull progress goes to stderr.
        let id = output.lines().last().unwrap_or("").trim();
        if id.is_empty() {
            bail!("docker did not report an id for container `{}`", request.name);
        }
        Ok(ContainerId::new(id))
    }

    fn stop(&self, id: &ContainerId) -> Result<()> {
        run_capture("docker", &stop_args(id.as_str()))?;
        Ok(())
    }

    fn remove(&self, id: &ContainerId) -> Result<()> {
        run_capture("docker", &rm_args(id.as_str()))?;
        Ok(())
    }

    fn ip_address(&self, id: &ContainerId) -> Result<Option<String>> {
        let json = run_capture("docker", &inspect_args(id.as_str()))?;
        ip_from_inspect(&json)
    }

    fn logs(&self, id: &ContainerId) -> Result<String> {
        run_capture("docker", &logs_args(id.as_str()))
    }
}

fn images_args(image: &str) -> Vec<String> {
    vec!["images".into(), "-q".into(), image.into()]
}

fn ps_args() -> Vec<String> {
    vec!["ps".into(), "--format".into(), "{{.ID}}\\t{{.Names}}".into()]
}

fn run_args(request: &RunRequest) -> Vec<String> {
    let mut args = vec![
        "run".to_string(),
        "-d".to_string(),
        "--name".to_string(),
        request.name.clone(),
    ];
    for (host, container) in &request.ports {
        args.push("-p".to_string());
        args.push(format!("{host}:{container}"));
    }
    for (host, container) in &request.binds {
        args.push("-v".to_string());
        args.push(format!("{}:{}", host.display(), container));
    }
    for (key, value) in &request.env {
        args.push("-e".to_string());
        args.push(format!("{key}={value}"));
    }
    args.extend(request.extra_args.iter().cloned());
    args.push(request.image.clone());
    args
}

fn stop_args(id: &str) -> Vec<String> {
    vec!["stop".into(), id.into()]
}

fn rm_args(id: &str) -> Vec<String> {
    vec!["rm".into(), id.into()]
}

fn inspect_args(id: &str) -> Vec<String> {
    vec!["inspect".into(), id.into()]
}

fn logs_args(id: &str) -> Vec<String> {
    vec!["logs".into(), id.into()]
}

/// Pick the id of the container whose name matches exactly.
///
/// `docker ps` prints one line per container and a container may carry
/// several comma-separated names. A substring match (`arangodb-app`
/// against `arangodb-app2`) must not count.
fn find_by_name(listing: &str, name: &str) -> Option<String> {
    for line in listing.lines() {
        let Some((id, names)) = line.split_once('\t') else {
            continue;
        };
        if names.split(',').any(|candidate| candidate.trim() == name) {
            return Some(id.trim().to_string());
        }
    }
    None
}

#[derive(Deserialize)]
struct InspectEntry {
    #[serde(rename = "NetworkSettings")]
    network_settings: Option<NetworkSettings>,
}

#[derive(Deserialize)]
struct NetworkSettings {
    #[serde(rename = "IPAddress")]
    ip_address: Option<String>,
    #[serde(rename = "Networks", default)]
    networks: HashMap<String, Network>,
}

#[derive(Deserialize)]
struct Network {
    #[serde(rename = "IPAddress")]
    ip_address: Option<String>,
}

/// Container address from `docker inspect` output.
///
/// The top-level `IPAddress` is only populated on the default bridge
/// network; a container attached to a user-defined network reports its
/// address under `Networks` instead.
fn ip_from_inspect(json: &str) -> Result<Option<String>> {
    let entries: Vec<InspectEntry> =
        serde_json::from_str(json).context("unexpected `docker inspect` output")?;
    let Some(settings) = entries.into_iter().next().and_then(|e| e.network_settings) else {
        return Ok(None);
    };

    if let Some(ip) = settings.ip_address.filter(|ip| !ip.is_empty()) {
        return Ok(Some(ip));
    }
    Ok(settings
        .networks
        .into_values()
        .filter_map(|network| network.ip_address)
        .find(|ip| !ip.is_empty()))
}
