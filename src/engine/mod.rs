// Container engine seam. Every Docker interaction goes through the
// `ContainerEngine` trait so command handlers can be exercised against an
// in-memory fake.

mod docker;
pub(crate) mod exec;

use std::fmt;
use std::path::PathBuf;

use anyhow::Result;

pub use docker::DockerCli;

/// Opaque container identifier as reported by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerId(String);

impl ContainerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Describes a detached service container. The engine is responsible for
/// assembling the final argument list.
#[derive(Debug, Clone)]
pub struct RunRequest {
    pub name: String,
    pub image: String,
    /// KEY=VALUE pairs exported into the container.
    pub env: Vec<(String, String)>,
    /// Port publications as (host, container) pairs.
    pub ports: Vec<(u16, u16)>,
    /// Bind mounts as (host path, container path) pairs.
    pub binds: Vec<(PathBuf, String)>,
    /// Operator-supplied arguments spliced in ahead of the image.
    pub extra_args: Vec<String>,
}

/// Container operations the command handlers rely on.
pub trait ContainerEngine {
    /// Whether `image` exists in the local image store.
    fn image_present(&self, image: &str) -> Result<bool>;

    /// Id of the running container carrying exactly this name, if any.
    fn find_container(&self, name: &str) -> Result<Option<ContainerId>>;

    /// Start a detached container and return its id.
    fn run(&self, request: &RunRequest) -> Result<ContainerId>;

    fn stop(&self, id: &ContainerId) -> Result<()>;

    fn remove(&self, id: &ContainerId) -> Result<()>;

    /// Address of the container on its network, `None` while it has none.
    fn ip_address(&self, id: &ContainerId) -> Result<Option<String>>;

    /// Everything the container has logged so far.
    fn logs(&self, id: &ContainerId) -> Result<String>;
}
