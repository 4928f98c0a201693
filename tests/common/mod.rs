//! Shared in-memory fakes for exercising command handlers without a
//! Docker daemon or a Dokku installation.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use anyhow::{Result, bail};
use dokku_arangodb::config::{ServiceConfig, Settings};
use dokku_arangodb::engine::{ContainerEngine, ContainerId, RunRequest};
use dokku_arangodb::orchestrator::ConfigStore;

/// Settings rooted in a test directory, with log polling tightened so a
/// missing password banner never makes a test sleep noticeably.
pub fn test_settings(root: &Path) -> Settings {
    Settings {
        dokku_root: root.to_path_buf(),
        service: ServiceConfig {
            log_poll_attempts: 2,
            log_poll_interval: Duration::from_millis(1),
            ..ServiceConfig::default()
        },
    }
}

/// A container the fake engine knows about.
#[derive(Debug, Clone)]
pub struct FakeContainer {
    pub id: String,
    pub name: String,
    pub ip: Option<String>,
    pub logs: String,
    pub running: bool,
}

/// In-memory [`ContainerEngine`].
///
/// Freshly run containers come up with `startup_ip` and `startup_logs`;
/// the failure flags turn individual operations into errors so teardown
/// tolerance can be exercised. Container names stay reserved until
/// `remove`, matching the daemon's name registry.
#[derive(Default)]
pub struct FakeEngine {
    pub images: RefCell<Vec<String>>,
    pub containers: RefCell<Vec<FakeContainer>>,
    pub run_requests: RefCell<Vec<RunRequest>>,
    pub stopped: RefCell<Vec<String>>,
    pub removed: RefCell<Vec<String>>,
    pub startup_logs: RefCell<String>,
    pub startup_ip: RefCell<Option<String>>,
    pub fail_find: Cell<bool>,
    pub fail_run: Cell<bool>,
    pub fail_stop: Cell<bool>,
    pub fail_remove: Cell<bool>,
    pub fail_logs: Cell<bool>,
    next_id: Cell<u32>,
}

impl FakeEngine {
    /// Engine with no images and no containers.
    pub fn bare() -> Self {
        Self::default()
    }

    /// Engine holding the service image; new containers boot with an
    /// address and a generated password banner.
    pub fn with_image(image: &str) -> Self {
        Self {
            images: RefCell::new(vec![image.to_string()]),
            startup_logs: RefCell::new("GENERATED ROOT PASSWORD: sekret123\n".to_string()),
            startup_ip: RefCell::new(Some("172.17.0.2".to_string())),
            ..Self::default()
        }
    }

    /// Seed a running container, as if created by an earlier invocation.
    pub fn add_running(&self, name: &str, ip: Option<&str>, logs: &str) -> ContainerId {
        let id = self.fresh_id();
        self.containers.borrow_mut().push(FakeContainer {
            id: id.clone(),
            name: name.to_string(),
            ip: ip.map(str::to_string),
            logs: logs.to_string(),
            running: true,
        });
        ContainerId::new(id)
    }

    /// Names of the containers currently running.
    pub fn running_names(&self) -> Vec<String> {
        self.containers
            .borrow()
            .iter()
            .filter(|container| container.running)
            .map(|container| container.name.clone())
            .collect()
    }

    fn fresh_id(&self) -> String {
        let n = self.next_id.get() + 1;
        self.next_id.set(n);
        format!("cid-{n:04}")
    }
}

impl ContainerEngine for FakeEngine {
    fn image_present(&self, image: &str) -> Result<bool> {
        Ok(self.images.borrow().iter().any(|known| known == image))
    }

    fn find_container(&self, name: &str) -> Result<Option<ContainerId>> {
        if self.fail_find.get() {
            bail!("cannot connect to the Docker daemon");
        }
        Ok(self
            .containers
            .borrow()
            .iter()
            .find(|container| container.running && container.name == name)
            .map(|container| ContainerId::new(container.id.clone())))
    }

    fn run(&self, request: &RunRequest) -> Result<ContainerId> {
        if self.fail_run.get() {
            bail!("docker run failed");
        }
        if self
            .containers
            .borrow()
            .iter()
            .any(|container| container.name == request.name)
        {
            bail!("Conflict. The container name `{}` is already in use", request.name);
        }
        self.run_requests.borrow_mut().push(request.clone());

        let id = self.fresh_id();
        self.containers.borrow_mut().push(FakeContainer {
            id: id.clone(),
            name: request.name.clone(),
            ip: self.startup_ip.borrow().clone(),
            logs: self.startup_logs.borrow().clone(),
            running: true,
        });
        Ok(ContainerId::new(id))
    }

    fn stop(&self, id: &ContainerId) -> Result<()> {
        if self.fail_stop.get() {
            bail!("docker stop failed");
        }
        let mut containers = self.containers.borrow_mut();
        match containers
            .iter_mut()
            .find(|container| container.id == id.as_str())
        {
            Some(container) => {
                container.running = false;
                self.stopped.borrow_mut().push(container.id.clone());
                Ok(())
            }
            None => bail!("no such container: {id}"),
        }
    }

    fn remove(&self, id: &ContainerId) -> Result<()> {
        if self.fail_remove.get() {
            bail!("docker rm failed");
        }
        let mut containers = self.containers.borrow_mut();
        let before = containers.len();
        containers.retain(|container| container.id != id.as_str());
        if containers.len() == before {
            bail!("no such container: {id}");
        }
        self.removed.borrow_mut().push(id.as_str().to_string());
        Ok(())
    }

    fn ip_address(&self, id: &ContainerId) -> Result<Option<String>> {
        match self
            .containers
            .borrow()
            .iter()
            .find(|container| container.id == id.as_str())
        {
            Some(container) => Ok(container.ip.clone()),
            None => bail!("no such container: {id}"),
        }
    }

    fn logs(&self, id: &ContainerId) -> Result<String> {
        if self.fail_logs.get() {
            bail!("docker logs failed");
        }
        match self
            .containers
            .borrow()
            .iter()
            .find(|container| container.id == id.as_str())
        {
            Some(container) => Ok(container.logs.clone()),
            None => bail!("no such container: {id}"),
        }
    }
}

/// In-memory [`ConfigStore`] recording every mutation.
#[derive(Default)]
pub struct FakeStore {
    pub values: RefCell<HashMap<(String, String), String>>,
    pub links: RefCell<Vec<(String, String)>>,
    pub fail_set: Cell<bool>,
    pub fail_unset: Cell<bool>,
    pub fail_link: Cell<bool>,
    pub fail_unlink: Cell<bool>,
}

impl FakeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, app: &str, key: &str) -> Option<String> {
        self.values
            .borrow()
            .get(&(app.to_string(), key.to_string()))
            .cloned()
    }
}

impl ConfigStore for FakeStore {
    fn set(&self, app: &str, key: &str, value: &str) -> Result<()> {
        if self.fail_set.get() {
            bail!("config:set failed");
        }
        self.values
            .borrow_mut()
            .insert((app.to_string(), key.to_string()), value.to_string());
        Ok(())
    }

    fn unset(&self, app: &str, key: &str) -> Result<()> {
        if self.fail_unset.get() {
            bail!("config:unset failed");
        }
        self.values
            .borrow_mut()
            .remove(&(app.to_string(), key.to_string()));
        Ok(())
    }

    fn create_link(&self, app: &str, service: &str) -> Result<()> {
        if self.fail_link.get() {
            bail!("link:create failed");
        }
        self.links
            .borrow_mut()
            .push((app.to_string(), service.to_string()));
        Ok(())
    }

    fn delete_link(&self, app: &str, service: &str) -> Result<()> {
        if self.fail_unlink.get() {
            bail!("link:delete failed");
        }
        self.links
            .borrow_mut()
            .retain(|(linked_app, linked_service)| {
                !(linked_app == app && linked_service == service)
            });
        Ok(())
    }
}
