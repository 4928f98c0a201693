mod loader;
mod types;

pub use loader::{ConfigFile, not_implemented_exit};
pub use types::{
    CONFIG_FILE_NAME, DEFAULT_DOKKU_ROOT, DEFAULT_NOT_IMPLEMENTED_EXIT, ServiceConfig, Settings,
};
