//! Application server control
//!
//! The server process is not managed here; start and stop go through the
//! server runtime's own control script.

use std::path::{Path, PathBuf};

use crate::error::{Result, deploy};
use crate::process;

pub trait ServerControl {
    fn name(&self) -> &str;
    fn start(&self) -> Result<()>;
    fn stop(&self) -> Result<()>;
}

/// `{install_dir}/bin/server start|stop {name}`
pub struct ServerScript {
    install_dir: PathBuf,
    name: String,
}

impl ServerScript {
    pub fn new(install_dir: &Path, name: impl Into<String>) -> Self {
        Self {
            install_dir: install_dir.to_path_buf(),
            name: name.into(),
        }
    }

    pub fn script(&self) -> PathBuf {
        let bin = self.install_dir.join("bin");
        if cfg!(windows) {
            bin.join("server.bat")
        } else {
            bin.join("server")
        }
    }

    fn control(&self, action: &str) -> Result<()> {
        let script = self.script();
        let args = vec![action.to_string(), self.name.clone()];
        process::run(&script.display().to_string(), &args, Some(&self.install_dir))
            .map(|_| ())
            .map_err(|e| deploy::server_control_failed(&self.name, action, e.to_string()))
    }
}

impl ServerControl for ServerScript {
    fn name(&self) -> &str {
        &self.name
    }

    fn start(&self) -> Result<()> {
        self.control("start")
    }

    fn stop(&self) -> Result<()> {
        self.control("stop")
    }
}
