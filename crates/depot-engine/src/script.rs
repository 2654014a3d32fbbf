use std::path::Path;
use std::process::{Command, Stdio};

use anyhow::{anyhow, Context, Result};

/// Fixed-name lifecycle script shipped inside each package payload.
pub const LIFECYCLE_SCRIPT: &str = "lifecycle.sh";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleMode {
    Install,
    Remove,
}

impl LifecycleMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Install => "install",
            Self::Remove => "remove",
        }
    }
}

/// Collaborator seam for lifecycle-script invocation. The engine observes
/// the exit code but never parses script output.
pub trait LifecycleRunner {
    fn run(&self, package_dir: &Path, mode: LifecycleMode) -> Result<i32>;
}

/// Runs the script synchronously as a subprocess, output discarded, no
/// timeout.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessLifecycleRunner;

impl LifecycleRunner for ProcessLifecycleRunner {
    fn run(&self, package_dir: &Path, mode: LifecycleMode) -> Result<i32> {
        let script = package_dir.join(LIFECYCLE_SCRIPT);
        if !script.is_file() {
            return Err(anyhow!(
                "lifecycle script not found: {}",
                script.display()
            ));
        }

        let mut command = if cfg!(windows) {
            let mut command = Command::new("cmd");
            command.arg("/C").arg(LIFECYCLE_SCRIPT);
            command
        } else {
            let mut command = Command::new("sh");
            command.arg(LIFECYCLE_SCRIPT);
            command
        };

        let status = command
            .arg(mode.as_str())
            .current_dir(package_dir)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .with_context(|| {
                format!(
                    "failed to invoke lifecycle script: {} {}",
                    script.display(),
                    mode.as_str()
                )
            })?;

        Ok(status.code().unwrap_or(-1))
    }
}
