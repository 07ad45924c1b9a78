use std::path::{Path, PathBuf};
use std::time::Duration;

use tokio::process::Command;

use crate::error::{Error, Result};

const BUILD_TIMEOUT: Duration = Duration::from_secs(300);
const BUILD_COMMAND: &str = "pnpm";
const BUILD_ARGS: [&str; 2] = ["run", "build"];

/// Runs the static site generator's build so published changes go live.
///
/// The content files are the source of truth; a failed or timed-out build
/// is reported to the caller as an error but must never roll back the
/// mutation that triggered it.
pub struct SiteBuilder {
    project_dir: PathBuf,
}

impl SiteBuilder {
    pub fn new(project_dir: impl Into<PathBuf>) -> Self {
        Self {
            project_dir: project_dir.into(),
        }
    }

    #[must_use]
    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    pub async fn rebuild(&self) -> Result<()> {
        if !self.project_dir.exists() {
            return Err(Error::Rebuild(format!(
                "site project directory does not exist: {}",
                self.project_dir.display()
            )));
        }

        tracing::info!("rebuilding site at {}", self.project_dir.display());

        let child = Command::new(BUILD_COMMAND)
            .args(BUILD_ARGS)
            .current_dir(&self.project_dir)
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(Error::Io)?;

        let output = tokio::time::timeout(BUILD_TIMEOUT, child.wait_with_output())
            .await
            .map_err(|_| {
                Error::Rebuild(format!(
                    "build timed out after {}s",
                    BUILD_TIMEOUT.as_secs()
                ))
            })?
            .map_err(Error::Io)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Rebuild(format!(
                "build exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        tracing::info!("site rebuild finished");
        tracing::debug!(
            "build output: {}",
            String::from_utf8_lossy(&output.stdout).trim()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_rebuild_fails_when_project_dir_missing() {
        let builder = SiteBuilder::new("/nonexistent/site/project");
        let err = builder.rebuild().await.unwrap_err();
        assert!(matches!(err, Error::Rebuild(_)));
    }
}
