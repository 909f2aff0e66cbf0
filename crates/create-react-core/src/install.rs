//! Package manager invocation

use crate::config::ScaffoldConfig;
use crate::error::{Error, Result};
use camino::Utf8Path;
use std::process::{Command, Stdio};
use tracing::{debug, info};

/// Installs dependencies for a freshly scaffolded project
pub trait PackageInstaller {
    /// Command line shown to the user, e.g. `npm install`
    fn describe(&self) -> String;

    /// Install dependencies in `project_dir`, blocking until done
    fn install(&self, project_dir: &Utf8Path) -> Result<()>;
}

/// Runs the package manager as a child process with inherited stdio
#[derive(Debug, Clone)]
pub struct CommandInstaller {
    program: String,
    args: Vec<String>,
}

impl CommandInstaller {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Installer for the configured package manager
    pub fn from_config(config: &ScaffoldConfig) -> Self {
        Self::new(&config.package_manager, config.install_args.clone())
    }
}

impl PackageInstaller for CommandInstaller {
    fn describe(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn install(&self, project_dir: &Utf8Path) -> Result<()> {
        // PATH lookup honors PATHEXT, so `npm` resolves to `npm.cmd` on Windows
        let program = which::which(&self.program).map_err(|_| Error::PackageManagerNotFound {
            program: self.program.clone(),
        })?;

        let command = self.describe();
        info!("Running `{}` in {}", command, project_dir);
        debug!("Resolved {} to {}", self.program, program.display());

        let status = Command::new(&program)
            .args(&self.args)
            .current_dir(project_dir)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|source| Error::InstallSpawn {
                command: command.clone(),
                source,
            })?;

        if !status.success() {
            return Err(Error::InstallFailed {
                command,
                code: status.code(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use tempfile::TempDir;

    fn utf8_dir(tmp: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).unwrap()
    }

    #[test]
    fn test_describe() {
        let installer = CommandInstaller::new("npm", vec!["install".to_string()]);
        assert_eq!(installer.describe(), "npm install");

        let config = ScaffoldConfig::embedded().unwrap();
        assert_eq!(CommandInstaller::from_config(&config).describe(), "npm install");
    }

    #[test]
    fn test_missing_program() {
        let tmp = TempDir::new().unwrap();
        let installer = CommandInstaller::new("create-react-no-such-tool", vec![]);
        let err = installer.install(&utf8_dir(&tmp)).unwrap_err();
        assert!(matches!(err, Error::PackageManagerNotFound { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_success_runs_in_project_dir() {
        let tmp = TempDir::new().unwrap();
        let dir = utf8_dir(&tmp);
        let installer = CommandInstaller::new(
            "sh",
            vec!["-c".to_string(), "touch installed.marker".to_string()],
        );

        installer.install(&dir).unwrap();
        assert!(dir.join("installed.marker").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_failure_carries_exit_code() {
        let tmp = TempDir::new().unwrap();
        let installer = CommandInstaller::new("sh", vec!["-c".to_string(), "exit 3".to_string()]);

        let err = installer.install(&utf8_dir(&tmp)).unwrap_err();
        assert!(matches!(err, Error::InstallFailed { code: Some(3), .. }));
        assert_eq!(err.install_exit_code(), Some(3));
    }
}
