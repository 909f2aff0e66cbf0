//! Configuration loader with precedence
//!
//! Loads configuration from multiple sources with the following precedence (low to high):
//! 1. Embedded defaults (built into binary)
//! 2. User config file (`$CREATE_REACT_CONFIG`, or `config.yaml` in the platform config dir)
//! 3. Environment variables (CREATE_REACT_* prefix)

use crate::error::{Error, Result};
use crate::template::TemplateSource;
use camino::{Utf8Path, Utf8PathBuf};
use directories::ProjectDirs;
use rust_embed::RustEmbed;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use tracing::debug;

/// Environment variable naming an explicit config file
pub const CONFIG_PATH_ENV: &str = "CREATE_REACT_CONFIG";
/// Environment variable overriding the package manager program
pub const PACKAGE_MANAGER_ENV: &str = "CREATE_REACT_PACKAGE_MANAGER";
/// Environment variable pointing at a template directory on disk
pub const TEMPLATE_DIR_ENV: &str = "CREATE_REACT_TEMPLATE_DIR";

const CONFIG_FILE_NAME: &str = "config.yaml";

/// Embedded configuration files
#[derive(RustEmbed)]
#[folder = "$CARGO_MANIFEST_DIR/embedded/"]
struct EmbeddedConfigs;

/// Effective scaffolding configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaffoldConfig {
    /// Package manager program, resolved through PATH
    pub package_manager: String,

    /// Arguments passed to the package manager to install dependencies
    pub install_args: Vec<String>,

    /// Script name shown in the "run" instructions
    pub start_script: String,

    /// Template directory used instead of the bundled tree
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_dir: Option<Utf8PathBuf>,
}

/// User config file contents; every field is optional
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigOverlay {
    package_manager: Option<String>,
    install_args: Option<Vec<String>>,
    start_script: Option<String>,
    template_dir: Option<Utf8PathBuf>,
}

impl ScaffoldConfig {
    /// Built-in defaults
    pub fn embedded() -> Result<Self> {
        let file = EmbeddedConfigs::get("defaults.yaml")
            .ok_or_else(|| Error::config("Embedded config not found: defaults.yaml"))?;

        let content = std::str::from_utf8(&file.data)
            .map_err(|_| Error::config("Invalid UTF-8 in embedded config: defaults.yaml"))?;

        serde_yaml_ng::from_str(content)
            .map_err(|e| Error::config(format!("Failed to parse embedded defaults: {}", e)))
    }

    /// Template source selected by this configuration
    pub fn template_source(&self) -> TemplateSource {
        match &self.template_dir {
            Some(dir) => TemplateSource::Directory(dir.clone()),
            None => TemplateSource::Bundled,
        }
    }

    /// Start command as shown to the user, e.g. `npm start`
    pub fn start_command(&self) -> String {
        format!("{} {}", self.package_manager, self.start_script)
    }

    fn merge(mut self, overlay: ConfigOverlay) -> Self {
        if let Some(package_manager) = overlay.package_manager {
            self.package_manager = package_manager;
        }
        if let Some(install_args) = overlay.install_args {
            self.install_args = install_args;
        }
        if let Some(start_script) = overlay.start_script {
            self.start_script = start_script;
        }
        if overlay.template_dir.is_some() {
            self.template_dir = overlay.template_dir;
        }
        self
    }

    fn validate(self) -> Result<Self> {
        if self.package_manager.trim().is_empty() {
            return Err(Error::config("package_manager must not be empty"));
        }
        Ok(self)
    }
}

/// Configuration hierarchy loader
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config_file: Option<Utf8PathBuf>,
    explicit: bool,
}

impl ConfigLoader {
    /// Loader using `$CREATE_REACT_CONFIG` or the platform config directory
    pub fn new() -> Self {
        if let Ok(path) = env::var(CONFIG_PATH_ENV) {
            return Self {
                config_file: Some(Utf8PathBuf::from(path)),
                explicit: true,
            };
        }

        let config_file = ProjectDirs::from("", "", "create-react")
            .and_then(|dirs| Utf8PathBuf::from_path_buf(dirs.config_dir().to_path_buf()).ok())
            .map(|dir| dir.join(CONFIG_FILE_NAME));

        Self {
            config_file,
            explicit: false,
        }
    }

    /// Loader reading a specific config file, which must exist
    pub fn with_file(path: impl Into<Utf8PathBuf>) -> Self {
        Self {
            config_file: Some(path.into()),
            explicit: true,
        }
    }

    /// Loader using embedded defaults and environment only
    pub fn without_file() -> Self {
        Self {
            config_file: None,
            explicit: false,
        }
    }

    /// Config file consulted by this loader, if any
    pub fn config_file(&self) -> Option<&Utf8Path> {
        self.config_file.as_deref()
    }

    /// Load configuration with the process environment
    pub fn load(&self) -> Result<ScaffoldConfig> {
        self.load_with_env(|key| env::var(key).ok())
    }

    /// Load configuration with a custom environment lookup
    pub fn load_with_env<F>(&self, lookup: F) -> Result<ScaffoldConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ScaffoldConfig::embedded()?;

        if let Some(path) = &self.config_file {
            if path.exists() {
                debug!("Loading config file: {}", path);
                config = config.merge(load_yaml_file(path)?);
            } else if self.explicit {
                return Err(Error::config(format!("Config file not found: {}", path)));
            }
        }

        apply_env_overrides(config, lookup).validate()
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn load_yaml_file(path: &Utf8Path) -> Result<ConfigOverlay> {
    let content = fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(ConfigOverlay::default());
    }
    serde_yaml_ng::from_str(&content)
        .map_err(|e| Error::config(format!("Failed to parse {}: {}", path, e)))
}

fn apply_env_overrides<F>(mut config: ScaffoldConfig, lookup: F) -> ScaffoldConfig
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(val) = lookup(PACKAGE_MANAGER_ENV) {
        debug!("{} overrides package manager: {}", PACKAGE_MANAGER_ENV, val);
        config.package_manager = val;
    }

    if let Some(val) = lookup(TEMPLATE_DIR_ENV).filter(|v| !v.is_empty()) {
        debug!("{} overrides template dir: {}", TEMPLATE_DIR_ENV, val);
        config.template_dir = Some(Utf8PathBuf::from(val));
    }

    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn write_config(tmp: &TempDir, content: &str) -> Utf8PathBuf {
        let path = Utf8PathBuf::from_path_buf(tmp.path().join("config.yaml")).unwrap();
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_embedded_defaults() {
        let config = ScaffoldConfig::embedded().unwrap();
        assert_eq!(config.package_manager, "npm");
        assert_eq!(config.install_args, vec!["install"]);
        assert_eq!(config.start_script, "start");
        assert_eq!(config.template_dir, None);
        assert_eq!(config.start_command(), "npm start");
        assert_eq!(config.template_source(), TemplateSource::Bundled);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(
            &tmp,
            "package_manager: pnpm\ninstall_args: [install, --frozen-lockfile]\n",
        );

        let config = ConfigLoader::with_file(path).load_with_env(no_env).unwrap();
        assert_eq!(config.package_manager, "pnpm");
        assert_eq!(config.install_args, vec!["install", "--frozen-lockfile"]);
        assert_eq!(config.start_script, "start");
    }

    #[test]
    fn test_env_overrides_file() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(&tmp, "package_manager: pnpm\n");

        let config = ConfigLoader::with_file(path)
            .load_with_env(|key| match key {
                PACKAGE_MANAGER_ENV => Some("yarn".to_string()),
                TEMPLATE_DIR_ENV => Some("/opt/template".to_string()),
                _ => None,
            })
            .unwrap();

        assert_eq!(config.package_manager, "yarn");
        assert_eq!(
            config.template_source(),
            TemplateSource::Directory(Utf8PathBuf::from("/opt/template"))
        );
    }

    #[test]
    fn test_empty_file_is_accepted() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(&tmp, "");
        let config = ConfigLoader::with_file(path).load_with_env(no_env).unwrap();
        assert_eq!(config, ScaffoldConfig::embedded().unwrap());
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(&tmp, "registry: https://example.com\n");
        let err = ConfigLoader::with_file(path).load_with_env(no_env).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let path = Utf8PathBuf::from_path_buf(tmp.path().join("missing.yaml")).unwrap();
        let err = ConfigLoader::with_file(path).load_with_env(no_env).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }

    #[test]
    fn test_empty_package_manager_is_rejected() {
        let err = ConfigLoader::without_file()
            .load_with_env(|key| (key == PACKAGE_MANAGER_ENV).then(|| "  ".to_string()))
            .unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    #[serial]
    fn test_config_path_from_environment() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(&tmp, "start_script: dev\n");

        env::set_var(CONFIG_PATH_ENV, path.as_str());
        let loader = ConfigLoader::new();
        env::remove_var(CONFIG_PATH_ENV);

        assert_eq!(loader.config_file(), Some(path.as_path()));
        let config = loader.load_with_env(no_env).unwrap();
        assert_eq!(config.start_command(), "npm dev");
    }
}
