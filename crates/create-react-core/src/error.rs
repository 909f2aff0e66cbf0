//! Error types for create-react-core

use thiserror::Error;

/// Result type alias using create-react-core's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Scaffolding error types
#[derive(Error, Debug)]
pub enum Error {
    /// Project name rejected before any filesystem work
    #[error("Invalid project name: {name:?}. The name must not be empty")]
    InvalidProjectName { name: String },

    /// Target directory already occupied
    #[error("Directory {name} already exists.")]
    TargetExists { name: String },

    /// Embedded template asset could not be materialized
    #[error("Template asset could not be read: {path}")]
    TemplateAsset { path: String },

    /// Template directory override does not exist or is not a directory
    #[error("Template directory not found: {path}")]
    TemplateDirNotFound { path: String },

    /// Template file has a path that is not valid UTF-8
    #[error("Template contains a non UTF-8 path: {path}")]
    NonUtf8Path { path: String },

    /// Manifest could not be read from disk
    #[error("Failed to read manifest {path}: {source}")]
    ManifestRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Manifest is not a valid JSON object
    #[error("Failed to parse manifest {path}: {source}")]
    ManifestParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// Manifest could not be serialized or written back
    #[error("Failed to write manifest {path}: {source}")]
    ManifestWrite {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Package manager executable is not on PATH
    #[error("Package manager not found: {program}. Please ensure it is installed and in PATH")]
    PackageManagerNotFound { program: String },

    /// Package manager process could not be started
    #[error("Failed to start `{command}`: {source}")]
    InstallSpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Package manager exited unsuccessfully
    #[error("`{command}` failed with {}", describe_exit(.code))]
    InstallFailed { command: String, code: Option<i32> },

    /// Invalid configuration file or environment override
    #[error("Invalid configuration: {message}")]
    Config { message: String },

    /// Directory traversal error
    #[error("Directory traversal failed: {0}")]
    Walk(#[from] walkdir::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "termination by signal".to_string(),
    }
}

impl Error {
    /// Create an invalid project name error
    pub fn invalid_project_name(name: impl Into<String>) -> Self {
        Self::InvalidProjectName { name: name.into() }
    }

    /// Create a target exists error
    pub fn target_exists(name: impl Into<String>) -> Self {
        Self::TargetExists { name: name.into() }
    }

    /// Create a template asset error
    pub fn template_asset(path: impl Into<String>) -> Self {
        Self::TemplateAsset { path: path.into() }
    }

    /// Create a manifest write error
    pub fn manifest_write(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::ManifestWrite {
            path: path.into(),
            source,
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Exit code reported by a failed install, if the process exited normally
    pub fn install_exit_code(&self) -> Option<i32> {
        match self {
            Self::InstallFailed { code, .. } => *code,
            _ => None,
        }
    }
}
