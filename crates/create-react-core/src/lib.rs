//! # create-react-core
//!
//! Scaffolding library for the create-react CLI providing:
//! - The bundled React starter tree and directory-based template sources
//! - Package name sanitization
//! - `package.json` name patching
//! - Package manager install invocation
//! - Layered configuration (embedded defaults, config file, environment)
//!
//! # Examples
//!
//! ```no_run
//! use create_react_core::{CommandInstaller, ConfigLoader, ProjectName, Scaffolder};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ConfigLoader::new().load()?;
//! let scaffolder = Scaffolder::in_current_dir(config.template_source())?;
//! let name = ProjectName::parse("my-app")?;
//!
//! let report = scaffolder.create(&name, &CommandInstaller::from_config(&config))?;
//! println!("created {}", report.project_dir);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod install;
pub mod manifest;
pub mod naming;
pub mod scaffold;
pub mod template;

pub use config::{ConfigLoader, ScaffoldConfig};
pub use error::{Error, Result};
pub use install::{CommandInstaller, PackageInstaller};
pub use manifest::PackageManifest;
pub use naming::{sanitize_package_name, ProjectName};
pub use scaffold::{ScaffoldReport, Scaffolder};
pub use template::TemplateSource;
