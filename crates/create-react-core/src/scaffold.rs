//! Project scaffolding: existence check, template copy, ignore-file rename,
//! manifest patch, and dependency install.

use crate::error::{Error, Result};
use crate::install::PackageInstaller;
use crate::manifest::patch_manifest_name;
use crate::naming::ProjectName;
use crate::template::{promote_ignore_file, TemplateSource};
use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use tracing::{debug, info};

/// Outcome of a scaffold run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldReport {
    /// Directory that was created
    pub project_dir: Utf8PathBuf,
    /// Name written into the manifest
    pub package_name: String,
    /// Number of template files written
    pub files_copied: usize,
    /// Whether `.npmignore` was renamed to `.gitignore`
    pub ignore_file_renamed: bool,
}

/// Creates projects under a base directory from a template source
#[derive(Debug, Clone)]
pub struct Scaffolder {
    base_dir: Utf8PathBuf,
    source: TemplateSource,
}

impl Scaffolder {
    pub fn new(base_dir: impl Into<Utf8PathBuf>, source: TemplateSource) -> Self {
        Self {
            base_dir: base_dir.into(),
            source,
        }
    }

    /// Scaffolder rooted at the process working directory
    pub fn in_current_dir(source: TemplateSource) -> Result<Self> {
        let cwd = std::env::current_dir()?;
        let cwd = Utf8PathBuf::from_path_buf(cwd).map_err(|p| Error::NonUtf8Path {
            path: p.display().to_string(),
        })?;
        Ok(Self::new(cwd, source))
    }

    pub fn base_dir(&self) -> &Utf8Path {
        &self.base_dir
    }

    pub fn source(&self) -> &TemplateSource {
        &self.source
    }

    /// `<base_dir>/<project name>`, the name used verbatim
    ///
    /// Root and prefix components of the name are dropped, so an absolute
    /// name still lands under `base_dir`.
    pub fn target_dir(&self, name: &ProjectName) -> Utf8PathBuf {
        let mut target = self.base_dir.clone();
        for component in Utf8Path::new(name.as_str()).components() {
            match component {
                Utf8Component::Prefix(_) | Utf8Component::RootDir => {}
                other => target.push(other.as_str()),
            }
        }
        target
    }

    /// Fail with `TargetExists` if anything occupies the target path
    ///
    /// Dangling symlinks count as occupied.
    pub fn check_target(&self, name: &ProjectName) -> Result<Utf8PathBuf> {
        let target = self.target_dir(name);
        if std::fs::symlink_metadata(&target).is_ok() {
            return Err(Error::target_exists(name.as_str()));
        }
        Ok(target)
    }

    /// Copy the template, rename the ignore file, and patch the manifest
    ///
    /// Nothing is rolled back on failure; a partially written directory stays
    /// on disk.
    pub fn scaffold(&self, name: &ProjectName) -> Result<ScaffoldReport> {
        let project_dir = self.check_target(name)?;

        let files_copied = self.source.copy_to(&project_dir)?;
        debug!("Copied {} template files", files_copied);

        let ignore_file_renamed = promote_ignore_file(&project_dir)?;

        let package_name = name.package_name();
        patch_manifest_name(&project_dir, &package_name)?;

        info!("Scaffolded {} as package {:?}", project_dir, package_name);
        Ok(ScaffoldReport {
            project_dir,
            package_name,
            files_copied,
            ignore_file_renamed,
        })
    }

    /// Scaffold, then install dependencies in the new directory
    pub fn create(
        &self,
        name: &ProjectName,
        installer: &dyn PackageInstaller,
    ) -> Result<ScaffoldReport> {
        let report = self.scaffold(name)?;
        installer.install(&report.project_dir)?;
        Ok(report)
    }
}
