//! Template tree sources and copying.
//!
//! The starter tree ships inside the binary. A directory on disk can be
//! configured instead; both are copied byte-for-byte, hidden files included.

use crate::error::{Error, Result};
use camino::{Utf8Path, Utf8PathBuf};
use rust_embed::RustEmbed;
use std::fs;
use tracing::{debug, info};
use walkdir::WalkDir;

/// Ignore file as published in the template
pub const PUBLISHED_IGNORE_FILE: &str = ".npmignore";

/// Ignore file name in a generated project
pub const PROJECT_IGNORE_FILE: &str = ".gitignore";

/// Bundled React starter tree
#[derive(RustEmbed)]
#[folder = "$CARGO_MANIFEST_DIR/template/"]
struct BundledTemplate;

/// Where the template tree is read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    /// Tree compiled into the binary
    Bundled,
    /// Tree read from a directory at runtime
    Directory(Utf8PathBuf),
}

impl TemplateSource {
    /// Relative paths of every file in the tree, sorted
    pub fn files(&self) -> Result<Vec<Utf8PathBuf>> {
        let mut files = match self {
            Self::Bundled => BundledTemplate::iter()
                .map(|path| Utf8PathBuf::from(path.into_owned()))
                .collect(),
            Self::Directory(root) => {
                let root = existing_dir(root)?;
                let mut files = Vec::new();
                for entry in WalkDir::new(root).min_depth(1) {
                    let entry = entry?;
                    if entry.file_type().is_dir() {
                        continue;
                    }
                    files.push(relative_utf8(root, entry.path())?);
                }
                files
            }
        };
        files.sort();
        Ok(files)
    }

    /// Copy the whole tree into `target`, returning the number of files written
    ///
    /// `target` is created if missing. Files already present are overwritten.
    pub fn copy_to(&self, target: &Utf8Path) -> Result<usize> {
        info!("Copying template from {} to {}", self, target);
        fs::create_dir_all(target)?;

        match self {
            Self::Bundled => copy_bundled(target),
            Self::Directory(root) => copy_directory(existing_dir(root)?, target),
        }
    }
}

impl std::fmt::Display for TemplateSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bundled => write!(f, "bundled template"),
            Self::Directory(root) => write!(f, "{}", root),
        }
    }
}

fn existing_dir(root: &Utf8Path) -> Result<&Utf8Path> {
    if root.is_dir() {
        Ok(root)
    } else {
        Err(Error::TemplateDirNotFound {
            path: root.to_string(),
        })
    }
}

fn relative_utf8(root: &Utf8Path, path: &std::path::Path) -> Result<Utf8PathBuf> {
    let relative = path
        .strip_prefix(root)
        .map_err(|_| Error::template_asset(path.display().to_string()))?;
    Utf8PathBuf::from_path_buf(relative.to_path_buf()).map_err(|p| Error::NonUtf8Path {
        path: p.display().to_string(),
    })
}

fn copy_bundled(target: &Utf8Path) -> Result<usize> {
    let mut count = 0;
    for file in BundledTemplate::iter() {
        let relative: &str = &file;
        let asset =
            BundledTemplate::get(relative).ok_or_else(|| Error::template_asset(relative))?;
        let dest = target.join(relative);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&dest, asset.data.as_ref())?;
        debug!("Wrote {}", dest);
        count += 1;
    }
    Ok(count)
}

fn copy_directory(root: &Utf8Path, target: &Utf8Path) -> Result<usize> {
    let mut count = 0;
    for entry in WalkDir::new(root).min_depth(1) {
        let entry = entry?;
        let dest = target.join(relative_utf8(root, entry.path())?);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&dest)?;
            continue;
        }

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(entry.path(), &dest)?;
        debug!("Copied {}", dest);
        count += 1;
    }
    Ok(count)
}

/// Rename a top-level `.npmignore` to `.gitignore`
///
/// An existing `.gitignore` is replaced. Returns whether a rename happened.
pub fn promote_ignore_file(project_dir: &Utf8Path) -> Result<bool> {
    let published = project_dir.join(PUBLISHED_IGNORE_FILE);
    if !published.exists() {
        return Ok(false);
    }

    let project = project_dir.join(PROJECT_IGNORE_FILE);
    debug!("Renaming {} -> {}", published, project);
    fs::rename(&published, &project)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn utf8_dir(tmp: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).unwrap()
    }

    fn write(path: &Utf8Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_bundled_template_has_manifest_and_ignore_file() {
        let files = TemplateSource::Bundled.files().unwrap();
        assert!(files.contains(&Utf8PathBuf::from("package.json")));
        assert!(files.contains(&Utf8PathBuf::from(".npmignore")));
        assert!(files.contains(&Utf8PathBuf::from("src/App.js")));
    }

    #[test]
    fn test_copy_bundled_writes_every_file() {
        let tmp = TempDir::new().unwrap();
        let target = utf8_dir(&tmp).join("app");

        let count = TemplateSource::Bundled.copy_to(&target).unwrap();

        let files = TemplateSource::Bundled.files().unwrap();
        assert_eq!(count, files.len());
        for file in files {
            let expected = BundledTemplate::get(file.as_str()).unwrap();
            let actual = fs::read(target.join(&file)).unwrap();
            assert_eq!(actual, expected.data.as_ref(), "content of {}", file);
        }
    }

    #[test]
    fn test_copy_directory_includes_hidden_and_nested_files() {
        let src = TempDir::new().unwrap();
        let root = utf8_dir(&src);
        write(&root.join("package.json"), "{}");
        write(&root.join(".npmignore"), "node_modules\n");
        write(&root.join("src/components/Button.js"), "export default 1;\n");
        fs::create_dir_all(root.join("empty")).unwrap();

        let dst = TempDir::new().unwrap();
        let target = utf8_dir(&dst).join("app");
        let source = TemplateSource::Directory(root.clone());

        assert_eq!(source.copy_to(&target).unwrap(), 3);
        assert_eq!(
            fs::read_to_string(target.join(".npmignore")).unwrap(),
            "node_modules\n"
        );
        assert_eq!(
            fs::read_to_string(target.join("src/components/Button.js")).unwrap(),
            "export default 1;\n"
        );
        assert!(target.join("empty").is_dir());
        assert_eq!(
            source.files().unwrap(),
            vec![
                Utf8PathBuf::from(".npmignore"),
                Utf8PathBuf::from("package.json"),
                Utf8PathBuf::from("src/components/Button.js"),
            ]
        );
    }

    #[test]
    fn test_copy_from_missing_directory() {
        let tmp = TempDir::new().unwrap();
        let source = TemplateSource::Directory(utf8_dir(&tmp).join("nope"));
        let err = source.copy_to(&utf8_dir(&tmp).join("app")).unwrap_err();
        assert!(matches!(err, Error::TemplateDirNotFound { .. }));
    }

    #[test]
    fn test_promote_ignore_file() {
        let tmp = TempDir::new().unwrap();
        let dir = utf8_dir(&tmp);
        write(&dir.join(".npmignore"), "build\n");

        assert!(promote_ignore_file(&dir).unwrap());
        assert!(!dir.join(".npmignore").exists());
        assert_eq!(fs::read_to_string(dir.join(".gitignore")).unwrap(), "build\n");
    }

    #[test]
    fn test_promote_ignore_file_overwrites_existing_gitignore() {
        let tmp = TempDir::new().unwrap();
        let dir = utf8_dir(&tmp);
        write(&dir.join(".npmignore"), "from-npmignore\n");
        write(&dir.join(".gitignore"), "from-gitignore\n");

        assert!(promote_ignore_file(&dir).unwrap());
        assert_eq!(
            fs::read_to_string(dir.join(".gitignore")).unwrap(),
            "from-npmignore\n"
        );
    }

    #[test]
    fn test_promote_ignore_file_is_top_level_only() {
        let tmp = TempDir::new().unwrap();
        let dir = utf8_dir(&tmp);
        write(&dir.join("nested/.npmignore"), "x\n");

        assert!(!promote_ignore_file(&dir).unwrap());
        assert!(dir.join("nested/.npmignore").exists());
        assert!(!dir.join(".gitignore").exists());
    }
}
