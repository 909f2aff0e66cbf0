//! Project and package naming.
//!
//! The project name is taken verbatim for the target directory. The package
//! name written into `package.json` is derived from it by [`sanitize_package_name`].

use crate::error::{Error, Result};
use regex::{Captures, Regex};
use std::fmt;
use std::sync::LazyLock;

static INVALID_CHARS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9-]").expect("invalid-chars regex is valid"));

static LEADING_NON_LETTER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^a-z]").expect("leading-char regex is valid"));

/// User-supplied project name, used as-is for the target directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectName(String);

impl ProjectName {
    /// Validate a raw project name
    ///
    /// Only the empty string is rejected; everything else is passed to the
    /// filesystem untouched.
    pub fn parse(raw: impl Into<String>) -> Result<Self> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(Error::invalid_project_name(raw));
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Package name derived from this project name
    pub fn package_name(&self) -> String {
        sanitize_package_name(&self.0)
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ProjectName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Derive a manifest-safe package name from a project name
///
/// Lower-cases the input, replaces every character outside `[a-z0-9-]` with
/// `-`, then replaces a leading character that is not a lowercase letter with
/// `n`. The result is empty or matches `^[a-z][a-z0-9-]*$`.
///
/// A character outside the Basic Multilingual Plane counts as two UTF-16 code
/// units and becomes `--`, so names match those produced by npm tooling.
pub fn sanitize_package_name(project_name: &str) -> String {
    let lowered = project_name.to_lowercase();
    let replaced = INVALID_CHARS_RE.replace_all(&lowered, |caps: &Captures| {
        let units = caps[0].chars().map(char::len_utf16).sum::<usize>();
        "-".repeat(units)
    });
    LEADING_NON_LETTER_RE.replace(&replaced, "n").into_owned()
}
