//! Version command

use crate::version::VersionInfo;

/// Print the declared version and nothing else
pub fn run() {
    println!("{}", VersionInfo::current());
}
