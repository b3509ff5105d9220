//! Generated loader stubs
//!
//! A loader stub is a Ruby file that requires native-interop archives sitting
//! in the same directory, by path relative to the stub itself.

use std::path::Path;

use crate::common::fs as common_fs;
use crate::error::Result;

/// Render the stub body, one `require` line per archive
pub fn render(archives: &[String]) -> String {
    archives
        .iter()
        .map(|archive| {
            format!("require File.expand_path('{archive}', File.dirname(__FILE__))\n")
        })
        .collect()
}

/// Write (or rewrite) the stub at `path`
pub fn write(path: &Path, archives: &[String]) -> Result<()> {
    common_fs::write_file(path, &render(archives))
}
