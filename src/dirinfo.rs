//! Directory index files
//!
//! Class-loader backed file systems cannot list directories, so every directory
//! of a packaged gem tree gets a `.jrubydir` file naming its entries: `.` first,
//! then the entry names sorted, one per line. Names starting with `.` are hidden:
//! they are never listed and hidden directories get no index.

use std::path::Path;

use walkdir::WalkDir;

use crate::common::fs as common_fs;
use crate::error::{Result, fs as fs_error};

/// Index file name written into each directory
pub const INDEX_FILE: &str = ".jrubydir";

/// Render the index for a directory's entry names
pub fn render(entries: &[String]) -> String {
    let mut names: Vec<&str> = entries
        .iter()
        .map(String::as_str)
        .filter(|name| !is_hidden(name))
        .collect();
    names.sort_unstable();

    let mut out = String::from(".\n");
    for name in names {
        out.push_str(name);
        out.push('\n');
    }
    out
}

fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

/// Write an index into `root` and every directory below it
///
/// Returns the number of index files written.
pub fn generate(root: &Path) -> Result<usize> {
    if !root.is_dir() {
        return Err(fs_error::not_found(root));
    }

    let mut written = 0;
    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(&e.file_name().to_string_lossy()));
    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_dir() {
            continue;
        }

        let dir = entry.path();
        let names = common_fs::list_file_names(dir)?;
        common_fs::write_file(&dir.join(INDEX_FILE), &render(&names))?;
        tracing::debug!(dir = %dir.display(), entries = names.len(), "wrote directory index");
        written += 1;
    }

    Ok(written)
}
