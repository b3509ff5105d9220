//! Common file system operations with unified error handling
//!
//! Copies follow `cp -r` semantics: copying a directory into a destination
//! directory creates `dest/<name>` and merges into it when it already exists.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{Result, fs as fs_error};

/// Create `dir` and all of its parents
pub fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|e| fs_error::write_failed(dir, &e))
}

/// Ensure parent directory exists for a path
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    Ok(())
}

/// Copy a single file to `target`, creating parent directories
pub fn copy_file(source: &Path, target: &Path) -> Result<()> {
    ensure_parent_dir(target)?;
    fs::copy(source, target)
        .map_err(|e| fs_error::write_failed(target, &e))
        .map(|_| ())
}

/// Copy a directory recursively into `dst`, merging with existing contents
///
/// Returns the number of files copied.
pub fn copy_dir_recursive(src: &Path, dst: &Path) -> Result<usize> {
    if !src.is_dir() {
        return Err(fs_error::not_found(src));
    }

    let mut copied = 0;
    for entry in WalkDir::new(src).follow_links(true).sort_by_file_name() {
        let entry = entry?;
        let relative = entry
            .path()
            .strip_prefix(src)
            .map_err(|e| crate::error::GemstageError::IoError {
                message: e.to_string(),
            })?;
        let target = dst.join(relative);

        if entry.file_type().is_dir() {
            ensure_dir(&target)?;
        } else {
            copy_file(entry.path(), &target)?;
            copied += 1;
        }
    }

    Ok(copied)
}

/// Copy a file or directory to exactly `target`
pub fn copy_entry_to(source: &Path, target: &Path) -> Result<usize> {
    if source.is_dir() {
        copy_dir_recursive(source, target)
    } else if source.exists() {
        copy_file(source, target).map(|()| 1)
    } else {
        Err(fs_error::not_found(source))
    }
}

/// Copy a file or directory into `dest_dir` under its own name
///
/// Returns the path created in `dest_dir`.
pub fn copy_entry_into(source: &Path, dest_dir: &Path) -> Result<PathBuf> {
    let name = source
        .file_name()
        .ok_or_else(|| fs_error::not_found(source))?;
    let target = dest_dir.join(name);
    copy_entry_to(source, &target)?;
    Ok(target)
}

/// Sorted entries of `dir`; empty when the directory does not exist
pub fn list_dir(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut entries = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| fs_error::read_failed(dir, &e))? {
        let entry = entry.map_err(|e| fs_error::read_failed(dir, &e))?;
        entries.push(entry.path());
    }
    entries.sort();
    Ok(entries)
}

/// Sorted file names of `dir`; empty when the directory does not exist
pub fn list_file_names(dir: &Path) -> Result<Vec<String>> {
    Ok(list_dir(dir)?
        .into_iter()
        .filter_map(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        .collect())
}

/// Write `content` to `path`, creating parent directories
pub fn write_file(path: &Path, content: &str) -> Result<()> {
    ensure_parent_dir(path)?;
    fs::write(path, content).map_err(|e| fs_error::write_failed(path, &e))
}
