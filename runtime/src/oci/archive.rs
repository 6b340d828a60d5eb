//! Skill bundle archiving.
//!
//! Builds a deterministic, uncompressed tar stream from a bundle
//! directory. Hidden entries (dot-prefixed names) are skipped; for a
//! hidden directory the whole subtree is pruned. Entries are sorted by
//! name within each directory so identical trees produce identical
//! archive bytes.

use std::path::Path;

use skillport_core::error::{Result, SkillportError};

/// Build an uncompressed tar archive of a bundle directory.
///
/// Paths inside the archive are relative to `root`, using `/`
/// separators. The root directory itself is walked but never emitted as
/// an entry, even when its own name is dot-prefixed.
///
/// # Errors
///
/// Any filesystem read error aborts the walk and propagates; the caller
/// discards partially written archive data.
pub fn build_archive(root: &Path) -> Result<Vec<u8>> {
    let mut builder = tar::Builder::new(Vec::new());
    append_dir_entries(&mut builder, root, root)?;
    builder
        .into_inner()
        .map_err(|e| SkillportError::Archive(format!("Failed to finalize archive: {}", e)))
}

/// Recursively append a directory's retained entries to the archive.
fn append_dir_entries<W: std::io::Write>(
    builder: &mut tar::Builder<W>,
    root: &Path,
    dir: &Path,
) -> Result<()> {
    let read_dir = std::fs::read_dir(dir).map_err(|e| {
        SkillportError::Archive(format!("Failed to read directory {}: {}", dir.display(), e))
    })?;

    let mut entries = Vec::new();
    for entry in read_dir {
        let entry = entry.map_err(|e| {
            SkillportError::Archive(format!("Failed to read directory entry: {}", e))
        })?;
        entries.push(entry);
    }
    // Sorted walk keeps archive bytes reproducible for a given tree
    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }

        let path = entry.path();
        let relative = path.strip_prefix(root).map_err(|e| {
            SkillportError::Archive(format!(
                "Failed to compute relative path for {}: {}",
                path.display(),
                e
            ))
        })?;

        let file_type = entry.file_type().map_err(|e| {
            SkillportError::Archive(format!(
                "Failed to read file type of {}: {}",
                path.display(),
                e
            ))
        })?;

        if file_type.is_dir() {
            builder.append_dir(relative, &path).map_err(|e| {
                SkillportError::Archive(format!(
                    "Failed to add directory {} to archive: {}",
                    relative.display(),
                    e
                ))
            })?;
            append_dir_entries(builder, root, &path)?;
        } else {
            builder.append_path_with_name(&path, relative).map_err(|e| {
                SkillportError::Archive(format!(
                    "Failed to add file {} to archive: {}",
                    relative.display(),
                    e
                ))
            })?;
        }
    }

    Ok(())
}
