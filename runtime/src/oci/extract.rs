//! Skill artifact extraction.
//!
//! Reconstructs a directory tree from the tar layers of a fetched
//! artifact. Every entry path is resolved against the destination root
//! before anything is written; an entry that would escape the root
//! aborts the whole extraction.

use std::io::Read;
use std::path::{Component, Path, PathBuf};

use skillport_core::error::{Result, SkillportError};

use super::image::SkillImage;

/// Extract every layer of an artifact into `dest`.
///
/// The destination directory is created (with parents) if absent. Only
/// directories and regular files are materialized; other entry types
/// are skipped. On failure the partially populated destination is left
/// in place; callers must not retry into the same path.
///
/// # Errors
///
/// Returns error if:
/// - A layer cannot be read as a tar stream
/// - An entry path resolves outside `dest` (traversal, always fatal)
/// - A directory or file cannot be written
pub fn extract_image(image: &SkillImage, dest: &Path) -> Result<()> {
    std::fs::create_dir_all(dest).map_err(|e| {
        SkillportError::Other(format!(
            "Failed to create destination directory {}: {}",
            dest.display(),
            e
        ))
    })?;
    let root = dest.canonicalize()?;

    for layer in image.layers() {
        let reader = layer.open()?;
        let mut archive = tar::Archive::new(reader);
        let entries = archive.entries().map_err(|e| {
            SkillportError::Archive(format!("Failed to read layer archive: {}", e))
        })?;

        for entry in entries {
            let mut entry = entry.map_err(|e| {
                SkillportError::Archive(format!("Failed to read archive entry: {}", e))
            })?;
            let entry_path = entry
                .path()
                .map_err(|e| SkillportError::Archive(format!("Invalid entry path: {}", e)))?
                .into_owned();

            let target = resolve_target(&root, &entry_path)?;

            let entry_type = entry.header().entry_type();
            if entry_type.is_dir() {
                std::fs::create_dir_all(&target).map_err(|e| {
                    SkillportError::Other(format!(
                        "Failed to create directory {}: {}",
                        target.display(),
                        e
                    ))
                })?;
            } else if entry_type.is_file() {
                write_file(&mut entry, &target)?;
            } else {
                // Only directories and regular files are materialized
                tracing::debug!(
                    path = %entry_path.display(),
                    "Skipping unsupported archive entry"
                );
            }
        }
    }

    Ok(())
}

/// Join an archive entry path onto the extraction root.
///
/// Components are applied one at a time; absolute components and any
/// `..` that would climb above the root are rejected.
fn resolve_target(root: &Path, entry_path: &Path) -> Result<PathBuf> {
    let mut target = root.to_path_buf();
    let mut depth = 0usize;

    for component in entry_path.components() {
        match component {
            Component::Normal(part) => {
                target.push(part);
                depth += 1;
            }
            Component::CurDir => {}
            Component::ParentDir => {
                if depth == 0 {
                    return Err(traversal_error(entry_path));
                }
                target.pop();
                depth -= 1;
            }
            Component::RootDir | Component::Prefix(_) => {
                return Err(traversal_error(entry_path));
            }
        }
    }

    Ok(target)
}

fn traversal_error(path: &Path) -> SkillportError {
    SkillportError::Traversal {
        path: path.display().to_string(),
    }
}

/// Materialize one regular-file entry at its declared mode.
fn write_file<R: Read>(entry: &mut tar::Entry<'_, R>, target: &Path) -> Result<()> {
    if let Some(parent) = target.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            SkillportError::Other(format!(
                "Failed to create parent directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    let mode = entry
        .header()
        .mode()
        .map_err(|e| SkillportError::Archive(format!("Invalid entry mode: {}", e)))?;

    let mut options = std::fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(mode);
    }
    #[cfg(not(unix))]
    let _ = mode;

    let mut file = options.open(target).map_err(|e| {
        SkillportError::Other(format!("Failed to create file {}: {}", target.display(), e))
    })?;
    std::io::copy(entry, &mut file).map_err(|e| {
        SkillportError::Other(format!("Failed to write file {}: {}", target.display(), e))
    })?;

    Ok(())
}
