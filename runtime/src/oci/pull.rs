//! High-level skill pull orchestration.
//!
//! Fetches an artifact, picks the destination from its labels when none
//! is supplied, extracts it, and re-validates the result as a skill
//! bundle.

use std::path::{Path, PathBuf};

use skillport_core::error::{Result, SkillportError};

use super::extract::extract_image;
use super::image::{SkillImage, LABEL_SKILL_NAME};
use super::reference::ImageReference;
use super::registry::{RegistryAuth, RegistryPuller};
use crate::skill::{self, SkillMetadata, Validator};

/// Result of a successful pull.
#[derive(Debug, Clone)]
pub struct PullOutcome {
    /// Validated skill name
    pub name: String,
    /// Validated skill description
    pub description: String,
    /// Manifest digest the reference resolved to
    pub digest: String,
    /// Directory the skill was extracted into
    pub path: PathBuf,
}

/// Pulls skill artifacts and materializes them on disk.
pub struct SkillPuller {
    puller: RegistryPuller,
}

impl SkillPuller {
    /// Create a new skill puller with the given authentication.
    pub fn new(auth: RegistryAuth) -> Self {
        Self {
            puller: RegistryPuller::with_auth(auth),
        }
    }

    /// Pull the artifact at `reference` and extract it.
    ///
    /// When `dest` is `None`, the skill extracts to
    /// `<home>/.claude/skills/<name>` with the name taken from the
    /// artifact's labels.
    pub async fn pull(&self, reference: &str, dest: Option<&Path>) -> Result<PullOutcome> {
        let parsed = ImageReference::parse(reference)?;
        let (image, digest) = self.puller.pull(&parsed).await?;

        let dest = resolve_destination(image.label(LABEL_SKILL_NAME), dest)?;
        let metadata = materialize(&image, &dest)?;

        Ok(PullOutcome {
            name: metadata.name().to_string(),
            description: metadata.description().to_string(),
            digest,
            path: dest,
        })
    }
}

/// Default skills directory: `<home>/.claude/skills`.
pub fn default_skills_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| SkillportError::Other("Cannot determine home directory".to_string()))?;
    Ok(home.join(".claude").join("skills"))
}

/// Pick the extraction destination.
///
/// An explicit destination wins; otherwise the label-derived name picks
/// a directory under the default skills dir. The label has not been
/// validated at this point, so it must pass the name rules before it is
/// used as a path component.
fn resolve_destination(label_name: Option<&str>, dest: Option<&Path>) -> Result<PathBuf> {
    match dest {
        Some(path) => Ok(path.to_path_buf()),
        None => {
            let name = label_name.ok_or_else(|| {
                SkillportError::Other(
                    "Cannot determine skill name from artifact labels".to_string(),
                )
            })?;
            Validator::default().check_name(name)?;
            Ok(default_skills_dir()?.join(name))
        }
    }
}

/// Extract an artifact into a fresh destination and re-validate it.
///
/// Refuses a destination that already exists, before any extraction. A
/// failed extraction leaves the partial directory in place; it must be
/// removed before retrying into the same path.
fn materialize(image: &SkillImage, dest: &Path) -> Result<SkillMetadata> {
    if dest.exists() {
        return Err(SkillportError::Other(format!(
            "Destination path already exists: {}",
            dest.display()
        )));
    }

    extract_image(image, dest)?;

    skill::load_skill_dir(dest)
        .map_err(|e| SkillportError::Other(format!("Extracted skill is invalid: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    use crate::oci::archive::build_archive;
    use crate::skill::FrontMatter;

    fn bundle_image(name: &str, description: &str) -> SkillImage {
        let src = TempDir::new().unwrap();
        fs::write(
            src.path().join("SKILL.md"),
            format!("---\nname: {}\ndescription: {}\n---\n", name, description),
        )
        .unwrap();
        fs::write(src.path().join("run.sh"), "#!/bin/sh\n").unwrap();

        let metadata = Validator::default()
            .validate(&FrontMatter {
                name: name.to_string(),
                description: description.to_string(),
            })
            .unwrap();
        SkillImage::build(build_archive(src.path()).unwrap(), &metadata).unwrap()
    }

    #[test]
    fn test_materialize_round_trip() {
        let image = bundle_image("pdf-tools", "Extract text from PDFs");

        let out = TempDir::new().unwrap();
        let dest = out.path().join("pdf-tools");
        let metadata = materialize(&image, &dest).unwrap();

        assert_eq!(metadata.name(), "pdf-tools");
        assert!(dest.join("SKILL.md").is_file());
        assert!(dest.join("run.sh").is_file());
    }

    #[test]
    fn test_materialize_refuses_existing_destination() {
        let image = bundle_image("pdf-tools", "d");

        let out = TempDir::new().unwrap();
        let dest = out.path().join("pdf-tools");
        fs::create_dir(&dest).unwrap();
        fs::write(dest.join("keep.txt"), "untouched").unwrap();

        let err = materialize(&image, &dest).unwrap_err();
        assert!(err.to_string().contains("already exists"));
        // Nothing was extracted into the pre-existing directory
        assert!(!dest.join("SKILL.md").exists());
        assert_eq!(fs::read_to_string(dest.join("keep.txt")).unwrap(), "untouched");
    }

    #[test]
    fn test_materialize_rejects_invalid_extracted_bundle() {
        // Archive without SKILL.md fails re-validation after extraction
        let src = TempDir::new().unwrap();
        fs::write(src.path().join("other.txt"), "x").unwrap();
        let metadata = Validator::default()
            .validate(&FrontMatter {
                name: "pdf-tools".to_string(),
                description: "d".to_string(),
            })
            .unwrap();
        let image = SkillImage::build(build_archive(src.path()).unwrap(), &metadata).unwrap();

        let out = TempDir::new().unwrap();
        let dest = out.path().join("pdf-tools");
        let err = materialize(&image, &dest).unwrap_err();

        assert!(err.to_string().contains("Extracted skill is invalid"));
        // Files stay on disk for inspection
        assert!(dest.join("other.txt").is_file());
    }

    #[test]
    fn test_resolve_destination_explicit_path_wins() {
        let dest = resolve_destination(Some("pdf-tools"), Some(Path::new("/tmp/custom"))).unwrap();
        assert_eq!(dest, PathBuf::from("/tmp/custom"));
    }

    #[test]
    fn test_resolve_destination_from_label() {
        let dest = resolve_destination(Some("pdf-tools"), None).unwrap();
        assert!(dest.ends_with(Path::new(".claude/skills/pdf-tools")));
    }

    #[test]
    fn test_resolve_destination_without_label_fails() {
        let err = resolve_destination(None, None).unwrap_err();
        assert!(err.to_string().contains("skill name"));
    }

    #[test]
    fn test_resolve_destination_rejects_unsafe_label() {
        assert!(resolve_destination(Some("../escape"), None).is_err());
        assert!(resolve_destination(Some("a/b"), None).is_err());
    }

    #[test]
    fn test_default_skills_dir() {
        let dir = default_skills_dir().unwrap();
        assert!(dir.ends_with(Path::new(".claude/skills")));
    }
}
