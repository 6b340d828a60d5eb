//! High-level skill push orchestration.
//!
//! Sequences bundle validation, archiving, image assembly, and the
//! registry hand-off.

use std::path::Path;

use skillport_core::error::Result;

use super::archive::build_archive;
use super::image::SkillImage;
use super::reference::ImageReference;
use super::registry::{RegistryAuth, RegistryPusher};
use crate::skill;

/// Result of a successful push.
#[derive(Debug, Clone)]
pub struct PushOutcome {
    /// Validated skill name
    pub name: String,
    /// Validated skill description
    pub description: String,
    /// Full reference the artifact was pushed to
    pub reference: String,
    /// Manifest content digest
    pub digest: String,
}

/// Packages skill bundles and pushes them to a registry.
pub struct SkillPusher {
    pusher: RegistryPusher,
}

impl SkillPusher {
    /// Create a new skill pusher with the given authentication.
    pub fn new(auth: RegistryAuth) -> Self {
        Self {
            pusher: RegistryPusher::with_auth(auth),
        }
    }

    /// Validate, package, and push the bundle at `skill_path`.
    ///
    /// Nothing is stored locally; the artifact goes straight to the
    /// registry.
    pub async fn push(&self, skill_path: &Path, reference: &str) -> Result<PushOutcome> {
        let metadata = skill::load_skill_dir(skill_path)?;
        let parsed = ImageReference::parse(reference)?;

        let archive = build_archive(skill_path)?;
        tracing::debug!(
            skill = %metadata.name(),
            bytes = archive.len(),
            "Bundle archived"
        );

        let image = SkillImage::build(archive, &metadata)?;
        let digest = self.pusher.push(&parsed, &image).await?;

        Ok(PushOutcome {
            name: metadata.name().to_string(),
            description: metadata.description().to_string(),
            reference: parsed.full_reference(),
            digest,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_push_rejects_missing_bundle() {
        let tmp = TempDir::new().unwrap();
        let pusher = SkillPusher::new(RegistryAuth::anonymous());

        let result = pusher
            .push(&tmp.path().join("missing"), "ghcr.io/user/x:v1")
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_push_rejects_invalid_metadata_before_transport() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("SKILL.md"),
            "---\nname: Bad Name\ndescription: d\n---\n",
        )
        .unwrap();

        let pusher = SkillPusher::new(RegistryAuth::anonymous());
        let err = pusher
            .push(tmp.path(), "ghcr.io/user/x:v1")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("name"));
    }

    #[tokio::test]
    async fn test_push_rejects_invalid_reference_before_transport() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("SKILL.md"),
            "---\nname: pdf-tools\ndescription: d\n---\n",
        )
        .unwrap();

        let pusher = SkillPusher::new(RegistryAuth::anonymous());
        let result = pusher.push(tmp.path(), "").await;
        assert!(result.is_err());
    }
}
