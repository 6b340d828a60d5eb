//! Skill artifact image model.
//!
//! An in-memory OCI artifact: one uncompressed tar layer plus a config
//! blob whose label map duplicates the validated skill metadata. The
//! custom media types distinguish skill artifacts from arbitrary
//! container images.

use std::collections::BTreeMap;
use std::io::{Cursor, Read};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use skillport_core::error::{Result, SkillportError};

use crate::skill::SkillMetadata;

/// Media type of the skill content layer (uncompressed tar).
pub const SKILL_LAYER_MEDIA_TYPE: &str = "application/vnd.claude.skill.v1+tar";

/// Media type of the skill config blob.
pub const SKILL_CONFIG_MEDIA_TYPE: &str = "application/vnd.claude.skill.config.v1+json";

/// Artifact schema version written into every config.
pub const SKILL_SCHEMA_VERSION: &str = "v1";

/// Standard OCI title annotation key.
pub const LABEL_TITLE: &str = "org.opencontainers.image.title";

/// Standard OCI description annotation key.
pub const LABEL_DESCRIPTION: &str = "org.opencontainers.image.description";

/// Artifact schema version label key.
pub const LABEL_SKILL_VERSION: &str = "com.claude.skill.version";

/// Skill name label key.
pub const LABEL_SKILL_NAME: &str = "com.claude.skill.name";

/// Skill description label key.
pub const LABEL_SKILL_DESCRIPTION: &str = "com.claude.skill.description";

/// A re-openable layer byte source.
///
/// The registry transport may re-read a layer on retry, so a blob hands
/// out a fresh reader per [`LayerBlob::open`] call instead of a
/// single-use stream.
#[derive(Clone)]
pub struct LayerBlob {
    media_type: String,
    opener: Arc<dyn Fn() -> Result<Box<dyn Read + Send>> + Send + Sync>,
}

impl LayerBlob {
    /// Create a blob from an opener thunk.
    pub fn new(
        media_type: impl Into<String>,
        opener: impl Fn() -> Result<Box<dyn Read + Send>> + Send + Sync + 'static,
    ) -> Self {
        Self {
            media_type: media_type.into(),
            opener: Arc::new(opener),
        }
    }

    /// Create a blob backed by in-memory bytes.
    pub fn from_bytes(data: Vec<u8>, media_type: impl Into<String>) -> Self {
        let data: Arc<[u8]> = Arc::from(data);
        Self::new(media_type, move || {
            Ok(Box::new(Cursor::new(Arc::clone(&data))) as Box<dyn Read + Send>)
        })
    }

    /// Open a fresh reader over the blob's bytes.
    pub fn open(&self) -> Result<Box<dyn Read + Send>> {
        (self.opener)()
    }

    /// Read the blob fully into memory.
    pub fn bytes(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.open()?.read_to_end(&mut buf)?;
        Ok(buf)
    }

    /// The blob's media type.
    pub fn media_type(&self) -> &str {
        &self.media_type
    }
}

impl std::fmt::Debug for LayerBlob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayerBlob")
            .field("media_type", &self.media_type)
            .finish_non_exhaustive()
    }
}

/// Artifact config blob, shaped like an OCI image configuration.
///
/// Only the pieces the skill pipeline reads and writes are modeled;
/// unknown fields in pulled configs are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImageConfigFile {
    #[serde(default)]
    pub architecture: String,
    #[serde(default)]
    pub os: String,
    #[serde(default)]
    pub config: RuntimeConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rootfs: Option<RootFs>,
}

/// The `config` section carrying the label map.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuntimeConfig {
    // Sorted map keeps serialized configs byte-identical across builds
    #[serde(rename = "Labels", default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
}

/// Uncompressed layer digest list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RootFs {
    #[serde(rename = "type")]
    pub kind: String,
    pub diff_ids: Vec<String>,
}

/// In-memory skill artifact: ordered layers plus a config document.
#[derive(Debug)]
pub struct SkillImage {
    layers: Vec<LayerBlob>,
    config: ImageConfigFile,
}

impl SkillImage {
    /// Build a skill artifact from archive bytes and validated metadata.
    ///
    /// The archive becomes the sole layer; the config label map gets
    /// exactly five entries duplicating the metadata.
    pub fn build(archive: Vec<u8>, metadata: &SkillMetadata) -> Result<SkillImage> {
        let diff_id = format!("sha256:{}", sha256_hex(&archive));
        let layer = LayerBlob::from_bytes(archive, SKILL_LAYER_MEDIA_TYPE);

        let mut labels = BTreeMap::new();
        labels.insert(LABEL_TITLE.to_string(), metadata.name().to_string());
        labels.insert(
            LABEL_DESCRIPTION.to_string(),
            metadata.description().to_string(),
        );
        labels.insert(
            LABEL_SKILL_VERSION.to_string(),
            SKILL_SCHEMA_VERSION.to_string(),
        );
        labels.insert(LABEL_SKILL_NAME.to_string(), metadata.name().to_string());
        labels.insert(
            LABEL_SKILL_DESCRIPTION.to_string(),
            metadata.description().to_string(),
        );

        let config = ImageConfigFile {
            config: RuntimeConfig { labels },
            rootfs: Some(RootFs {
                kind: "layers".to_string(),
                diff_ids: vec![diff_id],
            }),
            ..Default::default()
        };

        Ok(SkillImage {
            layers: vec![layer],
            config,
        })
    }

    /// Reassemble an artifact from transport blobs.
    pub fn from_parts(layers: Vec<LayerBlob>, config_data: &[u8]) -> Result<SkillImage> {
        let config: ImageConfigFile = serde_json::from_slice(config_data)
            .map_err(|e| SkillportError::Build(format!("Failed to parse image config: {}", e)))?;
        Ok(SkillImage { layers, config })
    }

    /// Layers in image order.
    pub fn layers(&self) -> &[LayerBlob] {
        &self.layers
    }

    /// The full label map.
    pub fn labels(&self) -> &BTreeMap<String, String> {
        &self.config.config.labels
    }

    /// Look up a label value by key.
    pub fn label(&self, key: &str) -> Option<&str> {
        self.config.config.labels.get(key).map(|s| s.as_str())
    }

    /// Serialize the config blob.
    pub fn config_bytes(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(&self.config)?)
    }
}

/// Hex-encoded sha256 of raw bytes.
pub(crate) fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skill::{FrontMatter, Validator};

    fn test_metadata() -> SkillMetadata {
        Validator::default()
            .validate(&FrontMatter {
                name: "pdf-tools".to_string(),
                description: "Extract text from PDFs".to_string(),
            })
            .unwrap()
    }

    #[test]
    fn test_build_sets_exactly_five_labels() {
        let image = SkillImage::build(b"archive".to_vec(), &test_metadata()).unwrap();

        assert_eq!(image.labels().len(), 5);
        assert_eq!(image.label(LABEL_TITLE), Some("pdf-tools"));
        assert_eq!(image.label(LABEL_DESCRIPTION), Some("Extract text from PDFs"));
        assert_eq!(image.label(LABEL_SKILL_VERSION), Some("v1"));
        assert_eq!(image.label(LABEL_SKILL_NAME), Some("pdf-tools"));
        assert_eq!(
            image.label(LABEL_SKILL_DESCRIPTION),
            Some("Extract text from PDFs")
        );
    }

    #[test]
    fn test_build_single_layer_with_skill_media_type() {
        let image = SkillImage::build(b"archive".to_vec(), &test_metadata()).unwrap();

        assert_eq!(image.layers().len(), 1);
        assert_eq!(image.layers()[0].media_type(), SKILL_LAYER_MEDIA_TYPE);
        assert_eq!(image.layers()[0].bytes().unwrap(), b"archive");
    }

    #[test]
    fn test_build_records_layer_diff_id() {
        let image = SkillImage::build(b"archive".to_vec(), &test_metadata()).unwrap();
        let config: ImageConfigFile =
            serde_json::from_slice(&image.config_bytes().unwrap()).unwrap();

        let rootfs = config.rootfs.unwrap();
        assert_eq!(rootfs.kind, "layers");
        assert_eq!(
            rootfs.diff_ids,
            vec![format!("sha256:{}", sha256_hex(b"archive"))]
        );
    }

    #[test]
    fn test_config_bytes_are_idempotent() {
        let metadata = test_metadata();
        let first = SkillImage::build(b"archive".to_vec(), &metadata).unwrap();
        let second = SkillImage::build(b"archive".to_vec(), &metadata).unwrap();

        assert_eq!(
            first.config_bytes().unwrap(),
            second.config_bytes().unwrap()
        );
        assert_eq!(first.labels(), second.labels());
    }

    #[test]
    fn test_layer_blob_reopens() {
        let blob = LayerBlob::from_bytes(b"data".to_vec(), SKILL_LAYER_MEDIA_TYPE);
        assert_eq!(blob.bytes().unwrap(), b"data");
        // A second open must yield the full content again
        assert_eq!(blob.bytes().unwrap(), b"data");
    }

    #[test]
    fn test_from_parts_reads_labels() {
        let config = br#"{"config":{"Labels":{"com.claude.skill.name":"pdf-tools"}}}"#;
        let image = SkillImage::from_parts(Vec::new(), config).unwrap();
        assert_eq!(image.label(LABEL_SKILL_NAME), Some("pdf-tools"));
    }

    #[test]
    fn test_from_parts_tolerates_minimal_config() {
        let image = SkillImage::from_parts(Vec::new(), b"{}").unwrap();
        assert!(image.labels().is_empty());
        assert_eq!(image.label(LABEL_SKILL_NAME), None);
    }

    #[test]
    fn test_from_parts_rejects_malformed_config() {
        assert!(SkillImage::from_parts(Vec::new(), b"{not json").is_err());
    }

    #[test]
    fn test_sha256_hex() {
        // Known sha256 of "hello"
        assert_eq!(
            sha256_hex(b"hello"),
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
    }
}
