//! Skillport Runtime - skill packaging engine.
//!
//! This crate validates skill bundles, packages them into single-layer
//! OCI artifacts, and talks to container registries to push and pull
//! them.

pub mod oci;
pub mod skill;

// Re-export common types
pub use oci::{build_archive, extract_image, CredentialStore, ImageReference};
pub use oci::{LayerBlob, PullOutcome, PushOutcome, SkillImage, SkillPuller, SkillPusher};
pub use oci::{RegistryAuth, RegistryPuller, RegistryPusher};
pub use skill::{load_skill_dir, FrontMatter, SkillMetadata, ValidationRules, Validator};

/// Skillport runtime version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
