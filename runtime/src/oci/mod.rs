//! OCI artifact support for skill bundles.
//!
//! This module packages a skill directory into a single-layer OCI
//! artifact with a custom media type and reverses the process on pull:
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                      Skill artifact                         │
//! │                                                             │
//! │  manifest (OCI image manifest)                              │
//! │  ├── config   application/vnd.claude.skill.config.v1+json  │
//! │  │            Labels: name, description, schema version     │
//! │  └── layer    application/vnd.claude.skill.v1+tar          │
//! │               uncompressed tar of the bundle directory      │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! The labels duplicate the validated `SKILL.md` metadata so a pull can
//! display a skill's identity before fetching and extracting content.

mod archive;
pub mod credentials;
mod extract;
mod image;
mod pull;
mod push;
pub mod reference;
pub mod registry;

pub use archive::build_archive;
pub use credentials::CredentialStore;
pub use extract::extract_image;
pub use image::{
    LayerBlob, SkillImage, LABEL_DESCRIPTION, LABEL_SKILL_DESCRIPTION, LABEL_SKILL_NAME,
    LABEL_SKILL_VERSION, LABEL_TITLE, SKILL_CONFIG_MEDIA_TYPE, SKILL_LAYER_MEDIA_TYPE,
    SKILL_SCHEMA_VERSION,
};
pub use pull::{default_skills_dir, PullOutcome, SkillPuller};
pub use push::{PushOutcome, SkillPusher};
pub use reference::ImageReference;
pub use registry::{RegistryAuth, RegistryPuller, RegistryPusher};
