//! Skill bundle metadata.
//!
//! A skill bundle is a directory carrying a `SKILL.md` file at its root
//! whose front-matter identifies the bundle. This module extracts that
//! front-matter and enforces the naming and content rules that gate both
//! packaging and extraction.

mod metadata;
mod validate;

pub use metadata::{parse_front_matter, FrontMatter, SkillMetadata, SKILL_FILE_NAME};
pub use validate::{ValidationRules, Validator, MAX_DESCRIPTION_LENGTH, MAX_NAME_LENGTH};

use std::io::BufReader;
use std::path::Path;

use skillport_core::error::{Result, SkillportError};

/// Load and validate the metadata of a skill bundle directory.
///
/// The path must be a directory containing a `SKILL.md` file directly at
/// its root.
///
/// # Errors
///
/// Returns error if:
/// - The path does not exist or is not a directory
/// - `SKILL.md` is missing
/// - The front-matter is malformed or violates a validation rule
pub fn load_skill_dir(path: &Path) -> Result<SkillMetadata> {
    let info = std::fs::metadata(path).map_err(|e| {
        SkillportError::Other(format!("Skill path error: {}: {}", path.display(), e))
    })?;
    if !info.is_dir() {
        return Err(SkillportError::Other(format!(
            "Skill path must be a directory: {}",
            path.display()
        )));
    }

    let skill_file = path.join(SKILL_FILE_NAME);
    if !skill_file.exists() {
        return Err(SkillportError::Other(format!(
            "Missing required file: {}",
            SKILL_FILE_NAME
        )));
    }

    let file = std::fs::File::open(&skill_file)?;
    let front = parse_front_matter(BufReader::new(file))?;
    Validator::default().validate(&front)
}
