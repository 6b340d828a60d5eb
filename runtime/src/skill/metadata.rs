//! SKILL.md front-matter extraction.
//!
//! The front-matter is a constrained key/value block delimited by `---`
//! lines. Each line is split on the first `:`; values are trimmed and
//! one layer of matching quotes is stripped. Unknown keys and lines
//! without a `:` are ignored for forward compatibility.

use std::io::BufRead;

use skillport_core::error::{Result, SkillportError};

/// Name of the metadata file at the root of every skill bundle.
pub const SKILL_FILE_NAME: &str = "SKILL.md";

/// Front-matter delimiter line.
const DELIMITER: &str = "---";

/// Raw front-matter fields, prior to validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrontMatter {
    pub name: String,
    pub description: String,
}

/// Validated identity of a skill bundle.
///
/// Instances are only constructed by [`super::Validator::validate`] after
/// every rule has passed; there is no partially valid state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillMetadata {
    name: String,
    description: String,
}

impl SkillMetadata {
    pub(crate) fn new(name: String, description: String) -> Self {
        Self { name, description }
    }

    /// The validated skill name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The validated skill description.
    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Extract raw front-matter from a SKILL.md stream.
///
/// # Errors
///
/// Returns error if:
/// - The first line is not the opening `---` delimiter
/// - End of input is reached before a closing `---` delimiter
/// - The underlying read fails
pub fn parse_front_matter<R: BufRead>(reader: R) -> Result<FrontMatter> {
    let mut lines = reader.lines();

    let opening = match lines.next() {
        Some(line) => line?,
        None => String::new(),
    };
    if opening.trim() != DELIMITER {
        return Err(SkillportError::Parse(
            "missing front-matter opening delimiter (---)".to_string(),
        ));
    }

    let mut front = FrontMatter::default();
    let mut found_closing = false;

    for line in lines {
        let line = line?;
        if line.trim() == DELIMITER {
            found_closing = true;
            break;
        }

        let (key, value) = match line.split_once(':') {
            Some(parts) => parts,
            None => continue,
        };

        let key = key.trim();
        let value = strip_quotes(value.trim());

        match key {
            "name" => front.name = value.to_string(),
            "description" => front.description = value.to_string(),
            _ => {}
        }
    }

    if !found_closing {
        return Err(SkillportError::Parse(
            "missing front-matter closing delimiter (---)".to_string(),
        ));
    }

    Ok(front)
}

/// Strip one layer of matching leading/trailing quotes.
fn strip_quotes(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}
