//! Skill metadata validation.
//!
//! Rule tables are plain data injected at construction, so tests can run
//! alternate rule sets without touching process-wide state.

use regex::Regex;

use skillport_core::error::{Result, SkillportError};

use super::metadata::{FrontMatter, SkillMetadata};

/// Maximum skill name length, in bytes.
pub const MAX_NAME_LENGTH: usize = 64;

/// Maximum skill description length, in bytes.
pub const MAX_DESCRIPTION_LENGTH: usize = 1024;

/// Immutable rule table consumed by [`Validator`].
#[derive(Debug, Clone)]
pub struct ValidationRules {
    /// Maximum name length in bytes
    pub max_name_length: usize,

    /// Maximum description length in bytes
    pub max_description_length: usize,

    /// Words that may not appear in a name, matched as case-insensitive
    /// substrings
    pub reserved_words: Vec<String>,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            max_name_length: MAX_NAME_LENGTH,
            max_description_length: MAX_DESCRIPTION_LENGTH,
            reserved_words: vec!["anthropic".to_string(), "claude".to_string()],
        }
    }
}

/// Validates raw front-matter and produces [`SkillMetadata`].
#[derive(Debug)]
pub struct Validator {
    rules: ValidationRules,
    name_pattern: Regex,
    markup_pattern: Regex,
}

impl Validator {
    /// Create a validator with the given rule table.
    pub fn new(rules: ValidationRules) -> Self {
        Self {
            rules,
            name_pattern: Regex::new(r"^[a-z0-9-]+$").expect("valid regex"),
            markup_pattern: Regex::new(r"<[^>]*>").expect("valid regex"),
        }
    }

    /// Validate front-matter fields.
    ///
    /// All rules must pass; the first violated rule, in checking order,
    /// is the one reported.
    pub fn validate(&self, front: &FrontMatter) -> Result<SkillMetadata> {
        self.check_name(&front.name)?;
        self.check_description(&front.description)?;
        Ok(SkillMetadata::new(
            front.name.clone(),
            front.description.clone(),
        ))
    }

    /// Check a candidate name against the name rules alone.
    pub fn check_name(&self, name: &str) -> Result<()> {
        if name.is_empty() {
            return Err(name_error("is required".to_string()));
        }
        if name.len() > self.rules.max_name_length {
            return Err(name_error(format!(
                "exceeds maximum length of {} characters",
                self.rules.max_name_length
            )));
        }
        if !self.name_pattern.is_match(name) {
            return Err(name_error(
                "must contain only lowercase letters, numbers, and hyphens".to_string(),
            ));
        }
        let lowered = name.to_lowercase();
        for reserved in &self.rules.reserved_words {
            if lowered.contains(&reserved.to_lowercase()) {
                return Err(name_error(format!(
                    "cannot contain reserved word: {}",
                    reserved
                )));
            }
        }
        if self.markup_pattern.is_match(name) {
            return Err(name_error("cannot contain markup tags".to_string()));
        }
        Ok(())
    }

    fn check_description(&self, description: &str) -> Result<()> {
        if description.is_empty() {
            return Err(description_error("is required".to_string()));
        }
        if description.len() > self.rules.max_description_length {
            return Err(description_error(format!(
                "exceeds maximum length of {} characters",
                self.rules.max_description_length
            )));
        }
        if self.markup_pattern.is_match(description) {
            return Err(description_error("cannot contain markup tags".to_string()));
        }
        Ok(())
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(ValidationRules::default())
    }
}

fn name_error(message: String) -> SkillportError {
    SkillportError::Validation {
        field: "name",
        message,
    }
}

fn description_error(message: String) -> SkillportError {
    SkillportError::Validation {
        field: "description",
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn front(name: &str, description: &str) -> FrontMatter {
        FrontMatter {
            name: name.to_string(),
            description: description.to_string(),
        }
    }

    fn validate(name: &str, description: &str) -> Result<SkillMetadata> {
        Validator::default().validate(&front(name, description))
    }

    #[test]
    fn test_accepts_valid_metadata() {
        let metadata = validate("pdf-tools", "Extract text from PDFs").unwrap();
        assert_eq!(metadata.name(), "pdf-tools");
        assert_eq!(metadata.description(), "Extract text from PDFs");
    }

    #[test]
    fn test_accepts_digits_and_hyphens() {
        assert!(validate("a-1-b-2", "d").is_ok());
        assert!(validate("x", "d").is_ok());
        assert!(validate(&"a".repeat(64), "d").is_ok());
    }

    #[test]
    fn test_rejects_empty_name() {
        let err = validate("", "d").unwrap_err();
        assert_eq!(err.to_string(), "Invalid name: is required");
    }

    #[test]
    fn test_rejects_name_over_max_length() {
        let err = validate(&"a".repeat(65), "d").unwrap_err();
        assert!(err.to_string().contains("maximum length of 64"));
    }

    #[test]
    fn test_rejects_uppercase_name() {
        let err = validate("Pdf-Tools", "d").unwrap_err();
        assert!(err.to_string().contains("lowercase"));
    }

    #[test]
    fn test_rejects_underscore_name() {
        let err = validate("pdf_tools", "d").unwrap_err();
        assert!(err.to_string().contains("lowercase"));
    }

    #[test]
    fn test_rejects_reserved_words_as_substrings() {
        let err = validate("claude-tools", "d").unwrap_err();
        assert!(err.to_string().contains("reserved word: claude"));

        let err = validate("my-anthropic-skill", "d").unwrap_err();
        assert!(err.to_string().contains("reserved word: anthropic"));
    }

    #[test]
    fn test_rejects_empty_description() {
        let err = validate("pdf-tools", "").unwrap_err();
        assert_eq!(err.to_string(), "Invalid description: is required");
    }

    #[test]
    fn test_rejects_description_over_max_length() {
        assert!(validate("pdf-tools", &"d".repeat(1024)).is_ok());
        let err = validate("pdf-tools", &"d".repeat(1025)).unwrap_err();
        assert!(err.to_string().contains("maximum length of 1024"));
    }

    #[test]
    fn test_rejects_markup_in_description() {
        let err = validate("pdf-tools", "run <script>alert(1)</script>").unwrap_err();
        assert!(err.to_string().contains("markup"));
    }

    #[test]
    fn test_name_rules_checked_before_description_rules() {
        let err = validate("", "").unwrap_err();
        assert!(err.to_string().starts_with("Invalid name"));
    }

    #[test]
    fn test_alternate_rule_set() {
        let validator = Validator::new(ValidationRules {
            max_name_length: 8,
            max_description_length: 16,
            reserved_words: vec!["vendor".to_string()],
        });

        assert!(validator.validate(&front("claude", "fine here")).is_ok());
        assert!(validator.validate(&front("vendor-x", "d")).is_err());
        assert!(validator.validate(&front("too-long-name", "d")).is_err());
        assert!(validator
            .validate(&front("ok", &"d".repeat(17)))
            .is_err());
    }

    #[test]
    fn test_check_name_standalone() {
        let validator = Validator::default();
        assert!(validator.check_name("pdf-tools").is_ok());
        assert!(validator.check_name("../escape").is_err());
    }
}
