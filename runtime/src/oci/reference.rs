//! Registry reference parsing.
//!
//! Parses references like `ghcr.io/user/pdf-tools:v1` into structured
//! components.

use skillport_core::error::{Result, SkillportError};

/// Default registry when none is specified.
const DEFAULT_REGISTRY: &str = "docker.io";

/// Default tag when neither tag nor digest is specified.
const DEFAULT_TAG: &str = "latest";

/// Parsed registry reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageReference {
    /// Registry hostname (e.g., "ghcr.io", "docker.io")
    pub registry: String,
    /// Repository path (e.g., "user/pdf-tools")
    pub repository: String,
    /// Tag (e.g., "latest", "v1.0.0")
    pub tag: Option<String>,
    /// Digest (e.g., "sha256:abc123...")
    pub digest: Option<String>,
}

impl ImageReference {
    /// Parse a reference of the form `registry/repository[:tag][@digest]`.
    ///
    /// - `pdf-tools` → `docker.io/library/pdf-tools:latest`
    /// - `user/pdf-tools:v1` → `docker.io/user/pdf-tools:v1`
    /// - `ghcr.io/user/pdf-tools@sha256:...` → digest reference
    pub fn parse(reference: &str) -> Result<Self> {
        let reference = reference.trim();
        if reference.is_empty() {
            return Err(SkillportError::Reference("empty reference".to_string()));
        }

        // Digest comes after the last `@`
        let (rest, digest) = match reference.rsplit_once('@') {
            Some((rest, digest)) => {
                if !digest.contains(':') {
                    return Err(SkillportError::Reference(format!(
                        "invalid digest in '{}': expected algorithm:hex",
                        reference
                    )));
                }
                (rest, Some(digest.to_string()))
            }
            None => (reference, None),
        };

        let (name, tag) = split_tag(rest);
        let (registry, repository) = split_registry(name)?;

        // Apply the default tag only when there is no digest either
        let tag = if tag.is_none() && digest.is_none() {
            Some(DEFAULT_TAG.to_string())
        } else {
            tag
        };

        Ok(ImageReference {
            registry,
            repository,
            tag,
            digest,
        })
    }

    /// The full reference string.
    pub fn full_reference(&self) -> String {
        let mut s = format!("{}/{}", self.registry, self.repository);
        if let Some(ref tag) = self.tag {
            s.push(':');
            s.push_str(tag);
        }
        if let Some(ref digest) = self.digest {
            s.push('@');
            s.push_str(digest);
        }
        s
    }
}

impl std::fmt::Display for ImageReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.full_reference())
    }
}

/// Split a trailing tag off `name`, leaving `registry:port` intact.
fn split_tag(name: &str) -> (&str, Option<String>) {
    let colon = match name.rfind(':') {
        Some(pos) => pos,
        None => return (name, None),
    };

    match name.rfind('/') {
        // A colon before the last `/` belongs to a registry port
        Some(slash) if colon < slash => (name, None),
        Some(_) => (&name[..colon], Some(name[colon + 1..].to_string())),
        None => {
            // `host:1234` with no path is a registry port, not a tag
            let after = &name[colon + 1..];
            if !after.is_empty() && after.chars().all(|c| c.is_ascii_digit()) {
                (name, None)
            } else {
                (&name[..colon], Some(after.to_string()))
            }
        }
    }
}

/// Split `name` into registry and repository, applying Docker Hub
/// defaults when no registry hostname is present.
fn split_registry(name: &str) -> Result<(String, String)> {
    if let Some((first, rest)) = name.split_once('/') {
        // The first component is a registry when it looks like a hostname
        if first.contains('.') || first.contains(':') || first == "localhost" {
            if rest.is_empty() {
                return Err(SkillportError::Reference(format!(
                    "empty repository in '{}'",
                    name
                )));
            }
            return Ok((first.to_string(), rest.to_string()));
        }
    }

    let repository = if name.contains('/') {
        name.to_string()
    } else {
        // Bare names map to the Docker Hub library namespace
        format!("library/{}", name)
    };

    Ok((DEFAULT_REGISTRY.to_string(), repository))
}
