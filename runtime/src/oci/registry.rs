//! Registry transport for skill artifacts.
//!
//! Uses the `oci-distribution` crate to push and pull skill artifacts
//! against container registries (Docker Hub, GHCR, etc.). The core
//! pipeline never sees credentials; authentication is resolved here
//! from the credential store, then environment variables, then
//! anonymous access.

use oci_distribution::client::{ClientConfig, ClientProtocol, Config, ImageLayer};
use oci_distribution::manifest::OciImageManifest;
use oci_distribution::secrets::RegistryAuth as OciRegistryAuth;
use oci_distribution::{Client, Reference};

use skillport_core::error::{Result, SkillportError};

use super::credentials::CredentialStore;
use super::image::{sha256_hex, LayerBlob, SkillImage, SKILL_CONFIG_MEDIA_TYPE, SKILL_LAYER_MEDIA_TYPE};
use super::reference::ImageReference;

/// Authentication credentials for a container registry.
#[derive(Debug, Clone)]
pub struct RegistryAuth {
    username: Option<String>,
    password: Option<String>,
}

impl RegistryAuth {
    /// Create anonymous authentication (no credentials).
    pub fn anonymous() -> Self {
        Self {
            username: None,
            password: None,
        }
    }

    /// Create basic authentication with username and password.
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            password: Some(password.into()),
        }
    }

    /// Create authentication from the `REGISTRY_USERNAME` and
    /// `REGISTRY_PASSWORD` environment variables, falling back to
    /// anonymous if either is unset.
    pub fn from_env() -> Self {
        let username = std::env::var("REGISTRY_USERNAME").ok();
        let password = std::env::var("REGISTRY_PASSWORD").ok();

        if username.is_some() && password.is_some() {
            Self { username, password }
        } else {
            Self::anonymous()
        }
    }

    /// Create authentication from the credential store, falling back to
    /// env vars, then anonymous.
    pub fn from_credential_store(registry: &str) -> Self {
        if let Ok(store) = CredentialStore::default_path() {
            if let Ok(Some((username, password))) = store.get(registry) {
                return Self::basic(username, password);
            }
        }
        Self::from_env()
    }

    /// Convert to oci-distribution auth type.
    fn to_oci_auth(&self) -> OciRegistryAuth {
        match (&self.username, &self.password) {
            (Some(u), Some(p)) => OciRegistryAuth::Basic(u.clone(), p.clone()),
            _ => OciRegistryAuth::Anonymous,
        }
    }
}

/// Pushes skill artifacts to container registries.
pub struct RegistryPusher {
    client: Client,
    auth: RegistryAuth,
}

impl RegistryPusher {
    /// Create a new registry pusher with anonymous authentication.
    pub fn new() -> Self {
        Self::with_auth(RegistryAuth::anonymous())
    }

    /// Create a new registry pusher with the given authentication.
    pub fn with_auth(auth: RegistryAuth) -> Self {
        let config = ClientConfig {
            protocol: ClientProtocol::Https,
            ..Default::default()
        };
        Self {
            client: Client::new(config),
            auth,
        }
    }

    /// Push a skill artifact and return its manifest content digest.
    pub async fn push(&self, reference: &ImageReference, image: &SkillImage) -> Result<String> {
        let oci_ref = to_oci_reference(reference)?;

        tracing::info!(
            reference = %reference,
            "Pushing skill artifact to registry"
        );

        let mut layers = Vec::with_capacity(image.layers().len());
        for blob in image.layers() {
            layers.push(ImageLayer::new(
                blob.bytes()?,
                blob.media_type().to_string(),
                None,
            ));
        }

        let config = Config::new(
            image.config_bytes()?,
            SKILL_CONFIG_MEDIA_TYPE.to_string(),
            None,
        );

        // The manifest digest is the artifact's content digest
        let manifest = OciImageManifest::build(&layers, &config, None);
        let manifest_json = serde_json::to_vec(&manifest)?;
        let digest = format!("sha256:{}", sha256_hex(&manifest_json));

        let auth = self.auth.to_oci_auth();
        self.client
            .push(&oci_ref, &layers, config, &auth, Some(manifest))
            .await
            .map_err(|e| SkillportError::Registry {
                registry: reference.registry.clone(),
                message: format!("Failed to push artifact: {}", e),
            })?;

        tracing::info!(
            reference = %reference,
            digest = %digest,
            "Skill artifact pushed"
        );

        Ok(digest)
    }
}

impl Default for RegistryPusher {
    fn default() -> Self {
        Self::new()
    }
}

/// Pulls skill artifacts from container registries.
pub struct RegistryPuller {
    client: Client,
    auth: RegistryAuth,
}

impl RegistryPuller {
    /// Create a new registry puller with anonymous authentication.
    pub fn new() -> Self {
        Self::with_auth(RegistryAuth::anonymous())
    }

    /// Create a new registry puller with the given authentication.
    pub fn with_auth(auth: RegistryAuth) -> Self {
        let config = ClientConfig {
            protocol: ClientProtocol::Https,
            ..Default::default()
        };
        Self {
            client: Client::new(config),
            auth,
        }
    }

    /// Pull a skill artifact.
    ///
    /// Returns the reassembled image, with its labels readable before
    /// extraction, and the manifest digest it was resolved to.
    pub async fn pull(&self, reference: &ImageReference) -> Result<(SkillImage, String)> {
        let oci_ref = to_oci_reference(reference)?;

        tracing::info!(
            reference = %reference,
            "Pulling skill artifact from registry"
        );

        let auth = self.auth.to_oci_auth();
        let data = self
            .client
            .pull(&oci_ref, &auth, vec![SKILL_LAYER_MEDIA_TYPE])
            .await
            .map_err(|e| SkillportError::Registry {
                registry: reference.registry.clone(),
                message: format!("Failed to pull artifact: {}", e),
            })?;

        let digest = data.digest.unwrap_or_default();
        let layers = data
            .layers
            .into_iter()
            .map(|layer| LayerBlob::from_bytes(layer.data, layer.media_type))
            .collect();

        let image = SkillImage::from_parts(layers, &data.config.data)?;

        tracing::info!(
            reference = %reference,
            digest = %digest,
            "Skill artifact pulled"
        );

        Ok((image, digest))
    }
}

impl Default for RegistryPuller {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert an ImageReference to an oci-distribution Reference.
fn to_oci_reference(reference: &ImageReference) -> Result<Reference> {
    let ref_str = reference.full_reference();
    ref_str.parse::<Reference>().map_err(|e| {
        SkillportError::Reference(format!("invalid OCI reference '{}': {}", ref_str, e))
    })
}
