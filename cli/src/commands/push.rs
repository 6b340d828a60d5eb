//! `skillport push` command.

use std::path::PathBuf;

use clap::Args;

use skillport_runtime::{ImageReference, RegistryAuth, SkillPusher};

#[derive(Args)]
pub struct PushArgs {
    /// Path to the skill directory (must contain SKILL.md)
    pub skill_path: PathBuf,

    /// Target reference (e.g., "ghcr.io/user/pdf-tools:v1")
    pub reference: String,
}

pub async fn execute(args: PushArgs) -> Result<(), Box<dyn std::error::Error>> {
    let skill_path = std::fs::canonicalize(&args.skill_path)
        .map_err(|_| format!("skill path does not exist: {}", args.skill_path.display()))?;

    // Parse up front so credential lookup can key off the registry
    let reference = ImageReference::parse(&args.reference)?;
    let auth = RegistryAuth::from_credential_store(&reference.registry);

    println!("Packaging skill from: {}", skill_path.display());

    let pusher = SkillPusher::new(auth);
    let outcome = pusher.push(&skill_path, &args.reference).await?;

    println!("Skill: {}", outcome.name);
    println!("Description: {}", outcome.description);
    println!("Successfully pushed skill!");
    println!("Reference: {}", outcome.reference);
    println!("Digest: {}", outcome.digest);

    Ok(())
}
