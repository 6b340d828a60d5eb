//! `skillport pull` command.

use std::path::PathBuf;

use clap::Args;

use skillport_runtime::{ImageReference, RegistryAuth, SkillPuller};

#[derive(Args)]
pub struct PullArgs {
    /// Artifact reference (e.g., "ghcr.io/user/pdf-tools:v1")
    pub reference: String,

    /// Destination directory (default: ~/.claude/skills/<name>)
    pub dest_path: Option<PathBuf>,
}

pub async fn execute(args: PullArgs) -> Result<(), Box<dyn std::error::Error>> {
    let reference = ImageReference::parse(&args.reference)?;
    let auth = RegistryAuth::from_credential_store(&reference.registry);

    println!("Pulling skill from {}...", args.reference);

    let puller = SkillPuller::new(auth);
    let outcome = puller.pull(&args.reference, args.dest_path.as_deref()).await?;

    println!("Skill: {}", outcome.name);
    println!("Description: {}", outcome.description);
    println!("Digest: {}", outcome.digest);
    println!("Successfully pulled skill to: {}", outcome.path.display());

    Ok(())
}
