//! CLI command definitions and dispatch.

mod login;
mod logout;
mod pull;
mod push;

use clap::{Parser, Subcommand};

/// Skillport — package and share Claude skills as OCI artifacts.
#[derive(Parser)]
#[command(name = "skillport", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Subcommand)]
pub enum Command {
    /// Package a skill directory and push it to a registry
    Push(push::PushArgs),
    /// Pull a skill artifact and extract it locally
    Pull(pull::PullArgs),
    /// Store registry credentials
    Login(login::LoginArgs),
    /// Remove stored registry credentials
    Logout(logout::LogoutArgs),
}

/// Dispatch a parsed CLI to the appropriate command handler.
pub async fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Command::Push(args) => push::execute(args).await,
        Command::Pull(args) => pull::execute(args).await,
        Command::Login(args) => login::execute(args).await,
        Command::Logout(args) => logout::execute(args).await,
    }
}
