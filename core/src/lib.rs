//! Skillport Core - shared types for the skillport workspace.
//!
//! Currently this crate carries the error taxonomy used by the runtime
//! and CLI crates.

pub mod error;

pub use error::{Result, SkillportError};
