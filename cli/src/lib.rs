//! Skillport CLI - package and share Claude skills as OCI artifacts.

pub mod commands;
