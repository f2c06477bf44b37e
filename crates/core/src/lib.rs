//! Core types, errors, and configuration for talkscope
//!
//! This crate provides the value types shared by the transcript parser and the
//! analytics pipeline, together with the TOML-backed configuration and the
//! error type used by configuration handling.

pub mod config;
pub mod constants;
pub mod error;
pub mod types;

// Re-exports for convenience
pub use config::TalkscopeConfig;
pub use error::{Error, Result};
pub use types::*;
