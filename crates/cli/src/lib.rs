//! Command-line interface for talkscope.
//!
//! This crate provides CLI commands for analyzing exported KakaoTalk
//! transcripts and managing the talkscope configuration file.

#![deny(missing_docs, unsafe_code)]

/// CLI command definitions and parsing.
pub mod commands;

/// CLI application entry point and configuration.
pub mod app;

/// Error types for CLI operations.
pub mod error;
