//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod document;

pub use document::{handle_document_command, resolve_passphrase, DocumentCommands};
