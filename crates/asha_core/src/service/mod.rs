//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate persistence calls into use-case level APIs.
//! - Keep the engine decoupled from storage details.

pub mod note_service;
