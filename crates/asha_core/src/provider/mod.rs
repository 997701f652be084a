//! Collaborator interfaces for external services.
//!
//! # Responsibility
//! - Define the synchronous contracts the engine dispatches against.
//! - Keep transport details (HTTP clients, credentials) outside the core.
//!
//! # Invariants
//! - Implementations own their network timeouts (order of seconds).
//! - Faults surface as typed errors, never panics; the engine converts
//!   every error into a degraded envelope at the handler boundary.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod knowledge;
pub mod launcher;
pub mod media;
pub mod weather;

pub use knowledge::{KnowledgeError, KnowledgeProvider};
pub use launcher::AppLauncher;
pub use media::MediaSearchProvider;
pub use weather::WeatherProvider;

/// Transport-level failure shared across providers.
#[derive(Debug)]
pub enum ProviderError {
    /// The request exceeded the provider's own timeout.
    Timeout,
    /// Connection-level failure (DNS, refused, TLS, ...).
    Transport(String),
    /// Non-success response from the remote service.
    Status { code: u16, message: String },
    /// The collaborator is not usable (missing binary, quota exhausted, ...).
    Unavailable(String),
}

impl Display for ProviderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Timeout => write!(f, "provider request timed out"),
            Self::Transport(message) => write!(f, "provider transport failure: {message}"),
            Self::Status { code, message } => {
                write!(f, "provider returned status {code}: {message}")
            }
            Self::Unavailable(message) => write!(f, "provider unavailable: {message}"),
        }
    }
}

impl Error for ProviderError {}
