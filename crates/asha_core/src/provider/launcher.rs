//! System app launcher collaborator contract.

use crate::provider::ProviderError;

/// Launches a local application by its catalog command string.
///
/// The engine owns the spoken-name to command mapping; implementations own
/// process spawning and platform specifics.
pub trait AppLauncher: Send + Sync {
    fn launch(&self, command: &str) -> Result<(), ProviderError>;
}
