//! Media-search collaborator contract.

use crate::model::envelope::VideoResult;
use crate::provider::ProviderError;

/// Video search scoped to music content, provider-ranked.
///
/// An empty result list is a valid non-error outcome; the engine falls back
/// to a provider search URL in that case.
pub trait MediaSearchProvider: Send + Sync {
    fn search(&self, query: &str, max_results: u8) -> Result<Vec<VideoResult>, ProviderError>;
}
