//! Weather collaborator contract.

use crate::model::envelope::WeatherReport;
use crate::provider::ProviderError;

/// Current-conditions lookup by city name, metric units.
///
/// A city unknown to the provider surfaces as `ProviderError::Status` with
/// the remote status code; the handler turns it into a check-the-name prompt.
pub trait WeatherProvider: Send + Sync {
    fn current(&self, city: &str) -> Result<WeatherReport, ProviderError>;
}
