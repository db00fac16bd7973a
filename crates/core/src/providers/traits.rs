use async_trait::async_trait;

use crate::errors::CoreError;

/// A remote source of the JPY→KRW exchange rate.
///
/// Implementations only fetch and parse; range checks and fallback are the
/// resolver's job. If an endpoint changes, only its implementation changes.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait RateProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/notices).
    fn name(&self) -> &str;

    /// Fetch the current number of KRW per 1 JPY.
    async fn fetch_rate(&self) -> Result<f64, CoreError>;
}
