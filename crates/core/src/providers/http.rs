use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use super::traits::RateProvider;
use crate::errors::CoreError;
use crate::models::settings::ProviderConfig;

/// Generic JSON-over-HTTP rate provider.
///
/// Both default endpoints (exchangerate.host and exchangerate-api.com) answer
/// with `{ "base": "JPY", "rates": { "KRW": 9.1, ... } }`, so one
/// implementation parameterized by URL and field path covers them.
///
/// - **Free**: no API key.
/// - **Timeout**: per request, from settings (10 s by default).
pub struct HttpRateProvider {
    client: Client,
    name: String,
    url: String,
    rate_path: Vec<String>,
}

impl HttpRateProvider {
    pub fn new(config: &ProviderConfig, timeout_secs: u64) -> Self {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(timeout_secs));
        #[cfg(target_arch = "wasm32")]
        let _ = timeout_secs;
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            name: config.name.clone(),
            url: config.url.clone(),
            rate_path: config.rate_path.split('.').map(str::to_string).collect(),
        }
    }
}

/// Walk a dotted path (e.g. `rates.KRW`) into a JSON body and read a number.
/// Numeric strings are accepted too; some mirrors quote their rates.
pub fn extract_rate<S: AsRef<str>>(body: &Value, path: &[S]) -> Option<f64> {
    let mut node = body;
    for segment in path {
        node = node.get(segment.as_ref())?;
    }
    match node {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl RateProvider for HttpRateProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch_rate(&self) -> Result<f64, CoreError> {
        let body: Value = self
            .client
            .get(&self.url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .map_err(|e| CoreError::Api {
                provider: self.name.clone(),
                message: format!("Failed to parse response: {e}"),
            })?;

        extract_rate(&body, self.rate_path.as_slice()).ok_or_else(|| CoreError::Api {
            provider: self.name.clone(),
            message: format!("No numeric rate at `{}`", self.rate_path.join(".")),
        })
    }
}
