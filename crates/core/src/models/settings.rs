use serde::{Deserialize, Serialize};

use super::trip::DEFAULT_EXCHANGE_RATE;

/// One remote JPY→KRW rate endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Name shown in logs and notices (e.g., "exchangerate.host").
    pub name: String,
    /// Full GET URL returning a JSON body.
    pub url: String,
    /// Dotted path to the rate inside the body (e.g., "rates.KRW").
    #[serde(default = "default_rate_path")]
    pub rate_path: String,
}

/// Participant limit offered by the planner UI.
pub const DEFAULT_MAX_PARTICIPANTS: u32 = 20;

/// Longest accepted cache TTL (one year).
pub const MAX_CACHE_TTL_MINUTES: i64 = 365 * 24 * 60;

/// Longest accepted per-request provider timeout.
pub const MAX_REQUEST_TIMEOUT_SECS: u64 = 300;

fn default_rate_path() -> String {
    "rates.KRW".to_string()
}

/// Tunables for the planner core. Every field has a default, so a partial
/// JSON settings file is enough.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerSettings {
    /// Rate providers in priority order.
    pub providers: Vec<ProviderConfig>,

    /// Per-request timeout for rate providers.
    pub request_timeout_secs: u64,

    /// How long a cached rate counts as fresh.
    pub cache_ttl_minutes: i64,

    /// Rate used when no provider answers and nothing is cached.
    pub fallback_rate: f64,

    /// Upper bound accepted for the participant count.
    pub max_participants: u32,
}

impl Default for PlannerSettings {
    fn default() -> Self {
        Self {
            providers: vec![
                ProviderConfig {
                    name: "exchangerate.host".to_string(),
                    url: "https://api.exchangerate.host/latest?base=JPY&symbols=KRW".to_string(),
                    rate_path: default_rate_path(),
                },
                ProviderConfig {
                    name: "exchangerate-api.com".to_string(),
                    url: "https://api.exchangerate-api.com/v4/latest/JPY".to_string(),
                    rate_path: default_rate_path(),
                },
            ],
            request_timeout_secs: 10,
            cache_ttl_minutes: 60,
            fallback_rate: DEFAULT_EXCHANGE_RATE,
            max_participants: DEFAULT_MAX_PARTICIPANTS,
        }
    }
}

impl PlannerSettings {
    /// Parse settings from JSON, filling anything missing with defaults.
    pub fn from_json(json: &str) -> Result<Self, crate::errors::CoreError> {
        let settings: PlannerSettings = serde_json::from_str(json)?;
        if !settings.fallback_rate.is_finite() || settings.fallback_rate <= 0.0 {
            return Err(crate::errors::CoreError::ValidationError(format!(
                "fallback_rate must be a positive number, got {}",
                settings.fallback_rate
            )));
        }
        if !(0..=MAX_CACHE_TTL_MINUTES).contains(&settings.cache_ttl_minutes) {
            return Err(crate::errors::CoreError::ValidationError(format!(
                "cache_ttl_minutes must be between 0 and {MAX_CACHE_TTL_MINUTES}, got {}",
                settings.cache_ttl_minutes
            )));
        }
        if !(1..=MAX_REQUEST_TIMEOUT_SECS).contains(&settings.request_timeout_secs) {
            return Err(crate::errors::CoreError::ValidationError(format!(
                "request_timeout_secs must be between 1 and {MAX_REQUEST_TIMEOUT_SECS}, got {}",
                settings.request_timeout_secs
            )));
        }
        if settings.max_participants == 0 {
            return Err(crate::errors::CoreError::ValidationError(
                "max_participants must be at least 1".into(),
            ));
        }
        Ok(settings)
    }
}
