use serde::{Deserialize, Serialize};

/// Provenance of the exchange rate currently in use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RateSource {
    /// Fetched from a remote provider just now.
    Api,
    /// Entered by the user.
    Manual,
    /// Served from the persisted cache entry.
    Cache,
    /// The hardcoded default.
    Fallback,
}

impl RateSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            RateSource::Api => "api",
            RateSource::Manual => "manual",
            RateSource::Cache => "cache",
            RateSource::Fallback => "fallback",
        }
    }

    /// Short Korean label shown next to the rate.
    pub fn label(&self) -> &'static str {
        match self {
            RateSource::Api => "실시간",
            RateSource::Manual => "수동 설정",
            RateSource::Cache => "캐시",
            RateSource::Fallback => "오프라인",
        }
    }
}

impl std::fmt::Display for RateSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The single persisted exchange-rate record.
///
/// Written whole on every update; there is no history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CachedRate {
    pub rate: f64,
    /// Unix epoch milliseconds at write time.
    pub timestamp: i64,
    pub source: RateSource,
    /// Human-readable write time (Korean locale).
    pub last_updated: String,
}

/// A user-facing message produced by rate resolution.
#[derive(Debug, Clone, PartialEq)]
pub enum RateNotice {
    /// A provider answered.
    Updated { rate: f64, provider: String },
    /// Every provider failed; serving the stale cache entry.
    UsingCachedRate { rate: f64, last_updated: String },
    /// Every provider failed and nothing was cached.
    UsingDefaultRate { rate: f64 },
    /// The user set the rate by hand.
    ManualRateSet { rate: f64 },
}

impl RateNotice {
    /// Degraded-mode notices should be shown as warnings.
    pub fn is_degraded(&self) -> bool {
        matches!(
            self,
            RateNotice::UsingCachedRate { .. } | RateNotice::UsingDefaultRate { .. }
        )
    }

    pub fn title(&self) -> &'static str {
        match self {
            RateNotice::Updated { .. } => "환율 업데이트 완료",
            RateNotice::UsingCachedRate { .. } => "네트워크 오류",
            RateNotice::UsingDefaultRate { .. } => "환율 가져오기 실패",
            RateNotice::ManualRateSet { .. } => "환율 수동 설정",
        }
    }
}

impl std::fmt::Display for RateNotice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RateNotice::Updated { rate, provider } => {
                write!(f, "1 JPY = {rate:.2} KRW ({provider})")
            }
            RateNotice::UsingCachedRate { rate, last_updated } => {
                write!(f, "Using cached rate 1 JPY = {rate:.2} KRW ({last_updated})")
            }
            RateNotice::UsingDefaultRate { rate } => {
                write!(f, "Using default rate 1 JPY = {rate} KRW")
            }
            RateNotice::ManualRateSet { rate } => {
                write!(f, "Rate set manually to 1 JPY = {rate:.2} KRW")
            }
        }
    }
}

/// Outcome of a resolution: always a usable positive rate.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRate {
    pub rate: f64,
    pub source: RateSource,
    /// Present whenever the user should be told something.
    pub notice: Option<RateNotice>,
}

/// Snapshot of the cache entry for the budget screen header.
#[derive(Debug, Clone, PartialEq)]
pub struct RateStatus {
    pub rate: f64,
    pub source: RateSource,
    pub last_updated: String,
    pub is_expired: bool,
}
