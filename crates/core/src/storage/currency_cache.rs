use std::sync::Arc;

use chrono::{DateTime, Datelike, Local, TimeZone, Timelike, Utc};

use super::kv::KeyValueStore;
use crate::models::exchange_rate::{CachedRate, RateSource};

/// Store key of the single exchange-rate record.
pub const CACHE_KEY: &str = "exchange_rate_cache";

/// Persisted JPY→KRW rate with a freshness window.
///
/// There is exactly one record; every `set` overwrites it in full. Expiry
/// only changes how the resolver treats the record, it is never deleted.
/// A missing, unreadable or corrupted record reads as `None`; failed writes
/// are logged and swallowed.
pub struct CurrencyCache {
    store: Arc<dyn KeyValueStore>,
    ttl_ms: i64,
}

impl CurrencyCache {
    pub fn new(store: Arc<dyn KeyValueStore>, ttl_minutes: i64) -> Self {
        Self {
            store,
            ttl_ms: ttl_minutes.max(0).saturating_mul(60 * 1000),
        }
    }

    pub fn get(&self) -> Option<CachedRate> {
        let raw = match self.store.get(CACHE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(error = %e, "failed to read exchange rate cache");
                return None;
            }
        };

        match serde_json::from_str::<CachedRate>(&raw) {
            Ok(entry) if entry.rate.is_finite() && entry.rate > 0.0 => Some(entry),
            Ok(entry) => {
                tracing::warn!(rate = entry.rate, "ignoring cached exchange rate that is not positive");
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "ignoring corrupted exchange rate cache");
                None
            }
        }
    }

    /// Record `rate` as of now and return the written entry.
    pub fn set(&self, rate: f64, source: RateSource) -> CachedRate {
        self.set_at(rate, source, Utc::now())
    }

    /// Record `rate` as of `at`. The display string uses the local time zone.
    pub fn set_at(&self, rate: f64, source: RateSource, at: DateTime<Utc>) -> CachedRate {
        let entry = CachedRate {
            rate,
            timestamp: at.timestamp_millis(),
            source,
            last_updated: format_display_timestamp(&at.with_timezone(&Local)),
        };

        match serde_json::to_string(&entry) {
            Ok(json) => {
                if let Err(e) = self.store.set(CACHE_KEY, &json) {
                    tracing::error!(error = %e, "failed to persist exchange rate cache");
                }
            }
            Err(e) => tracing::error!(error = %e, "failed to serialize exchange rate cache"),
        }

        entry
    }

    pub fn is_expired(&self, entry: &CachedRate) -> bool {
        self.is_expired_at(entry, Utc::now().timestamp_millis())
    }

    /// Expired once strictly more than the TTL has elapsed since the write.
    pub fn is_expired_at(&self, entry: &CachedRate, now_ms: i64) -> bool {
        now_ms.saturating_sub(entry.timestamp) > self.ttl_ms
    }

    /// Drop the record entirely (used by "reset" in front ends).
    pub fn clear(&self) {
        if let Err(e) = self.store.remove(CACHE_KEY) {
            tracing::error!(error = %e, "failed to clear exchange rate cache");
        }
    }
}

/// Korean-locale timestamp, e.g. `2024. 12. 3. 오후 2:05:09`.
pub fn format_display_timestamp<Tz: TimeZone>(at: &DateTime<Tz>) -> String {
    let (is_pm, hour) = at.hour12();
    format!(
        "{}. {}. {}. {} {}:{:02}:{:02}",
        at.year(),
        at.month(),
        at.day(),
        if is_pm { "오후" } else { "오전" },
        hour,
        at.minute(),
        at.second()
    )
}
