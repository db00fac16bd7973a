
use crate::errors::CoreError;
use crate::models::exchange_rate::{CachedRate, RateNotice, RateSource, RateStatus, ResolvedRate};
use crate::providers::chain::{first_success, validate_rate};
use crate::providers::registry::RateProviderRegistry;
use crate::storage::currency_cache::CurrencyCache;

/// Resolves the JPY→KRW rate: fresh cache → providers in order → stale
/// cache → hardcoded default.
///
/// `resolve` never fails. Individual provider failures are logged and the
/// chain moves on; only the final degraded outcome is reported, as a
/// [`RateNotice`] on the result.
pub struct ExchangeRateService {
    registry: RateProviderRegistry,
    cache: CurrencyCache,
    fallback_rate: f64,
}

impl ExchangeRateService {
    pub fn new(registry: RateProviderRegistry, cache: CurrencyCache, fallback_rate: f64) -> Self {
        Self {
            registry,
            cache,
            fallback_rate,
        }
    }

    pub fn cache(&self) -> &CurrencyCache {
        &self.cache
    }

    pub fn provider_names(&self) -> Vec<String> {
        self.registry.names()
    }

    /// Resolve the current rate.
    ///
    /// Without `force_refresh`, a fresh cache entry is returned as is, and a
    /// manual entry is returned regardless of age.
    pub async fn resolve(&self, force_refresh: bool) -> ResolvedRate {
        let cached = self.cache.get();

        if !force_refresh {
            if let Some(entry) = &cached {
                if entry.source == RateSource::Manual || !self.cache.is_expired(entry) {
                    tracing::debug!(rate = entry.rate, source = %entry.source, "using cached exchange rate");
                    return ResolvedRate {
                        rate: entry.rate,
                        source: Self::cached_source(entry),
                        notice: None,
                    };
                }
            }
        }

        match self.fetch_from_providers().await {
            Ok((rate, provider)) => {
                self.cache.set(rate, RateSource::Api);
                tracing::info!(rate, provider = %provider, "exchange rate updated");
                return ResolvedRate {
                    rate,
                    source: RateSource::Api,
                    notice: Some(RateNotice::Updated { rate, provider }),
                };
            }
            Err(errors) => {
                tracing::warn!(failed = errors.len(), "all exchange rate providers failed");
            }
        }

        if let Some(entry) = cached {
            return ResolvedRate {
                rate: entry.rate,
                source: RateSource::Cache,
                notice: Some(RateNotice::UsingCachedRate {
                    rate: entry.rate,
                    last_updated: entry.last_updated,
                }),
            };
        }

        let rate = self.fallback_rate;
        self.cache.set(rate, RateSource::Fallback);
        ResolvedRate {
            rate,
            source: RateSource::Fallback,
            notice: Some(RateNotice::UsingDefaultRate { rate }),
        }
    }

    /// Pin a user-entered rate. No network call is made.
    pub fn set_manual(&self, rate: f64) -> Result<ResolvedRate, CoreError> {
        if !rate.is_finite() || rate <= 0.0 {
            return Err(CoreError::ValidationError(format!(
                "Exchange rate must be a number greater than 0, got {rate}"
            )));
        }
        self.cache.set(rate, RateSource::Manual);
        tracing::info!(rate, "exchange rate set manually");
        Ok(ResolvedRate {
            rate,
            source: RateSource::Manual,
            notice: Some(RateNotice::ManualRateSet { rate }),
        })
    }

    /// Current cache entry with its expiry state, if any.
    pub fn status(&self) -> Option<RateStatus> {
        let entry = self.cache.get()?;
        Some(RateStatus {
            is_expired: self.cache.is_expired(&entry),
            rate: entry.rate,
            source: entry.source,
            last_updated: entry.last_updated,
        })
    }

    async fn fetch_from_providers(&self) -> Result<(f64, String), Vec<CoreError>> {
        if self.registry.is_empty() {
            return Err(vec![CoreError::NoProvider]);
        }

        first_success(self.registry.providers(), |provider| async move {
            let result = provider
                .fetch_rate()
                .await
                .and_then(|rate| validate_rate(provider.name(), rate));
            if let Err(e) = &result {
                tracing::warn!(provider = provider.name(), error = %e, "exchange rate provider failed");
            }
            result.map(|rate| (rate, provider.name().to_string()))
        })
        .await
    }

    /// A fresh hit keeps manual/fallback provenance; fetched rates read as cache.
    fn cached_source(entry: &CachedRate) -> RateSource {
        match entry.source {
            RateSource::Manual => RateSource::Manual,
            RateSource::Fallback => RateSource::Fallback,
            RateSource::Api | RateSource::Cache => RateSource::Cache,
        }
    }
}
