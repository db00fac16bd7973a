use super::http::HttpRateProvider;
use super::traits::RateProvider;
use crate::models::settings::PlannerSettings;

/// Ordered list of exchange-rate providers.
///
/// Registration order is priority order: the resolver tries the first
/// provider first and moves down the list on failure.
pub struct RateProviderRegistry {
    providers: Vec<Box<dyn RateProvider>>,
}

impl RateProviderRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
        }
    }

    /// Create a registry with one HTTP provider per configured endpoint.
    pub fn new_with_defaults(settings: &PlannerSettings) -> Self {
        let mut registry = Self::new();
        for config in &settings.providers {
            registry.register(Box::new(HttpRateProvider::new(
                config,
                settings.request_timeout_secs,
            )));
        }
        registry
    }

    /// Append a provider at the lowest priority.
    pub fn register(&mut self, provider: Box<dyn RateProvider>) {
        self.providers.push(provider);
    }

    pub fn providers(&self) -> &[Box<dyn RateProvider>] {
        &self.providers
    }

    pub fn names(&self) -> Vec<String> {
        self.providers.iter().map(|p| p.name().to_string()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }
}

impl Default for RateProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}
