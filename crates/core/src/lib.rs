pub mod errors;
pub mod models;
pub mod providers;
pub mod services;
pub mod storage;

use std::sync::Arc;

use models::{
    budget::{BudgetComparison, BudgetSummary, DaySummary},
    exchange_rate::{RateStatus, ResolvedRate},
    itinerary::{DayItinerary, ItineraryItem},
    money::Money,
    settings::PlannerSettings,
    trip::Trip,
};
use providers::registry::RateProviderRegistry;
use services::{
    budget_service::BudgetService, exchange_rate_service::ExchangeRateService,
    trip_service::TripService,
};
use storage::{
    currency_cache::CurrencyCache,
    kv::{KeyValueStore, MemoryStore},
    manager::{LoadOrigin, TripStore},
};

use errors::CoreError;

/// Main entry point for the trip planner core library.
/// Holds the trip being edited and all services needed to operate on it.
#[must_use]
pub struct TripPlanner {
    trip: Trip,
    origin: LoadOrigin,
    settings: PlannerSettings,
    trip_store: TripStore,
    trip_service: TripService,
    budget_service: BudgetService,
    rate_service: ExchangeRateService,
    /// Tracks whether any mutation has occurred since the last save/load.
    dirty: bool,
}

impl std::fmt::Debug for TripPlanner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TripPlanner")
            .field("trip_id", &self.trip.id)
            .field("days", &self.trip.days.len())
            .field("items", &self.trip.item_count())
            .field("exchange_rate", &self.trip.exchange_rate)
            .field("origin", &self.origin)
            .field("dirty", &self.dirty)
            .finish()
    }
}

impl TripPlanner {
    /// Start over an in-memory store with default settings.
    /// Nothing is saved there, so this opens the sample trip.
    pub fn create_new() -> Self {
        Self::open(Arc::new(MemoryStore::new()), PlannerSettings::default())
    }

    /// Open the trip saved in `store`, falling back to legacy data and then
    /// the sample trip. Rate providers come from `settings`.
    pub fn open(store: Arc<dyn KeyValueStore>, settings: PlannerSettings) -> Self {
        let registry = RateProviderRegistry::new_with_defaults(&settings);
        Self::open_with_providers(store, settings, registry)
    }

    /// Same as [`TripPlanner::open`] with an explicit provider chain.
    pub fn open_with_providers(
        store: Arc<dyn KeyValueStore>,
        settings: PlannerSettings,
        registry: RateProviderRegistry,
    ) -> Self {
        let trip_store = TripStore::new(Arc::clone(&store));
        let (trip, origin) = trip_store.load_with_origin();
        tracing::info!(trip_id = %trip.id, ?origin, days = trip.days.len(), "trip loaded");

        let cache = CurrencyCache::new(store, settings.cache_ttl_minutes);
        let rate_service = ExchangeRateService::new(registry, cache, settings.fallback_rate);

        Self {
            trip,
            origin,
            trip_service: TripService::new(settings.max_participants),
            budget_service: BudgetService::new(),
            rate_service,
            trip_store,
            settings,
            dirty: false,
        }
    }

    /// Persist the trip. Clears the unsaved-changes flag on success.
    pub fn save(&mut self) -> Result<(), CoreError> {
        self.trip_store.try_save(&self.trip)?;
        self.dirty = false;
        Ok(())
    }

    #[must_use]
    pub fn trip(&self) -> &Trip {
        &self.trip
    }

    /// Where the current trip came from when the planner was opened.
    #[must_use]
    pub fn load_origin(&self) -> LoadOrigin {
        self.origin
    }

    #[must_use]
    pub fn settings(&self) -> &PlannerSettings {
        &self.settings
    }

    /// Returns `true` if the trip has been modified since the last save/load.
    #[must_use]
    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty
    }

    // ── Trip Fields ─────────────────────────────────────────────────

    pub fn set_title(&mut self, title: &str) -> Result<(), CoreError> {
        self.trip_service.set_title(&mut self.trip, title)?;
        self.dirty = true;
        Ok(())
    }

    /// Set the participant count (1 to the configured maximum).
    pub fn set_participants(&mut self, participants: u32) -> Result<(), CoreError> {
        self.trip_service
            .set_participants(&mut self.trip, participants)?;
        self.dirty = true;
        Ok(())
    }

    /// Set or clear the spending target.
    pub fn set_budget_target(&mut self, target: Option<Money>) -> Result<(), CoreError> {
        self.trip_service
            .set_budget_target(&mut self.trip, target)?;
        self.dirty = true;
        Ok(())
    }

    // ── Day Management ──────────────────────────────────────────────

    /// Append a day and return its id.
    pub fn add_day(&mut self, day: DayItinerary) -> Result<String, CoreError> {
        let id = self.trip_service.add_day(&mut self.trip, day)?;
        self.dirty = true;
        Ok(id)
    }

    pub fn update_day(&mut self, day: DayItinerary) -> Result<(), CoreError> {
        self.trip_service.update_day(&mut self.trip, day)?;
        self.dirty = true;
        Ok(())
    }

    pub fn remove_day(&mut self, day_id: &str) -> Result<DayItinerary, CoreError> {
        let removed = self.trip_service.remove_day(&mut self.trip, day_id)?;
        self.dirty = true;
        Ok(removed)
    }

    /// Set or clear a day's cover image (URL or data URI).
    pub fn set_cover_image(&mut self, day_id: &str, image: Option<String>) -> Result<(), CoreError> {
        self.trip_service
            .set_cover_image(&mut self.trip, day_id, image)?;
        self.dirty = true;
        Ok(())
    }

    // ── Item Management ─────────────────────────────────────────────

    /// Append an item to a day and return its id.
    pub fn add_item(&mut self, day_id: &str, item: ItineraryItem) -> Result<String, CoreError> {
        let id = self.trip_service.add_item(&mut self.trip, day_id, item)?;
        self.dirty = true;
        Ok(id)
    }

    pub fn update_item(&mut self, day_id: &str, item: ItineraryItem) -> Result<(), CoreError> {
        self.trip_service.update_item(&mut self.trip, day_id, item)?;
        self.dirty = true;
        Ok(())
    }

    pub fn remove_item(&mut self, day_id: &str, item_id: &str) -> Result<ItineraryItem, CoreError> {
        let removed = self
            .trip_service
            .remove_item(&mut self.trip, day_id, item_id)?;
        self.dirty = true;
        Ok(removed)
    }

    /// Reorder an item within its day.
    pub fn move_item(&mut self, day_id: &str, item_id: &str, to_index: usize) -> Result<(), CoreError> {
        self.trip_service
            .move_item(&mut self.trip, day_id, item_id, to_index)?;
        self.dirty = true;
        Ok(())
    }

    // ── Exchange Rate ───────────────────────────────────────────────

    /// Resolve the JPY→KRW rate and write it into the trip.
    /// Never fails; a degraded outcome is reported through the notice.
    pub async fn refresh_exchange_rate(&mut self, force_refresh: bool) -> ResolvedRate {
        let resolved = self.rate_service.resolve(force_refresh).await;
        self.apply_rate(resolved.rate);
        resolved
    }

    /// Pin a user-entered rate and write it into the trip.
    pub fn set_manual_exchange_rate(&mut self, rate: f64) -> Result<ResolvedRate, CoreError> {
        let resolved = self.rate_service.set_manual(rate)?;
        self.apply_rate(resolved.rate);
        Ok(resolved)
    }

    #[must_use]
    pub fn exchange_rate_status(&self) -> Option<RateStatus> {
        self.rate_service.status()
    }

    #[must_use]
    pub fn provider_names(&self) -> Vec<String> {
        self.rate_service.provider_names()
    }

    fn apply_rate(&mut self, rate: f64) {
        if self.trip.exchange_rate != rate
            && self.trip_service.set_exchange_rate(&mut self.trip, rate).is_ok()
        {
            self.dirty = true;
        }
    }

    // ── Budget ──────────────────────────────────────────────────────

    /// Trip totals at the trip's current exchange rate.
    #[must_use]
    pub fn budget_summary(&self) -> BudgetSummary {
        self.budget_service
            .summarize(&self.trip, self.trip.exchange_rate)
    }

    pub fn day_summary(&self, day_id: &str) -> Result<DaySummary, CoreError> {
        let day = self
            .trip
            .find_day(day_id)
            .ok_or_else(|| CoreError::DayNotFound(day_id.to_string()))?;
        Ok(self
            .budget_service
            .summarize_day(day, self.trip.exchange_rate, self.trip.participants))
    }

    /// Spending against the budget target, if one is set.
    #[must_use]
    pub fn budget_comparison(&self) -> Option<BudgetComparison> {
        let target = self.trip.budget_target()?;
        let summary = self.budget_summary();
        Some(
            self.budget_service
                .compare(&summary, target, self.trip.exchange_rate),
        )
    }

    // ── Import / Export ─────────────────────────────────────────────

    pub fn export_json(&self) -> Result<String, CoreError> {
        TripStore::export_trip_json(&self.trip)
    }

    pub fn export_day_json(&self, day_id: &str) -> Result<String, CoreError> {
        let day = self
            .trip
            .find_day(day_id)
            .ok_or_else(|| CoreError::DayNotFound(day_id.to_string()))?;
        TripStore::export_day_json(day)
    }

    /// Replace the whole trip with an imported document.
    /// Accepts a current or older trip file, or a legacy itinerary array.
    pub fn import_json(&mut self, json: &str) -> Result<(), CoreError> {
        let trip = TripStore::import_json(json)?;
        tracing::info!(trip_id = %trip.id, days = trip.days.len(), "trip imported");
        self.trip = trip;
        self.dirty = true;
        Ok(())
    }

    /// Import one day. A day with the same id is replaced in place;
    /// otherwise the day is appended. Returns the day id.
    pub fn import_day_json(&mut self, json: &str) -> Result<String, CoreError> {
        let day = TripStore::import_day_json(json)?;
        let id = day.id.clone();
        if self.trip.find_day(&id).is_some() {
            self.trip_service.update_day(&mut self.trip, day)?;
        } else {
            self.trip_service.add_day(&mut self.trip, day)?;
        }
        self.dirty = true;
        Ok(id)
    }
}
