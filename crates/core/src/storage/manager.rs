use std::sync::Arc;

use serde_json::Value;

use super::kv::KeyValueStore;
use super::migration;
use super::sample::sample_trip;
use crate::errors::CoreError;
use crate::models::itinerary::DayItinerary;
use crate::models::trip::Trip;

/// Store key of the current-schema trip document.
pub const TRIP_KEY: &str = "kansai-trip-data";
/// Store key of the pre-trip itinerary array (read-only).
pub const LEGACY_ITINERARIES_KEY: &str = "kansai-itineraries";

/// Where a loaded trip came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOrigin {
    Saved,
    Legacy,
    Sample,
}

/// High-level persistence for the trip: load with fallbacks, save, and
/// JSON import/export.
pub struct TripStore {
    store: Arc<dyn KeyValueStore>,
}

impl TripStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Load the trip, preferring the saved document, then legacy itineraries,
    /// then the built-in sample. Never fails: unreadable tiers are skipped.
    pub fn load(&self) -> Trip {
        self.load_with_origin().0
    }

    pub fn load_with_origin(&self) -> (Trip, LoadOrigin) {
        if let Some(raw) = self.read_json(TRIP_KEY) {
            match migration::migrate_trip(raw) {
                Ok(trip) => return (trip, LoadOrigin::Saved),
                Err(e) => tracing::warn!(error = %e, "saved trip is invalid, trying legacy data"),
            }
        }

        if let Some(raw) = self.read_json(LEGACY_ITINERARIES_KEY) {
            match migration::import_legacy(raw) {
                Ok(trip) => {
                    tracing::info!(days = trip.days.len(), "converted legacy itineraries");
                    return (trip, LoadOrigin::Legacy);
                }
                Err(e) => tracing::warn!(error = %e, "legacy itineraries are invalid, using sample trip"),
            }
        }

        (sample_trip(), LoadOrigin::Sample)
    }

    /// Persist the trip. Failures are logged, not returned.
    pub fn save(&self, trip: &Trip) {
        if let Err(e) = self.try_save(trip) {
            tracing::error!(error = %e, trip_id = %trip.id, "failed to save trip");
        }
    }

    pub fn try_save(&self, trip: &Trip) -> Result<(), CoreError> {
        let json = serde_json::to_string(trip)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize trip: {e}")))?;
        self.store.set(TRIP_KEY, &json)
    }

    fn read_json(&self, key: &str) -> Option<Value> {
        let raw = match self.store.get(key) {
            Ok(raw) => raw?,
            Err(e) => {
                tracing::warn!(error = %e, key, "failed to read from store");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(error = %e, key, "stored document is not valid JSON");
                None
            }
        }
    }

    // ── Import / Export ─────────────────────────────────────────────

    /// Pretty JSON of the whole trip, as written to a download file.
    pub fn export_trip_json(trip: &Trip) -> Result<String, CoreError> {
        serde_json::to_string_pretty(trip)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize trip to JSON: {e}")))
    }

    pub fn export_day_json(day: &DayItinerary) -> Result<String, CoreError> {
        serde_json::to_string_pretty(day)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize day to JSON: {e}")))
    }

    /// Parse an imported file: a trip object or a bare legacy itinerary array.
    pub fn import_json(json: &str) -> Result<Trip, CoreError> {
        let raw: Value = serde_json::from_str(json)
            .map_err(|e| CoreError::InvalidFileFormat(format!("not valid JSON: {e}")))?;
        migration::import_legacy(raw)
    }

    /// Parse a single exported day.
    pub fn import_day_json(json: &str) -> Result<DayItinerary, CoreError> {
        let raw: Value = serde_json::from_str(json)
            .map_err(|e| CoreError::InvalidFileFormat(format!("not valid JSON: {e}")))?;
        if !raw.get("items").is_some_and(Value::is_array) {
            return Err(CoreError::InvalidFileFormat(
                "expected a day object with an `items` array".into(),
            ));
        }
        serde_json::from_value(raw).map_err(|e| CoreError::InvalidFileFormat(e.to_string()))
    }
}
