//! Schema migration for stored and imported trip documents.
//!
//! Current-schema documents are validated structurally and then decoded
//! through [`crate::models::wire`]. The pre-trip itinerary array is
//! converted into a trip here.

use serde::Deserialize;
use serde_json::Value;

use crate::errors::CoreError;
use crate::models::itinerary::{Category, DayItinerary, ItineraryItem, Links};
use crate::models::money::Money;
use crate::models::trip::{Trip, DEFAULT_EXCHANGE_RATE};
use crate::models::wire::id_or_new;

/// Id given to trips converted from the legacy itinerary array.
pub const LEGACY_TRIP_ID: &str = "converted-trip";
/// Title given to trips converted from the legacy itinerary array.
pub const LEGACY_TRIP_TITLE: &str = "간사이 3박4일 여행";
const LEGACY_PARTICIPANTS: u32 = 2;

/// Pre-trip schema: a bare array of these, one per day.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyItinerary {
    pub id: String,
    pub date: String,
    #[serde(default)]
    pub day_of_week: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub accommodation: Option<String>,
    #[serde(default)]
    pub timeline: Vec<LegacyTimelineEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LegacyTimelineEntry {
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub activity: String,
}

// ── Validation ──────────────────────────────────────────────────────

/// Structural check applied before a raw document is accepted as a trip:
/// `id` and `title` are non-empty strings, `days` is an array and
/// `participants` is a number.
pub fn validate_trip_value(raw: &Value) -> Result<(), CoreError> {
    let obj = raw
        .as_object()
        .ok_or_else(|| CoreError::InvalidTrip("trip must be a JSON object".into()))?;

    let non_empty_str = |key: &str| {
        obj.get(key)
            .and_then(Value::as_str)
            .is_some_and(|s| !s.trim().is_empty())
    };

    if !non_empty_str("id") {
        return Err(CoreError::InvalidTrip("id must be a non-empty string".into()));
    }
    if !non_empty_str("title") {
        return Err(CoreError::InvalidTrip("title must be a non-empty string".into()));
    }
    if !obj.get("days").is_some_and(Value::is_array) {
        return Err(CoreError::InvalidTrip("days must be an array".into()));
    }
    if !obj.get("participants").is_some_and(Value::is_number) {
        return Err(CoreError::InvalidTrip("participants must be a number".into()));
    }
    Ok(())
}

pub fn is_valid_trip(raw: &Value) -> bool {
    validate_trip_value(raw).is_ok()
}

// ── Migration entry points ──────────────────────────────────────────

/// Validate and normalize a current-schema trip document.
pub fn migrate_trip(raw: Value) -> Result<Trip, CoreError> {
    validate_trip_value(&raw)?;
    serde_json::from_value(raw).map_err(|e| CoreError::InvalidTrip(e.to_string()))
}

/// Accept either a trip object or a bare array of legacy itineraries,
/// detected by shape, and return the normalized trip.
pub fn import_legacy(raw: Value) -> Result<Trip, CoreError> {
    match raw {
        Value::Object(_) => {
            if raw.get("days").is_some_and(Value::is_array) {
                migrate_trip(raw)
            } else {
                Err(CoreError::InvalidFileFormat(
                    "object has no `days` array; expected a trip".into(),
                ))
            }
        }
        Value::Array(_) => {
            let legacy: Vec<LegacyItinerary> = serde_json::from_value(raw)
                .map_err(|e| CoreError::InvalidFileFormat(format!("unrecognized itinerary array: {e}")))?;
            Ok(convert_legacy_itineraries(legacy))
        }
        _ => Err(CoreError::InvalidFileFormat(
            "expected a trip object or an itinerary array".into(),
        )),
    }
}

/// Turn the pre-trip itinerary array into a trip: one day per record,
/// one zero-cost item per timeline entry.
pub fn convert_legacy_itineraries(legacy: Vec<LegacyItinerary>) -> Trip {
    let start_date = legacy.first().map(|l| l.date.clone()).unwrap_or_default();
    let end_date = legacy.last().map(|l| l.date.clone()).unwrap_or_default();

    let days = legacy
        .into_iter()
        .map(|itinerary| {
            let items = itinerary
                .timeline
                .into_iter()
                .enumerate()
                .map(|(index, entry)| ItineraryItem {
                    id: format!("{}-{index}", itinerary.id),
                    time: entry.time,
                    category: infer_category(&entry.activity),
                    name: entry.activity,
                    cost: Money::jpy(0.0),
                    links: Links::default(),
                    place_id_or_address: None,
                    memo: None,
                    images: Vec::new(),
                })
                .collect();

            DayItinerary {
                id: id_or_new(itinerary.id),
                date: itinerary.date,
                day_of_week: itinerary.day_of_week.filter(|s| !s.is_empty()),
                city: Some(itinerary.title).filter(|s| !s.is_empty()),
                accommodation: itinerary.accommodation.filter(|s| !s.is_empty()),
                budget_hint: None,
                cover_image: None,
                items,
            }
        })
        .collect();

    Trip {
        id: LEGACY_TRIP_ID.to_string(),
        title: LEGACY_TRIP_TITLE.to_string(),
        start_date,
        end_date,
        days,
        exchange_rate: DEFAULT_EXCHANGE_RATE,
        participants: LEGACY_PARTICIPANTS,
        total_budget: None,
        budget_currency: None,
    }
}

/// Guess a category from a legacy activity description.
pub fn infer_category(activity: &str) -> Category {
    if activity.contains("식사") || activity.contains("저녁") {
        Category::Dining
    } else if activity.contains("이동") || activity.contains("도착") {
        Category::Transportation
    } else if activity.contains("체크인") || activity.contains("휴식") {
        Category::Rest
    } else {
        Category::Sightseeing
    }
}
