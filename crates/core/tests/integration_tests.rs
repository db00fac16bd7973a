use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use trip_planner_core::errors::CoreError;
use trip_planner_core::models::exchange_rate::{RateNotice, RateSource};
use trip_planner_core::models::itinerary::{Category, DayItinerary, ItineraryItem};
use trip_planner_core::models::money::{Currency, Money};
use trip_planner_core::models::settings::PlannerSettings;
use trip_planner_core::providers::registry::RateProviderRegistry;
use trip_planner_core::providers::traits::RateProvider;
use trip_planner_core::storage::kv::{FileStore, KeyValueStore, MemoryStore};
use trip_planner_core::storage::manager::{LoadOrigin, LEGACY_ITINERARIES_KEY};
use trip_planner_core::storage::migration::LEGACY_TRIP_ID;
use trip_planner_core::TripPlanner;

// ═══════════════════════════════════════════════════════════════════
// Mock Rate Provider (for testing without real API calls)
// ═══════════════════════════════════════════════════════════════════

struct FixedRateProvider {
    rate: Option<f64>,
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl RateProvider for FixedRateProvider {
    fn name(&self) -> &str {
        "fixed"
    }

    async fn fetch_rate(&self) -> Result<f64, CoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.rate
            .ok_or_else(|| CoreError::Network("offline".into()))
    }
}

fn registry(rate: Option<f64>) -> (RateProviderRegistry, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut registry = RateProviderRegistry::new();
    registry.register(Box::new(FixedRateProvider {
        rate,
        calls: Arc::clone(&calls),
    }));
    (registry, calls)
}

fn open(store: Arc<dyn KeyValueStore>, rate: Option<f64>) -> TripPlanner {
    let (registry, _) = registry(rate);
    TripPlanner::open_with_providers(store, PlannerSettings::default(), registry)
}

fn empty_day(id: &str) -> DayItinerary {
    let mut day = DayItinerary::new("2024-12-07");
    day.id = id.to_string();
    day
}

// ═══════════════════════════════════════════════════════════════════
// Opening & saving
// ═══════════════════════════════════════════════════════════════════

#[test]
fn create_new_opens_sample_trip() {
    let planner = TripPlanner::create_new();
    assert_eq!(planner.load_origin(), LoadOrigin::Sample);
    assert_eq!(planner.trip().id, "kansai-trip-2024");
    assert!(!planner.has_unsaved_changes());
    assert_eq!(planner.provider_names().len(), 2);
}

#[test]
fn opens_legacy_itineraries() {
    let store = Arc::new(MemoryStore::new());
    store
        .set(
            LEGACY_ITINERARIES_KEY,
            r#"[{"id":"day1","date":"2024-12-03","title":"교토","timeline":[{"time":"09:00","activity":"교토역 도착"}]}]"#,
        )
        .unwrap();

    let planner = open(store, None);
    assert_eq!(planner.load_origin(), LoadOrigin::Legacy);
    assert_eq!(planner.trip().id, LEGACY_TRIP_ID);
    assert_eq!(planner.trip().days[0].items[0].category, Category::Transportation);
}

#[test]
fn mutations_mark_dirty_and_save_clears() {
    let store = Arc::new(MemoryStore::new());
    let mut planner = open(store.clone(), None);

    planner.set_participants(4).unwrap();
    assert!(planner.has_unsaved_changes());
    planner.save().unwrap();
    assert!(!planner.has_unsaved_changes());

    let reopened = open(store, None);
    assert_eq!(reopened.load_origin(), LoadOrigin::Saved);
    assert_eq!(reopened.trip().participants, 4);
}

#[test]
fn rejected_mutation_leaves_trip_unchanged() {
    let mut planner = TripPlanner::create_new();
    let before = planner.trip().clone();

    assert!(planner.set_participants(0).is_err());
    assert!(planner.set_participants(21).is_err());
    assert!(planner.set_title("").is_err());
    assert!(planner.remove_day("missing").is_err());
    assert!(planner
        .add_item("day1", ItineraryItem::new("09:00", "X", Category::Dining, Money::jpy(-1.0)))
        .is_err());

    assert_eq!(planner.trip(), &before);
    assert!(!planner.has_unsaved_changes());
}

#[test]
fn configured_participant_limit() {
    let settings = PlannerSettings {
        max_participants: 4,
        ..PlannerSettings::default()
    };
    let (registry, _) = registry(None);
    let mut planner =
        TripPlanner::open_with_providers(Arc::new(MemoryStore::new()), settings, registry);
    assert!(planner.set_participants(4).is_ok());
    assert!(matches!(
        planner.set_participants(5),
        Err(CoreError::ValidationError(_))
    ));
}

#[test]
fn file_store_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FileStore::open(dir.path()).unwrap());
    let mut planner = open(store, None);

    let day_id = planner.add_day(empty_day("day5")).unwrap();
    let item_id = planner
        .add_item(
            &day_id,
            ItineraryItem::new("11:00", "Nara Park", Category::Sightseeing, Money::jpy(0.0)),
        )
        .unwrap();
    planner.save().unwrap();

    let reopened = open(Arc::new(FileStore::open(dir.path()).unwrap()), None);
    let day = reopened.trip().find_day("day5").unwrap();
    assert_eq!(day.find_item(&item_id).unwrap().name, "Nara Park");
    assert_eq!(reopened.trip(), planner.trip());
}

// ═══════════════════════════════════════════════════════════════════
// Items & days through the facade
// ═══════════════════════════════════════════════════════════════════

#[test]
fn item_lifecycle_updates_budget() {
    let mut planner = TripPlanner::create_new();
    let before = planner.budget_summary().total_jpy;

    let id = planner
        .add_item("day1", ItineraryItem::new("20:00", "Matcha", Category::Dining, Money::jpy(800.0)))
        .unwrap();
    assert!((planner.budget_summary().total_jpy - before - 800.0).abs() < 1e-6);

    let mut edited = planner.trip().find_day("day1").unwrap().find_item(&id).unwrap().clone();
    edited.cost = Money::krw(9200.0);
    planner.update_item("day1", edited).unwrap();
    assert!((planner.budget_summary().total_jpy - before - 1000.0).abs() < 1e-6);

    planner.move_item("day1", &id, 0).unwrap();
    assert_eq!(planner.trip().days[0].items[0].id, id);

    planner.remove_item("day1", &id).unwrap();
    assert!((planner.budget_summary().total_jpy - before).abs() < 1e-6);
}

#[test]
fn day_summary_and_cover_image() {
    let mut planner = TripPlanner::create_new();
    let summary = planner.day_summary("day1").unwrap();
    assert_eq!(summary.item_count, 6);
    assert_eq!(summary.total_jpy, 31700.0);
    assert!((summary.per_person_jpy - 15850.0).abs() < 1e-6);
    assert!(matches!(planner.day_summary("nope"), Err(CoreError::DayNotFound(_))));

    planner
        .set_cover_image("day2", Some("https://example.com/arashiyama.jpg".into()))
        .unwrap();
    assert_eq!(
        planner.trip().find_day("day2").unwrap().cover_image.as_deref(),
        Some("https://example.com/arashiyama.jpg")
    );
}

#[test]
fn update_and_remove_day() {
    let mut planner = TripPlanner::create_new();
    let mut day = planner.trip().find_day("day4").unwrap().clone();
    day.accommodation = None;
    planner.update_day(day).unwrap();
    assert!(planner.trip().find_day("day4").unwrap().accommodation.is_none());

    let removed = planner.remove_day("day4").unwrap();
    assert_eq!(removed.id, "day4");
    assert_eq!(planner.trip().days.len(), 3);
}

// ═══════════════════════════════════════════════════════════════════
// Exchange rate through the facade
// ═══════════════════════════════════════════════════════════════════

#[tokio::test]
async fn refresh_writes_rate_into_trip() {
    let mut planner = open(Arc::new(MemoryStore::new()), Some(9.5));
    let resolved = planner.refresh_exchange_rate(false).await;

    assert_eq!(resolved.source, RateSource::Api);
    assert_eq!(planner.trip().exchange_rate, 9.5);
    assert!(planner.has_unsaved_changes());

    let status = planner.exchange_rate_status().unwrap();
    assert_eq!(status.rate, 9.5);
    assert!(!status.is_expired);
}

#[tokio::test]
async fn offline_first_run_uses_default_rate() {
    let mut planner = open(Arc::new(MemoryStore::new()), None);
    let resolved = planner.refresh_exchange_rate(false).await;

    assert_eq!(resolved.rate, 9.2);
    assert_eq!(resolved.source, RateSource::Fallback);
    assert_eq!(resolved.notice, Some(RateNotice::UsingDefaultRate { rate: 9.2 }));
    assert_eq!(planner.trip().exchange_rate, 9.2);
    assert!(!planner.has_unsaved_changes());
}

#[tokio::test]
async fn manual_rate_survives_reopen_without_network() {
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let mut planner = open(Arc::clone(&store), Some(9.5));
    planner.set_manual_exchange_rate(7.5).unwrap();
    assert_eq!(planner.trip().exchange_rate, 7.5);
    planner.save().unwrap();

    let (registry, calls) = registry(Some(9.5));
    let mut reopened =
        TripPlanner::open_with_providers(store, PlannerSettings::default(), registry);
    let resolved = reopened.refresh_exchange_rate(false).await;
    assert_eq!(resolved.rate, 7.5);
    assert_eq!(resolved.source, RateSource::Manual);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn manual_rate_rejects_zero() {
    let mut planner = TripPlanner::create_new();
    assert!(planner.set_manual_exchange_rate(0.0).is_err());
    assert_eq!(planner.trip().exchange_rate, 9.2);
}

// ═══════════════════════════════════════════════════════════════════
// Budget target
// ═══════════════════════════════════════════════════════════════════

#[test]
fn budget_comparison_follows_target() {
    let mut planner = TripPlanner::create_new();
    assert!(planner.budget_comparison().is_none());

    let spent_krw = planner.budget_summary().total_krw;
    planner
        .set_budget_target(Some(Money::new(spent_krw * 2.0, Currency::KRW)))
        .unwrap();
    let cmp = planner.budget_comparison().unwrap();
    assert!((cmp.progress_percent - 50.0).abs() < 1e-9);
    assert!((cmp.remaining_krw - spent_krw).abs() < 1e-6);

    planner.set_budget_target(None).unwrap();
    assert!(planner.budget_comparison().is_none());
}

// ═══════════════════════════════════════════════════════════════════
// Import / Export
// ═══════════════════════════════════════════════════════════════════

#[test]
fn export_then_import_restores_trip() {
    let mut planner = TripPlanner::create_new();
    let json = planner.export_json().unwrap();
    let original = planner.trip().clone();

    planner.set_title("Changed").unwrap();
    planner.import_json(&json).unwrap();
    assert_eq!(planner.trip(), &original);
    assert!(planner.has_unsaved_changes());
}

#[test]
fn failed_import_keeps_trip() {
    let mut planner = TripPlanner::create_new();
    let before = planner.trip().clone();
    assert!(planner.import_json(r#"{"title": "no days"}"#).is_err());
    assert!(planner.import_json("]").is_err());
    assert_eq!(planner.trip(), &before);
}

#[test]
fn day_import_replaces_or_appends() {
    let mut source = TripPlanner::create_new();
    source
        .add_item("day2", ItineraryItem::new("21:00", "Onsen", Category::Rest, Money::jpy(1500.0)))
        .unwrap();
    let day_json = source.export_day_json("day2").unwrap();

    let mut target = TripPlanner::create_new();
    assert_eq!(target.import_day_json(&day_json).unwrap(), "day2");
    assert_eq!(target.trip().days.len(), 4);
    assert_eq!(target.trip().find_day("day2").unwrap().items.len(), 7);

    target.remove_day("day2").unwrap();
    target.import_day_json(&day_json).unwrap();
    assert_eq!(target.trip().days.len(), 4);
    assert_eq!(target.trip().days[3].id, "day2");

    assert!(matches!(
        target.export_day_json("missing"),
        Err(CoreError::DayNotFound(_))
    ));
}
