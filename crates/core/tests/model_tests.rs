// ═══════════════════════════════════════════════════════════════════
// Model Tests — Currency, Money, Category, Trip, rate and budget types,
// PlannerSettings
// ═══════════════════════════════════════════════════════════════════

use trip_planner_core::errors::CoreError;
use trip_planner_core::models::budget::BudgetComparison;
use trip_planner_core::models::exchange_rate::{CachedRate, RateNotice, RateSource};
use trip_planner_core::models::itinerary::{Category, DayItinerary, ItineraryItem};
use trip_planner_core::models::money::{convert, format_currency, Currency, Money};
use trip_planner_core::models::settings::PlannerSettings;
use trip_planner_core::models::trip::{Trip, DEFAULT_EXCHANGE_RATE};

fn day_in(city: &str) -> DayItinerary {
    let mut day = DayItinerary::new("2024-12-03");
    day.city = Some(city.to_string());
    day
}

// ═══════════════════════════════════════════════════════════════════
// Currency & Money
// ═══════════════════════════════════════════════════════════════════

mod currency {
    use super::*;

    #[test]
    fn default_is_yen() {
        assert_eq!(Currency::default(), Currency::JPY);
    }

    #[test]
    fn parses_codes_and_symbols() {
        assert_eq!("jpy".parse::<Currency>().unwrap(), Currency::JPY);
        assert_eq!(" KRW ".parse::<Currency>().unwrap(), Currency::KRW);
        assert_eq!("¥".parse::<Currency>().unwrap(), Currency::JPY);
        assert_eq!("₩".parse::<Currency>().unwrap(), Currency::KRW);
        assert!("USD".parse::<Currency>().is_err());
    }

    #[test]
    fn other_flips_the_pair() {
        assert_eq!(Currency::JPY.other(), Currency::KRW);
        assert_eq!(Currency::KRW.other(), Currency::JPY);
    }

    #[test]
    fn serializes_as_code() {
        assert_eq!(serde_json::to_string(&Currency::KRW).unwrap(), "\"KRW\"");
    }
}

mod money {
    use super::*;

    #[test]
    fn convert_both_directions() {
        assert_eq!(convert(1000.0, Currency::JPY, Currency::KRW, 9.2), 9200.0);
        assert!((convert(9200.0, Currency::KRW, Currency::JPY, 9.2) - 1000.0).abs() < 1e-9);
    }

    #[test]
    fn convert_there_and_back_is_identity() {
        for &rate in &[0.5, 9.2, 9.87, 12.0] {
            for &x in &[0.0, 1.0, 1234.56, 987_654.0] {
                let krw = convert(x, Currency::JPY, Currency::KRW, rate);
                let back = convert(krw, Currency::KRW, Currency::JPY, rate);
                assert!((back - x).abs() < 1e-6, "rate {rate}, x {x}");
            }
        }
    }

    #[test]
    fn in_currency_uses_own_currency() {
        assert_eq!(Money::jpy(100.0).in_currency(Currency::JPY, 9.2), 100.0);
        assert!((Money::jpy(100.0).in_currency(Currency::KRW, 9.2) - 920.0).abs() < 1e-9);
        assert_eq!(Money::krw(920.0).in_currency(Currency::KRW, 9.2), 920.0);
    }

    #[test]
    fn format_groups_thousands() {
        assert_eq!(format_currency(1543.48, Currency::JPY), "¥1,543");
        assert_eq!(format_currency(14200.0, Currency::KRW), "₩14,200");
        assert_eq!(format_currency(0.0, Currency::KRW), "₩0");
        assert_eq!(format_currency(1_000_000.0, Currency::JPY), "¥1,000,000");
    }

    #[test]
    fn format_negative() {
        assert_eq!(format_currency(-3000.0, Currency::KRW), "-₩3,000");
    }

    #[test]
    fn serializes_amount_and_value() {
        let json = serde_json::to_value(Money::jpy(500.0)).unwrap();
        assert_eq!(json["amount"], 500.0);
        assert_eq!(json["value"], 500.0);
        assert_eq!(json["currency"], "JPY");
    }

    #[test]
    fn reads_legacy_value_field() {
        let money: Money = serde_json::from_str(r#"{"value": 500, "currency": "KRW"}"#).unwrap();
        assert_eq!(money, Money::krw(500.0));
    }

    #[test]
    fn missing_currency_defaults_to_yen() {
        let money: Money = serde_json::from_str(r#"{"amount": 12}"#).unwrap();
        assert_eq!(money, Money::jpy(12.0));
    }
}

// ═══════════════════════════════════════════════════════════════════
// Itinerary
// ═══════════════════════════════════════════════════════════════════

mod category {
    use super::*;

    #[test]
    fn accepts_english_and_korean() {
        assert_eq!(Category::from_label("dining"), Category::Dining);
        assert_eq!(Category::from_label("식사"), Category::Dining);
        assert_eq!(Category::from_label("이동"), Category::Transportation);
        assert_eq!(Category::from_label("rest"), Category::Rest);
    }

    #[test]
    fn unknown_is_sightseeing() {
        assert_eq!(Category::from_label("shopping"), Category::Sightseeing);
        assert_eq!(Category::from_label(""), Category::Sightseeing);
    }

    #[test]
    fn written_as_english() {
        for category in Category::ALL {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.as_str()));
            let back: Category = serde_json::from_str(&json).unwrap();
            assert_eq!(back, category);
        }
    }
}

mod itinerary_item {
    use super::*;

    #[test]
    fn new_items_get_distinct_ids() {
        let a = ItineraryItem::new("10:00", "Fushimi Inari", Category::Sightseeing, Money::jpy(0.0));
        let b = ItineraryItem::new("10:00", "Fushimi Inari", Category::Sightseeing, Money::jpy(0.0));
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn serializes_both_name_spellings() {
        let item = ItineraryItem::new("12:00", "Ramen", Category::Dining, Money::jpy(1000.0))
            .with_memo("cash only");
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["name"], "Ramen");
        assert_eq!(json["title"], "Ramen");
        assert_eq!(json["category"], "dining");
        assert_eq!(json["memo"], "cash only");
    }

    #[test]
    fn reads_legacy_item() {
        let item: ItineraryItem = serde_json::from_str(
            r#"{"id":"i1","time":"09:00","title":"X","category":"관광",
                "cost":{"value":500,"currency":"JPY"},
                "links":{"mapUrl":"Kyoto Station","webUrl":"https://example.com"},
                "imageUrl":"a.jpg"}"#,
        )
        .unwrap();
        assert_eq!(item.name, "X");
        assert_eq!(item.cost, Money::jpy(500.0));
        assert_eq!(item.category, Category::Sightseeing);
        assert_eq!(item.links.map.as_deref(), Some("Kyoto Station"));
        assert_eq!(item.links.website.as_deref(), Some("https://example.com"));
        assert_eq!(item.primary_image(), Some("a.jpg"));
    }

    #[test]
    fn image_url_and_images_are_merged_without_duplicates() {
        let item: ItineraryItem = serde_json::from_str(
            r#"{"id":"i1","name":"X","imageUrl":"a.jpg","images":["a.jpg","b.jpg"]}"#,
        )
        .unwrap();
        assert_eq!(item.images, vec!["a.jpg".to_string(), "b.jpg".to_string()]);
    }
}

mod day_itinerary {
    use super::*;

    #[test]
    fn reads_title_and_lodging_aliases() {
        let day: DayItinerary = serde_json::from_str(
            r#"{"id":"d1","date":"2024-12-03","title":"교토","lodging":"Hotel","items":[]}"#,
        )
        .unwrap();
        assert_eq!(day.city.as_deref(), Some("교토"));
        assert_eq!(day.accommodation.as_deref(), Some("Hotel"));
    }

    #[test]
    fn find_item_by_id() {
        let mut day = DayItinerary::new("2024-12-03");
        let item = ItineraryItem::new("09:00", "A", Category::Rest, Money::jpy(0.0));
        let id = item.id.clone();
        day.items.push(item);
        assert_eq!(day.find_item(&id).map(|i| i.name.as_str()), Some("A"));
        assert!(day.find_item("missing").is_none());
    }
}

// ═══════════════════════════════════════════════════════════════════
// Trip
// ═══════════════════════════════════════════════════════════════════

mod trip {
    use super::*;

    #[test]
    fn new_trip_defaults() {
        let trip = Trip::new("t1", "Kansai");
        assert_eq!(trip.exchange_rate, DEFAULT_EXCHANGE_RATE);
        assert_eq!(trip.participants, 1);
        assert!(trip.days.is_empty());
        assert!(trip.budget_target().is_none());
    }

    #[test]
    fn budget_target_defaults_to_won() {
        let mut trip = Trip::new("t1", "Kansai");
        trip.total_budget = Some(1_000_000.0);
        assert_eq!(trip.budget_target(), Some(Money::krw(1_000_000.0)));

        trip.budget_currency = Some(Currency::JPY);
        assert_eq!(trip.budget_target(), Some(Money::jpy(1_000_000.0)));
    }

    #[test]
    fn route_lists_distinct_cities_in_order() {
        let mut trip = Trip::new("t1", "Kansai");
        trip.days = vec![day_in("교토"), day_in("교토"), day_in("오사카"), day_in("교토")];
        assert_eq!(trip.route(), "교토 → 오사카");
    }

    #[test]
    fn missing_exchange_rate_defaults() {
        let trip: Trip =
            serde_json::from_str(r#"{"id":"t","title":"T","days":[],"participants":3}"#).unwrap();
        assert_eq!(trip.exchange_rate, DEFAULT_EXCHANGE_RATE);
        assert_eq!(trip.participants, 3);
    }

    #[test]
    fn rejects_non_integer_or_zero_participants() {
        for participants in ["0", "-1", "2.5"] {
            let raw = format!(r#"{{"id":"t","title":"T","days":[],"participants":{participants}}}"#);
            assert!(serde_json::from_str::<Trip>(&raw).is_err(), "participants {participants}");
        }
    }

    #[test]
    fn rejects_non_positive_exchange_rate() {
        let raw = r#"{"id":"t","title":"T","days":[],"participants":2,"exchangeRate":0}"#;
        assert!(serde_json::from_str::<Trip>(raw).is_err());
    }

    #[test]
    fn serializes_camel_case() {
        let mut trip = Trip::new("t1", "Kansai");
        trip.start_date = "2024-12-03".into();
        trip.total_budget = Some(500_000.0);
        trip.budget_currency = Some(Currency::KRW);
        let json = serde_json::to_value(&trip).unwrap();
        assert_eq!(json["startDate"], "2024-12-03");
        assert_eq!(json["exchangeRate"], 9.2);
        assert_eq!(json["participants"], 1.0);
        assert_eq!(json["totalBudget"], 500_000.0);
        assert_eq!(json["budgetCurrency"], "KRW");
    }
}

// ═══════════════════════════════════════════════════════════════════
// Exchange rate types
// ═══════════════════════════════════════════════════════════════════

mod exchange_rate {
    use super::*;

    #[test]
    fn source_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&RateSource::Fallback).unwrap(), "\"fallback\"");
        assert_eq!(RateSource::Manual.to_string(), "manual");
    }

    #[test]
    fn cached_rate_wire_shape() {
        let entry = CachedRate {
            rate: 9.15,
            timestamp: 1_733_202_309_000,
            source: RateSource::Api,
            last_updated: "2024. 12. 3. 오후 2:05:09".into(),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["rate"], 9.15);
        assert_eq!(json["timestamp"], 1_733_202_309_000_i64);
        assert_eq!(json["source"], "api");
        assert_eq!(json["lastUpdated"], "2024. 12. 3. 오후 2:05:09");
    }

    #[test]
    fn degraded_notices() {
        assert!(RateNotice::UsingDefaultRate { rate: 9.2 }.is_degraded());
        assert!(RateNotice::UsingCachedRate {
            rate: 9.1,
            last_updated: String::new()
        }
        .is_degraded());
        assert!(!RateNotice::ManualRateSet { rate: 7.5 }.is_degraded());
        assert!(!RateNotice::Updated {
            rate: 9.1,
            provider: "p".into()
        }
        .is_degraded());
    }

    #[test]
    fn notice_display() {
        let notice = RateNotice::Updated {
            rate: 9.1,
            provider: "exchangerate.host".into(),
        };
        assert_eq!(notice.to_string(), "1 JPY = 9.10 KRW (exchangerate.host)");
    }
}

// ═══════════════════════════════════════════════════════════════════
// Budget comparison
// ═══════════════════════════════════════════════════════════════════

mod budget_comparison {
    use super::*;

    fn with_progress(progress_percent: f64) -> BudgetComparison {
        BudgetComparison {
            target_krw: 0.0,
            target_jpy: 0.0,
            spent_krw: 0.0,
            remaining_krw: 0.0,
            progress_percent,
        }
    }

    #[test]
    fn meter_is_clamped() {
        assert_eq!(with_progress(42.0).meter_percent(), 42.0);
        assert_eq!(with_progress(150.0).meter_percent(), 100.0);
        assert_eq!(with_progress(f64::INFINITY).meter_percent(), 100.0);
        assert_eq!(with_progress(f64::NAN).meter_percent(), 0.0);
    }

    #[test]
    fn label_shows_raw_progress() {
        assert_eq!(with_progress(42.0).progress_label(), "42.0%");
        assert_eq!(with_progress(153.26).progress_label(), "153.3%");
        assert_eq!(with_progress(f64::INFINITY).progress_label(), "∞%");
    }

    #[test]
    fn over_budget_only_above_hundred() {
        assert!(!with_progress(100.0).is_over_budget());
        assert!(with_progress(100.1).is_over_budget());
    }
}

// ═══════════════════════════════════════════════════════════════════
// PlannerSettings
// ═══════════════════════════════════════════════════════════════════

mod settings {
    use super::*;

    #[test]
    fn defaults() {
        let s = PlannerSettings::default();
        assert_eq!(s.providers.len(), 2);
        assert_eq!(s.providers[0].name, "exchangerate.host");
        assert_eq!(s.providers[1].url, "https://api.exchangerate-api.com/v4/latest/JPY");
        assert_eq!(s.request_timeout_secs, 10);
        assert_eq!(s.cache_ttl_minutes, 60);
        assert_eq!(s.fallback_rate, 9.2);
        assert_eq!(s.max_participants, 20);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let s = PlannerSettings::from_json(r#"{"cache_ttl_minutes": 5}"#).unwrap();
        assert_eq!(s.cache_ttl_minutes, 5);
        assert_eq!(s.providers.len(), 2);
        assert_eq!(s.fallback_rate, 9.2);
    }

    #[test]
    fn provider_rate_path_defaults() {
        let s = PlannerSettings::from_json(
            r#"{"providers": [{"name": "mirror", "url": "http://localhost/rates"}]}"#,
        )
        .unwrap();
        assert_eq!(s.providers[0].rate_path, "rates.KRW");
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            PlannerSettings::from_json(r#"{"fallback_rate": 0}"#),
            Err(CoreError::ValidationError(_))
        ));
        assert!(matches!(
            PlannerSettings::from_json(r#"{"max_participants": 0}"#),
            Err(CoreError::ValidationError(_))
        ));
        assert!(matches!(
            PlannerSettings::from_json("not json"),
            Err(CoreError::Deserialization(_))
        ));
    }

    #[test]
    fn rejects_out_of_range_durations() {
        for json in [
            r#"{"cache_ttl_minutes": 9223372036854775807}"#,
            r#"{"cache_ttl_minutes": -1}"#,
            r#"{"request_timeout_secs": 0}"#,
            r#"{"request_timeout_secs": 18446744073709551615}"#,
        ] {
            assert!(
                matches!(PlannerSettings::from_json(json), Err(CoreError::ValidationError(_))),
                "{json} should be rejected"
            );
        }
    }

    #[test]
    fn accepts_duration_bounds() {
        let s = PlannerSettings::from_json(r#"{"cache_ttl_minutes": 0, "request_timeout_secs": 300}"#)
            .unwrap();
        assert_eq!(s.cache_ttl_minutes, 0);
        assert_eq!(s.request_timeout_secs, 300);
    }
}
