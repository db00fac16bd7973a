use serde::{Deserialize, Serialize};

use super::itinerary::DayItinerary;
use super::money::{Currency, Money};
use super::wire::TripRecord;

/// Default JPY→KRW rate used until a real one is resolved.
pub const DEFAULT_EXCHANGE_RATE: f64 = 9.2;

/// The whole multi-day plan plus its global settings.
///
/// Everything in here is persisted as one JSON document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TripRecord", into = "TripRecord")]
pub struct Trip {
    pub id: String,
    pub title: String,
    pub start_date: String,
    pub end_date: String,

    /// Days in display order.
    pub days: Vec<DayItinerary>,

    /// KRW per 1 JPY.
    pub exchange_rate: f64,

    /// Always at least 1.
    pub participants: u32,

    /// Optional spending target and the currency it was entered in.
    pub total_budget: Option<f64>,
    pub budget_currency: Option<Currency>,
}

impl Trip {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            start_date: String::new(),
            end_date: String::new(),
            days: Vec::new(),
            exchange_rate: DEFAULT_EXCHANGE_RATE,
            participants: 1,
            total_budget: None,
            budget_currency: None,
        }
    }

    /// The budget target as money, defaulting to KRW when only an amount is set.
    pub fn budget_target(&self) -> Option<Money> {
        self.total_budget
            .map(|amount| Money::new(amount, self.budget_currency.unwrap_or(Currency::KRW)))
    }

    pub fn find_day(&self, day_id: &str) -> Option<&DayItinerary> {
        self.days.iter().find(|d| d.id == day_id)
    }

    pub fn item_count(&self) -> usize {
        self.days.iter().map(|d| d.items.len()).sum()
    }

    /// Distinct day cities in travel order, e.g. "교토 → 오사카".
    pub fn route(&self) -> String {
        let mut cities: Vec<&str> = Vec::new();
        for city in self.days.iter().filter_map(|d| d.city.as_deref()) {
            if !city.is_empty() && !cities.contains(&city) {
                cities.push(city);
            }
        }
        cities.join(" → ")
    }
}
