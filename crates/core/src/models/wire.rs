//! Wire records for stored and imported trip documents.
//!
//! Older documents name the same field differently (`title` vs `name`,
//! `cost.value` vs `cost.amount`, `links.mapUrl` vs `links.map`, ...). The
//! records below accept every spelling, and the `From` impls collapse
//! them into the canonical model exactly once. On write, both spellings are
//! emitted with identical values so older readers keep working.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::itinerary::{Category, DayItinerary, ItineraryItem, Links};
use super::money::{Currency, Money};
use super::trip::{Trip, DEFAULT_EXCHANGE_RATE};
use crate::errors::CoreError;

// ── Wire records ────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CostRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<Currency>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinksRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tel: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub cost: CostRecord,
    #[serde(default)]
    pub links: LinksRecord,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_id_or_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_of_week: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accommodation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lodging: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget_hint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub items: Vec<ItineraryItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripRecord {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    pub days: Vec<DayItinerary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exchange_rate: Option<f64>,
    pub participants: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_budget: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget_currency: Option<Currency>,
}

// ── Normalization ───────────────────────────────────────────────────

/// First value that is present and non-empty.
fn first_non_empty(primary: Option<String>, secondary: Option<String>) -> Option<String> {
    primary
        .filter(|s| !s.is_empty())
        .or_else(|| secondary.filter(|s| !s.is_empty()))
}

pub(crate) fn id_or_new(id: String) -> String {
    if id.is_empty() {
        Uuid::new_v4().to_string()
    } else {
        id
    }
}

impl From<CostRecord> for Money {
    fn from(record: CostRecord) -> Self {
        let amount = [record.amount, record.value]
            .into_iter()
            .flatten()
            .find(|v| *v != 0.0 && v.is_finite())
            .unwrap_or(0.0);
        Money::new(amount, record.currency.unwrap_or_default())
    }
}

impl From<Money> for CostRecord {
    fn from(money: Money) -> Self {
        Self {
            amount: Some(money.amount),
            value: Some(money.amount),
            currency: Some(money.currency),
        }
    }
}

impl From<LinksRecord> for Links {
    fn from(record: LinksRecord) -> Self {
        Self {
            map: first_non_empty(record.map, record.map_url),
            website: first_non_empty(record.website, record.web_url),
            tel: record.tel.filter(|s| !s.is_empty()),
        }
    }
}

impl From<Links> for LinksRecord {
    fn from(links: Links) -> Self {
        Self {
            map: links.map.clone(),
            map_url: links.map,
            website: links.website.clone(),
            web_url: links.website,
            tel: links.tel,
        }
    }
}

impl From<ItemRecord> for ItineraryItem {
    fn from(record: ItemRecord) -> Self {
        let mut images: Vec<String> = Vec::new();
        for image in record
            .image_url
            .into_iter()
            .chain(record.images.unwrap_or_default())
        {
            if !image.is_empty() && !images.contains(&image) {
                images.push(image);
            }
        }

        Self {
            id: id_or_new(record.id),
            time: record.time,
            name: first_non_empty(record.name, record.title).unwrap_or_default(),
            category: record
                .category
                .as_deref()
                .map(Category::from_label)
                .unwrap_or_default(),
            cost: record.cost.into(),
            links: record.links.into(),
            place_id_or_address: record.place_id_or_address.filter(|s| !s.is_empty()),
            memo: record.memo.filter(|s| !s.is_empty()),
            images,
        }
    }
}

impl From<ItineraryItem> for ItemRecord {
    fn from(item: ItineraryItem) -> Self {
        Self {
            id: item.id,
            time: item.time,
            title: Some(item.name.clone()),
            name: Some(item.name),
            category: Some(item.category.into()),
            cost: item.cost.into(),
            links: item.links.into(),
            place_id_or_address: item.place_id_or_address,
            memo: item.memo,
            image_url: item.images.first().cloned(),
            images: Some(item.images),
        }
    }
}

impl From<DayRecord> for DayItinerary {
    fn from(record: DayRecord) -> Self {
        Self {
            id: id_or_new(record.id),
            date: record.date,
            day_of_week: record.day_of_week.filter(|s| !s.is_empty()),
            city: first_non_empty(record.city, record.title),
            accommodation: first_non_empty(record.accommodation, record.lodging),
            budget_hint: record.budget_hint.filter(|s| !s.is_empty()),
            cover_image: record.cover_image.filter(|s| !s.is_empty()),
            items: record.items,
        }
    }
}

impl From<DayItinerary> for DayRecord {
    fn from(day: DayItinerary) -> Self {
        Self {
            id: day.id,
            date: day.date,
            day_of_week: day.day_of_week,
            title: day.city.clone(),
            city: day.city,
            lodging: day.accommodation.clone(),
            accommodation: day.accommodation,
            budget_hint: day.budget_hint,
            cover_image: day.cover_image,
            items: day.items,
        }
    }
}

impl TryFrom<TripRecord> for Trip {
    type Error = CoreError;

    fn try_from(record: TripRecord) -> Result<Self, Self::Error> {
        if record.id.trim().is_empty() {
            return Err(CoreError::InvalidTrip("id must be a non-empty string".into()));
        }
        if record.title.trim().is_empty() {
            return Err(CoreError::InvalidTrip("title must be a non-empty string".into()));
        }
        let participants = participants_from_number(record.participants)?;

        let exchange_rate = match record.exchange_rate {
            None => DEFAULT_EXCHANGE_RATE,
            Some(rate) if rate.is_finite() && rate > 0.0 => rate,
            Some(rate) => {
                return Err(CoreError::InvalidTrip(format!(
                    "exchangeRate must be a positive number, got {rate}"
                )))
            }
        };

        Ok(Self {
            id: record.id,
            title: record.title,
            start_date: record.start_date,
            end_date: record.end_date,
            days: record.days,
            exchange_rate,
            participants,
            total_budget: record.total_budget.filter(|b| b.is_finite()),
            budget_currency: record.budget_currency,
        })
    }
}

impl From<Trip> for TripRecord {
    fn from(trip: Trip) -> Self {
        Self {
            id: trip.id,
            title: trip.title,
            start_date: trip.start_date,
            end_date: trip.end_date,
            days: trip.days,
            exchange_rate: Some(trip.exchange_rate),
            participants: f64::from(trip.participants),
            total_budget: trip.total_budget,
            budget_currency: trip.budget_currency,
        }
    }
}

fn participants_from_number(raw: f64) -> Result<u32, CoreError> {
    if !raw.is_finite() || raw.fract() != 0.0 || raw < 1.0 || raw > f64::from(u32::MAX) {
        return Err(CoreError::InvalidTrip(format!(
            "participants must be a whole number of at least 1, got {raw}"
        )));
    }
    Ok(raw as u32)
}

