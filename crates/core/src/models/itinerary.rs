use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::money::Money;
use super::wire::{DayRecord, ItemRecord};

/// What kind of stop an itinerary item is.
///
/// Stored documents use either the English names or the Korean labels
/// shown in the planner UI; both are accepted on read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    /// 이동
    Transportation,
    /// 식사
    Dining,
    /// 관광
    #[default]
    Sightseeing,
    /// 휴식
    Rest,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Transportation,
        Category::Dining,
        Category::Sightseeing,
        Category::Rest,
    ];

    /// Canonical stored name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Transportation => "transportation",
            Category::Dining => "dining",
            Category::Sightseeing => "sightseeing",
            Category::Rest => "rest",
        }
    }

    /// Korean label used by the planner UI.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Transportation => "이동",
            Category::Dining => "식사",
            Category::Sightseeing => "관광",
            Category::Rest => "휴식",
        }
    }

    /// Lenient parse: English names, Korean labels, anything else is sightseeing.
    pub fn from_label(raw: &str) -> Self {
        match raw.trim() {
            "transportation" | "이동" => Category::Transportation,
            "dining" | "식사" => Category::Dining,
            "rest" | "휴식" => Category::Rest,
            _ => Category::Sightseeing,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl From<String> for Category {
    fn from(raw: String) -> Self {
        Category::from_label(&raw)
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.as_str().to_string()
    }
}

/// External references attached to a stop.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Links {
    /// Map search term or URL.
    pub map: Option<String>,
    pub website: Option<String>,
    pub tel: Option<String>,
}

/// A single scheduled stop / expense within a day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ItemRecord", into = "ItemRecord")]
pub struct ItineraryItem {
    pub id: String,

    /// Free-text time of day, usually "HH:MM".
    pub time: String,

    pub name: String,

    pub category: Category,

    pub cost: Money,

    pub links: Links,

    pub place_id_or_address: Option<String>,

    pub memo: Option<String>,

    /// Image references; the first one is shown on cards.
    pub images: Vec<String>,
}

impl ItineraryItem {
    /// A blank item with a fresh id, in the shape the "add stop" form starts from.
    pub fn new(time: impl Into<String>, name: impl Into<String>, category: Category, cost: Money) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            time: time.into(),
            name: name.into(),
            category,
            cost,
            links: Links::default(),
            place_id_or_address: None,
            memo: None,
            images: Vec::new(),
        }
    }

    pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = Some(memo.into());
        self
    }

    /// The image shown on the item card, if any.
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

impl Default for ItineraryItem {
    fn default() -> Self {
        Self::new("09:00", "", Category::Sightseeing, Money::default())
    }
}

/// One calendar day of the trip. Item order is display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "DayRecord", into = "DayRecord")]
pub struct DayItinerary {
    pub id: String,
    pub date: String,
    pub day_of_week: Option<String>,
    pub city: Option<String>,
    pub accommodation: Option<String>,
    pub budget_hint: Option<String>,
    pub cover_image: Option<String>,
    pub items: Vec<ItineraryItem>,
}

impl DayItinerary {
    pub fn new(date: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            date: date.into(),
            day_of_week: None,
            city: None,
            accommodation: None,
            budget_hint: None,
            cover_image: None,
            items: Vec::new(),
        }
    }

    pub fn find_item(&self, item_id: &str) -> Option<&ItineraryItem> {
        self.items.iter().find(|i| i.id == item_id)
    }
}
