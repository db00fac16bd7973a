use crate::errors::CoreError;
use crate::models::itinerary::{DayItinerary, ItineraryItem};
use crate::models::money::Money;
use crate::models::trip::Trip;

/// Validated mutations of a [`Trip`].
///
/// Every operation checks its input before touching the trip, so a rejected
/// call leaves the trip exactly as it was.
pub struct TripService {
    max_participants: u32,
}

impl TripService {
    pub fn new(max_participants: u32) -> Self {
        Self {
            max_participants: max_participants.max(1),
        }
    }

    // ── Trip fields ─────────────────────────────────────────────────

    pub fn set_title(&self, trip: &mut Trip, title: &str) -> Result<(), CoreError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(CoreError::ValidationError("Trip title must not be empty".into()));
        }
        trip.title = title.to_string();
        Ok(())
    }

    pub fn set_participants(&self, trip: &mut Trip, participants: u32) -> Result<(), CoreError> {
        if participants < 1 || participants > self.max_participants {
            return Err(CoreError::ValidationError(format!(
                "Participants must be between 1 and {}, got {participants}",
                self.max_participants
            )));
        }
        trip.participants = participants;
        Ok(())
    }

    /// Set or clear the spending target.
    pub fn set_budget_target(&self, trip: &mut Trip, target: Option<Money>) -> Result<(), CoreError> {
        match target {
            Some(money) => {
                Self::validate_amount(money.amount, "Budget target")?;
                trip.total_budget = Some(money.amount);
                trip.budget_currency = Some(money.currency);
            }
            None => {
                trip.total_budget = None;
                trip.budget_currency = None;
            }
        }
        Ok(())
    }

    pub fn set_exchange_rate(&self, trip: &mut Trip, rate: f64) -> Result<(), CoreError> {
        if !rate.is_finite() || rate <= 0.0 {
            return Err(CoreError::ValidationError(format!(
                "Exchange rate must be a number greater than 0, got {rate}"
            )));
        }
        trip.exchange_rate = rate;
        Ok(())
    }

    // ── Days ────────────────────────────────────────────────────────

    /// Append a day. Day ids must be unique within the trip.
    pub fn add_day(&self, trip: &mut Trip, day: DayItinerary) -> Result<String, CoreError> {
        Self::validate_day(&day)?;
        if trip.find_day(&day.id).is_some() {
            return Err(CoreError::ValidationError(format!("Day '{}' already exists", day.id)));
        }
        let id = day.id.clone();
        trip.days.push(day);
        Ok(id)
    }

    /// Replace the day with the same id, keeping its position.
    pub fn update_day(&self, trip: &mut Trip, day: DayItinerary) -> Result<(), CoreError> {
        Self::validate_day(&day)?;
        let slot = Self::day_mut(trip, &day.id)?;
        *slot = day;
        Ok(())
    }

    pub fn remove_day(&self, trip: &mut Trip, day_id: &str) -> Result<DayItinerary, CoreError> {
        let idx = trip
            .days
            .iter()
            .position(|d| d.id == day_id)
            .ok_or_else(|| CoreError::DayNotFound(day_id.to_string()))?;
        Ok(trip.days.remove(idx))
    }

    pub fn set_cover_image(
        &self,
        trip: &mut Trip,
        day_id: &str,
        image: Option<String>,
    ) -> Result<(), CoreError> {
        let day = Self::day_mut(trip, day_id)?;
        day.cover_image = image.filter(|s| !s.trim().is_empty());
        Ok(())
    }

    // ── Items ───────────────────────────────────────────────────────

    pub fn add_item(
        &self,
        trip: &mut Trip,
        day_id: &str,
        item: ItineraryItem,
    ) -> Result<String, CoreError> {
        Self::validate_item(&item)?;
        let day = Self::day_mut(trip, day_id)?;
        if day.find_item(&item.id).is_some() {
            return Err(CoreError::ValidationError(format!("Item '{}' already exists", item.id)));
        }
        let id = item.id.clone();
        day.items.push(item);
        Ok(id)
    }

    /// Replace the item with the same id inside `day_id`.
    pub fn update_item(
        &self,
        trip: &mut Trip,
        day_id: &str,
        item: ItineraryItem,
    ) -> Result<(), CoreError> {
        Self::validate_item(&item)?;
        let day = Self::day_mut(trip, day_id)?;
        let slot = day
            .items
            .iter_mut()
            .find(|i| i.id == item.id)
            .ok_or_else(|| CoreError::ItemNotFound(item.id.clone()))?;
        *slot = item;
        Ok(())
    }

    pub fn remove_item(
        &self,
        trip: &mut Trip,
        day_id: &str,
        item_id: &str,
    ) -> Result<ItineraryItem, CoreError> {
        let day = Self::day_mut(trip, day_id)?;
        let idx = day
            .items
            .iter()
            .position(|i| i.id == item_id)
            .ok_or_else(|| CoreError::ItemNotFound(item_id.to_string()))?;
        Ok(day.items.remove(idx))
    }

    /// Move an item to `to_index` within the same day.
    pub fn move_item(
        &self,
        trip: &mut Trip,
        day_id: &str,
        item_id: &str,
        to_index: usize,
    ) -> Result<(), CoreError> {
        let day = Self::day_mut(trip, day_id)?;
        let from = day
            .items
            .iter()
            .position(|i| i.id == item_id)
            .ok_or_else(|| CoreError::ItemNotFound(item_id.to_string()))?;
        if to_index >= day.items.len() {
            return Err(CoreError::ValidationError(format!(
                "Position {to_index} is out of range for a day with {} items",
                day.items.len()
            )));
        }
        let item = day.items.remove(from);
        day.items.insert(to_index, item);
        Ok(())
    }

    // ── Validation ──────────────────────────────────────────────────

    fn day_mut<'a>(trip: &'a mut Trip, day_id: &str) -> Result<&'a mut DayItinerary, CoreError> {
        trip.days
            .iter_mut()
            .find(|d| d.id == day_id)
            .ok_or_else(|| CoreError::DayNotFound(day_id.to_string()))
    }

    fn validate_day(day: &DayItinerary) -> Result<(), CoreError> {
        if day.id.trim().is_empty() {
            return Err(CoreError::ValidationError("Day id must not be empty".into()));
        }
        if day.date.trim().is_empty() {
            return Err(CoreError::ValidationError("Day date must not be empty".into()));
        }
        day.items.iter().try_for_each(Self::validate_item)
    }

    fn validate_item(item: &ItineraryItem) -> Result<(), CoreError> {
        if item.id.trim().is_empty() {
            return Err(CoreError::ValidationError("Item id must not be empty".into()));
        }
        if item.name.trim().is_empty() {
            return Err(CoreError::ValidationError("Item name must not be empty".into()));
        }
        Self::validate_amount(item.cost.amount, "Item cost")
    }

    fn validate_amount(amount: f64, what: &str) -> Result<(), CoreError> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(CoreError::ValidationError(format!(
                "{what} must be a finite, non-negative number, got {amount}"
            )));
        }
        Ok(())
    }
}

impl Default for TripService {
    fn default() -> Self {
        Self::new(crate::models::settings::DEFAULT_MAX_PARTICIPANTS)
    }
}
