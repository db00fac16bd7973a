use crate::models::budget::{BudgetComparison, BudgetSummary, DailyTotal, DaySummary};
use crate::models::itinerary::DayItinerary;
use crate::models::money::{convert, Currency, Money};
use crate::models::trip::Trip;

/// Budget totals over the day → item hierarchy.
///
/// Pure business logic: no I/O, no state. Every figure is recomputed from
/// the trip snapshot and the rate passed in.
pub struct BudgetService;

impl BudgetService {
    pub fn new() -> Self {
        Self
    }

    /// Sum one day's costs in both currencies.
    pub fn day_total(&self, day: &DayItinerary, rate: f64) -> DailyTotal {
        let (total_jpy, total_krw) = day.items.iter().fold((0.0, 0.0), |(jpy, krw), item| {
            (
                jpy + item.cost.in_currency(Currency::JPY, rate),
                krw + item.cost.in_currency(Currency::KRW, rate),
            )
        });
        DailyTotal {
            day_id: day.id.clone(),
            total_jpy,
            total_krw,
        }
    }

    /// Trip totals, per-person figures and per-day totals in day order.
    pub fn summarize(&self, trip: &Trip, rate: f64) -> BudgetSummary {
        let daily_totals: Vec<DailyTotal> = trip.days.iter().map(|d| self.day_total(d, rate)).collect();
        let total_jpy: f64 = daily_totals.iter().map(|d| d.total_jpy).sum();
        let total_krw: f64 = daily_totals.iter().map(|d| d.total_krw).sum();
        let people = Self::divisor(trip.participants);

        BudgetSummary {
            total_jpy,
            total_krw,
            per_person_jpy: total_jpy / people,
            per_person_krw: total_krw / people,
            daily_totals,
        }
    }

    /// One day's totals split across the real participant count.
    pub fn summarize_day(&self, day: &DayItinerary, rate: f64, participants: u32) -> DaySummary {
        let total = self.day_total(day, rate);
        let people = Self::divisor(participants);
        DaySummary {
            day_id: total.day_id,
            item_count: day.items.len(),
            total_jpy: total.total_jpy,
            total_krw: total.total_krw,
            per_person_jpy: total.total_jpy / people,
            per_person_krw: total.total_krw / people,
        }
    }

    /// Compare trip spending with a target, both expressed in KRW.
    pub fn compare(&self, summary: &BudgetSummary, target: Money, rate: f64) -> BudgetComparison {
        let target_krw = target.in_currency(Currency::KRW, rate);
        let target_jpy = target.in_currency(Currency::JPY, rate);
        let spent_krw = summary.total_krw;

        let progress_percent = if target_krw == 0.0 {
            if spent_krw == 0.0 {
                0.0
            } else {
                f64::INFINITY
            }
        } else {
            spent_krw / target_krw * 100.0
        };

        BudgetComparison {
            target_krw,
            target_jpy,
            spent_krw,
            remaining_krw: target_krw - spent_krw,
            progress_percent,
        }
    }

    /// Convert through the same rule the totals use.
    pub fn convert(&self, amount: f64, from: Currency, to: Currency, rate: f64) -> f64 {
        convert(amount, from, to, rate)
    }

    // Participant counts are validated upstream; never divide by zero regardless.
    fn divisor(participants: u32) -> f64 {
        f64::from(participants.max(1))
    }
}

impl Default for BudgetService {
    fn default() -> Self {
        Self::new()
    }
}
