use serde::Serialize;

/// Totals for one day, in both currencies.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyTotal {
    pub day_id: String,
    pub total_jpy: f64,
    pub total_krw: f64,
}

/// Trip-wide totals, recomputed from the trip on every read.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetSummary {
    pub total_jpy: f64,
    pub total_krw: f64,
    pub per_person_jpy: f64,
    pub per_person_krw: f64,
    /// Same order as the trip's days.
    pub daily_totals: Vec<DailyTotal>,
}

/// One day's totals with per-person figures, for day cards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DaySummary {
    pub day_id: String,
    pub item_count: usize,
    pub total_jpy: f64,
    pub total_krw: f64,
    pub per_person_jpy: f64,
    pub per_person_krw: f64,
}

/// Spending compared to the trip's budget target, in KRW.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetComparison {
    pub target_krw: f64,
    pub target_jpy: f64,
    pub spent_krw: f64,
    /// Negative when over budget.
    pub remaining_krw: f64,
    /// Unclamped; above 100 means over budget.
    pub progress_percent: f64,
}

impl BudgetComparison {
    /// Progress clamped to [0, 100] for a visual meter.
    pub fn meter_percent(&self) -> f64 {
        if self.progress_percent.is_nan() {
            return 0.0;
        }
        self.progress_percent.clamp(0.0, 100.0)
    }

    /// Raw progress for text, e.g. `"153.2%"`. Spending against a zero
    /// target reads `"∞%"`.
    pub fn progress_label(&self) -> String {
        if self.progress_percent.is_infinite() {
            "∞%".to_string()
        } else {
            format!("{:.1}%", self.progress_percent)
        }
    }

    pub fn is_over_budget(&self) -> bool {
        self.progress_percent > 100.0
    }
}
