use serde::{Deserialize, Serialize};

use super::wire::CostRecord;

/// The two currencies a trip budget is kept in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Currency {
    /// Japanese Yen, the currency most costs are entered in.
    #[default]
    JPY,
    /// Korean Won, the traveller's home currency.
    KRW,
}

impl Currency {
    pub fn code(&self) -> &'static str {
        match self {
            Currency::JPY => "JPY",
            Currency::KRW => "KRW",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::JPY => "¥",
            Currency::KRW => "₩",
        }
    }

    /// The other currency of the pair.
    pub fn other(&self) -> Currency {
        match self {
            Currency::JPY => Currency::KRW,
            Currency::KRW => Currency::JPY,
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl std::str::FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "JPY" | "¥" => Ok(Currency::JPY),
            "KRW" | "₩" => Ok(Currency::KRW),
            other => Err(format!("Unsupported currency '{other}': expected JPY or KRW")),
        }
    }
}

/// An amount in one of the two trip currencies.
///
/// Non-negative amounts are expected but not enforced here; the planner
/// validates user input before it reaches the model.
///
/// Serialized with both `amount` and the legacy `value` key; see
/// [`crate::models::wire::CostRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "CostRecord", into = "CostRecord")]
pub struct Money {
    pub amount: f64,
    pub currency: Currency,
}

impl Money {
    pub fn new(amount: f64, currency: Currency) -> Self {
        Self { amount, currency }
    }

    pub fn jpy(amount: f64) -> Self {
        Self::new(amount, Currency::JPY)
    }

    pub fn krw(amount: f64) -> Self {
        Self::new(amount, Currency::KRW)
    }

    /// Express this amount in `target` using a JPY→KRW `rate`.
    pub fn in_currency(&self, target: Currency, rate: f64) -> f64 {
        convert(self.amount, self.currency, target, rate)
    }
}

/// Convert `amount` between JPY and KRW.
///
/// `rate` is the number of KRW one JPY buys. Same-currency conversion is the
/// identity; JPY→KRW multiplies, KRW→JPY divides.
pub fn convert(amount: f64, from: Currency, to: Currency, rate: f64) -> f64 {
    match (from, to) {
        (Currency::JPY, Currency::KRW) => amount * rate,
        (Currency::KRW, Currency::JPY) => amount / rate,
        _ => amount,
    }
}

/// Format an amount for display: whole units, thousands separators,
/// leading currency symbol (e.g. `¥1,544`, `-₩3,000`).
pub fn format_currency(amount: f64, currency: Currency) -> String {
    let rounded = amount.round();
    let negative = rounded < 0.0;
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if negative { "-" } else { "" };
    format!("{sign}{}{grouped}", currency.symbol())
}
