use serde::Serialize;

use crate::models::phone::{Phone, PhoneStatus};

/// Per-status phone counts for the account page.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StatusCounts {
    pub need: i64,
    pub waiting: i64,
    pub fixing: i64,
    pub fixed: i64,
    pub sold: i64,
    pub broken: i64,
}

/// Money totals across every phone tracked.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MoneyTotals {
    pub parts: f64,
    pub phones: f64,
    pub profit: f64,
    pub net: f64,
}

/// Aggregate stats served by the account endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountSummary {
    pub status: StatusCounts,
    pub money: MoneyTotals,
}

impl AccountSummary {
    /// Fold the full phone set into per-status counts and money totals.
    /// `parts_cost` is the summed cost of every purchased part across all
    /// phones, fetched by the caller in one batched lookup.
    pub fn compute(phones: &[Phone], parts_cost: f64) -> Self {
        let mut status = StatusCounts::default();
        let mut phones_cost = 0.0;
        let mut profit = 0.0;

        for phone in phones {
            // Rows with an out-of-range status are left out of the counts;
            // their money still totals up.
            match PhoneStatus::try_from(phone.status) {
                Ok(PhoneStatus::NeedsFixed) => status.need += 1,
                Ok(PhoneStatus::WaitingForParts) => status.waiting += 1,
                Ok(PhoneStatus::Fixing) => status.fixing += 1,
                Ok(PhoneStatus::Fixed) => status.fixed += 1,
                Ok(PhoneStatus::Sold) => status.sold += 1,
                Ok(PhoneStatus::CannotFix) => status.broken += 1,
                Err(_) => {}
            }
            phones_cost += phone.phone_cost;
            if let Some(sold) = phone.sold {
                profit += sold;
            }
        }

        let money = MoneyTotals {
            parts: round_cents(parts_cost),
            phones: round_cents(phones_cost),
            profit: round_cents(profit),
            net: round_cents(profit - (parts_cost + phones_cost)),
        };

        AccountSummary { status, money }
    }
}

/// Money values leave the API rounded to cents.
fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
