//! Quantity and income totals per calendar month.

use serde::Serialize;
use time::Month;

use crate::{dashboard::aggregation::finite_or_zero, order::Order};

const MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

/// Twelve monthly buckets, January first.
///
/// Years are not distinguished: orders from January 2023 and January 2024
/// share a bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyTotals {
    /// The month names, January first.
    pub month_labels: [String; 12],
    /// Total pizzas ordered in each month.
    pub quantity_per_month: [i64; 12],
    /// Total income in each month.
    pub income_per_month: [f64; 12],
}

impl Default for MonthlyTotals {
    fn default() -> Self {
        Self {
            month_labels: MONTHS.map(|month| month.to_string()),
            quantity_per_month: [0; 12],
            income_per_month: [0.0; 12],
        }
    }
}

/// Sum the quantity and income of `orders` by calendar month.
///
/// Orders with an invalid date, quantity or income are skipped entirely. A
/// month whose income sum overflows reports zero income.
pub fn bucket_by_month(orders: &[&Order]) -> MonthlyTotals {
    let mut totals = MonthlyTotals::default();

    for order in orders {
        let Some(date) = order.parsed_date() else {
            continue;
        };
        let Some((quantity, income)) = order.amounts() else {
            continue;
        };

        let index = usize::from(u8::from(date.month()) - 1);
        let month_quantity = &mut totals.quantity_per_month[index];
        *month_quantity = month_quantity.saturating_add(quantity);
        totals.income_per_month[index] += income;
    }

    totals.income_per_month = totals.income_per_month.map(finite_or_zero);

    totals
}
