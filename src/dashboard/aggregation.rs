//! Summary metrics for a set of orders.
//!
//! Provides the totals and averages shown on the dashboard cards and the
//! per-size order counts used by the size charts.

use serde::{Serialize, Serializer, ser::SerializeMap};

use crate::order::Order;

/// Number of orders per size label, in the order the sizes first appear.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SizeHistogram {
    entries: Vec<(String, usize)>,
}

impl SizeHistogram {
    /// Count one more order of `size`.
    fn increment(&mut self, size: &str) {
        match self.entries.iter_mut().find(|(label, _)| label == size) {
            Some((_, count)) => *count += 1,
            None => self.entries.push((size.to_owned(), 1)),
        }
    }

    /// The count for `size`, if any order of that size was seen.
    pub fn get(&self, size: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|(label, _)| label == size)
            .map(|(_, count)| *count)
    }

    /// The number of distinct sizes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no orders were counted.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The size labels in first-occurrence order.
    pub fn labels(&self) -> Vec<&str> {
        self.entries.iter().map(|(label, _)| label.as_str()).collect()
    }

    /// Iterate over `(size, count)` pairs in first-occurrence order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries
            .iter()
            .map(|(label, count)| (label.as_str(), *count))
    }
}

impl Serialize for SizeHistogram {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (label, count) in &self.entries {
            map.serialize_entry(label, count)?;
        }
        map.end()
    }
}

/// Totals and averages over a set of orders.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OrderSummary {
    /// Sum of the quantity of every order with valid numbers.
    pub order_count: i64,
    /// Sum of the quantity of every order with valid numbers.
    ///
    /// The dataset has no separate pizza count, so this always equals
    /// `order_count`.
    pub total_pizzas: i64,
    /// Sum of the income of every order with valid numbers.
    pub total_income: f64,
    /// `total_pizzas / order_count` to two decimal places, or zero.
    pub avg_pizzas_per_order: f64,
    /// `total_income / order_count` to two decimal places, or zero.
    pub avg_order_value: f64,
    /// Number of orders of each size, including orders with invalid numbers.
    pub size_histogram: SizeHistogram,
}

/// Reduce `orders` to an [OrderSummary] in a single pass.
///
/// Orders whose quantity or income is not a valid number are left out of the
/// totals but still counted in the size histogram.
pub fn aggregate(orders: &[&Order]) -> OrderSummary {
    let mut summary = OrderSummary::default();

    for order in orders {
        if let Some((quantity, income)) = order.amounts() {
            summary.order_count = summary.order_count.saturating_add(quantity);
            summary.total_pizzas = summary.total_pizzas.saturating_add(quantity);
            summary.total_income += income;
        }

        summary.size_histogram.increment(&order.size);
    }

    summary.total_income = finite_or_zero(summary.total_income);

    if summary.order_count > 0 {
        let order_count = summary.order_count as f64;
        let total_pizzas = summary.total_pizzas as f64;
        summary.avg_pizzas_per_order =
            finite_or_zero(round_to_cents(total_pizzas / order_count));
        summary.avg_order_value =
            finite_or_zero(round_to_cents(summary.total_income / order_count));
    }

    summary
}

/// Round to two decimal places.
///
/// Ties are decided on `value * 100.0` rather than on the exact decimal value,
/// so a half cent can land one cent off. Values too large to scale are
/// returned as is.
fn round_to_cents(value: f64) -> f64 {
    let scaled = value * 100.0;

    if scaled.is_finite() {
        scaled.round() / 100.0
    } else {
        value
    }
}

/// Replace NaN and infinities, e.g. from an overflowing income sum, with zero.
pub(super) fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use crate::order::Order;

    use super::{OrderSummary, aggregate, round_to_cents};

    #[test]
    fn aggregate_of_nothing_is_zero() {
        let summary = aggregate(&[]);

        assert_eq!(summary, OrderSummary::default());
        assert_eq!(summary.order_count, 0);
        assert_eq!(summary.total_income, 0.0);
        assert_eq!(summary.avg_pizzas_per_order, 0.0);
        assert_eq!(summary.avg_order_value, 0.0);
        assert!(summary.size_histogram.is_empty());
    }

    #[test]
    fn invalid_numbers_still_count_towards_histogram() {
        let first = Order::new("XL", "01/15/2024", "2", "20.00");
        let second = Order::new("XXL", "01/20/2024", "bad", "15.00");

        let summary = aggregate(&[&first, &second]);

        assert_eq!(summary.order_count, 2);
        assert_eq!(summary.total_pizzas, 2);
        assert_eq!(summary.total_income, 20.0);
        assert_eq!(summary.avg_pizzas_per_order, 1.0);
        assert_eq!(summary.avg_order_value, 10.0);
        assert_eq!(summary.size_histogram.get("XL"), Some(1));
        assert_eq!(summary.size_histogram.get("XXL"), Some(1));
        assert_eq!(summary.size_histogram.len(), 2);
    }

    #[test]
    fn histogram_keeps_first_occurrence_order() {
        let orders = [
            Order::new("XXL", "01/15/2024", "1", "10"),
            Order::new("S", "01/15/2024", "1", "10"),
            Order::new("XXL", "01/15/2024", "1", "10"),
            Order::new("M", "01/15/2024", "x", "10"),
        ];
        let refs: Vec<&Order> = orders.iter().collect();

        let summary = aggregate(&refs);

        assert_eq!(summary.size_histogram.labels(), vec!["XXL", "S", "M"]);
        assert_eq!(
            summary.size_histogram.iter().collect::<Vec<_>>(),
            vec![("XXL", 2), ("S", 1), ("M", 1)]
        );
    }

    #[test]
    fn averages_are_rounded_to_two_decimals() {
        let orders = [
            Order::new("L", "01/15/2024", "3", "10.00"),
            Order::new("L", "01/16/2024", "0", "0.01"),
        ];
        let refs: Vec<&Order> = orders.iter().collect();

        let summary = aggregate(&refs);

        assert_eq!(summary.order_count, 3);
        assert_eq!(summary.avg_pizzas_per_order, 1.0);
        assert_eq!(summary.avg_order_value, 3.34);
    }

    #[test]
    fn averages_are_zero_without_quantity() {
        let order = Order::new("L", "01/15/2024", "0", "12.00");

        let summary = aggregate(&[&order]);

        assert_eq!(summary.order_count, 0);
        assert_eq!(summary.total_income, 12.0);
        assert_eq!(summary.avg_pizzas_per_order, 0.0);
        assert_eq!(summary.avg_order_value, 0.0);
    }

    #[test]
    fn histogram_serializes_as_ordered_map() {
        let orders = [
            Order::new("XXL", "01/15/2024", "1", "10"),
            Order::new("XL", "01/15/2024", "1", "10"),
        ];
        let refs: Vec<&Order> = orders.iter().collect();

        let json = serde_json::to_string(&aggregate(&refs).size_histogram).unwrap();

        assert_eq!(json, r#"{"XXL":1,"XL":1}"#);
    }

    #[test]
    fn overflowing_income_is_reported_as_zero() {
        let first = Order::new("XL", "01/15/2024", "1", "1e308");
        let second = Order::new("XL", "01/16/2024", "1", "1e308");

        let summary = aggregate(&[&first, &second]);

        assert_eq!(summary.total_income, 0.0);
        assert_eq!(summary.avg_order_value, 0.0);
        let json = serde_json::to_string(&summary).unwrap();
        assert!(!json.contains("null"), "{json}");
    }

    #[test]
    fn large_finite_average_stays_finite() {
        let order = Order::new("XL", "01/15/2024", "1", "1.7e307");

        let summary = aggregate(&[&order]);

        assert_eq!(summary.total_income, 1.7e307);
        assert_eq!(summary.avg_order_value, 1.7e307);
        assert_eq!(round_to_cents(f64::MAX), f64::MAX);
    }

    #[test]
    fn rounds_half_cents_away_from_zero() {
        assert_eq!(round_to_cents(1.005), 1.0);
        assert_eq!(round_to_cents(0.125), 0.13);
        assert_eq!(round_to_cents(3.336), 3.34);
    }
}
