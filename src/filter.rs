//! Narrowing the dataset down to the orders selected on the dashboard.

use serde::{Deserialize, Serialize};

use crate::{
    date::{is_same_day, parse_date_criterion},
    order::Order,
};

/// The size and date constraints chosen on the dashboard.
///
/// Both constraints are optional. An empty string is treated the same as
/// `None`, which matches how the HTML form submits an unset control.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderFilter {
    /// Only keep orders with exactly this size label.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub size: Option<String>,
    /// Only keep orders placed on this day, in `year-month-day` form.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub date: Option<String>,
}

impl OrderFilter {
    /// Create a filter from raw control values, ignoring empty values.
    pub fn new(size: &str, date: &str) -> Self {
        Self {
            size: non_empty(size),
            date: non_empty(date),
        }
    }

    /// Whether the date constraint is set but cannot be parsed.
    ///
    /// Such a filter matches no orders.
    pub fn has_invalid_date(&self) -> bool {
        self.date
            .as_deref()
            .is_some_and(|date| parse_date_criterion(date).is_none())
    }
}

/// Select the orders that satisfy both constraints of `filter`.
///
/// The returned orders keep their relative order from `orders`.
pub fn filter_orders<'a>(orders: &'a [Order], filter: &OrderFilter) -> Vec<&'a Order> {
    let size = filter.size.as_deref();
    // `Some(None)` is an active constraint that nothing can satisfy.
    let date = filter.date.as_deref().map(parse_date_criterion);

    orders
        .iter()
        .filter(|order| size.is_none_or(|size| order.size == size))
        .filter(|order| {
            date.is_none_or(|date| {
                date.is_some_and(|date| is_same_day(order.parsed_date(), date))
            })
        })
        .collect()
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_owned())
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;

    Ok(value.as_deref().and_then(non_empty))
}

#[cfg(test)]
mod tests {
    use crate::order::Order;

    use super::{OrderFilter, filter_orders};

    fn sample_orders() -> Vec<Order> {
        vec![
            Order::new("XL", "01/15/2024", "2", "20.00"),
            Order::new("XXL", "01/20/2024", "bad", "15.00"),
            Order::new("XL", "13/40/2024", "1", "10.00"),
            Order::new("L", "01/15/2024", "3", "27.50"),
            Order::new("xl", "01/15/2024", "1", "9.00"),
        ]
    }

    fn is_subsequence(subset: &[&Order], orders: &[Order]) -> bool {
        let mut remaining = orders.iter();
        subset
            .iter()
            .all(|wanted| remaining.any(|order| std::ptr::eq(order, *wanted)))
    }

    #[test]
    fn no_constraints_keeps_everything() {
        let orders = sample_orders();

        let got = filter_orders(&orders, &OrderFilter::default());

        assert_eq!(got.len(), orders.len());
    }

    #[test]
    fn size_filter_is_exact() {
        let orders = sample_orders();

        let got = filter_orders(&orders, &OrderFilter::new("XL", ""));

        assert_eq!(got, vec![&orders[0], &orders[2]]);
    }

    #[test]
    fn size_filter_on_two_record_example() {
        let orders = sample_orders()[..2].to_vec();

        let got = filter_orders(&orders, &OrderFilter::new("XL", ""));

        assert_eq!(got, vec![&orders[0]]);
    }

    #[test]
    fn date_filter_matches_calendar_day() {
        let orders = sample_orders();

        let got = filter_orders(&orders, &OrderFilter::new("", "2024-01-15"));

        assert_eq!(got, vec![&orders[0], &orders[3], &orders[4]]);
    }

    #[test]
    fn both_constraints_must_match() {
        let orders = sample_orders();

        let got = filter_orders(&orders, &OrderFilter::new("XL", "2024-01-15"));

        assert_eq!(got, vec![&orders[0]]);
    }

    #[test]
    fn invalid_order_date_never_matches_date_filter() {
        let orders = vec![Order::new("XL", "13/40/2024", "1", "1")];

        assert!(filter_orders(&orders, &OrderFilter::new("", "2024-01-15")).is_empty());
        assert_eq!(filter_orders(&orders, &OrderFilter::new("XL", "")).len(), 1);
    }

    #[test]
    fn unparseable_date_filter_matches_nothing() {
        let orders = sample_orders();
        let filter = OrderFilter::new("", "someday");

        assert!(filter.has_invalid_date());
        assert!(filter_orders(&orders, &filter).is_empty());
    }

    #[test]
    fn filtering_is_idempotent_and_order_preserving() {
        let orders = sample_orders();
        let filters = [
            OrderFilter::default(),
            OrderFilter::new("XL", ""),
            OrderFilter::new("", "2024-01-15"),
            OrderFilter::new("L", "2024-01-15"),
            OrderFilter::new("M", ""),
        ];

        for filter in filters {
            let once = filter_orders(&orders, &filter);
            assert!(is_subsequence(&once, &orders), "{filter:?}");

            let owned: Vec<Order> = once.iter().map(|&order| order.clone()).collect();
            let twice = filter_orders(&owned, &filter);
            assert_eq!(twice, once, "{filter:?}");
        }
    }

    #[test]
    fn empty_query_values_are_no_constraint() {
        let filter: OrderFilter = serde_json::from_str(r#"{"size": "", "date": null}"#).unwrap();

        assert_eq!(filter, OrderFilter::default());
    }
}
