//! Summary cards at the top of the dashboard.
//!
//! Shows the number of orders, total revenue, average pizzas per order,
//! average order value and the number of distinct pizza sizes.

use maud::{Markup, html};

use crate::{
    dashboard::aggregation::OrderSummary,
    html::{CARD_STYLE, format_currency},
};

/// A single labelled value on the dashboard.
struct SummaryCard {
    id: &'static str,
    title: &'static str,
    value: String,
}

/// Format an average, showing a bare "0" when there is nothing to average.
fn format_average(value: f64, order_count: i64) -> String {
    if order_count > 0 && value.is_finite() {
        format!("{value:.2}")
    } else {
        "0".to_owned()
    }
}

fn summary_cards(summary: &OrderSummary) -> [SummaryCard; 5] {
    [
        SummaryCard {
            id: "number-of-orders",
            title: "Number of Orders",
            value: summary.order_count.to_string(),
        },
        SummaryCard {
            id: "total-revenue",
            title: "Total Revenue",
            value: format_currency(summary.total_income),
        },
        SummaryCard {
            id: "avg-pizza-per-order",
            title: "Avg. Pizzas per Order",
            value: format_average(summary.avg_pizzas_per_order, summary.order_count),
        },
        SummaryCard {
            id: "avg-order-value",
            title: "Avg. Order Value",
            value: format_average(summary.avg_order_value, summary.order_count),
        },
        SummaryCard {
            id: "count-of-pizza-sizes",
            title: "Pizza Sizes",
            value: summary.size_histogram.len().to_string(),
        },
    ]
}

/// Renders the row of summary cards for `summary`.
pub(super) fn summary_cards_view(summary: &OrderSummary) -> Markup {
    html! {
        section class="w-full mx-auto mb-4" {
            div class="grid grid-cols-2 md:grid-cols-3 xl:grid-cols-5 gap-4" {
                @for card in summary_cards(summary) {
                    div class=(CARD_STYLE) {
                        h4 class="text-sm text-gray-600 dark:text-gray-400 mb-2" {
                            (card.title)
                        }
                        div id=(card.id) class="text-3xl font-bold" {
                            (card.value)
                        }
                    }
                }
            }
        }
    }
}
