//! Chart generation and rendering for the dashboard.
//!
//! This module creates ECharts visualizations of the filtered orders:
//! - **Orders by Size**: horizontal bar chart of the size histogram
//! - **Size Share**: pie chart of the size histogram
//! - **Quantity by Size**: vertical bar chart of the size histogram
//! - **Monthly Quantity**: horizontal bar chart of pizzas sold per month
//! - **Monthly Income**: line chart of income per month
//!
//! Each chart is generated as JSON configuration for the ECharts library and
//! rendered with corresponding HTML containers and JavaScript initialization code.

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    element::{AxisLabel, AxisPointer, AxisPointerType, AxisType, JsFunction, Tooltip, Trigger},
    series::{Bar, Line, Pie},
};
use maud::{Markup, PreEscaped, html};

use crate::dashboard::{
    aggregation::SizeHistogram, controller::DashboardReport, monthly::MonthlyTotals,
};

/// A dashboard chart with its HTML container ID and ECharts configuration.
pub(super) struct DashboardChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

/// Creates all dashboard charts for `report`.
pub(super) fn build_dashboard_charts(report: &DashboardReport) -> [DashboardChart; 5] {
    let histogram = &report.summary.size_histogram;
    let monthly = &report.monthly;

    [
        DashboardChart {
            id: "orders-by-size-chart",
            options: orders_by_size_chart(histogram).to_string(),
        },
        DashboardChart {
            id: "size-share-chart",
            options: size_share_chart(histogram).to_string(),
        },
        DashboardChart {
            id: "size-quantity-chart",
            options: size_quantity_chart(histogram).to_string(),
        },
        DashboardChart {
            id: "monthly-quantity-chart",
            options: monthly_quantity_chart(monthly).to_string(),
        },
        DashboardChart {
            id: "monthly-income-chart",
            options: monthly_income_chart(monthly).to_string(),
        },
    ]
}

/// Renders the HTML containers for dashboard charts.
pub(super) fn charts_view(charts: &[DashboardChart]) -> Markup {
    html!(
        section
            id="charts"
            class="w-full mx-auto mb-4"
        {
            div class="grid grid-cols-1 xl:grid-cols-2 gap-4"
            {
                @for chart in charts {
                    div
                        id=(chart.id)
                        data-chart
                        class="min-h-[380px] rounded dark:bg-gray-100"
                    {}
                }
            }
        }
    )
}

/// Resizes every live chart on the page. Installed at most once per page,
/// however many times the dashboard content is swapped.
const RESIZE_HANDLER_SCRIPT: &str = r#"if (!window.resizeDashboardCharts) {
    window.resizeDashboardCharts = function() {
        if (typeof echarts === "undefined") {
            return;
        }
        document.querySelectorAll("[data-chart]").forEach(function(chartDom) {
            const chart = echarts.getInstanceByDom(chartDom);
            if (chart) {
                chart.resize();
            }
        });
    };
    window.addEventListener("resize", window.resizeDashboardCharts);
}"#;

/// Generates the script that initializes the ECharts instances.
///
/// The script runs immediately, so it must be placed after the chart
/// containers. Placing it inside the swapped content lets HTMX re-create the
/// charts whenever the filters change.
pub(super) fn charts_script(charts: &[DashboardChart]) -> Markup {
    let init_scripts = charts.iter().map(|chart| {
        format!(
            r#"(function() {{
                const chartDom = document.getElementById("{}");
                if (!chartDom || typeof echarts === "undefined") {{
                    return;
                }}
                echarts.dispose(chartDom);
                echarts.init(chartDom).setOption({});
            }})();"#,
            chart.id, chart.options
        )
    });

    let script_content = std::iter::once(RESIZE_HANDLER_SCRIPT.to_owned())
        .chain(init_scripts)
        .collect::<Vec<_>>()
        .join("\n");

    html!(script { (PreEscaped(script_content)) })
}

fn orders_by_size_chart(histogram: &SizeHistogram) -> Chart {
    Chart::new()
        .title(Title::new().text("Orders by Size"))
        .tooltip(axis_tooltip())
        .grid(default_grid())
        .x_axis(Axis::new().type_(AxisType::Value))
        .y_axis(
            Axis::new()
                .type_(AxisType::Category)
                .data(histogram.labels()),
        )
        .series(
            Bar::new()
                .name("# of Orders")
                .stack("Orders")
                .data(histogram_counts(histogram)),
        )
}

fn size_share_chart(histogram: &SizeHistogram) -> Chart {
    let data: Vec<(f64, &str)> = histogram
        .iter()
        .map(|(label, count)| (count as f64, label))
        .collect();

    Chart::new()
        .title(Title::new().text("Share of Orders by Size"))
        .tooltip(Tooltip::new().trigger(Trigger::Item))
        .legend(Legend::new().top("bottom"))
        .series(Pie::new().name("# of Orders").radius("60%").data(data))
}

fn size_quantity_chart(histogram: &SizeHistogram) -> Chart {
    Chart::new()
        .title(Title::new().text("Quantity by Size"))
        .tooltip(axis_tooltip())
        .grid(default_grid())
        .x_axis(
            Axis::new()
                .type_(AxisType::Category)
                .data(histogram.labels()),
        )
        .y_axis(Axis::new().type_(AxisType::Value))
        .series(
            Bar::new()
                .name("Quantity")
                .data(histogram_counts(histogram)),
        )
}

fn monthly_quantity_chart(monthly: &MonthlyTotals) -> Chart {
    let quantities: Vec<f64> = monthly
        .quantity_per_month
        .iter()
        .map(|&quantity| quantity as f64)
        .collect();

    Chart::new()
        .title(Title::new().text("Pizzas Sold per Month"))
        .tooltip(axis_tooltip())
        .grid(default_grid())
        .x_axis(Axis::new().type_(AxisType::Value))
        .y_axis(
            Axis::new()
                .type_(AxisType::Category)
                .data(monthly.month_labels.to_vec()),
        )
        .series(Bar::new().name("Quantity").stack("Quantity").data(quantities))
}

fn monthly_income_chart(monthly: &MonthlyTotals) -> Chart {
    Chart::new()
        .title(Title::new().text("Income per Month"))
        .tooltip(axis_tooltip().value_formatter(currency_formatter()))
        .grid(default_grid())
        .x_axis(
            Axis::new()
                .type_(AxisType::Category)
                .data(monthly.month_labels.to_vec()),
        )
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        )
        .series(
            Line::new()
                .name("Amount")
                .data(monthly.income_per_month.to_vec()),
        )
}

fn histogram_counts(histogram: &SizeHistogram) -> Vec<f64> {
    histogram.iter().map(|(_, count)| count as f64).collect()
}

fn default_grid() -> Grid {
    Grid::new()
        .left("3%")
        .right("4%")
        .bottom("3%")
        .contain_label(true)
}

fn axis_tooltip() -> Tooltip {
    Tooltip::new()
        .trigger(Trigger::Axis)
        .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow))
}

#[inline]
fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const currencyFormatter = new Intl.NumberFormat('en-US', {
              style: 'currency',
              currency: 'USD'
            });
            return (number) ? currencyFormatter.format(number) : \"$0.00\";",
    )
}
