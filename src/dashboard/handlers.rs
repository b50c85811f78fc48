//! Dashboard HTTP handlers and view rendering.
//!
//! This module contains:
//! - Route handlers for displaying the dashboard and its JSON summary
//! - HTML view functions for rendering the dashboard UI
//! - The state type used by the handlers

use std::sync::Arc;

use axum::{
    Json,
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use axum_htmx::HxRequest;
use maud::{Markup, html};

use crate::{
    AppState,
    dashboard::{
        cards::summary_cards_view,
        charts::{build_dashboard_charts, charts_script, charts_view},
        controller::{DashboardReport, build_report},
    },
    dataset::Dataset,
    endpoints,
    filter::OrderFilter,
    html::{
        FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, HeadElement, PAGE_CONTAINER_STYLE, base,
    },
};

/// The state needed for displaying the dashboard page.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The orders shown on the dashboard.
    pub dataset: Arc<Dataset>,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            dataset: state.dataset.clone(),
        }
    }
}

/// Display the dashboard for the orders matching the `size` and `date`
/// query parameters.
///
/// HTMX requests, sent when a filter control changes, only get the updated
/// cards and charts.
pub async fn get_dashboard_page(
    State(state): State<DashboardState>,
    HxRequest(is_htmx_request): HxRequest,
    Query(filter): Query<OrderFilter>,
) -> Response {
    if state.dataset.is_empty() {
        return dashboard_no_data_view().into_response();
    }

    if filter.has_invalid_date() {
        tracing::warn!(
            "could not parse date filter {:?}, no orders will match",
            filter.date
        );
    }

    let report = build_report(&state.dataset, &filter);

    if is_htmx_request {
        dashboard_content_partial(&report).into_response()
    } else {
        dashboard_view(&state.dataset.sizes(), &report).into_response()
    }
}

/// Return the dashboard report for the `size` and `date` query parameters
/// as JSON.
pub async fn get_dashboard_summary(
    State(state): State<DashboardState>,
    Query(filter): Query<OrderFilter>,
) -> Json<DashboardReport> {
    Json(build_report(&state.dataset, &filter))
}

/// Renders the dashboard page when the dataset has no orders.
fn dashboard_no_data_view() -> Markup {
    let content = html!(
        div class="flex flex-col items-center px-6 py-8 mx-auto text-gray-900 dark:text-white"
        {
            h2 class="text-xl font-bold"
            {
                "Nothing here yet..."
            }

            p
            {
                "Charts will show up here once the dataset contains some orders."
            }
        }
    );

    base("Dashboard", &[], &content)
}

/// Renders the full dashboard page with the filter form, cards and charts.
fn dashboard_view(sizes: &[&str], report: &DashboardReport) -> Markup {
    let content = html!(
        div class=(PAGE_CONTAINER_STYLE)
        {
            h1 class="text-2xl font-bold mb-4" { "Pizza Sales" }

            (filter_form(sizes, &report.filter))

            div id="dashboard-content" class="w-full"
            {
                (dashboard_content_partial(report))
            }
        }
    );

    let scripts = [HeadElement::ScriptLink(
        "/static/echarts.6.0.0.min.js".to_owned(),
    )];

    base("Dashboard", &scripts, &content)
}

/// Renders the size and date controls.
///
/// Changing either control requests the dashboard with both current values
/// and swaps the response into `#dashboard-content`.
fn filter_form(sizes: &[&str], filter: &OrderFilter) -> Markup {
    let selected_size = filter.size.as_deref().unwrap_or_default();
    let selected_date = filter.date.as_deref().unwrap_or_default();

    html!(
        form
            id="dashboard-filters"
            hx-get=(endpoints::DASHBOARD_VIEW)
            hx-target="#dashboard-content"
            hx-swap="innerHTML"
            hx-trigger="change"
            hx-push-url="true"
            class="w-full grid grid-cols-1 md:grid-cols-2 gap-4 mb-6
                bg-gray-50 dark:bg-gray-800 p-4 rounded-lg"
        {
            div
            {
                label for="size" class=(FORM_LABEL_STYLE) { "Size" }

                select id="size" name="size" class=(FORM_TEXT_INPUT_STYLE)
                {
                    option value="" selected[selected_size.is_empty()] { "All sizes" }

                    @for size in sizes {
                        option value=(size) selected[*size == selected_size] { (size) }
                    }
                }
            }

            div
            {
                label for="date" class=(FORM_LABEL_STYLE) { "Date" }

                input
                    type="date"
                    id="date"
                    name="date"
                    value=(selected_date)
                    class=(FORM_TEXT_INPUT_STYLE);
            }
        }
    )
}

/// Renders the cards and charts for `report`.
///
/// This is used both inside the full page and on its own for HTMX updates,
/// so it carries the chart initialization script with it.
fn dashboard_content_partial(report: &DashboardReport) -> Markup {
    let charts = build_dashboard_charts(report);

    html!(
        (summary_cards_view(&report.summary))
        (charts_view(&charts))
        (charts_script(&charts))
    )
}
