//! Pizza Dashboard is a web app for exploring pizza sales.
//!
//! The library loads a JSON dataset of orders, filters it by size and date,
//! summarizes the matching orders and serves the results as an HTML
//! dashboard with charts.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::response::{IntoResponse, Response};
use axum_server::Handle;
use tokio::signal;

mod app_state;
mod dashboard;
mod dataset;
mod date;
mod endpoints;
mod filter;
mod html;
mod internal_server_error;
mod logging;
mod not_found;
mod order;
mod routing;

pub use app_state::AppState;
pub use dashboard::{
    DashboardController, DashboardReport, DashboardSink, JsonWriterSink, MonthlyTotals,
    OrderSummary, SizeHistogram, aggregate, bucket_by_month, build_report,
};
pub use dataset::Dataset;
pub use date::{parse_date_criterion, parse_order_date};
pub use filter::{OrderFilter, filter_orders};
pub use logging::{LogOutput, add_tracing_layer, setup_logging};
pub use order::{Order, parse_income, parse_quantity};
pub use routing::build_router;

use crate::internal_server_error::InternalServerError;

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
///
/// Filtering and summarizing orders cannot fail; errors only come from
/// loading the dataset.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The dataset file could not be read.
    ///
    /// Callers should pass in the path of the file and the original error as
    /// a string.
    #[error("could not read the dataset \"{0}\": {1}")]
    DatasetRead(String, String),

    /// The dataset is not a JSON array of orders.
    #[error("the dataset is not a JSON array of orders: {0}")]
    InvalidDataset(String),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        tracing::error!("An unexpected error occurred: {}", self);

        InternalServerError {
            description: "Could not load the orders.",
            fix: "Check that the dataset is a JSON array of orders and restart the server.",
        }
        .into_response()
    }
}
