//! Dashboard module
//!
//! Provides the sales overview: filtering orders by size and date,
//! summarizing them, bucketing them by month and rendering cards and charts.

mod aggregation;
mod cards;
mod charts;
mod controller;
mod handlers;
mod monthly;

pub use aggregation::{OrderSummary, SizeHistogram, aggregate};
pub use controller::{
    DashboardController, DashboardReport, DashboardSink, JsonWriterSink, build_report,
};
pub use handlers::{get_dashboard_page, get_dashboard_summary};
pub use monthly::{MonthlyTotals, bucket_by_month};
