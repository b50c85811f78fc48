//! Runs the dashboard pipeline whenever the filters change.
//!
//! The controller owns the dataset snapshot and the currently selected
//! filters. Each change re-runs filter, aggregation and monthly bucketing
//! over the snapshot and returns a fresh [DashboardReport]. An optional
//! [DashboardSink] receives every report, e.g. to print it.

use std::{io::Write, sync::Arc};

use serde::Serialize;

use crate::{
    dashboard::{
        aggregation::{OrderSummary, aggregate},
        monthly::{MonthlyTotals, bucket_by_month},
    },
    dataset::Dataset,
    filter::{OrderFilter, filter_orders},
};

/// Everything the dashboard displays for one set of filters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardReport {
    /// The filters the report was computed with.
    pub filter: OrderFilter,
    /// The number of orders that passed the filters.
    pub matching_orders: usize,
    /// Totals, averages and the size histogram.
    pub summary: OrderSummary,
    /// Quantity and income per calendar month.
    pub monthly: MonthlyTotals,
}

/// A consumer of dashboard reports.
pub trait DashboardSink {
    /// Display or store `report`. Failures must be handled by the sink.
    fn render(&mut self, report: &DashboardReport);
}

/// Writes each report as JSON followed by a newline.
pub struct JsonWriterSink<W> {
    writer: W,
    pretty: bool,
}

impl<W: Write> JsonWriterSink<W> {
    /// Create a sink that writes to `writer`, pretty printed if `pretty`.
    pub fn new(writer: W, pretty: bool) -> Self {
        Self { writer, pretty }
    }
}

impl<W: Write> DashboardSink for JsonWriterSink<W> {
    fn render(&mut self, report: &DashboardReport) {
        let result = if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, report)
        } else {
            serde_json::to_writer(&mut self.writer, report)
        };

        if let Err(error) = result
            .map_err(std::io::Error::from)
            .and_then(|_| writeln!(self.writer))
        {
            tracing::error!("could not write dashboard report: {error}");
        }
    }
}

/// Compute the report for `filter` over `dataset`.
pub fn build_report(dataset: &Dataset, filter: &OrderFilter) -> DashboardReport {
    let orders = filter_orders(dataset.orders(), filter);
    tracing::debug!(
        "{} of {} orders match {filter:?}",
        orders.len(),
        dataset.len()
    );

    DashboardReport {
        filter: filter.clone(),
        matching_orders: orders.len(),
        summary: aggregate(&orders),
        monthly: bucket_by_month(&orders),
    }
}

/// Holds the dataset and the current filters, and re-runs the pipeline on
/// every filter change.
pub struct DashboardController {
    dataset: Arc<Dataset>,
    filter: OrderFilter,
    sink: Option<Box<dyn DashboardSink + Send>>,
}

impl DashboardController {
    /// Create a controller with no filters and no sink.
    pub fn new(dataset: Arc<Dataset>) -> Self {
        Self {
            dataset,
            filter: OrderFilter::default(),
            sink: None,
        }
    }

    /// Send every report to `sink` as well as returning it.
    pub fn with_sink(mut self, sink: impl DashboardSink + Send + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    /// The currently selected filters.
    pub fn filter(&self) -> &OrderFilter {
        &self.filter
    }

    /// Select new filters and compute the report for them.
    ///
    /// Empty values clear the corresponding filter. The report is passed to
    /// the sink, if there is one, before it is returned.
    pub fn on_filter_changed(&mut self, size: &str, date: &str) -> DashboardReport {
        self.filter = OrderFilter::new(size, date);

        if self.filter.has_invalid_date() {
            tracing::warn!(
                "could not parse date filter {:?}, no orders will match",
                self.filter.date
            );
        }

        self.refresh()
    }

    /// Compute the report for the current filters.
    pub fn refresh(&mut self) -> DashboardReport {
        let report = build_report(&self.dataset, &self.filter);

        if let Some(sink) = self.sink.as_mut() {
            sink.render(&report);
        }

        report
    }
}
