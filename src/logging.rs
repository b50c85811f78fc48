//! Logging setup shared by the binaries.

use std::{fs::OpenOptions, path::Path, sync::Arc};

use axum::{
    Router,
    extract::{MatchedPath, Request},
};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{
    EnvFilter, Layer, filter, layer::SubscriberExt, util::SubscriberInitExt,
};

/// Where console logs are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogOutput {
    /// Standard output, for the server.
    Stdout,
    /// Standard error, for tools that print their results to stdout.
    Stderr,
}

/// Install the global tracing subscriber.
///
/// Console logs use the `RUST_LOG` filter and default to `info`. If
/// `log_file` is given, `debug` and above are also appended to that file.
///
/// # Errors
/// Returns an error if the log file cannot be opened.
pub fn setup_logging(output: LogOutput, log_file: Option<&Path>) -> std::io::Result<()> {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let console_log = match output {
        LogOutput::Stdout => tracing_subscriber::fmt::layer().pretty().boxed(),
        LogOutput::Stderr => tracing_subscriber::fmt::layer()
            .pretty()
            .with_writer(std::io::stderr)
            .boxed(),
    }
    .with_filter(console_filter);

    let debug_log = match log_file {
        Some(path) => {
            let log_file = OpenOptions::new().create(true).append(true).open(path)?;

            Some(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Arc::new(log_file))
                    .with_filter(filter::LevelFilter::DEBUG),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(console_log)
        .with(debug_log)
        .init();

    Ok(())
}

/// Wrap `router` in a layer that opens a `request` span for each request.
pub fn add_tracing_layer(router: Router) -> Router {
    let tracing_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request| {
            let method = req.method();
            let uri = req.uri();

            let matched_path = req
                .extensions()
                .get::<MatchedPath>()
                .map(|matched_path| matched_path.as_str());

            tracing::debug_span!("request", %method, %uri, matched_path)
        })
        // The handlers never fail, so only successful responses are logged.
        .on_failure(());

    router.layer(tracing_layer)
}
