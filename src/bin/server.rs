use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    path::PathBuf,
    process::ExitCode,
};

use axum_server::Handle;
use clap::Parser;

#[cfg(debug_assertions)]
use tower_livereload::LiveReloadLayer;

use pizza_dashboard::{
    AppState, Dataset, LogOutput, add_tracing_layer, build_router, graceful_shutdown,
    setup_logging,
};

/// The web server for the pizza sales dashboard.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the JSON array of orders.
    #[arg(long)]
    data_path: PathBuf,

    /// The port to serve the dashboard from.
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// The IP address to bind to.
    #[arg(long, default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
    address: IpAddr,

    /// The directory containing the dashboard's scripts and styles.
    #[arg(long, default_value = "static")]
    static_dir: PathBuf,

    /// Only load orders with these sizes, e.g. `XL,XXL`. May be repeated.
    #[arg(long = "include-size", value_delimiter = ',')]
    include_sizes: Vec<String>,

    /// Also write debug logs to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(error) = setup_logging(LogOutput::Stdout, args.log_file.as_deref()) {
        eprintln!("Could not open log file: {error}");
        return ExitCode::FAILURE;
    }

    let dataset = match Dataset::load(&args.data_path).await {
        Ok(dataset) => dataset.retain_sizes(&args.include_sizes),
        Err(error) => {
            tracing::error!("{error}");
            return ExitCode::FAILURE;
        }
    };

    if dataset.is_empty() {
        tracing::warn!("No orders to show, the dashboard will be empty.");
    }

    let addr = SocketAddr::new(args.address, args.port);

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let router = add_tracing_layer(build_router(AppState::new(dataset, args.static_dir)));

    #[cfg(debug_assertions)]
    let router = router.layer(LiveReloadLayer::new());

    tracing::info!("HTTP server listening on {}", addr);
    if let Err(error) = axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await
    {
        tracing::error!("Server stopped unexpectedly: {error}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
