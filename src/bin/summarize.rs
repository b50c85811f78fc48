use std::{path::PathBuf, process::ExitCode, sync::Arc};

use clap::Parser;

use pizza_dashboard::{DashboardController, Dataset, JsonWriterSink, LogOutput, setup_logging};

/// Print the dashboard figures for a set of filters as JSON.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the JSON array of orders.
    #[arg(long)]
    data_path: PathBuf,

    /// Only count orders with exactly this size.
    #[arg(long, default_value = "")]
    size: String,

    /// Only count orders on this day, as `year-month-day`.
    #[arg(long, default_value = "")]
    date: String,

    /// Only load orders with these sizes, e.g. `XL,XXL`. May be repeated.
    #[arg(long = "include-size", value_delimiter = ',')]
    include_sizes: Vec<String>,

    /// Print the report on one line.
    #[arg(long)]
    compact: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(error) = setup_logging(LogOutput::Stderr, None) {
        eprintln!("Could not set up logging: {error}");
        return ExitCode::FAILURE;
    }

    let dataset = match Dataset::load(&args.data_path).await {
        Ok(dataset) => dataset.retain_sizes(&args.include_sizes),
        Err(error) => {
            tracing::error!("{error}");
            return ExitCode::FAILURE;
        }
    };

    let sink = JsonWriterSink::new(std::io::stdout(), !args.compact);
    let mut controller = DashboardController::new(Arc::new(dataset)).with_sink(sink);
    controller.on_filter_changed(&args.size, &args.date);

    ExitCode::SUCCESS
}
