use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use review_client::ReviewWindow;

mod commands;

#[derive(Parser, Debug)]
#[command(
    name = "frigate-day-log",
    version,
    about = "Write a day of Frigate review items to a markdown log"
)]
struct Cli {
    /// Label for the report, also substituted for ${DATE} in the output path
    date: String,
    /// Start of the review window (epoch seconds)
    start: String,
    /// End of the review window (epoch seconds)
    end: String,

    #[arg(long)]
    config: Option<PathBuf>,

    /// Write here instead of the configured path template
    #[arg(long)]
    output: Option<PathBuf>,

    /// Also print the rendered log
    #[arg(long)]
    stdout: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "frigate_log_cli=info,review_client=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    commands::report::execute(commands::report::ReportInputs {
        config_path: cli.config,
        date: cli.date,
        window: ReviewWindow::new(cli.start, cli.end),
        output: cli.output,
        echo: cli.stdout,
    })
}
