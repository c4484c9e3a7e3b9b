use anyhow::{Context, Result};
use clap::Parser;
use curator::models::Archive;
use curator::report::{self, CenturyOrder};
use curator::source::Format;
use curator::summary;
use std::process::ExitCode;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "curator")]
#[command(about = "Summarise a historical archive by artefact century and individual connections")]
struct Cli {
    /// Path to the archive document (.xml, .json, optionally .bz2 compressed)
    #[arg(default_value = curator::config::DEFAULT_INPUT)]
    input: String,

    /// Document format (detected from the file name or content if omitted)
    #[arg(short, long, value_enum)]
    format: Option<Format>,

    /// List centuries in calendar order instead of label order
    #[arg(long)]
    chronological: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn run(cli: Cli) -> Result<()> {
    let archive = Archive::open(&cli.input, cli.format);

    let distribution = summary::distribution_by_century(&archive);
    let connections = summary::connections_by_type(&archive);

    let order = if cli.chronological {
        CenturyOrder::Chronological
    } else {
        CenturyOrder::Lexical
    };

    report::print_report(&distribution, &connections, order)
        .context("Failed to write report to stdout")
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");

    match run(cli) {
        Ok(()) => {
            info!("Completed successfully");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
