//! Set-associative cache simulator CLI.

use clap::{Parser, ValueEnum};
use std::fs::{self, File};
use std::io::{self, BufReader, Write};
use std::path::PathBuf;
use std::process;

use cachesim::{CacheConfig, Error, Report, Simulation};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(
    name = "cachesim",
    author,
    version,
    about = "Set-associative FIFO cache simulator",
    long_about = None,
)]
struct Cli {
    /// Trace file. Reads standard input when omitted.
    input: Option<PathBuf>,

    /// JSON cache geometry. When given, the trace has no header lines.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Report format.
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Print only the summary statistics.
    #[arg(long)]
    summary_only: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let report = match simulate(&cli) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("\x1b[1;31merror:\x1b[0m {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = print_report(&report, &cli) {
        eprintln!("\x1b[1;31merror:\x1b[0m {}", e);
        process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn simulate(cli: &Cli) -> Result<Report, Error> {
    let config = match &cli.config {
        Some(path) => {
            let text = fs::read_to_string(path)?;
            let config: CacheConfig = serde_json::from_str(&text)?;
            log::info!("loaded geometry from {}", path.display());
            Some(config)
        }
        None => None,
    };

    let keep_entries = !cli.summary_only;
    match &cli.input {
        Some(path) => {
            Simulation::run_reader(BufReader::new(File::open(path)?), config, keep_entries)
        }
        None => Simulation::run_reader(io::stdin().lock(), config, keep_entries),
    }
}

fn print_report(report: &Report, cli: &Cli) -> Result<(), Error> {
    let mut out = io::stdout().lock();
    match cli.format {
        Format::Text => report.write_text(&mut out, !cli.summary_only)?,
        Format::Json if cli.summary_only => {
            writeln!(out, "{}", serde_json::to_string_pretty(&report.summary)?)?
        }
        Format::Json => writeln!(out, "{}", report.to_json()?)?,
    }
    out.flush()?;
    Ok(())
}
