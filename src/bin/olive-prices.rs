//! Command-line front end: convert the raw history, apply the daily feed,
//! and inspect the canonical series.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand, ValueEnum};

use olive_prices::{aggregate, config, Grade, PriceTracker, Result, UpdateOutcome};

#[derive(Parser)]
#[command(name = "olive-prices", about = "Olive-oil price history maintenance", version)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Rebuild the series file from the raw quotation text
    Convert {
        /// Raw quotation text
        #[arg(short, long, default_value = config::DEFAULT_RAW_FILE)]
        input: PathBuf,

        /// Canonical series file to write
        #[arg(short, long, default_value = config::DEFAULT_SERIES_FILE)]
        output: PathBuf,
    },
    /// Merge today's quotation from the daily feed
    Update {
        /// URL of the daily snapshot document
        #[arg(long)]
        feed_url: String,

        /// As-of date (YYYY-MM-DD); defaults to today in Europe/Madrid
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Feed timeout in seconds
        #[arg(long, default_value_t = config::FEED_TIMEOUT.as_secs())]
        timeout: u64,

        /// Canonical series file
        #[arg(long, default_value = config::DEFAULT_SERIES_FILE)]
        series: PathBuf,
    },
    /// Print averaged prices for one grade
    Summary {
        /// Grade key or label (virgen_extra, virgen, lampante)
        #[arg(short, long, default_value = "virgen_extra")]
        grade: Grade,

        #[arg(long, value_enum, default_value_t = Period::Year)]
        by: Period,

        /// Restrict monthly/daily output to one year
        #[arg(long)]
        year: Option<i32>,

        /// Canonical series file
        #[arg(long, default_value = config::DEFAULT_SERIES_FILE)]
        series: PathBuf,
    },
    /// Validate the series file, regenerating it if it still holds raw text
    Check {
        /// Canonical series file
        #[arg(long, default_value = config::DEFAULT_SERIES_FILE)]
        series: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Period {
    Year,
    Month,
    Day,
}

fn today() -> NaiveDate {
    Utc::now().with_timezone(&config::reference_timezone()).date_naive()
}

fn run(args: Args) -> Result<()> {
    match args.command {
        Command::Convert { input, output } => {
            let tracker = PriceTracker::builder()
                .raw_path(input)
                .series_path(&output)
                .build()?;
            let store = tracker.convert()?;
            println!("Generated {} with:", output.display());
            for (grade, series) in store.iter() {
                println!("  - {}: {} points", grade, series.len());
            }
        }
        Command::Update {
            feed_url,
            date,
            timeout,
            series,
        } => {
            let mut tracker = PriceTracker::builder()
                .series_path(&series)
                .feed_url(feed_url)
                .timeout(Duration::from_secs(timeout))
                .build()?;
            let as_of = date.unwrap_or_else(today);
            let report = tracker.update(as_of)?;
            for (grade, outcome) in &report.outcomes {
                match outcome {
                    UpdateOutcome::Added(price) => println!("{}: added {} -> {:.3}", grade, as_of, price),
                    UpdateOutcome::AlreadyPresent => println!("{}: {} already present", grade, as_of),
                    UpdateOutcome::Missing => println!("{}: no price in feed", grade),
                    UpdateOutcome::Rejected => println!("{}: feed price rejected", grade),
                }
            }
            if !report.changed() {
                println!("No changes.");
            }
        }
        Command::Summary {
            grade,
            by,
            year,
            series,
        } => {
            let tracker = PriceTracker::builder().series_path(&series).build()?;
            let store = tracker.load()?;
            let series = store.get(grade);
            println!("{}", grade);
            match by {
                Period::Year => {
                    for b in aggregate::yearly_averages(series) {
                        println!("  {}  {:.3}  ({} points)", b.label, b.average, b.points);
                    }
                }
                Period::Month => {
                    for b in aggregate::monthly_averages(series, year) {
                        println!("  {}  {:.3}  ({} points)", b.label, b.average, b.points);
                    }
                }
                Period::Day => {
                    for r in aggregate::daily(series, year) {
                        println!("  {}  {:.3}", r.date(), r.price());
                    }
                }
            }
            if let Some(t) = aggregate::trend(series) {
                println!(
                    "  {} .. {}: min {:.3}, max {:.3}, avg {:.3} over {} points",
                    t.first_date, t.last_date, t.min_price, t.max_price, t.avg_price, t.data_points
                );
            }
        }
        Command::Check { series } => {
            let tracker = PriceTracker::builder().series_path(&series).build()?;
            let (store, regenerated) = tracker.ensure_canonical()?;
            olive_prices::storage::validate_file(tracker.series_path())?;
            if regenerated {
                println!("Regenerated {} from raw text.", series.display());
            }
            println!("OK: {} points.", store.total_points());
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(e.exit_code())
        }
    }
}
