use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use trip_planner_core::models::exchange_rate::{RateNotice, ResolvedRate};
use trip_planner_core::models::money::{format_currency, Currency, Money};
use trip_planner_core::models::settings::PlannerSettings;
use trip_planner_core::storage::kv::FileStore;
use trip_planner_core::TripPlanner;

/// Environment variable overriding the data directory.
const DATA_DIR_ENV: &str = "TRIP_PLANNER_DATA_DIR";

/// Plan a JPY/KRW trip: itinerary, exchange rate and budget.
#[derive(Parser)]
#[command(name = "trip-planner", author, version, about, long_about = None)]
struct Cli {
    /// Directory holding the trip and rate cache documents.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// JSON settings file (providers, timeouts, cache TTL, fallback rate).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the trip, day by day.
    Show,
    /// Print trip totals, per-person costs and the budget target.
    Budget {
        /// Resolve the exchange rate before computing totals.
        #[arg(long)]
        refresh: bool,
    },
    /// Inspect or change the JPY→KRW exchange rate.
    #[command(subcommand)]
    Rate(RateCommand),
    /// Set the number of travellers.
    Participants { count: u32 },
    /// Set the budget target, e.g. `target 1500000 KRW`.
    Target { amount: f64, currency: Currency },
    /// Write the trip (or one day) as pretty JSON.
    Export {
        file: PathBuf,
        /// Export only this day.
        #[arg(long)]
        day: Option<String>,
    },
    /// Replace the trip with a JSON file (current, older or legacy format).
    Import { file: PathBuf },
}

#[derive(Subcommand)]
enum RateCommand {
    /// Fetch a fresh rate from the providers.
    Refresh,
    /// Pin a rate by hand.
    Set { rate: f64 },
    /// Show the cached rate and whether it is stale.
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();
    let settings = load_settings(cli.config.as_deref())?;
    let data_dir = resolve_data_dir(cli.data_dir)?;
    info!(data_dir = %data_dir.display(), "opening trip data");

    let store = FileStore::open(&data_dir)
        .with_context(|| format!("Failed to open data directory {}", data_dir.display()))?;
    let mut planner = TripPlanner::open(Arc::new(store), settings);

    match cli.command {
        Commands::Show => print_trip(&planner),
        Commands::Budget { refresh } => {
            if refresh {
                let resolved = planner.refresh_exchange_rate(true).await;
                print_notice(&resolved);
            }
            print_budget(&planner);
        }
        Commands::Rate(RateCommand::Refresh) => {
            let resolved = planner.refresh_exchange_rate(true).await;
            print_notice(&resolved);
            println!("1 JPY = {:.2} KRW ({})", resolved.rate, resolved.source.label());
        }
        Commands::Rate(RateCommand::Set { rate }) => {
            let resolved = planner.set_manual_exchange_rate(rate)?;
            print_notice(&resolved);
        }
        Commands::Rate(RateCommand::Status) => match planner.exchange_rate_status() {
            Some(status) => {
                println!("1 JPY = {:.2} KRW", status.rate);
                println!("source:       {}", status.source.label());
                println!("last updated: {}", status.last_updated);
                if status.is_expired {
                    println!("(stale; run `trip-planner rate refresh`)");
                }
            }
            None => println!("No cached exchange rate yet."),
        },
        Commands::Participants { count } => {
            planner.set_participants(count)?;
            println!("Participants: {count}");
        }
        Commands::Target { amount, currency } => {
            planner.set_budget_target(Some(Money::new(amount, currency)))?;
            println!("Budget target: {}", format_currency(amount, currency));
        }
        Commands::Export { file, day } => {
            let json = match &day {
                Some(day_id) => planner.export_day_json(day_id)?,
                None => planner.export_json()?,
            };
            std::fs::write(&file, json)
                .with_context(|| format!("Failed to write {}", file.display()))?;
            println!("Exported to {}", file.display());
        }
        Commands::Import { file } => {
            let json = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            planner
                .import_json(&json)
                .with_context(|| format!("Failed to import {}", file.display()))?;
            println!(
                "Imported '{}' ({} days)",
                planner.trip().title,
                planner.trip().days.len()
            );
        }
    }

    if planner.has_unsaved_changes() {
        planner.save().context("Failed to save trip")?;
    }
    Ok(())
}

/// Log to stderr, filtered by `RUST_LOG`.
fn init_logging() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "trip_planner=info".into()),
        )
        .init();
}

fn load_settings(path: Option<&Path>) -> Result<PlannerSettings> {
    let Some(path) = path else {
        return Ok(PlannerSettings::default());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings file {}", path.display()))?;
    PlannerSettings::from_json(&json)
        .with_context(|| format!("Invalid settings file {}", path.display()))
}

/// `--data-dir`, then `$TRIP_PLANNER_DATA_DIR`, then the platform data dir.
fn resolve_data_dir(flag: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = flag {
        return Ok(dir);
    }
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    match dirs::data_dir() {
        Some(base) => Ok(base.join("trip-planner")),
        None => bail!("Could not determine a data directory; pass --data-dir or set {DATA_DIR_ENV}"),
    }
}

fn print_notice(resolved: &ResolvedRate) {
    let Some(notice) = &resolved.notice else {
        return;
    };
    if notice.is_degraded() {
        eprintln!("warning: {}: {notice}", notice.title());
    } else {
        println!("{}: {notice}", notice.title());
    }
    if let RateNotice::UsingDefaultRate { .. } = notice {
        eprintln!("hint: set a rate with `trip-planner rate set <RATE>`");
    }
}

fn print_trip(planner: &TripPlanner) {
    let trip = planner.trip();
    let rate = trip.exchange_rate;

    println!("{}", trip.title);
    if !trip.start_date.is_empty() {
        println!("{} ~ {}", trip.start_date, trip.end_date);
    }
    let route = trip.route();
    if !route.is_empty() {
        println!("{route}");
    }
    println!("{}명 · 1 JPY = {rate:.2} KRW", trip.participants);

    for (n, day) in trip.days.iter().enumerate() {
        println!();
        let weekday = day.day_of_week.as_deref().unwrap_or("");
        let city = day.city.as_deref().unwrap_or("");
        println!("Day {} · {} {weekday} · {city}  [{}]", n + 1, day.date, day.id);
        if let Some(lodging) = &day.accommodation {
            println!("  숙소: {lodging}");
        }
        for item in &day.items {
            let other = item.cost.currency.other();
            println!(
                "  {:>5}  {:<28} {:<4} {:>10} ({})",
                item.time,
                item.name,
                item.category.label(),
                format_currency(item.cost.amount, item.cost.currency),
                format_currency(item.cost.in_currency(other, rate), other),
            );
        }
        if let Ok(summary) = planner.day_summary(&day.id) {
            println!(
                "  합계 {} / {}",
                format_currency(summary.total_jpy, Currency::JPY),
                format_currency(summary.total_krw, Currency::KRW)
            );
        }
    }
}

fn print_budget(planner: &TripPlanner) {
    let trip = planner.trip();
    let summary = planner.budget_summary();

    println!("1 JPY = {:.2} KRW", trip.exchange_rate);
    println!(
        "Total:      {} / {}",
        format_currency(summary.total_jpy, Currency::JPY),
        format_currency(summary.total_krw, Currency::KRW)
    );
    println!(
        "Per person: {} / {} ({}명)",
        format_currency(summary.per_person_jpy, Currency::JPY),
        format_currency(summary.per_person_krw, Currency::KRW),
        trip.participants
    );
    for (n, day) in summary.daily_totals.iter().enumerate() {
        println!(
            "  Day {}: {} / {}",
            n + 1,
            format_currency(day.total_jpy, Currency::JPY),
            format_currency(day.total_krw, Currency::KRW)
        );
    }

    if let Some(cmp) = planner.budget_comparison() {
        println!();
        println!(
            "Target:     {} ({})",
            format_currency(cmp.target_krw, Currency::KRW),
            format_currency(cmp.target_jpy, Currency::JPY)
        );
        println!("Remaining:  {}", format_currency(cmp.remaining_krw, Currency::KRW));
        println!("Progress:   {} {}", meter_bar(cmp.meter_percent()), cmp.progress_label());
        if cmp.is_over_budget() {
            println!("Over budget!");
        }
    }
}

/// Twenty-cell text meter for a clamped percentage.
fn meter_bar(percent: f64) -> String {
    let filled = (percent / 5.0).round() as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(20 - filled.min(20)))
}
