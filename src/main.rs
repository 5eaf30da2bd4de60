use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use packwise::api::AppState;
use packwise::config::LoggingConfig;
use packwise::units::{TempUnit, format_temp};
use packwise::{OpenMeteoClient, PackwiseConfig, ResponseCache, TripPlan, TripPlanner, TripRequest};

/// Packwise - weather-aware packing lists for upcoming trips
#[derive(Parser, Debug)]
#[command(name = "packwise")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Path to a TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP API server
    Serve {
        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Print the forecast and packing list for a trip
    Plan {
        /// Destination name, e.g. "Lisbon"
        #[arg(short, long)]
        destination: String,

        /// First day of the trip (YYYY-MM-DD)
        #[arg(long)]
        start: NaiveDate,

        /// Last day of the trip (YYYY-MM-DD)
        #[arg(long)]
        end: NaiveDate,

        /// Temperature unit for display (F or C)
        #[arg(short, long, default_value = "F")]
        unit: TempUnit,
    },
}

fn init_tracing(logging: &LoggingConfig, verbose: bool) {
    let level = if verbose { "debug" } else { logging.level.as_str() };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let registry = tracing_subscriber::registry().with(filter);

    if logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn build_planner(config: &PackwiseConfig) -> Result<TripPlanner> {
    let mut client = OpenMeteoClient::new(&config.weather)?;

    if config.cache.enabled {
        let ttl = Duration::from_secs(u64::from(config.cache.ttl_hours) * 60 * 60);
        let cache = ResponseCache::open(&config.cache.location, ttl)
            .with_context(|| format!("Failed to open cache at {}", config.cache.location))?;
        tracing::debug!("Response cache enabled at {}", config.cache.location);
        client = client.with_cache(Arc::new(cache));
    }

    Ok(TripPlanner::new(
        Arc::new(client),
        config.weather.max_lookahead_days,
    ))
}

fn print_plan(plan: &TripPlan, unit: TempUnit) {
    let weather = &plan.weather;

    println!(
        "Weather Forecast for {} ({} to {})",
        plan.destination.display_name(),
        plan.start_date,
        plan.end_date
    );
    println!(
        "  Avg high {}  Avg low {}  Avg precipitation {:.1} mm  Rainy days {}",
        format_temp(weather.avg_high, unit),
        format_temp(weather.avg_low, unit),
        weather.avg_precipitation,
        weather.total_precip_days
    );
    for day in &weather.daily {
        println!(
            "  {}  {:>6} / {:<6}  {:>3}% rain  {:.1} mm",
            day.date.format("%a %m/%d"),
            format_temp(day.temp_max, unit),
            format_temp(day.temp_min, unit),
            day.precipitation_probability,
            day.precipitation
        );
    }

    println!();
    println!("What to Pack");
    for category in plan.rendered_packing(unit) {
        println!();
        println!("{} {}", category.icon, category.name);
        println!("  {}", category.reason);
        for item in &category.items {
            println!("  - {item}");
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => PackwiseConfig::load_from_path(Some(path.clone()))?,
        None => PackwiseConfig::load()?,
    };
    init_tracing(&config.logging, cli.verbose);

    match cli.command {
        Command::Serve { port } => {
            let mut server = config.server.clone();
            if let Some(port) = port {
                server.port = port;
            }
            let planner = build_planner(&config)?;
            packwise::web::run(&server, AppState::new(planner)).await
        }
        Command::Plan {
            destination,
            start,
            end,
            unit,
        } => {
            tracing::debug!("Planning trip to {} from {} to {}", destination, start, end);
            let planner = build_planner(&config)?;
            let today = Local::now().date_naive();
            let plan = planner
                .plan_for_name(&destination, TripRequest::new(start, end), today)
                .await
                .map_err(|e| anyhow::anyhow!(e.user_message()))?;
            print_plan(&plan, unit);
            Ok(())
        }
    }
}
