use std::str::FromStr;

use clap::{Parser, Subcommand};

use healthwatch_core::Period;
use healthwatch_locator::{
    resolve_nearest, GeoPoint, LookupOutcome, OverpassClient, ResolverConfig, StaticLocation,
};

#[derive(Debug, Parser)]
#[command(name = "healthwatch-cli")]
#[command(about = "HealthWatch command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Create the database schema and load the demo dataset.
    Seed,
    /// Find the nearest facility to the given coordinates.
    Nearest {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
        /// Facility category; defaults to the configured one (hospital).
        #[arg(long)]
        category: Option<String>,
        #[arg(long = "radius-km")]
        radius_km: Option<f64>,
    },
    /// Print the aggregated health summary for a period.
    Summary {
        #[arg(long, default_value = "week")]
        period: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = healthwatch_core::load_app_config()?;

    match cli.command {
        Commands::Seed => seed(&config).await,
        Commands::Nearest {
            lat,
            lon,
            category,
            radius_km,
        } => nearest(&config, lat, lon, category, radius_km).await,
        Commands::Summary { period } => summary(&config, &period).await,
    }
}

async fn seed(config: &healthwatch_core::AppConfig) -> anyhow::Result<()> {
    let pool_config = healthwatch_db::PoolConfig::from_app_config(config);
    let pool = healthwatch_db::connect_pool(&config.database_url, pool_config).await?;
    healthwatch_db::run_migrations(&pool).await?;

    if healthwatch_db::seed_demo_data(&pool).await? {
        println!("seeded demo dataset");
    } else {
        println!("database already seeded, nothing to do");
    }
    Ok(())
}

async fn nearest(
    config: &healthwatch_core::AppConfig,
    lat: f64,
    lon: f64,
    category: Option<String>,
    radius_km: Option<f64>,
) -> anyhow::Result<()> {
    let position = GeoPoint::new(lat, lon)?;
    let location = StaticLocation::new(position);
    let overpass = OverpassClient::with_base_url(
        config.locator_timeout_secs,
        &config.http_user_agent,
        &config.overpass_base_url,
    )?;
    let resolver_config = ResolverConfig {
        radius_km: radius_km.unwrap_or(config.locator_radius_km),
        category: category.unwrap_or_else(|| config.locator_category.clone()),
    };

    match resolve_nearest(&location, &overpass, &resolver_config).await {
        LookupOutcome::Found(facility) => {
            println!("{} ({:.2} km)", facility.name, facility.distance_km);
            println!("  address: {}", facility.address);
            if let Some(phone) = facility.phone {
                println!("  phone:   {phone}");
            }
            println!(
                "  at:      {:.5}, {:.5}",
                facility.location.latitude(),
                facility.location.longitude()
            );
            Ok(())
        }
        LookupOutcome::NotFound => {
            println!(
                "no {} found within {} km",
                resolver_config.category, resolver_config.radius_km
            );
            Ok(())
        }
        LookupOutcome::Failed(failure) => anyhow::bail!("{}: {}", failure, failure.advisory()),
    }
}

async fn summary(config: &healthwatch_core::AppConfig, period: &str) -> anyhow::Result<()> {
    let period = Period::from_str(period)?;
    let pool_config = healthwatch_db::PoolConfig::from_app_config(config);
    let pool = healthwatch_db::connect_pool(&config.database_url, pool_config).await?;

    let samples =
        healthwatch_db::list_health_metrics(&pool, healthwatch_db::DEMO_PATIENT_ID, period).await?;
    let summary = healthwatch_core::summarize_metrics(period, &samples)?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
