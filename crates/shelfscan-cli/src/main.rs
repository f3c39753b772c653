use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde::Serialize;

use shelfscan_engine::quantity::parse_quantity_grams;
use shelfscan_engine::seed::{from_catalog_file, SeedCatalog, SeedPricing};
use shelfscan_engine::{Engine, EngineConfig};

#[derive(Debug, Parser)]
#[command(name = "shelfscan-cli")]
#[command(about = "Shelfscan command line interface")]
struct Cli {
    /// Path to the catalog seed file.
    #[arg(
        long,
        default_value = "./config/catalog.yaml",
        env = "SHELFSCAN_CATALOG_PATH"
    )]
    catalog: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Identify a product from extracted label text lines.
    Identify { lines: Vec<String> },
    /// Compare a product's price across stores, cheapest first.
    Compare {
        product_id: i64,
        /// Shopper latitude; requires --lng.
        #[arg(long, requires = "lng", allow_hyphen_values = true)]
        lat: Option<f64>,
        /// Shopper longitude; requires --lat.
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lng: Option<f64>,
    },
    /// Suggest products matching partial text.
    Suggest {
        query: String,
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Validate the catalog file and print summary counts.
    Validate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Identify { lines } => {
            let engine = build_engine(&cli.catalog).await?;
            print_json(&engine.identify_by_photo(&lines))?;
        }
        Commands::Compare {
            product_id,
            lat,
            lng,
        } => {
            let engine = build_engine(&cli.catalog).await?;
            let result = engine.compare_prices(product_id, lat.zip(lng)).await?;
            print_json(&result)?;
        }
        Commands::Suggest { query, limit } => {
            let engine = build_engine(&cli.catalog).await?;
            let mut suggestions = engine.suggest_products(&query);
            if let Some(limit) = limit {
                suggestions.truncate(limit);
            }
            print_json(&suggestions)?;
        }
        Commands::Validate => validate(&cli.catalog)?,
    }

    Ok(())
}

async fn build_engine(
    catalog_path: &Path,
) -> anyhow::Result<Engine<SeedCatalog, SeedPricing>> {
    let catalog_file = shelfscan_core::load_catalog(catalog_path)?;
    let (catalog, pricing) = from_catalog_file(catalog_file);
    let engine = Engine::new(
        Arc::new(catalog),
        Arc::new(pricing),
        EngineConfig::default(),
    );
    let stats = engine.rebuild_index().await?;
    tracing::debug!(products = stats.products, aliases = stats.aliases, "catalog indexed");
    Ok(engine)
}

fn validate(catalog_path: &Path) -> anyhow::Result<()> {
    let catalog = shelfscan_core::load_catalog(catalog_path)?;
    println!(
        "catalog OK: {} products, {} stores, {} price facts",
        catalog.products.len(),
        catalog.stores.len(),
        catalog.prices.len()
    );
    for product in &catalog.products {
        if let Some(grams) = parse_quantity_grams(&product.name) {
            println!("  product {} ({}): {grams}g from name", product.id, product.name);
        }
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
