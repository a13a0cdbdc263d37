use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use beadsmith::designer::layout::SlotLayout;
use beadsmith::{
    format_minor, init_logging, session_options, BeadSession, Catalog, Config, DesignExport,
    PatternKind, PriceBreakdown, BUILD_DATE, VERSION,
};

#[derive(Debug, Parser)]
#[command(name = "beadsmith", version = VERSION, about = "Charm and bead bracelet designer")]
struct Cli {
    /// Engine config file (.toml or .json); defaults to the platform config directory.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Price a saved design against a catalog feed.
    Price {
        /// Catalog feed (JSON array of items).
        #[arg(long)]
        catalog: PathBuf,
        /// Design export (JSON).
        #[arg(long)]
        design: PathBuf,
        /// Base product price in minor units; overrides the design's own.
        #[arg(long)]
        base: Option<u64>,
        /// Print the breakdown as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Generate a bead pattern preview.
    Pattern {
        /// alternating, gradient, symmetrical, random or random:<seed>.
        #[arg(long)]
        kind: PatternKind,
        /// Catalog feed (JSON array of items).
        #[arg(long)]
        catalog: PathBuf,
        #[arg(long)]
        length_mm: f64,
        #[arg(long, default_value_t = 4.0)]
        diameter_mm: f64,
        #[arg(long, default_value_t = 1.0)]
        spacing_mm: f64,
        /// Base product price in minor units.
        #[arg(long, default_value_t = 0)]
        base: u64,
        #[arg(long, default_value = "bead-bracelet")]
        product: String,
        /// Save the generated design here.
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let config = match path {
        Some(path) => Config::load_from_file(path)?,
        None => match Config::default_path() {
            Ok(path) => Config::load_or_default(&path)?,
            Err(err) => {
                tracing::warn!("{}, using default config", err);
                Config::default()
            }
        },
    };
    Ok(config)
}

fn load_catalog(path: &Path) -> Result<Catalog> {
    Catalog::load_from_file(path)
        .with_context(|| format!("Failed to load catalog {}", path.display()))
}

fn print_breakdown(breakdown: &PriceBreakdown) {
    println!("Items:    {}", breakdown.item_count);
    println!("Subtotal: {}", format_minor(breakdown.subtotal_minor));
    println!(
        "Discount: {} ({})",
        format_minor(breakdown.discount_minor),
        breakdown.discount_rate
    );
    println!("Total:    {}", format_minor(breakdown.total_minor));
}

fn main() -> Result<()> {
    init_logging()?;
    let cli = Cli::parse();
    tracing::debug!("beadsmith {} (built {})", VERSION, BUILD_DATE);

    let config = load_config(cli.config.as_deref())?;
    let options = session_options(&config);

    match cli.command {
        Command::Price {
            catalog,
            design,
            base,
            json,
        } => {
            let catalog = load_catalog(&catalog)?;
            let mut export = DesignExport::load_from_file(&design)?;
            if let Some(base) = base {
                export.base_price_minor = base;
            }
            let breakdown = export.price(&options.pricing, &catalog);
            if json {
                println!("{}", serde_json::to_string_pretty(&breakdown)?);
            } else {
                print_breakdown(&breakdown);
            }
        }
        Command::Pattern {
            kind,
            catalog,
            length_mm,
            diameter_mm,
            spacing_mm,
            base,
            product,
            output,
        } => {
            let catalog = load_catalog(&catalog)?;
            let layout = SlotLayout::new(length_mm, diameter_mm, spacing_mm);
            let mut session = BeadSession::new(product, base, catalog, layout, options);
            let placed = session.apply_pattern(kind)?;

            println!("{} pattern: {} of {} slots", kind, placed, session.slot_count());
            for placement in session.ordered() {
                println!("  slot {:>3}  {}", placement.position, placement.catalog_item_id);
            }
            print_breakdown(&session.price());

            if let Some(path) = output {
                session.export().save_to_file(&path)?;
            }
        }
    }

    Ok(())
}
