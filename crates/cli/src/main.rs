//! # propcontent: Content Inspection CLI
//!
//! This is the main entry point for the `propcontent` command-line interface.
//! It builds static snapshots from the live CMS and prints normalized content
//! from either backend.

mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use propcontent::{Collection, ContentFacade, ContentRepository};
use propcontent_snapshot::SnapshotRepository;
use propcontent_wordpress::WordPressRepository;
use serde_json::Value;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

// --- CLI Definition ---

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to a YAML config file (defaults to `propcontent.yml` when present)
    #[arg(long, global = true)]
    config: Option<String>,
    /// Read content from this snapshot file instead of the live CMS
    #[arg(long, global = true)]
    snapshot: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch every collection from the live CMS and write a snapshot file
    Snapshot(SnapshotArgs),
    /// Print the normalized SEO record of an item as JSON
    Seo(ItemArgs),
    /// Print the parsed micro-content of an item as JSON
    Micro(ItemArgs),
    /// Print the featured entries of a page as JSON
    Featured(FeaturedArgs),
}

#[derive(Parser, Debug)]
struct SnapshotArgs {
    /// Where to write the snapshot document
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct ItemArgs {
    /// One of: posts, pages, properties, developers, guides
    collection: Collection,
    slug: String,
}

#[derive(Parser, Debug)]
struct FeaturedArgs {
    page_slug: String,
}

// --- Main Application Entry ---

#[tokio::main]
async fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let app_config = config::get_config(cli.config.as_deref())?;
    let site = app_config.site.clone();

    if let Commands::Snapshot(args) = &cli.command {
        let snapshot = commands::build_snapshot(&site, &args.out).await?;
        println!(
            "Wrote snapshot to {} (fetched at {}).",
            args.out.display(),
            snapshot.fetched_at
        );
        return Ok(ExitCode::SUCCESS);
    }

    let snapshot_path = cli
        .snapshot
        .clone()
        .or_else(|| app_config.snapshot_path.as_ref().map(PathBuf::from));
    let repo: Arc<dyn ContentRepository> = match snapshot_path {
        Some(path) => {
            info!("Reading content from snapshot '{}'.", path.display());
            Arc::new(SnapshotRepository::load(&path)?)
        }
        None => {
            info!("Reading content from {}.", site.api_base_url);
            Arc::new(WordPressRepository::new(&site)?)
        }
    };
    let facade = ContentFacade::new(repo, site.identity());

    let (output, missing) = match &cli.command {
        Commands::Seo(args) => (
            commands::seo(&facade, args.collection, &args.slug).await?,
            format!("No {} found with slug '{}'.", args.collection, args.slug),
        ),
        Commands::Micro(args) => (
            commands::micro(&facade, args.collection, &args.slug).await?,
            format!("No {} found with slug '{}'.", args.collection, args.slug),
        ),
        Commands::Featured(args) => (
            commands::featured(&facade, &args.page_slug).await?,
            format!("No page found with slug '{}'.", args.page_slug),
        ),
        Commands::Snapshot(_) => return Ok(ExitCode::SUCCESS),
    };

    print_or_not_found(output, &missing)
}

fn print_or_not_found(output: Option<Value>, missing: &str) -> Result<ExitCode> {
    match output {
        Some(value) => {
            println!("{}", serde_json::to_string_pretty(&value)?);
            Ok(ExitCode::SUCCESS)
        }
        None => {
            eprintln!("{missing}");
            Ok(ExitCode::from(2))
        }
    }
}
