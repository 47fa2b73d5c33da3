//! Galleria admin CLI.
//!
//! Operational entry point that wires configuration, logging, the
//! PostgreSQL node store, and the gallery engine services together.

use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt};
use uuid::Uuid;

use galleria_core::config::AppConfig;
use galleria_core::error::AppError;
use galleria_service::{BreadcrumbService, FacetService, MediaQuery, MediaService, TreeService};
use galleria_store::{DatabasePool, NodeStore, PgNodeStore};

#[derive(Parser)]
#[command(
    name = "galleria-admin",
    about = "Operational CLI for the Galleria gallery engine"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run pending database migrations.
    Migrate,
    /// Print a project's gallery tree as JSON.
    Tree {
        /// Project ID.
        project_id: Uuid,
    },
    /// Print the breadcrumb trail of a node as JSON.
    Breadcrumb {
        /// Node ID.
        node_id: Uuid,
    },
    /// Print one page of a folder's media as JSON.
    Media {
        /// Folder ID.
        folder_id: Uuid,
        /// Also include media of the folder's direct child folders.
        #[arg(long)]
        include_children: bool,
        /// Page number (1-based).
        #[arg(long, default_value_t = 1)]
        page: u64,
        /// Items per page.
        #[arg(long, default_value_t = 25)]
        limit: u64,
    },
    /// Print a project's facet counts as JSON.
    Facets {
        /// Project ID.
        project_id: Uuid,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let env = std::env::var("GALLERIA_ENV").unwrap_or_else(|_| "development".to_string());
    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config, cli.command).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging.
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt().json().with_env_filter(filter).with_target(true).init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Dispatch one admin command against the PostgreSQL store.
async fn run(config: AppConfig, command: Command) -> Result<(), AppError> {
    let pool = DatabasePool::connect(&config.database).await?;
    let store: Arc<dyn NodeStore> = Arc::new(PgNodeStore::new(pool.pool().clone()));

    match command {
        Command::Migrate => {
            galleria_store::migration::run_migrations(pool.pool()).await?;
            tracing::info!("Migrations complete");
        }
        Command::Tree { project_id } => {
            let forest = TreeService::new(store).project_tree(project_id).await?;
            print_json(&forest)?;
        }
        Command::Breadcrumb { node_id } => {
            let service =
                BreadcrumbService::with_max_depth(store, config.gallery.max_ancestry_depth);
            let trail = service.breadcrumb(node_id).await?;
            print_json(&trail)?;
        }
        Command::Media {
            folder_id,
            include_children,
            page,
            limit,
        } => {
            let query = MediaQuery {
                include_child_folders: include_children,
                page,
                limit,
            };
            let listing = MediaService::new(store).query_media(folder_id, &query).await?;
            print_json(&listing)?;
        }
        Command::Facets { project_id } => {
            let summary = FacetService::new(store).facets(project_id).await?;
            print_json(&summary)?;
        }
    }

    pool.close().await;
    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), AppError> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}
