//! Storefront CLI - inspect and edit persisted favorites and reviews.
//!
//! # Usage
//!
//! ```bash
//! storefront favorites toggle shoe-1
//! storefront favorites list
//! storefront reviews add shoe-1 --user-name Ann --rating 5 --comment "Great"
//! storefront reviews list shoe-1
//! storefront reviews average shoe-1
//! storefront products --limit 8
//! storefront storage clear favorites
//! storefront storage backup storefront-backup.db
//! storefront storage info
//! ```

use std::io::{self, Write};
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use storefront_core::models::{NewReview, ProductFilters, ProductSort};
use storefront_core::storage::{Database, SqliteStorage};
use storefront_core::Storefront;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "storefront")]
#[command(author, version, about = "Storefront favorites and reviews")]
struct Cli {
    /// Path to the TOML config file (created with defaults if missing)
    #[arg(short, long, default_value = "storefront.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage favorite products
    Favorites {
        #[command(subcommand)]
        action: FavoritesAction,
    },
    /// Manage product reviews
    Reviews {
        #[command(subcommand)]
        action: ReviewsAction,
    },
    /// List products from the catalog file
    Products {
        #[arg(long, value_enum, default_value = "newest")]
        sort: SortArg,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 4)]
        limit: u32,
    },
    /// Manage persisted store data
    Storage {
        #[command(subcommand)]
        action: StorageAction,
    },
}

#[derive(Subcommand)]
enum FavoritesAction {
    /// List favorite product ids
    List,
    /// Add or remove a product
    Toggle { product_id: String },
    /// Print whether a product is a favorite
    Check { product_id: String },
}

#[derive(Subcommand)]
enum ReviewsAction {
    /// Submit a review
    Add {
        product_id: String,
        #[arg(short = 'n', long)]
        user_name: String,
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=5))]
        rating: u8,
        #[arg(short, long)]
        comment: String,
        /// Defaults to a generated `user-<millis>` id
        #[arg(short, long)]
        user_id: Option<String>,
    },
    /// Show reviews for a product, newest first
    List { product_id: String },
    /// Show the average rating for a product
    Average { product_id: String },
}

#[derive(Subcommand)]
enum StorageAction {
    /// Remove a store's persisted data
    Clear {
        #[arg(value_enum)]
        store: StoreArg,
    },
    /// Copy the database file to another path
    Backup { destination: PathBuf },
    /// Show the database path, schema version and stored keys
    Info,
}

#[derive(Clone, Copy, ValueEnum)]
enum StoreArg {
    Favorites,
    Reviews,
}

#[derive(Clone, Copy, ValueEnum)]
enum SortArg {
    Newest,
    PriceAsc,
    PriceDesc,
}

impl From<SortArg> for ProductSort {
    fn from(sort: SortArg) -> Self {
        match sort {
            SortArg::Newest => ProductSort::Newest,
            SortArg::PriceAsc => ProductSort::PriceAsc,
            SortArg::PriceDesc => ProductSort::PriceDesc,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = config::load_config(&cli.config)?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log.level.as_str()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let db = Database::new(&config.storage.database_path);
    let storage = Rc::new(SqliteStorage::open(&db)?);
    let storefront = Storefront::with_keys(
        storage.clone(),
        &config.storage.favorites_key,
        &config.storage.reviews_key,
    );
    tracing::debug!(database = %db.path().display(), "opened storefront state");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(cli.command, &storefront, &config, &db, &storage, &mut out)
}

fn run(
    command: Commands,
    storefront: &Storefront,
    config: &config::Config,
    db: &Database,
    storage: &SqliteStorage,
    out: &mut impl Write,
) -> Result<()> {
    match command {
        Commands::Favorites { action } => match action {
            FavoritesAction::List => commands::list_favorites(storefront, out),
            FavoritesAction::Toggle { product_id } => {
                commands::toggle_favorite(storefront, &product_id, out)
            }
            FavoritesAction::Check { product_id } => {
                commands::check_favorite(storefront, &product_id, out)
            }
        },
        Commands::Reviews { action } => match action {
            ReviewsAction::Add {
                product_id,
                user_name,
                rating,
                comment,
                user_id,
            } => {
                let user_id = user_id.unwrap_or_else(|| {
                    format!("user-{}", chrono::Utc::now().timestamp_millis())
                });
                let input = NewReview::new(product_id, user_id, user_name, rating, comment);
                commands::add_review(storefront, input, out)
            }
            ReviewsAction::List { product_id } => {
                commands::list_reviews(storefront, &product_id, out)
            }
            ReviewsAction::Average { product_id } => {
                commands::average_rating(storefront, &product_id, out)
            }
        },
        Commands::Products { sort, page, limit } => {
            let filters = ProductFilters {
                sort: sort.into(),
                page,
                limit,
            };
            commands::list_products(storefront, &config.catalog.products_path, &filters, out)
        }
        Commands::Storage { action } => match action {
            StorageAction::Clear { store } => {
                match store {
                    StoreArg::Favorites => storefront.favorites().handle().clear_storage()?,
                    StoreArg::Reviews => storefront.reviews().handle().clear_storage()?,
                }
                writeln!(out, "Cleared persisted data")?;
                Ok(())
            }
            StorageAction::Backup { destination } => {
                commands::backup_database(db, &destination, out)
            }
            StorageAction::Info => commands::storage_info(db, storage, out),
        },
    }
}
