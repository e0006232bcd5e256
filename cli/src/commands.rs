//! Command handlers. Each writes its human-readable output to `out`.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use storefront_core::catalog::{ProductCatalog, StaticCatalog};
use storefront_core::models::{NewReview, ProductFilters, Review, MAX_RATING};
use storefront_core::storage::{Database, SqliteStorage};
use storefront_core::Storefront;

pub fn list_favorites(storefront: &Storefront, out: &mut impl Write) -> Result<()> {
    let favorites = storefront.favorites().favorites();
    if favorites.is_empty() {
        writeln!(out, "No favorites yet.")?;
        return Ok(());
    }

    for product_id in favorites.sorted() {
        writeln!(out, "♥ {}", product_id)?;
    }
    Ok(())
}

pub fn toggle_favorite(storefront: &Storefront, product_id: &str, out: &mut impl Write) -> Result<()> {
    let favorites = storefront.favorites();
    favorites
        .toggle_favorite(product_id)
        .with_context(|| format!("Failed to update favorite {}", product_id))?;

    if favorites.is_favorite(product_id) {
        writeln!(out, "Added {} to favorites", product_id)?;
    } else {
        writeln!(out, "Removed {} from favorites", product_id)?;
    }
    Ok(())
}

pub fn check_favorite(storefront: &Storefront, product_id: &str, out: &mut impl Write) -> Result<()> {
    let answer = if storefront.favorites().is_favorite(product_id) {
        "yes"
    } else {
        "no"
    };
    writeln!(out, "{}", answer)?;
    Ok(())
}

pub fn add_review(storefront: &Storefront, input: NewReview, out: &mut impl Write) -> Result<()> {
    let review = storefront
        .reviews()
        .add_review(input)
        .context("Failed to add review")?;
    writeln!(out, "Added review {} for {}", review.id, review.product_id)?;
    Ok(())
}

fn stars(rating: u8) -> String {
    (1..=MAX_RATING)
        .map(|star| if star <= rating { '★' } else { '☆' })
        .collect()
}

fn review_count_label(count: usize) -> String {
    if count == 1 {
        "1 Review".to_string()
    } else {
        format!("{} Reviews", count)
    }
}

fn write_review(review: &Review, out: &mut impl Write) -> Result<()> {
    writeln!(
        out,
        "{} {} ({})",
        stars(review.rating),
        review.user_name,
        review.created_at.format("%b %-d, %Y")
    )?;
    writeln!(out, "    {}", review.comment)?;
    Ok(())
}

pub fn list_reviews(storefront: &Storefront, product_id: &str, out: &mut impl Write) -> Result<()> {
    let reviews = storefront.reviews().get_product_reviews(product_id);
    if reviews.is_empty() {
        writeln!(out, "No reviews yet. Be the first to review this product!")?;
        return Ok(());
    }

    writeln!(out, "{}", review_count_label(reviews.len()))?;
    for review in &reviews {
        write_review(review, out)?;
    }
    Ok(())
}

pub fn average_rating(storefront: &Storefront, product_id: &str, out: &mut impl Write) -> Result<()> {
    let reviews = storefront.reviews();
    let average = reviews.get_average_rating(product_id);
    let count = reviews.review_count(product_id);

    if average > 0.0 {
        writeln!(out, "{:.1} ({})", average, review_count_label(count))?;
    } else {
        writeln!(out, "— ({})", review_count_label(count))?;
    }
    Ok(())
}

pub fn list_products(
    storefront: &Storefront,
    catalog_path: &Path,
    filters: &ProductFilters,
    out: &mut impl Write,
) -> Result<()> {
    let catalog = StaticCatalog::from_json_file(catalog_path)
        .with_context(|| format!("Failed to load catalog {}", catalog_path.display()))?;
    let page = catalog.fetch_products(filters)?;

    for product in &page.products {
        let marker = if storefront.favorites().is_favorite(&product.id) {
            "♥"
        } else {
            " "
        };
        let price = product.price_label().unwrap_or_default();
        writeln!(out, "{} {}  {}  {}", marker, product.id, product.name, price)?;
    }
    Ok(())
}

pub fn backup_database(db: &Database, destination: &Path, out: &mut impl Write) -> Result<()> {
    db.backup(destination).with_context(|| {
        format!(
            "Failed to back up {} to {}",
            db.path().display(),
            destination.display()
        )
    })?;
    writeln!(out, "Backed up {} to {}", db.path().display(), destination.display())?;
    Ok(())
}

pub fn storage_info(db: &Database, storage: &SqliteStorage, out: &mut impl Write) -> Result<()> {
    let version = db.get_schema_version(storage.connection())?;
    writeln!(out, "Database: {}", db.path().display())?;
    writeln!(out, "Schema version: {}", version)?;
    for key in storage.keys()? {
        writeln!(out, "  {}", key)?;
    }
    Ok(())
}
