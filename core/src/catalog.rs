//! Product listing collaborator.
//!
//! Product ids flowing into the favorites and reviews stores originate from
//! [`ProductSummary`] values returned here. The stores never call the
//! catalog themselves.

use std::cmp::Ordering;
use std::path::Path;

use crate::models::{ProductFilters, ProductPage, ProductSort, ProductSummary};
use crate::{Error, Result};

pub trait ProductCatalog {
    fn fetch_products(&self, filters: &ProductFilters) -> Result<ProductPage>;
}

/// Catalog over a fixed product list
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    products: Vec<ProductSummary>,
}

impl StaticCatalog {
    pub fn new(products: Vec<ProductSummary>) -> Self {
        Self { products }
    }

    /// Load a JSON array of product summaries
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let products: Vec<ProductSummary> = serde_json::from_str(&content)?;
        Ok(Self::new(products))
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

fn compare_price(a: Option<f64>, b: Option<f64>) -> Ordering {
    // Unpriced products sort last
    match (a, b) {
        (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

impl ProductCatalog for StaticCatalog {
    fn fetch_products(&self, filters: &ProductFilters) -> Result<ProductPage> {
        if filters.page == 0 {
            return Err(Error::InvalidInput("page numbers start at 1".to_string()));
        }

        let mut products = self.products.clone();
        match filters.sort {
            ProductSort::Newest => products.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            ProductSort::PriceAsc => products.sort_by(|a, b| compare_price(a.min_price, b.min_price)),
            ProductSort::PriceDesc => products.sort_by(|a, b| match (a.min_price, b.min_price) {
                (Some(_), Some(_)) => compare_price(b.min_price, a.min_price),
                _ => compare_price(a.min_price, b.min_price),
            }),
        }

        let limit = filters.limit as usize;
        let offset = (filters.page as usize - 1).saturating_mul(limit);
        let products = products.into_iter().skip(offset).take(limit).collect();

        Ok(ProductPage { products })
    }
}
