use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Catalog listing entry as returned by the product query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub min_price: Option<f64>,
    #[serde(default)]
    pub max_price: Option<f64>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl ProductSummary {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            subtitle: None,
            image_url: None,
            min_price: None,
            max_price: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_prices(mut self, min_price: Option<f64>, max_price: Option<f64>) -> Self {
        self.min_price = min_price;
        self.max_price = max_price;
        self
    }

    /// Price as shown on a product card: a range when min and max differ,
    /// otherwise the minimum price alone.
    pub fn price_label(&self) -> Option<String> {
        match (self.min_price, self.max_price) {
            (Some(min), Some(max)) if min != max => Some(format!("${:.2} - ${:.2}", min, max)),
            (Some(min), _) => Some(format!("${:.2}", min)),
            (None, _) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProductSort {
    #[default]
    Newest,
    PriceAsc,
    PriceDesc,
}

/// Ordering and paging for the product query. Unknown fields are rejected
/// so a caller never gets an unfiltered listing by mistake.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ProductFilters {
    pub sort: ProductSort,
    pub page: u32,
    pub limit: u32,
}

impl Default for ProductFilters {
    /// The landing page query: four newest products.
    fn default() -> Self {
        Self {
            sort: ProductSort::Newest,
            page: 1,
            limit: 4,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ProductPage {
    pub products: Vec<ProductSummary>,
}
