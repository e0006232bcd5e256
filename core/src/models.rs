mod favorite;
mod product;
mod review;
mod review_log;

pub use favorite::FavoriteSet;
pub use product::{ProductFilters, ProductPage, ProductSort, ProductSummary};
pub use review::{NewReview, Review, MAX_RATING, MIN_RATING};
pub use review_log::ReviewLog;
