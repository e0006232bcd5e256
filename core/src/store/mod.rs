mod favorites;
mod handle;
mod reviews;

pub use favorites::{FavoritesStore, FAVORITES_KEY};
pub use handle::{StoreHandle, Subscription};
pub use reviews::{ReviewsStore, REVIEWS_KEY};
