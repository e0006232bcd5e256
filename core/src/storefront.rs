use std::rc::Rc;

use crate::storage::{Database, DurableStorage, MemoryStorage, SqliteStorage};
use crate::store::{FavoritesStore, ReviewsStore};
use crate::Result;

/// Application-wide client state: one storage adapter shared by one
/// favorites store and one reviews store.
///
/// Build it once at startup and hand references to whatever needs the stores.
pub struct Storefront {
    storage: Rc<dyn DurableStorage>,
    favorites: FavoritesStore,
    reviews: ReviewsStore,
}

impl Storefront {
    pub fn new(storage: Rc<dyn DurableStorage>) -> Self {
        Self {
            favorites: FavoritesStore::open(storage.clone()),
            reviews: ReviewsStore::open(storage.clone()),
            storage,
        }
    }

    /// Stores backed by custom keys, for running several profiles side by side
    pub fn with_keys(
        storage: Rc<dyn DurableStorage>,
        favorites_key: &str,
        reviews_key: &str,
    ) -> Self {
        Self {
            favorites: FavoritesStore::with_key(favorites_key, storage.clone()),
            reviews: ReviewsStore::with_key(reviews_key, storage.clone()),
            storage,
        }
    }

    /// State kept only for the lifetime of the process
    pub fn in_memory() -> Self {
        Self::new(Rc::new(MemoryStorage::new()))
    }

    /// State kept in the SQLite database at `db`
    pub fn open_database(db: &Database) -> Result<Self> {
        Ok(Self::new(Rc::new(SqliteStorage::open(db)?)))
    }

    pub fn favorites(&self) -> &FavoritesStore {
        &self.favorites
    }

    pub fn reviews(&self) -> &ReviewsStore {
        &self.reviews
    }

    pub fn storage(&self) -> &Rc<dyn DurableStorage> {
        &self.storage
    }
}
