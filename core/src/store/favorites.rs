use std::rc::Rc;

use super::{StoreHandle, Subscription};
use crate::codec::FavoritesCodec;
use crate::models::FavoriteSet;
use crate::storage::DurableStorage;
use crate::Result;

pub const FAVORITES_KEY: &str = "favorites-storage";

/// Products the shopper has hearted
#[derive(Clone)]
pub struct FavoritesStore {
    handle: StoreHandle<FavoriteSet, FavoritesCodec>,
}

impl FavoritesStore {
    pub fn open(storage: Rc<dyn DurableStorage>) -> Self {
        Self::with_key(FAVORITES_KEY, storage)
    }

    pub fn with_key(key: impl Into<String>, storage: Rc<dyn DurableStorage>) -> Self {
        Self {
            handle: StoreHandle::initialize(key, FavoriteSet::new(), FavoritesCodec, storage),
        }
    }

    /// Add the product if absent, remove it if present
    pub fn toggle_favorite(&self, product_id: &str) -> Result<()> {
        self.handle.set_state(|current| {
            let mut next = current.clone();
            next.toggle(product_id);
            next
        })
    }

    pub fn is_favorite(&self, product_id: &str) -> bool {
        self.handle.get_state().contains(product_id)
    }

    pub fn favorites(&self) -> Rc<FavoriteSet> {
        self.handle.get_state()
    }

    pub fn len(&self) -> usize {
        self.handle.get_state().len()
    }

    pub fn is_empty(&self) -> bool {
        self.handle.get_state().is_empty()
    }

    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&FavoriteSet) + 'static,
    {
        self.handle.subscribe(listener)
    }

    pub fn handle(&self) -> &StoreHandle<FavoriteSet, FavoritesCodec> {
        &self.handle
    }
}
