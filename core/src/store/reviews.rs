use std::rc::Rc;

use super::{StoreHandle, Subscription};
use crate::codec::ReviewsCodec;
use crate::models::{NewReview, Review, ReviewLog};
use crate::storage::DurableStorage;
use crate::Result;

pub const REVIEWS_KEY: &str = "reviews-storage";

/// Append-only product reviews, newest first
#[derive(Clone)]
pub struct ReviewsStore {
    handle: StoreHandle<ReviewLog, ReviewsCodec>,
}

impl ReviewsStore {
    pub fn open(storage: Rc<dyn DurableStorage>) -> Self {
        Self::with_key(REVIEWS_KEY, storage)
    }

    pub fn with_key(key: impl Into<String>, storage: Rc<dyn DurableStorage>) -> Self {
        Self {
            handle: StoreHandle::initialize(key, ReviewLog::new(), ReviewsCodec, storage),
        }
    }

    /// Validate `input`, stamp it with an id and creation time, and put it
    /// at the head of the log. Returns the stored review.
    pub fn add_review(&self, input: NewReview) -> Result<Review> {
        input.validate()?;
        let review = Review::from_input(input);

        self.handle.set_state(|current| {
            let mut next = current.clone();
            next.prepend(review.clone());
            next
        })?;

        tracing::debug!(
            review_id = %review.id,
            product_id = %review.product_id,
            rating = review.rating,
            "added review"
        );
        Ok(review)
    }

    pub fn get_product_reviews(&self, product_id: &str) -> Vec<Review> {
        self.handle.get_state().for_product(product_id)
    }

    pub fn get_average_rating(&self, product_id: &str) -> f64 {
        self.handle.get_state().average_rating(product_id)
    }

    pub fn review_count(&self, product_id: &str) -> usize {
        self.handle.get_state().count_for_product(product_id)
    }

    pub fn reviews(&self) -> Rc<ReviewLog> {
        self.handle.get_state()
    }

    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&ReviewLog) + 'static,
    {
        self.handle.subscribe(listener)
    }

    pub fn handle(&self) -> &StoreHandle<ReviewLog, ReviewsCodec> {
        &self.handle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use crate::Error;
    use std::cell::Cell;

    fn setup() -> (Rc<MemoryStorage>, ReviewsStore) {
        let storage = Rc::new(MemoryStorage::new());
        let store = ReviewsStore::open(storage.clone());
        (storage, store)
    }

    fn input(product_id: &str, user_name: &str, rating: u8, comment: &str) -> NewReview {
        NewReview::new(product_id, format!("user-{}", user_name), user_name, rating, comment)
    }

    #[test]
    fn test_two_reviews_scenario() {
        let (_storage, store) = setup();

        store
            .add_review(NewReview::new("shoe-1", "u1", "Ann", 5, "Great"))
            .unwrap();
        store
            .add_review(NewReview::new("shoe-1", "u2", "Bo", 3, "Ok"))
            .unwrap();

        assert_eq!(store.get_average_rating("shoe-1"), 4.0);
        assert_eq!(store.get_product_reviews("shoe-1")[0].user_name, "Bo");
    }

    #[test]
    fn test_newer_review_comes_first() {
        let (_storage, store) = setup();

        let a = store.add_review(input("p", "a", 4, "first")).unwrap();
        let b = store.add_review(input("p", "b", 2, "second")).unwrap();

        let reviews = store.get_product_reviews("p");
        assert_eq!(reviews, vec![b, a]);
    }

    #[test]
    fn test_filter_by_product() {
        let (_storage, store) = setup();

        store.add_review(input("p", "a", 5, "x")).unwrap();
        store.add_review(input("q", "b", 1, "x")).unwrap();
        store.add_review(input("p", "c", 3, "x")).unwrap();

        let reviews = store.get_product_reviews("p");
        assert!(reviews.iter().all(|r| r.product_id == "p"));
        assert_eq!(reviews.len(), 2);
        assert_eq!(reviews[0].user_name, "c");
        assert_eq!(store.review_count("q"), 1);
        assert!(store.get_product_reviews("missing").is_empty());
    }

    #[test]
    fn test_average_rating_without_reviews() {
        let (_storage, store) = setup();
        store.add_review(input("p", "a", 5, "x")).unwrap();
        assert_eq!(store.get_average_rating("q"), 0.0);
    }

    #[test]
    fn test_back_to_back_reviews_get_distinct_ids() {
        let (_storage, store) = setup();

        let a = store.add_review(input("p", "a", 5, "x")).unwrap();
        let b = store.add_review(input("p", "a", 5, "x")).unwrap();

        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_returned_reviews_are_not_live() {
        let (_storage, store) = setup();
        store.add_review(input("p", "a", 5, "x")).unwrap();

        let snapshot = store.get_product_reviews("p");
        store.add_review(input("p", "b", 4, "y")).unwrap();

        assert_eq!(snapshot.len(), 1);
        assert_eq!(store.get_product_reviews("p").len(), 2);
    }

    #[test]
    fn test_invalid_input_is_rejected_without_write() {
        let (storage, store) = setup();

        let err = store.add_review(input("p", "a", 0, "x")).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        assert!(store.add_review(input("p", "  ", 3, "x")).is_err());
        assert!(store.add_review(input("p", "a", 3, "")).is_err());

        assert!(store.reviews().is_empty());
        assert_eq!(storage.get(REVIEWS_KEY).unwrap(), None);
    }

    #[test]
    fn test_reopen_restores_log() {
        let (storage, store) = setup();
        store.add_review(input("p", "a", 5, "x")).unwrap();
        store.add_review(input("p", "b", 2, "y")).unwrap();

        let reopened = ReviewsStore::open(storage);
        assert_eq!(*reopened.reviews(), *store.reviews());
        assert_eq!(reopened.get_average_rating("p"), 3.5);
    }

    #[test]
    fn test_unsupported_envelope_version_starts_empty() {
        let storage = Rc::new(MemoryStorage::new());
        storage
            .set(REVIEWS_KEY, r#"{"state":{"reviews":[]},"version":3}"#)
            .unwrap();

        let store = ReviewsStore::open(storage.clone());
        assert!(store.reviews().is_empty());

        // The store stays usable and overwrites the foreign envelope
        store.add_review(input("p", "a", 5, "x")).unwrap();
        let persisted = storage.get(REVIEWS_KEY).unwrap().unwrap();
        assert!(persisted.ends_with(r#""version":0}"#));
    }

    #[test]
    fn test_write_failure_drops_review() {
        let storage = Rc::new(MemoryStorage::with_quota(32));
        let store = ReviewsStore::open(storage);

        let err = store.add_review(input("p", "a", 5, "x")).unwrap_err();
        assert!(matches!(err, Error::StorageWrite { .. }));
        assert!(store.reviews().is_empty());
    }

    #[test]
    fn test_subscriber_notified_on_add() {
        let (_storage, store) = setup();
        let total = Rc::new(Cell::new(0));
        let total_in_listener = total.clone();
        store.subscribe(move |log| total_in_listener.set(log.len()));

        store.add_review(input("p", "a", 5, "x")).unwrap();
        store.add_review(input("q", "b", 5, "x")).unwrap();

        assert_eq!(total.get(), 2);
    }
}
