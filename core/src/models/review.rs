use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    pub product_id: String,
    pub user_id: String,
    pub user_name: String,
    pub rating: u8,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

/// Caller-supplied fields of a review. The store assigns `id` and `created_at`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewReview {
    pub product_id: String,
    pub user_id: String,
    pub user_name: String,
    pub rating: u8,
    pub comment: String,
}

impl NewReview {
    pub fn new(
        product_id: impl Into<String>,
        user_id: impl Into<String>,
        user_name: impl Into<String>,
        rating: u8,
        comment: impl Into<String>,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            user_id: user_id.into(),
            user_name: user_name.into(),
            rating,
            comment: comment.into(),
        }
    }

    /// Reject input the review form would never submit
    pub fn validate(&self) -> Result<()> {
        if self.product_id.is_empty() {
            return Err(Error::InvalidInput("product id must not be empty".to_string()));
        }
        if self.user_name.trim().is_empty() {
            return Err(Error::InvalidInput("user name must not be blank".to_string()));
        }
        if self.comment.trim().is_empty() {
            return Err(Error::InvalidInput("comment must not be blank".to_string()));
        }
        if !(MIN_RATING..=MAX_RATING).contains(&self.rating) {
            return Err(Error::InvalidInput(format!(
                "rating {} is outside {}..={}",
                self.rating, MIN_RATING, MAX_RATING
            )));
        }
        Ok(())
    }
}

impl Review {
    /// Build a review from validated input, stamping a fresh id and creation time.
    ///
    /// The id joins the creation time in milliseconds with a random UUID, so
    /// two reviews created within the same millisecond still differ.
    pub fn from_input(input: NewReview) -> Self {
        let created_at = Utc::now();
        Self {
            id: format!("{}-{}", created_at.timestamp_millis(), uuid::Uuid::new_v4()),
            product_id: input.product_id,
            user_id: input.user_id,
            user_name: input.user_name.trim().to_string(),
            rating: input.rating,
            comment: input.comment.trim().to_string(),
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(rating: u8) -> NewReview {
        NewReview::new("shoe-1", "u1", "Ann", rating, "Great")
    }

    #[test]
    fn test_review_from_input() {
        let review = Review::from_input(NewReview::new("shoe-1", "u1", "  Ann ", 5, " Great\n"));
        assert_eq!(review.product_id, "shoe-1");
        assert_eq!(review.user_name, "Ann");
        assert_eq!(review.comment, "Great");
        assert!(!review.id.is_empty());
    }

    #[test]
    fn test_ids_differ_within_same_instant() {
        let a = Review::from_input(input(5));
        let b = Review::from_input(input(5));
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_validate_rating_bounds() {
        assert!(input(1).validate().is_ok());
        assert!(input(5).validate().is_ok());
        assert!(matches!(input(0).validate(), Err(Error::InvalidInput(_))));
        assert!(matches!(input(6).validate(), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_validate_blank_fields() {
        let mut review = input(4);
        review.user_name = "   ".to_string();
        assert!(review.validate().is_err());

        let mut review = input(4);
        review.comment = String::new();
        assert!(review.validate().is_err());

        let mut review = input(4);
        review.product_id = String::new();
        assert!(review.validate().is_err());
    }

    #[test]
    fn test_serializes_camel_case() {
        let review = Review::from_input(input(3));
        let value = serde_json::to_value(&review).unwrap();
        assert!(value.get("productId").is_some());
        assert!(value.get("userName").is_some());
        assert!(value.get("createdAt").unwrap().is_string());
    }
}
