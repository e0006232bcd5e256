use super::Review;

/// Every review across all products, newest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewLog {
    entries: Vec<Review>,
}

impl ReviewLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a log from entries already in newest-first order
    pub fn from_entries(entries: Vec<Review>) -> Self {
        Self { entries }
    }

    /// Insert a review at the head of the log
    pub fn prepend(&mut self, review: Review) {
        self.entries.insert(0, review);
    }

    pub fn entries(&self) -> &[Review] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Reviews for one product, newest first
    pub fn for_product(&self, product_id: &str) -> Vec<Review> {
        self.entries
            .iter()
            .filter(|r| r.product_id == product_id)
            .cloned()
            .collect()
    }

    pub fn count_for_product(&self, product_id: &str) -> usize {
        self.entries
            .iter()
            .filter(|r| r.product_id == product_id)
            .count()
    }

    /// Mean rating for a product rounded to one decimal place, or 0 when
    /// the product has no reviews.
    pub fn average_rating(&self, product_id: &str) -> f64 {
        let (sum, count) = self
            .entries
            .iter()
            .filter(|r| r.product_id == product_id)
            .fold((0u64, 0u64), |(sum, count), r| (sum + u64::from(r.rating), count + 1));

        if count == 0 {
            return 0.0;
        }

        let mean = sum as f64 / count as f64;
        (mean * 10.0).round() / 10.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewReview;

    fn review(product_id: &str, user_name: &str, rating: u8) -> Review {
        Review::from_input(NewReview::new(product_id, "u", user_name, rating, "text"))
    }

    fn log_with(ratings: &[(&str, u8)]) -> ReviewLog {
        let mut log = ReviewLog::new();
        for (product_id, rating) in ratings {
            log.prepend(review(product_id, "someone", *rating));
        }
        log
    }

    #[test]
    fn test_prepend_is_newest_first() {
        let mut log = ReviewLog::new();
        log.prepend(review("shoe-1", "Ann", 5));
        log.prepend(review("shoe-1", "Bo", 3));

        assert_eq!(log.entries()[0].user_name, "Bo");
        assert_eq!(log.entries()[1].user_name, "Ann");
    }

    #[test]
    fn test_for_product_filters_and_keeps_order() {
        let mut log = ReviewLog::new();
        log.prepend(review("p", "first", 5));
        log.prepend(review("q", "other", 1));
        log.prepend(review("p", "second", 4));
        log.prepend(review("q", "another", 2));

        let names: Vec<_> = log
            .for_product("p")
            .into_iter()
            .map(|r| r.user_name)
            .collect();
        assert_eq!(names, vec!["second", "first"]);
        assert_eq!(log.count_for_product("q"), 2);
        assert_eq!(log.len(), 4);
    }

    #[test]
    fn test_average_rating() {
        assert_eq!(log_with(&[("p", 3), ("p", 4), ("p", 5)]).average_rating("p"), 4.0);
        assert_eq!(log_with(&[("p", 1), ("p", 2)]).average_rating("p"), 1.5);
        assert_eq!(log_with(&[("p", 5)]).average_rating("q"), 0.0);
    }

    #[test]
    fn test_average_rating_rounds_to_tenths() {
        // 13 / 3 = 4.333...
        assert_eq!(log_with(&[("p", 4), ("p", 4), ("p", 5)]).average_rating("p"), 4.3);
        // 14 / 3 = 4.666...
        assert_eq!(log_with(&[("p", 4), ("p", 5), ("p", 5)]).average_rating("p"), 4.7);
        // 17 / 4 = 4.25 rounds half up
        assert_eq!(
            log_with(&[("p", 4), ("p", 4), ("p", 4), ("p", 5)]).average_rating("p"),
            4.3
        );
    }
}
