use std::collections::HashSet;

/// Product ids the shopper has marked as favorite.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FavoriteSet {
    members: HashSet<String>,
}

impl FavoriteSet {
    /// Create an empty favorite set
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, product_id: &str) -> bool {
        self.members.contains(product_id)
    }

    /// Add a product id, returning false if it was already present
    pub fn insert(&mut self, product_id: impl Into<String>) -> bool {
        self.members.insert(product_id.into())
    }

    /// Remove a product id, returning false if it was not present
    pub fn remove(&mut self, product_id: &str) -> bool {
        self.members.remove(product_id)
    }

    /// Flip membership of a product id. Returns the new membership.
    pub fn toggle(&mut self, product_id: &str) -> bool {
        if self.remove(product_id) {
            false
        } else {
            self.insert(product_id);
            true
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(String::as_str)
    }

    /// Members in ascending order, for stable output
    pub fn sorted(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.iter().collect();
        ids.sort_unstable();
        ids
    }
}

impl<S: Into<String>> FromIterator<S> for FavoriteSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            members: iter.into_iter().map(Into::into).collect(),
        }
    }
}
