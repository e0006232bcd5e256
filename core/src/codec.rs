//! Encoding of store state into the string envelope kept in durable storage.
//!
//! Every store persists `{"state": <shape>}`, optionally with a `version`
//! field. Favorites are a set in memory but a sorted list on the wire.

use serde::{Deserialize, Serialize};

use crate::models::{FavoriteSet, Review, ReviewLog};
use crate::{DecodeError, Result};

/// Converts a store's state to and from its persisted string form.
///
/// Implementations must round-trip: `decode(&encode(s)?)? == s`.
pub trait Codec<S> {
    fn encode(&self, state: &S) -> Result<String>;

    fn decode(&self, raw: &str) -> std::result::Result<S, DecodeError>;
}

/// Outer wrapper persisted under a store's key
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Envelope<T> {
    pub state: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,
}

impl<T> Envelope<T> {
    /// Accept envelopes without a version or with exactly `expected`
    fn checked(self, expected: u32) -> std::result::Result<T, DecodeError> {
        match self.version {
            Some(found) if found != expected => Err(DecodeError::Version { expected, found }),
            _ => Ok(self.state),
        }
    }
}

#[derive(Serialize)]
struct FavoritesOut<'a> {
    favorites: Vec<&'a str>,
}

#[derive(Deserialize)]
struct FavoritesIn {
    #[serde(default)]
    favorites: Option<Vec<String>>,
}

/// `{"state":{"favorites":[...]}}` with members in ascending order
#[derive(Debug, Clone, Copy, Default)]
pub struct FavoritesCodec;

impl FavoritesCodec {
    pub const VERSION: u32 = 0;
}

impl Codec<FavoriteSet> for FavoritesCodec {
    fn encode(&self, state: &FavoriteSet) -> Result<String> {
        let envelope = Envelope {
            state: FavoritesOut {
                favorites: state.sorted(),
            },
            version: None,
        };
        Ok(serde_json::to_string(&envelope)?)
    }

    fn decode(&self, raw: &str) -> std::result::Result<FavoriteSet, DecodeError> {
        let envelope: Envelope<FavoritesIn> = serde_json::from_str(raw)?;
        let state = envelope.checked(Self::VERSION)?;
        Ok(state.favorites.unwrap_or_default().into_iter().collect())
    }
}

#[derive(Serialize)]
struct ReviewsOut<'a> {
    reviews: &'a [Review],
}

#[derive(Deserialize)]
struct ReviewsIn {
    #[serde(default)]
    reviews: Vec<Review>,
}

/// `{"state":{"reviews":[...]},"version":0}` with reviews newest first
#[derive(Debug, Clone, Copy, Default)]
pub struct ReviewsCodec;

impl ReviewsCodec {
    pub const VERSION: u32 = 0;
}

impl Codec<ReviewLog> for ReviewsCodec {
    fn encode(&self, state: &ReviewLog) -> Result<String> {
        let envelope = Envelope {
            state: ReviewsOut {
                reviews: state.entries(),
            },
            version: Some(Self::VERSION),
        };
        Ok(serde_json::to_string(&envelope)?)
    }

    fn decode(&self, raw: &str) -> std::result::Result<ReviewLog, DecodeError> {
        let envelope: Envelope<ReviewsIn> = serde_json::from_str(raw)?;
        let state = envelope.checked(Self::VERSION)?;
        Ok(ReviewLog::from_entries(state.reviews))
    }
}
