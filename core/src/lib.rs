//! Persisted client state for the storefront: favorites and product reviews.
//!
//! Both stores sit on [`store::StoreHandle`], which keeps an in-memory
//! snapshot, writes every change through a [`codec::Codec`] into a
//! [`storage::DurableStorage`] adapter, and notifies subscribers.

pub mod catalog;
pub mod codec;
pub mod error;
pub mod models;
pub mod storage;
pub mod store;
mod storefront;

pub use error::{DecodeError, Error, Result};
pub use storefront::Storefront;
