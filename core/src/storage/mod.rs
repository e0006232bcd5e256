mod database;
mod durable;
mod sqlite_storage;

pub use database::{Connection, Database};
pub use durable::{DurableStorage, MemoryStorage};
pub use sqlite_storage::SqliteStorage;
