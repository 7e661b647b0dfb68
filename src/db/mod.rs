//! Persistence module
//!
//! Routes live in a single JSON document; customers and technicians come from
//! a directory document maintained elsewhere.

pub mod directory;
pub mod storage;

pub use directory::{Directory, DirectoryError, InMemoryDirectory};
pub use storage::{
    JsonFileStorage, MemoryStorage, RouteStorage, StorageError, StoredRoute, StoredStop,
};
