//! # Roster
//!
//! A minimal student record service: CRUD over a collection of arbitrary
//! JSON records, persisted as a single JSON document on disk.
//!
//! ## Core Concepts
//!
//! - **Records**: arbitrary JSON objects, one per student
//! - **Collection**: the full ID-to-record mapping, the unit of persistence
//! - **Storage backends**: a file-backed document or an in-memory substitute
//! - **Server**: a thin HTTP layer mapping requests onto store operations
//!
//! ## Example
//!
//! ```ignore
//! use roster::{FileStorage, Store};
//! use serde_json::json;
//!
//! let store = Store::new(FileStorage::new("students.json"));
//!
//! let id = store.create(json!({"name": "Alice", "course": "CS"}))?;
//! let record = store.get(&id)?;
//! ```

pub mod error;
pub mod id;
pub mod server;
pub mod store;
pub mod types;

// Re-exports
pub use error::{Result, StoreError};
pub use id::next_id;
pub use server::{app, Server, ServerConfig};
pub use store::{FileStorage, MemoryStorage, StorageBackend, Store, DEFAULT_DATA_FILE};
pub use types::{course_matches, Collection, Record, StudentId};
