//! # Storage Module
//!
//! Key-value persistence for the dashboard. Every collection is stored as a
//! single JSON document under a fixed key and rewritten in full on every
//! mutation.
//!
//! ## Layers
//!
//! - **traits**: the `KeyValueStore` abstraction over raw string storage
//! - **file_store** / **memory_store**: concrete backends
//! - **persistence**: the JSON shim that logs and swallows storage failures
//! - **collection**: an in-memory, write-through list of records for one key
//!
//! ## File Structure (file store)
//!
//! ```text
//! data/
//! ├── config.yaml
//! ├── church_members.json
//! ├── church_transactions.json
//! ├── ...
//! ├── auth_users.json
//! └── auth_current_user.json
//! ```

pub mod collection;
pub mod file_store;
pub mod keys;
pub mod memory_store;
pub mod persistence;
pub mod traits;

pub use collection::{Collection, Entity};
pub use file_store::FileStore;
pub use memory_store::MemoryStore;
pub use persistence::Persistence;
pub use traits::KeyValueStore;
