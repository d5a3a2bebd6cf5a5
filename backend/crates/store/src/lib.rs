//! Store - Document persistence facade
//!
//! Every feature crate persists its records through [`DocumentStore`]:
//! named collections of self-identifying records, matched by caller-supplied
//! predicates instead of key lookups.
//!
//! Two backends implement the same trait:
//! - [`JsonFileStore`] - one pretty-printed JSON file per collection,
//!   rewritten atomically on every mutation.
//! - [`PgDocumentStore`] - one JSONB row per record in a shared
//!   `documents` table, addressed by `(collection, id)`.
//!
//! [`StoreBackend`] picks one at start-up from [`StoreConfig`].

pub mod backend;
pub mod config;
pub mod document;
pub mod error;
pub mod json_file;
pub mod record;

pub use backend::StoreBackend;
pub use config::StoreConfig;
pub use document::PgDocumentStore;
pub use error::{StoreError, StoreResult, StoreResultExt};
pub use json_file::JsonFileStore;
pub use record::{DocumentStore, LocalDocumentStore, Record, collections};
