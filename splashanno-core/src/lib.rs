//! Core types for the splashanno content server.
//!
//! This crate owns everything between the backing JSON file and the HTTP layer:
//! - `store` reads, caches and overwrites the document
//! - `enrich` derives image URLs and sequence numbers
//! - `categorize` splits timed events into upcoming/ongoing/past
//! - `filter` narrows a document by query parameters
//! - `pipeline` composes the above for a single request

pub mod categorize;
pub mod config;
pub mod constants;
pub mod document;
pub mod enrich;
pub mod error;
pub mod filter;
pub mod pipeline;
pub mod store;

pub use config::ServerConfig;
pub use document::Category;
pub use error::{StoreError, StoreResult};
pub use filter::{DataQuery, FilterMode};
pub use store::DocumentStore;
