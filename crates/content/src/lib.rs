//! Content layer: products and catalog configuration stored as JSON files.

pub mod error;
pub mod file_store;
pub mod store;

pub use error::ContentError;
pub use file_store::FileContentStore;
pub use store::{ContentStore, InMemoryContentStore};
