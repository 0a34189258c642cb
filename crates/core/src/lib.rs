//! `camstore-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives shared by the catalog and
//! content crates (no IO, no HTTP).

pub mod entity;
pub mod error;
pub mod id;
pub mod locale;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::ProductId;
pub use locale::{Locale, LocalizedText};
pub use value_object::ValueObject;
