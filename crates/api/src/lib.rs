//! HTTP storefront API: configuration, routing, and request/response mapping.

pub mod app;
pub mod config;
