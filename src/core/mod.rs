// SkuFinder - core/mod.rs
//
// Core business logic layer: load, normalise, join, filter, export.
// Must NOT depend on: ui, platform, or app. File access reaches the loader
// only through the `loader::DatasetSource` trait.

pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
pub mod reconcile;
pub mod schema;
