// Application layer - Use cases and the port to the external store
pub mod aggregator;
pub mod annotate_service;
pub mod annotation_store;
pub mod charts;
pub mod error;
pub mod normalizer;
pub mod overlay_service;
pub mod page_loader;
pub mod session;
pub mod summary_service;
pub mod visualize_service;
pub mod wearables_repository;

#[cfg(test)]
pub mod testing;
