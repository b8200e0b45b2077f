//! Core building blocks: pixel geometry, canvas parameters, the per-image
//! processing chain, and batch orchestration. These are the primitives
//! consumed by the high-level `api` module.
pub mod batch;
pub mod geometry;
pub mod params;
pub mod processing;
