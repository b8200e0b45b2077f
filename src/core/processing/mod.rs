//! The per-image standardization chain: bounding-box detection, safe-zone
//! placement, resampling, compositing, and the `pipeline` that ties them
//! together.
pub mod bbox;
pub mod composite;
pub mod padding;
pub mod pipeline;
pub mod resize;
