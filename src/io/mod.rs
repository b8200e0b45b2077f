//! I/O layer: decoding source images into pixel grids, and `writers` for the
//! canonical JPEG encoding, batch export and the per-item report.
pub mod decode;
pub use decode::decode_rgba;

pub mod writers;
