//! Command line front end for the standardizer.
//!
//! `args` declares the flags, `errors` holds argument-level failures, and
//! `runner` merges an optional JSON config with the flags before handing
//! the resolved canvas to `canvaskit::api`. Oversized or over-padded
//! canvases are rejected here, before any image is read.
pub mod args;
pub mod errors;
pub mod runner;

pub use args::CliArgs;
pub use runner::run;
