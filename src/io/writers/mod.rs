pub mod export;
pub mod jpeg;
pub mod report;
