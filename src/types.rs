//! Shared types and enums used across canvaskit.
//! Includes the per-item `Lifecycle`, the user-selectable `ExportFormat`,
//! and the `ResampleFilter` used when scaling the detected object.
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Processing state of a queued image.
///
/// Transitions only move forward within a run: `Pending -> Processing ->
/// Completed | Failed`. A later run re-enters `Failed` and `Pending` items
/// and leaves `Completed` ones untouched.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lifecycle {
    #[default]
    Pending,
    Processing,
    Completed,
    Failed,
}

impl Lifecycle {
    pub fn is_terminal(self) -> bool {
        matches!(self, Lifecycle::Completed | Lifecycle::Failed)
    }
}

impl std::fmt::Display for Lifecycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Lifecycle::Pending => "pending",
            Lifecycle::Processing => "processing",
            Lifecycle::Completed => "completed",
            Lifecycle::Failed => "failed",
        };
        write!(f, "{}", s)
    }
}

/// Format a completed batch is exported in.
#[derive(
    Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Jpeg,
    Png,
    Webp,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Jpeg => "jpg",
            ExportFormat::Png => "png",
            ExportFormat::Webp => "webp",
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Jpeg => write!(f, "JPEG"),
            ExportFormat::Png => write!(f, "PNG"),
            ExportFormat::Webp => write!(f, "WEBP"),
        }
    }
}

/// Resampling filter used when scaling the object into the safe zone.
/// Only output quality depends on it; geometry does not.
#[derive(
    Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum ResampleFilter {
    Nearest,
    #[default]
    Bilinear,
    CatmullRom,
    Lanczos3,
}

impl std::fmt::Display for ResampleFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResampleFilter::Nearest => write!(f, "Nearest"),
            ResampleFilter::Bilinear => write!(f, "Bilinear"),
            ResampleFilter::CatmullRom => write!(f, "CatmullRom"),
            ResampleFilter::Lanczos3 => write!(f, "Lanczos3"),
        }
    }
}
