use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::batch::DEFAULT_CONCURRENCY;
use crate::error::{Axis, Error, Result, StandardizeError};
use crate::types::{ExportFormat, ResampleFilter};

/// Largest canvas edge the canonical JPEG form can carry.
pub const MAX_CANVAS_DIMENSION: u32 = u16::MAX as u32;

/// Inset from the canvas edges that scaled content may not cross, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaddingSpec {
    pub top: u32,
    pub bottom: u32,
    pub left: u32,
    pub right: u32,
}

impl PaddingSpec {
    pub const fn uniform(px: u32) -> Self {
        Self {
            top: px,
            bottom: px,
            left: px,
            right: px,
        }
    }

    pub fn horizontal(&self) -> u64 {
        self.left as u64 + self.right as u64
    }

    pub fn vertical(&self) -> u64 {
        self.top as u64 + self.bottom as u64
    }
}

impl Default for PaddingSpec {
    fn default() -> Self {
        Self::uniform(150)
    }
}

/// Target canvas size plus the padding that defines its safe zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasSpec {
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub padding: PaddingSpec,
}

impl CanvasSpec {
    pub fn new(width: u32, height: u32, padding: PaddingSpec) -> Self {
        Self {
            width,
            height,
            padding,
        }
    }

    /// Checks that the canvas is encodable and that padding leaves a
    /// non-empty safe zone on both axes.
    pub fn validate(&self) -> std::result::Result<(), StandardizeError> {
        if self.width > MAX_CANVAS_DIMENSION || self.height > MAX_CANVAS_DIMENSION {
            return Err(StandardizeError::CanvasTooLarge {
                width: self.width,
                height: self.height,
                max: MAX_CANVAS_DIMENSION,
            });
        }
        if self.padding.horizontal() >= self.width as u64 {
            return Err(StandardizeError::InfeasiblePadding {
                axis: Axis::Horizontal,
                canvas: self.width,
                padding: self.padding.horizontal().min(u32::MAX as u64) as u32,
            });
        }
        if self.padding.vertical() >= self.height as u64 {
            return Err(StandardizeError::InfeasiblePadding {
                axis: Axis::Vertical,
                canvas: self.height,
                padding: self.padding.vertical().min(u32::MAX as u64) as u32,
            });
        }
        Ok(())
    }

    /// Safe zone dimensions, available once `validate` passes.
    pub fn safe_zone_size(&self) -> std::result::Result<(u32, u32), StandardizeError> {
        self.validate()?;
        Ok((
            self.width - self.padding.left - self.padding.right,
            self.height - self.padding.top - self.padding.bottom,
        ))
    }
}

impl Default for CanvasSpec {
    fn default() -> Self {
        Self {
            width: 2000,
            height: 2000,
            padding: PaddingSpec::default(),
        }
    }
}

/// Run configuration suitable for config files and CLI presets.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchParams {
    pub canvas: CanvasSpec,
    /// Number of images standardized concurrently per window
    pub concurrency: usize,
    pub filter: ResampleFilter,
    pub export_format: ExportFormat,
}

impl BatchParams {
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let params: BatchParams = serde_json::from_str(&text)?;
        params.check()?;
        Ok(params)
    }

    pub fn check(&self) -> Result<()> {
        if self.concurrency == 0 {
            return Err(Error::ZeroSize {
                size: self.concurrency,
            });
        }
        Ok(())
    }
}

impl Default for BatchParams {
    fn default() -> Self {
        Self {
            canvas: CanvasSpec::default(),
            concurrency: DEFAULT_CONCURRENCY,
            filter: ResampleFilter::default(),
            export_format: ExportFormat::default(),
        }
    }
}
