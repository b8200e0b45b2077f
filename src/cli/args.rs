use clap::Parser;
use std::path::PathBuf;

use canvaskit::{ExportFormat, ResampleFilter};

#[derive(Parser)]
#[command(name = "canvaskit", version, about = "canvaskit CLI")]
pub struct CliArgs {
    /// Input image (single file mode)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Input directory containing images (batch mode)
    #[arg(long)]
    pub input_dir: Option<PathBuf>,

    /// Output filename (single file mode, canonical JPEG)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output directory for exported images (batch mode)
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// JSON file with batch parameters; flags below override it
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Canvas width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Canvas height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Same padding on every side, in pixels
    #[arg(long)]
    pub padding: Option<u32>,

    /// Top padding in pixels
    #[arg(long)]
    pub pad_top: Option<u32>,

    /// Bottom padding in pixels
    #[arg(long)]
    pub pad_bottom: Option<u32>,

    /// Left padding in pixels
    #[arg(long)]
    pub pad_left: Option<u32>,

    /// Right padding in pixels
    #[arg(long)]
    pub pad_right: Option<u32>,

    /// Images standardized concurrently per window
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Export format (jpeg, png or webp)
    #[arg(short = 'f', long, value_enum)]
    pub format: Option<ExportFormat>,

    /// Resampling filter (nearest, bilinear, catmull-rom, lanczos3)
    #[arg(long, value_enum)]
    pub filter: Option<ResampleFilter>,

    /// Write a JSON report of every item (batch mode); defaults to a timestamped name in the output directory
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Skip writing the JSON report
    #[arg(long, default_value_t = false)]
    pub no_report: bool,

    /// Enable logging
    #[arg(long, default_value_t = false)]
    pub log: bool,
}
