//! High-level, ergonomic library API: standardize a single file, build a queue
//! from a directory, and run a whole directory through the batch pipeline into
//! an export directory. Prefer these entrypoints over the low-level `core`
//! modules when integrating canvaskit.
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::core::batch::{BatchOrchestrator, BatchQueue, RunSummary};
use crate::core::params::{BatchParams, CanvasSpec};
use crate::core::processing::pipeline::{StandardizedImage, standardize_with_filter};
use crate::error::{Error, Result};
use crate::io::writers::export::{ExportReport, export_completed};
use crate::io::writers::report::{ReportRow, report_rows};
use crate::types::ResampleFilter;

/// Batch processing report
#[derive(Debug, Clone)]
pub struct BatchReport {
    pub processed: usize,
    pub failed: usize,
    /// Directory entries that were not regular files
    pub skipped: usize,
    pub exported: Vec<PathBuf>,
    pub rows: Vec<ReportRow>,
}

/// Standardize one image file and write the canonical JPEG to `output`.
pub fn standardize_file(
    input: &Path,
    output: &Path,
    canvas: &CanvasSpec,
    filter: ResampleFilter,
) -> Result<StandardizedImage> {
    let raw = fs::read(input)?;
    let image = standardize_with_filter(&raw, canvas, filter)?;
    fs::write(output, &image.encoded)?;
    info!("Standardized {:?} -> {:?}", input, output);
    Ok(image)
}

/// Return the regular files directly inside `input_dir`, sorted by file name.
pub fn iterate_image_files(input_dir: &Path) -> Result<(Vec<PathBuf>, usize)> {
    let mut files = Vec::new();
    let mut skipped = 0;
    for entry in fs::read_dir(input_dir)? {
        let path = entry?.path();
        if path.is_file() {
            files.push(path);
        } else {
            info!("Skipping non-file: {:?}", path);
            skipped += 1;
        }
    }
    files.sort();
    Ok((files, skipped))
}

/// Queue every file of `input_dir` as `Pending`, named after its file name.
pub fn load_queue_from_dir(input_dir: &Path) -> Result<(BatchQueue, usize)> {
    let (files, skipped) = iterate_image_files(input_dir)?;
    let mut queue = BatchQueue::new();
    for path in files {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| Error::InvalidArgument {
                arg: "input",
                value: path.display().to_string(),
            })?;
        queue.push(name, fs::read(&path)?);
    }
    Ok((queue, skipped))
}

/// Standardize the queue with `params` and export completed items to `output_dir`.
pub fn run_and_export(
    queue: &mut BatchQueue,
    output_dir: &Path,
    params: &BatchParams,
) -> Result<(RunSummary, ExportReport)> {
    params.check()?;
    let orchestrator = BatchOrchestrator::from_params(params)?;
    let summary = orchestrator.run(queue);
    if summary.failed > 0 {
        warn!("{} images failed to standardize", summary.failed);
    }
    let export = if queue.has_completed() {
        export_completed(queue, output_dir, params.export_format)?
    } else {
        warn!("No completed images to export");
        ExportReport {
            written: Vec::new(),
            excluded: queue.len(),
        }
    };
    Ok((summary, export))
}

/// Process every file of `input_dir` into `output_dir` using `params`.
///
/// Per-image failures are reported in the result, never returned as errors.
pub fn process_directory_to_path(
    input_dir: &Path,
    output_dir: &Path,
    params: &BatchParams,
) -> Result<BatchReport> {
    let (mut queue, skipped) = load_queue_from_dir(input_dir)?;
    info!("Queued {} images from {:?}", queue.len(), input_dir);

    let (summary, export) = run_and_export(&mut queue, output_dir, params)?;
    Ok(BatchReport {
        processed: summary.completed,
        failed: summary.failed,
        skipped,
        exported: export.written,
        rows: report_rows(&queue, params.export_format),
    })
}
