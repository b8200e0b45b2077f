use std::fs;

use tracing::info;
use tracing_subscriber::EnvFilter;

use canvaskit::io::writers::report::{default_report_name, write_json_report};
use canvaskit::{BatchParams, process_directory_to_path, standardize_file};

use super::args::CliArgs;
use super::errors::AppError;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Config file (if any) overlaid with explicit flags.
fn resolve_params(args: &CliArgs) -> Result<BatchParams, AppError> {
    let mut params = match &args.config {
        Some(path) => BatchParams::from_json_file(path)?,
        None => BatchParams::default(),
    };

    if let Some(width) = args.width {
        params.canvas.width = width;
    }
    if let Some(height) = args.height {
        params.canvas.height = height;
    }
    if let Some(px) = args.padding {
        if args.pad_top.is_some()
            || args.pad_bottom.is_some()
            || args.pad_left.is_some()
            || args.pad_right.is_some()
        {
            return Err(AppError::Conflict(
                "--padding cannot be combined with per-side padding flags".to_string(),
            ));
        }
        params.canvas.padding = canvaskit::PaddingSpec::uniform(px);
    }
    let padding = &mut params.canvas.padding;
    if let Some(v) = args.pad_top {
        padding.top = v;
    }
    if let Some(v) = args.pad_bottom {
        padding.bottom = v;
    }
    if let Some(v) = args.pad_left {
        padding.left = v;
    }
    if let Some(v) = args.pad_right {
        padding.right = v;
    }
    if let Some(concurrency) = args.concurrency {
        if concurrency == 0 {
            return Err(AppError::ZeroConcurrency { value: concurrency });
        }
        params.concurrency = concurrency;
    }
    if let Some(format) = args.format {
        params.export_format = format;
    }
    if let Some(filter) = args.filter {
        params.filter = filter;
    }

    params.canvas.validate()?;
    Ok(params)
}

pub fn run(args: CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.log {
        init_logging();
    }

    let params = resolve_params(&args)?;
    info!(
        "Canvas {}x{}, padding t={} b={} l={} r={}, window size {}, filter {}",
        params.canvas.width,
        params.canvas.height,
        params.canvas.padding.top,
        params.canvas.padding.bottom,
        params.canvas.padding.left,
        params.canvas.padding.right,
        params.concurrency,
        params.filter
    );

    if let Some(input_dir) = args.input_dir.as_ref() {
        let output_dir = args.output_dir.as_ref().ok_or(AppError::MissingArgument {
            arg: "--output-dir".to_string(),
        })?;
        fs::create_dir_all(output_dir)?;

        info!("Starting batch processing from directory: {:?}", input_dir);
        info!("Output directory: {:?}", output_dir);

        let report = process_directory_to_path(input_dir, output_dir, &params)?;

        if !args.no_report {
            let report_path = args
                .report
                .clone()
                .unwrap_or_else(|| output_dir.join(default_report_name()));
            write_json_report(&report.rows, &report_path)?;
            info!("Report written to {:?}", report_path);
        }

        println!(
            "Processed: {}  Failed: {}  Skipped: {}  Exported: {}",
            report.processed,
            report.failed,
            report.skipped,
            report.exported.len()
        );
        for row in report.rows.iter().filter(|r| r.failure.is_some()) {
            if let Some(reason) = &row.failure {
                println!("  failed: {} ({})", row.original_name, reason);
            }
        }
    } else {
        let input = args.input.as_ref().ok_or(AppError::MissingArgument {
            arg: "--input".to_string(),
        })?;
        let output = args.output.as_ref().ok_or(AppError::MissingArgument {
            arg: "--output".to_string(),
        })?;

        let image = standardize_file(input, output, &params.canvas, params.filter)?;
        println!(
            "Standardized {:?} -> {:?} ({}x{})",
            input, output, image.width, image.height
        );
    }

    Ok(())
}
