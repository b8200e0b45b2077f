#![doc = r#"
canvaskit — batch standardization of product photographs.

This crate finds the photographed object against a near-white background,
scales it to fit a padded "safe zone", centers it on a fixed-size white canvas,
and runs that transform over a whole batch with bounded concurrency. It powers
the `canvaskit` CLI and can be embedded in your own Rust applications.

Add dependency
--------------
```toml
[dependencies]
canvaskit = "0.1"
```

Standardize one image in memory
-------------------------------
```rust,no_run
use canvaskit::{standardize, CanvasSpec, PaddingSpec};

fn main() -> canvaskit::Result<()> {
    let raw = std::fs::read("/photos/kettle.png")?;
    let canvas = CanvasSpec::new(2000, 2000, PaddingSpec::uniform(150));
    let out = standardize(&raw, &canvas)?;
    assert_eq!((out.width, out.height), (2000, 2000));
    std::fs::write("/out/kettle.jpg", &out.encoded)?;
    Ok(())
}
```

Run a batch
-----------
```rust,no_run
use canvaskit::{BatchEvent, BatchOrchestrator, BatchQueue, CanvasSpec};

fn main() -> canvaskit::Result<()> {
    let mut queue = BatchQueue::new();
    queue.push("kettle.png", std::fs::read("/photos/kettle.png")?);
    queue.push("teapot.jpg", std::fs::read("/photos/teapot.jpg")?);

    let orchestrator = BatchOrchestrator::new(CanvasSpec::default(), 4)?;
    let summary = orchestrator.run_with_observer(&mut queue, |event| {
        if let BatchEvent::Progress { percent } = event {
            println!("{percent}%");
        }
    });
    println!("completed={} failed={}", summary.completed, summary.failed);
    Ok(())
}
```

Directory helpers
-----------------
```rust,no_run
use std::path::Path;
use canvaskit::{process_directory_to_path, BatchParams, ExportFormat};

fn main() -> canvaskit::Result<()> {
    let params = BatchParams {
        export_format: ExportFormat::Png,
        ..BatchParams::default()
    };
    let report = process_directory_to_path(Path::new("/photos"), Path::new("/out"), &params)?;
    println!("processed={} failed={}", report.processed, report.failed);
    Ok(())
}
```

Error handling
--------------
Per-image failures are `StandardizeError`s. Inside a batch they are recorded on
the failing item and never abort the run; everything else returns
`canvaskit::Result<T>` with a `canvaskit::Error`.

Useful modules
--------------
- [`api`] — high-level, ergonomic entry points.
- [`core`] — detector, compositor, standardizer and batch orchestrator.
- [`io`] — decoding, canonical encoding, export and report writers.
- [`types`] — shared enums (`Lifecycle`, `ExportFormat`, `ResampleFilter`).
- [`error`] — crate-level `Error`, `StandardizeError` and `Result`.
"#]

// Core modules (public)
pub mod api;
pub mod core;
pub mod error;
pub mod io;
pub mod types;

// Curated public API surface
// Types
pub use core::batch::{
    BatchEvent, BatchOrchestrator, BatchProgress, BatchQueue, CancelToken, DEFAULT_CONCURRENCY,
    FailureReason, ItemId, ItemOutcome, QueueItem, RunSummary,
};
pub use core::geometry::{PixelGrid, Rectangle};
pub use core::params::{BatchParams, CanvasSpec, PaddingSpec};
pub use error::{Error, Result, StandardizeError};
pub use types::{ExportFormat, Lifecycle, ResampleFilter};

// Algorithms
pub use core::batch::run;
pub use core::processing::bbox::{ALPHA_BACKGROUND_MAX, WHITE_THRESHOLD, detect};
pub use core::processing::composite::composite;
pub use core::processing::padding::{Placement, compute_placement};
pub use core::processing::pipeline::{StandardizedImage, standardize, standardize_with_filter};

// Collaborator helpers
pub use io::writers::export::{ExportReport, export_completed};
pub use io::writers::report::{ReportRow, report_rows, write_json_report};

// High-level API re-exports
pub use api::{
    BatchReport, iterate_image_files, load_queue_from_dir, process_directory_to_path,
    run_and_export, standardize_file,
};
