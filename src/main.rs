//! `canvaskit` binary.
//!
//! Parses flags, then either standardizes one photo (`--input`/`--output`)
//! or a whole directory (`--input-dir`/`--output-dir`), writing a JSON report
//! next to the exported images. Per-image failures are listed in the summary
//! and never change the exit status; bad arguments and I/O errors do.

use clap::Parser;

mod cli;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = cli::CliArgs::parse();
    cli::run(args)
}
