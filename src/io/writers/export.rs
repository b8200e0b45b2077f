use std::collections::HashSet;
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::ImageFormat;
use tracing::{debug, info};

use crate::core::batch::BatchQueue;
use crate::error::Result;
use crate::types::{ExportFormat, Lifecycle};

/// Result of exporting a batch to a directory.
#[derive(Debug, Clone, Default)]
pub struct ExportReport {
    pub written: Vec<PathBuf>,
    /// Items left out because they were not completed
    pub excluded: usize,
}

fn file_stem(display_name: &str) -> String {
    Path::new(display_name)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| display_name.to_string())
}

/// Display name with its extension swapped for the export format's.
pub fn export_file_name(display_name: &str, format: ExportFormat) -> String {
    format!("{}.{}", file_stem(display_name), format.extension())
}

/// Claims a file name not yet in `used`: the plain name first, then
/// `{stem}-{id}`, then `{stem}-{id}-{n}` for n = 2, 3, ...
fn unique_file_name(
    used: &mut HashSet<String>,
    display_name: &str,
    id: u64,
    format: ExportFormat,
) -> String {
    let plain = export_file_name(display_name, format);
    if used.insert(plain.clone()) {
        return plain;
    }
    let stem = file_stem(display_name);
    let ext = format.extension();
    let with_id = format!("{stem}-{id}.{ext}");
    if used.insert(with_id.clone()) {
        return with_id;
    }
    let mut n = 2u64;
    loop {
        let candidate = format!("{stem}-{id}-{n}.{ext}");
        if used.insert(candidate.clone()) {
            return candidate;
        }
        n += 1;
    }
}

/// Re-encodes canonical output bytes into `format`.
pub fn convert_encoded(canonical: &[u8], format: ExportFormat) -> Result<Vec<u8>> {
    let target = match format {
        ExportFormat::Jpeg => return Ok(canonical.to_vec()),
        ExportFormat::Png => ImageFormat::Png,
        ExportFormat::Webp => ImageFormat::WebP,
    };
    // Canonical output is opaque, so RGB keeps the white backdrop as-is.
    let rgb = image::load_from_memory_with_format(canonical, ImageFormat::Jpeg)?.to_rgb8();
    let mut out = Cursor::new(Vec::new());
    image::DynamicImage::ImageRgb8(rgb).write_to(&mut out, target)?;
    Ok(out.into_inner())
}

/// Writes every completed item of `queue` into `output_dir` as `format`.
///
/// Pending and failed items are skipped. Clashing file names get the item id appended.
pub fn export_completed(
    queue: &BatchQueue,
    output_dir: &Path,
    format: ExportFormat,
) -> Result<ExportReport> {
    fs::create_dir_all(output_dir)?;

    let mut report = ExportReport::default();
    let mut used = HashSet::new();
    for item in queue {
        let completed = item.lifecycle() == Lifecycle::Completed;
        let Some(result) = item.result().filter(|_| completed) else {
            debug!("Excluding {} ({}) from export", item.name(), item.lifecycle());
            report.excluded += 1;
            continue;
        };

        let file_name = unique_file_name(&mut used, item.name(), item.id().0, format);

        let path = output_dir.join(&file_name);
        fs::write(&path, convert_encoded(&result.encoded, format)?)?;
        debug!("Exported {} -> {:?}", item.name(), path);
        report.written.push(path);
    }

    info!(
        "Exported {} images as {} to {:?} ({} excluded)",
        report.written.len(),
        format,
        output_dir,
        report.excluded
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::batch::run;
    use crate::core::params::{CanvasSpec, PaddingSpec};

    fn png_bytes() -> Vec<u8> {
        let mut img = image::RgbaImage::from_pixel(12, 12, image::Rgba([255, 255, 255, 255]));
        img.put_pixel(4, 5, image::Rgba([0, 0, 0, 255]));
        let mut buf = Cursor::new(Vec::new());
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut buf, ImageFormat::Png)
            .unwrap();
        buf.into_inner()
    }

    #[test]
    fn extension_is_replaced() {
        assert_eq!(export_file_name("shoe.png", ExportFormat::Jpeg), "shoe.jpg");
        assert_eq!(export_file_name("a.b.jpeg", ExportFormat::Webp), "a.b.webp");
        assert_eq!(export_file_name("noext", ExportFormat::Png), "noext.png");
    }

    #[test]
    fn converts_to_each_format() {
        let mut queue = BatchQueue::new();
        queue.push("x.png", png_bytes());
        run(&mut queue, &CanvasSpec::new(32, 24, PaddingSpec::uniform(2)), 1).unwrap();
        let canonical = &queue.iter().next().unwrap().result().unwrap().encoded;

        let png = convert_encoded(canonical, ExportFormat::Png).unwrap();
        assert_eq!(image::guess_format(&png).unwrap(), ImageFormat::Png);
        let webp = convert_encoded(canonical, ExportFormat::Webp).unwrap();
        assert_eq!(image::guess_format(&webp).unwrap(), ImageFormat::WebP);
        let decoded = image::load_from_memory(&webp).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (32, 24));
        assert_eq!(
            convert_encoded(canonical, ExportFormat::Jpeg).unwrap(),
            canonical.clone()
        );
    }

    #[test]
    fn only_completed_items_are_exported() {
        let mut queue = BatchQueue::new();
        queue.push("good.png", png_bytes());
        queue.push("good.jpg", png_bytes());
        queue.push("bad.png", b"nope".to_vec());
        run(&mut queue, &CanvasSpec::new(20, 20, PaddingSpec::uniform(1)), 4).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let report = export_completed(&queue, dir.path(), ExportFormat::Png).unwrap();
        assert_eq!(report.excluded, 1);
        let mut names: Vec<String> = report
            .written
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(names, vec!["good-1.png".to_string(), "good.png".to_string()]);
        assert!(report.written.iter().all(|p| p.exists()));
    }

    #[test]
    fn id_suffix_never_reuses_a_claimed_name() {
        let mut queue = BatchQueue::new();
        queue.push("x.png", png_bytes());
        queue.push("x-2.png", png_bytes());
        queue.push("x.jpg", png_bytes());
        run(&mut queue, &CanvasSpec::new(20, 20, PaddingSpec::uniform(1)), 4).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let report = export_completed(&queue, dir.path(), ExportFormat::Png).unwrap();
        let names: Vec<String> = report
            .written
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["x.png", "x-2.png", "x-2-2.png"]);
        let on_disk = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(on_disk, 3);
    }

    #[test]
    fn unique_names_keep_counting() {
        let mut used = HashSet::new();
        used.insert("a-7.jpg".to_string());
        used.insert("a-7-2.jpg".to_string());
        assert_eq!(unique_file_name(&mut used, "a.png", 7, ExportFormat::Jpeg), "a.jpg");
        assert_eq!(unique_file_name(&mut used, "a.webp", 7, ExportFormat::Jpeg), "a-7-3.jpg");
    }
}
