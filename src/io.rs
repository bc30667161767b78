//! JSON helpers for strokes and reports.
//!
//! - `load_stroke_json` / `save_stroke_json`: strokes as `[{x, y, t}, ...]`
//!   or `{"points": [...]}` (the layout written back).
//! - `write_json_file`: pretty-print any report or config to disk.
use crate::stroke::{Stroke, StrokePoint};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

#[derive(Deserialize)]
#[serde(untagged)]
enum StrokeFile {
    Bare(Vec<StrokePoint>),
    Wrapped { points: Vec<StrokePoint> },
}

#[derive(Serialize)]
struct StrokeFileRef<'a> {
    points: &'a [StrokePoint],
}

/// Parse a stroke from JSON text. The stroke is validated on construction.
pub fn parse_stroke_json(data: &str) -> Result<Stroke, String> {
    let file: StrokeFile =
        serde_json::from_str(data).map_err(|e| format!("Failed to parse stroke: {e}"))?;
    let points = match file {
        StrokeFile::Bare(points) | StrokeFile::Wrapped { points } => points,
    };
    Stroke::new(points).map_err(|e| format!("Invalid stroke: {e}"))
}

/// Load a stroke from a JSON file.
pub fn load_stroke_json(path: &Path) -> Result<Stroke, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read stroke {}: {e}", path.display()))?;
    parse_stroke_json(&data).map_err(|e| format!("{}: {e}", path.display()))
}

/// Write `stroke` as `{"points": [...]}`.
pub fn save_stroke_json(path: &Path, stroke: &Stroke) -> Result<(), String> {
    write_json_file(
        path,
        &StrokeFileRef {
            points: stroke.points(),
        },
    )
}

/// Pretty JSON with a trailing newline; missing parent directories are
/// created.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(|e| format!("Failed to create {}: {e}", dir.display()))?;
    }
    let file =
        File::create(path).map_err(|e| format!("Failed to create {}: {e}", path.display()))?;
    let mut out = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut out, value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    writeln!(out)
        .and_then(|_| out.flush())
        .map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}
