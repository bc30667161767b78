use crate::segmenter::SegmenterParams;
use crate::types::Algorithm;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration of the `segment_stroke` tool.
#[derive(Debug, Deserialize)]
pub struct SegmentToolConfig {
    /// Stroke JSON: `[{x, y, t}, ...]` or `{"points": [...]}`.
    pub input: PathBuf,
    #[serde(default = "default_algorithm")]
    pub algorithm: Algorithm,
    #[serde(default)]
    pub params: SegmenterParams,
    pub output: SegmentOutputConfig,
}

fn default_algorithm() -> Algorithm {
    Algorithm::Refined
}

#[derive(Debug, Deserialize)]
pub struct SegmentOutputConfig {
    /// Where the segmentation report is written.
    pub report_json: PathBuf,
    /// Omit the pipeline trace and write only the segmentation.
    #[serde(default)]
    pub segmentation_only: bool,
}

impl SegmentToolConfig {
    /// Relative paths resolve against the directory holding the config file.
    fn resolve_paths(mut self, base_dir: &Path) -> Self {
        self.input = resolve_path(base_dir, &self.input);
        self.output.report_json = resolve_path(base_dir, &self.output.report_json);
        self
    }
}

fn resolve_path(base_dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}

pub fn load_config(path: &Path) -> Result<SegmentToolConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    let config: SegmentToolConfig = serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
    Ok(config.resolve_paths(base_dir))
}
