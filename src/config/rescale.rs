use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::multiscale::ScaleLevelRef;

/// Output locations for the rescale tool.
#[derive(Clone, Debug, Deserialize)]
pub struct RescaleOutputConfig {
    /// Where the rescaled transform record is written.
    pub transform_out: PathBuf,
    /// Optional affine-table JSON row describing the result.
    #[serde(default)]
    pub table_out: Option<PathBuf>,
}

/// Config for `rescale_transform`: which transform to move between which
/// pyramid levels of which image.
#[derive(Clone, Debug, Deserialize)]
pub struct RescaleToolConfig {
    /// Input transform record file.
    pub transform: PathBuf,
    /// Exported multiscale metadata (origin + per-level matrices).
    pub image_metadata: PathBuf,
    pub source_scale: ScaleLevelRef,
    pub target_scale: ScaleLevelRef,
    pub fixed_image_id: String,
    pub moving_image_id: String,
    pub output: RescaleOutputConfig,
}

pub fn load_config(path: &Path) -> Result<RescaleToolConfig, String> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    serde_json::from_str(&contents)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}
