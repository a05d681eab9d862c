//! Multi-resolution image metadata: named scale levels and their
//! pixel-to-global coordinate matrices.
//!
//! The image container itself (pixel data, lazy loading) lives outside this
//! crate; what the transform math needs from it is the physical origin and,
//! per pyramid level, the affine mapping pixel coordinates to the global
//! coordinate system.
use nalgebra::Matrix3;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{Result, RuntimeFailure, ValidationError};

/// Reference to a pyramid resolution level, by index or by label.
///
/// Canonical form is `scale<N>`; labels already carrying the prefix pass
/// through unchanged, anything else gets it prepended.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScaleLevelRef {
    Index(u64),
    Label(String),
}

impl ScaleLevelRef {
    /// Canonical level label, e.g. `scale0`.
    pub fn canonical(&self) -> String {
        let raw = self.raw_label();
        if raw.starts_with("scale") {
            raw
        } else {
            format!("scale{raw}")
        }
    }

    /// Un-prefixed stringification, used for report labels.
    pub fn raw_label(&self) -> String {
        match self {
            ScaleLevelRef::Index(i) => i.to_string(),
            ScaleLevelRef::Label(s) => s.clone(),
        }
    }
}

impl fmt::Display for ScaleLevelRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical())
    }
}

impl From<u64> for ScaleLevelRef {
    fn from(i: u64) -> Self {
        ScaleLevelRef::Index(i)
    }
}

impl From<&str> for ScaleLevelRef {
    fn from(s: &str) -> Self {
        ScaleLevelRef::Label(s.to_string())
    }
}

impl From<String> for ScaleLevelRef {
    fn from(s: String) -> Self {
        ScaleLevelRef::Label(s)
    }
}

/// Metadata view of a multi-resolution image.
///
/// Level keys are stored in canonical form. Deserializable so tools can
/// load it from exported container metadata.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MultiscaleImage {
    /// Physical origin of the image, in global units.
    #[serde(default)]
    pub origin: [f64; 2],
    levels: BTreeMap<String, Matrix3<f64>>,
}

impl MultiscaleImage {
    pub fn new(origin: [f64; 2]) -> Self {
        Self {
            origin,
            levels: BTreeMap::new(),
        }
    }

    /// Registers a level's pixel-to-global matrix under the canonical label.
    pub fn insert_level(&mut self, level: impl Into<ScaleLevelRef>, pixel_to_global: Matrix3<f64>) {
        self.levels.insert(level.into().canonical(), pixel_to_global);
    }

    /// Pixel-to-global matrix for `level`.
    ///
    /// Unknown levels are a [`ValidationError::UnknownScaleLevel`] carrying
    /// the canonical label that was looked up.
    pub fn resolve_scale_matrix(&self, level: &ScaleLevelRef) -> Result<&Matrix3<f64>> {
        let label = level.canonical();
        self.levels
            .get(&label)
            .ok_or_else(|| ValidationError::UnknownScaleLevel { label }.into())
    }

    /// Canonical labels of all registered levels.
    pub fn level_labels(&self) -> impl Iterator<Item = &str> {
        self.levels.keys().map(|k| k.as_str())
    }

    /// Loads exported container metadata from a JSON file.
    pub fn from_json_file(path: &std::path::Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)
            .map_err(|e| RuntimeFailure::new("failed to read multiscale metadata", path, e))?;
        let image = serde_json::from_str(&data)
            .map_err(|e| RuntimeFailure::new("failed to parse multiscale metadata", path, e))?;
        Ok(image)
    }
}
