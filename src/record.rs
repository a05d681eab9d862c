//! Transform records and their on-disk store.
//!
//! - `ExternalTransformRecord`: the registration library's view of a 2D
//!   affine transform (flat parameter vector + fixed parameters).
//! - `TransformStore`: narrow load/save interface so the matrix algebra in
//!   [`crate::affine`] never touches files directly.
//! - `JsonTransformStore`: the shipped store, pretty JSON on disk.
//! - `scaled_variant_path`: the `t.ext` → `t_scaled.ext` naming rule.
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::RuntimeFailure;

/// A registration transform as the external library parameterizes it.
///
/// For 2D affine transforms `parameters` holds at least 6 entries: the
/// row-major 2×2 linear part followed by the translation. The first two
/// `fixed_parameters` encode the rotation center the linear part is applied
/// about. The byte format on disk is owned by the store; this type only
/// fixes the fields every store must carry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExternalTransformRecord {
    pub transform_type: String,
    pub dimension: usize,
    pub parameters: Vec<f64>,
    pub fixed_parameters: Vec<f64>,
}

impl ExternalTransformRecord {
    /// A 2D affine record with the default transform type label.
    pub fn affine_2d(parameters: Vec<f64>, fixed_parameters: Vec<f64>) -> Self {
        Self {
            transform_type: "AffineTransform".to_string(),
            dimension: 2,
            parameters,
            fixed_parameters,
        }
    }
}

/// Load/save access to transform files.
///
/// Operations in [`crate::scaling`] and [`crate::rescale`] are generic over
/// this trait, so tests can run against a scratch directory and alternative
/// serializations can be swapped in without touching the math.
pub trait TransformStore {
    fn load(&self, path: &Path) -> Result<ExternalTransformRecord, RuntimeFailure>;
    fn save(&self, record: &ExternalTransformRecord, path: &Path) -> Result<(), RuntimeFailure>;
}

/// Transform store writing pretty-printed JSON, creating parent directories
/// on save.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonTransformStore;

impl TransformStore for JsonTransformStore {
    fn load(&self, path: &Path) -> Result<ExternalTransformRecord, RuntimeFailure> {
        let data = fs::read_to_string(path)
            .map_err(|e| RuntimeFailure::new("failed to read transform file", path, e))?;
        serde_json::from_str(&data)
            .map_err(|e| RuntimeFailure::new("failed to parse transform file", path, e))
    }

    fn save(&self, record: &ExternalTransformRecord, path: &Path) -> Result<(), RuntimeFailure> {
        ensure_parent_dir(path)?;
        let json = serde_json::to_string_pretty(record)
            .map_err(|e| RuntimeFailure::new("failed to serialize transform", path, e))?;
        fs::write(path, json)
            .map_err(|e| RuntimeFailure::new("failed to write transform file", path, e))
    }
}

fn ensure_parent_dir(path: &Path) -> Result<(), RuntimeFailure> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| RuntimeFailure::new("failed to create parent directory", path, e))?;
        }
    }
    Ok(())
}

/// Derived path for a scaled transform: the extension of `path` is replaced
/// by a `_scaled` variant (`t.mat` → `t_scaled.mat`). Extension-less paths
/// get `_scaled` appended.
pub fn scaled_variant_path(path: &Path) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file_name = match path.extension() {
        Some(ext) => format!("{stem}_scaled.{}", ext.to_string_lossy()),
        None => format!("{stem}_scaled"),
    };
    path.with_file_name(file_name)
}
