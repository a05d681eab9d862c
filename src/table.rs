//! Flat tabular rows for reporting affine parameters.
use nalgebra::Matrix3;
use serde::{Deserialize, Serialize};

/// One report row: identifying labels plus the six affine parameters in
/// row-major order (`a b tx / c d ty`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AffineTableRow {
    pub fixed_image_id: String,
    pub moving_image_id: String,
    pub scale: String,
    pub a: f64,
    pub b: f64,
    pub tx: f64,
    pub c: f64,
    pub d: f64,
    pub ty: f64,
}

/// Flattens the first six row-major entries of `affine` into a table row.
pub fn build_affine_row(
    fixed_image_id: &str,
    moving_image_id: &str,
    scale: impl ToString,
    affine: &Matrix3<f64>,
) -> AffineTableRow {
    AffineTableRow {
        fixed_image_id: fixed_image_id.to_string(),
        moving_image_id: moving_image_id.to_string(),
        scale: scale.to_string(),
        a: affine[(0, 0)],
        b: affine[(0, 1)],
        tx: affine[(0, 2)],
        c: affine[(1, 0)],
        d: affine[(1, 1)],
        ty: affine[(1, 2)],
    }
}
