#![doc = include_str!("../README.md")]

// Core modules (stable-ish surface)
pub mod affine;
pub mod error;
pub mod multiscale;
pub mod record;
pub mod rescale;
pub mod scaling;
pub mod table;

// Tool support.
pub mod config;

// --- High-level re-exports -------------------------------------------------

pub use crate::affine::{
    extract_affine_matrix, extract_affine_matrix_from_path, record_from_affine,
    write_affine_as_transform,
};
pub use crate::error::{Error, Result, RuntimeFailure, ValidationError};
pub use crate::multiscale::{MultiscaleImage, ScaleLevelRef};
pub use crate::record::{ExternalTransformRecord, JsonTransformStore, TransformStore};
pub use crate::rescale::{rescale_affine, scale_affine_across_levels};
pub use crate::scaling::{compute_scaling_factor, scale_record, scale_transform, ScalingFactors};
pub use crate::table::{build_affine_row, AffineTableRow};

/// Small prelude for quick experiments.
///
/// ```
/// use slide_align::prelude::*;
/// use nalgebra::Matrix3;
///
/// # fn main() {
/// let record = ExternalTransformRecord::affine_2d(
///     vec![1.0, 0.0, 0.0, 1.0, 5.0, 7.0],
///     vec![0.0, 0.0],
/// );
/// let affine: Matrix3<f64> = extract_affine_matrix(&record).unwrap();
/// let row = build_affine_row("fixed", "moving", 0, &affine);
/// println!("tx={} ty={}", row.tx, row.ty);
/// # }
/// ```
pub mod prelude {
    pub use crate::affine::extract_affine_matrix;
    pub use crate::error::{Error, Result};
    pub use crate::multiscale::{MultiscaleImage, ScaleLevelRef};
    pub use crate::record::{ExternalTransformRecord, JsonTransformStore};
    pub use crate::table::build_affine_row;
}
