//! Conversion between homogeneous affine matrices and the external
//! registration library's centered, axis-swapped parameter vectors.
//!
//! Purpose
//! - The registration library stores a 2D affine transform as a flat
//!   parameter vector whose linear part acts about a stored *center* rather
//!   than the origin, and indexes images row-major (row = y, col = x).
//!   Everything else in this crate works with origin-centered 3×3
//!   homogeneous matrices in (x, y) order. This module reconciles the two.
//!
//! Design
//! - [`extract_affine_matrix`]: record → matrix. Re-centers the transform
//!   at the origin (`b = t + c - A·c`) and conjugates by [`AXIS_SWAP`] to
//!   flip both domain and codomain axis order.
//! - [`record_from_affine`]: matrix → record, assuming the matrix is
//!   already centered at the origin. Undoes the axis swap (the swap matrix
//!   is its own inverse) and reads the linear part and translation off
//!   directly.
//!
//! Notes
//! - The stored center is offset by one unit per axis from the true
//!   rotation center; [`CENTER_INDEX_OFFSET`] corrects for the library's
//!   pixel-indexing convention.
//! - The two directions are deliberately asymmetric: extraction handles an
//!   arbitrary center, conversion only the origin. Round-tripping a record
//!   whose center is not at the origin does not reproduce it. Callers must
//!   re-center before converting back.
use nalgebra::{Matrix2, Matrix3, Vector2};
use std::path::{Path, PathBuf};

use crate::error::{Result, ValidationError};
use crate::record::{ExternalTransformRecord, TransformStore};

/// Only 2D transforms are handled by this crate.
pub const TRANSFORM_DIMENSION: usize = 2;

/// Minimum parameter count for a 2D affine record: 4 linear + 2 translation.
pub const AFFINE_PARAMETER_COUNT: usize = 6;

/// The stored rotation center is short of the true center by one pixel unit
/// per axis. Convention-specific to the external library's indexing; applied
/// on extraction only.
pub const CENTER_INDEX_OFFSET: f64 = 1.0;

/// Permutation swapping the first two coordinate axes.
///
/// Self-inverse: conjugating by it twice is the identity, so the same matrix
/// both applies and undoes the (row, col) ↔ (x, y) reconciliation.
pub fn axis_swap() -> Matrix3<f64> {
    Matrix3::new(0.0, 1.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0)
}

fn check_dimension(record: &ExternalTransformRecord) -> Result<()> {
    if record.dimension != TRANSFORM_DIMENSION {
        return Err(ValidationError::UnsupportedDimension {
            found: record.dimension,
        }
        .into());
    }
    Ok(())
}

/// Converts a transform record into an origin-centered homogeneous matrix
/// in (x, y) axis order.
pub fn extract_affine_matrix(record: &ExternalTransformRecord) -> Result<Matrix3<f64>> {
    check_dimension(record)?;
    if record.parameters.len() < AFFINE_PARAMETER_COUNT {
        return Err(ValidationError::ShortParameterVector {
            found: record.parameters.len(),
            needed: AFFINE_PARAMETER_COUNT,
        }
        .into());
    }
    if record.fixed_parameters.len() < TRANSFORM_DIMENSION {
        return Err(ValidationError::ShortFixedParameters {
            found: record.fixed_parameters.len(),
            needed: TRANSFORM_DIMENSION,
        }
        .into());
    }

    let p = &record.parameters;
    let a = Matrix2::new(p[0], p[1], p[2], p[3]);
    let t = Vector2::new(p[4], p[5]);
    let center = Vector2::new(
        record.fixed_parameters[0] + CENTER_INDEX_OFFSET,
        record.fixed_parameters[1] + CENTER_INDEX_OFFSET,
    );

    // "Rotate about center, translate by t" expressed about the origin.
    let b = t + center - a * center;

    let mut m = Matrix3::identity();
    m.fixed_view_mut::<2, 2>(0, 0).copy_from(&a);
    m[(0, 2)] = b[0];
    m[(1, 2)] = b[1];

    let swap = axis_swap();
    Ok(swap * m * swap)
}

/// Loads a transform file and converts it, see [`extract_affine_matrix`].
pub fn extract_affine_matrix_from_path<S: TransformStore>(
    store: &S,
    path: &Path,
) -> Result<Matrix3<f64>> {
    let record = store.load(path)?;
    extract_affine_matrix(&record)
}

/// Builds a transform record from an origin-centered homogeneous matrix.
///
/// The inverse of [`extract_affine_matrix`] only for records whose center
/// was at the origin; an arbitrary center cannot be recovered from the
/// matrix alone.
pub fn record_from_affine(affine: &Matrix3<f64>) -> ExternalTransformRecord {
    let swap = axis_swap();
    let unswapped = swap * affine * swap;

    let a = unswapped.fixed_view::<2, 2>(0, 0);
    // center = origin, so the translation column is b itself.
    let parameters = vec![
        a[(0, 0)],
        a[(0, 1)],
        a[(1, 0)],
        a[(1, 1)],
        unswapped[(0, 2)],
        unswapped[(1, 2)],
    ];
    ExternalTransformRecord::affine_2d(parameters, vec![0.0, 0.0])
}

/// Persists `affine` as a transform record at `path` and returns the path.
pub fn write_affine_as_transform<S: TransformStore>(
    store: &S,
    affine: &Matrix3<f64>,
    path: &Path,
) -> Result<PathBuf> {
    let record = record_from_affine(affine);
    store.save(&record, path)?;
    log::debug!("wrote affine transform to {}", path.display());
    Ok(path.to_path_buf())
}
