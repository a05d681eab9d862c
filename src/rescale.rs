//! Moving a registration transform between two pyramid levels.
//!
//! Purpose
//! - A transform computed at one resolution is re-expressed at another by
//!   conjugating it with the ratio of the two levels' pixel-to-global
//!   matrices: `R · A · R⁻¹`.
//!
//! Notes
//! - `R` is an *elementwise* ratio of the two raw scale matrices, with
//!   entries forced to zero wherever either input entry is zero. This is
//!   exact for the diagonal matrices produced by axis-aligned pyramid
//!   downsampling, which is what multiscale containers emit in practice.
//!   It is not a general change-of-basis formula: sheared or rotated level
//!   metadata with differing sparsity would not be handled correctly.
use nalgebra::Matrix3;
use std::path::{Path, PathBuf};

use crate::affine::write_affine_as_transform;
use crate::error::{Result, ValidationError};
use crate::multiscale::{MultiscaleImage, ScaleLevelRef};
use crate::record::TransformStore;

/// Entrywise `source / target`, zero where either entry is zero.
fn elementwise_ratio(source: &Matrix3<f64>, target: &Matrix3<f64>) -> Matrix3<f64> {
    let mut ratio = Matrix3::zeros();
    for i in 0..3 {
        for j in 0..3 {
            let (s, t) = (source[(i, j)], target[(i, j)]);
            if s != 0.0 && t != 0.0 {
                ratio[(i, j)] = s / t;
            }
        }
    }
    ratio
}

/// Conjugates `affine` by the elementwise ratio of two scale matrices.
///
/// Fails with [`ValidationError::SingularRatioMatrix`] when the ratio
/// matrix cannot be inverted.
pub fn rescale_affine(
    affine: &Matrix3<f64>,
    source_scale: &Matrix3<f64>,
    target_scale: &Matrix3<f64>,
) -> Result<Matrix3<f64>> {
    let ratio = elementwise_ratio(source_scale, target_scale);
    let inverse = ratio
        .try_inverse()
        .ok_or(ValidationError::SingularRatioMatrix)?;
    Ok(ratio * affine * inverse)
}

/// Re-expresses `affine` from `source_level` at `target_level` of `image`,
/// persisting the result as a transform record at `output_path`.
///
/// Returns the rescaled matrix together with the output path.
pub fn scale_affine_across_levels<S: TransformStore>(
    store: &S,
    affine: &Matrix3<f64>,
    image: &MultiscaleImage,
    source_level: &ScaleLevelRef,
    target_level: &ScaleLevelRef,
    output_path: &Path,
) -> Result<(Matrix3<f64>, PathBuf)> {
    let source_scale = image.resolve_scale_matrix(source_level)?;
    let target_scale = image.resolve_scale_matrix(target_level)?;
    log::debug!(
        "rescaling affine from {} to {}",
        source_level.canonical(),
        target_level.canonical()
    );
    let rescaled = rescale_affine(affine, source_scale, target_scale)?;
    let path = write_affine_as_transform(store, &rescaled, output_path)?;
    Ok((rescaled, path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use approx::assert_relative_eq;

    fn diag(x: f64, y: f64) -> Matrix3<f64> {
        Matrix3::new(x, 0.0, 0.0, 0.0, y, 0.0, 0.0, 0.0, 1.0)
    }

    #[test]
    fn identical_levels_leave_the_matrix_unchanged() {
        let affine = Matrix3::new(0.9, -0.1, 12.0, 0.1, 0.9, -7.0, 0.0, 0.0, 1.0);
        let scale = diag(4.0, 4.0);
        let rescaled = rescale_affine(&affine, &scale, &scale).unwrap();
        assert_relative_eq!(rescaled, affine, epsilon = 1e-12);
    }

    #[test]
    fn ratio_of_diagonal_scales_stays_diagonal() {
        let rescaled = rescale_affine(&Matrix3::identity(), &diag(2.0, 2.0), &diag(1.0, 1.0));
        assert_relative_eq!(rescaled.unwrap(), Matrix3::identity(), epsilon = 1e-12);
    }

    #[test]
    fn translation_scales_with_the_level_ratio() {
        // Conjugation by diag(2, 2, 1) doubles the translation column and
        // leaves the linear part of an axis-aligned transform alone.
        let affine = Matrix3::new(1.0, 0.0, 5.0, 0.0, 1.0, 7.0, 0.0, 0.0, 1.0);
        let rescaled = rescale_affine(&affine, &diag(2.0, 2.0), &diag(1.0, 1.0)).unwrap();
        assert_relative_eq!(rescaled[(0, 2)], 10.0, epsilon = 1e-12);
        assert_relative_eq!(rescaled[(1, 2)], 14.0, epsilon = 1e-12);
        assert_relative_eq!(rescaled[(0, 0)], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn zero_guard_keeps_off_diagonal_zeros() {
        let source = Matrix3::new(2.0, 0.0, 0.0, 0.0, 2.0, 0.0, 0.0, 0.0, 1.0);
        let target = Matrix3::new(1.0, 3.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0);
        let ratio = elementwise_ratio(&source, &target);
        // target's (0,1) entry has no counterpart in source, so it is zeroed
        // rather than divided.
        assert_eq!(ratio[(0, 1)], 0.0);
        assert_relative_eq!(ratio[(0, 0)], 2.0);
    }

    #[test]
    fn singular_ratio_is_a_validation_error() {
        // Levels with no overlapping nonzero entries give an all-zero ratio.
        let source = Matrix3::new(1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0);
        let target = Matrix3::new(0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0);
        match rescale_affine(&Matrix3::identity(), &source, &target) {
            Err(Error::Validation(ValidationError::SingularRatioMatrix)) => {}
            other => panic!("expected singular ratio error, got {other:?}"),
        }
    }

    #[test]
    fn unknown_level_fails_before_any_math() {
        let image = MultiscaleImage::new([0.0, 0.0]);
        let store = crate::record::JsonTransformStore;
        let result = scale_affine_across_levels(
            &store,
            &Matrix3::identity(),
            &image,
            &0u64.into(),
            &1u64.into(),
            Path::new("unused.json"),
        );
        assert!(matches!(
            result,
            Err(Error::Validation(ValidationError::UnknownScaleLevel { .. }))
        ));
    }
}
