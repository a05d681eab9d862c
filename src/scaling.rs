//! Translation rescaling of transform records across resolutions.
//!
//! The registration result carries its translation in the pixel units of
//! the resolution it was computed at. Moving it to another resolution only
//! requires rescaling the translation and re-anchoring it for differing
//! physical origins; the linear part (rotation/scale/shear) is left alone.
use std::path::{Path, PathBuf};

use crate::affine::{AFFINE_PARAMETER_COUNT, TRANSFORM_DIMENSION};
use crate::error::{Result, ValidationError};
use crate::record::{scaled_variant_path, ExternalTransformRecord, TransformStore};

/// Per-axis translation scaling factors.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScalingFactors {
    /// One factor applied to both axes.
    Uniform(f64),
    /// Separate (sx, sy) factors.
    PerAxis(f64, f64),
}

impl ScalingFactors {
    /// Broadcast to `[sx, sy]`.
    pub fn broadcast(self) -> [f64; 2] {
        match self {
            ScalingFactors::Uniform(s) => [s, s],
            ScalingFactors::PerAxis(sx, sy) => [sx, sy],
        }
    }

    /// Accepts a one-element (uniform) or two-element (per-axis) slice.
    pub fn try_from_slice(values: &[f64]) -> Result<Self> {
        match values {
            [s] => Ok(ScalingFactors::Uniform(*s)),
            [sx, sy] => Ok(ScalingFactors::PerAxis(*sx, *sy)),
            other => Err(ValidationError::BadScalingFactorShape { len: other.len() }.into()),
        }
    }
}

impl From<f64> for ScalingFactors {
    fn from(s: f64) -> Self {
        ScalingFactors::Uniform(s)
    }
}

impl From<[f64; 2]> for ScalingFactors {
    fn from(v: [f64; 2]) -> Self {
        ScalingFactors::PerAxis(v[0], v[1])
    }
}

/// Ratio between two resolution scales: `lower_res_scale / higher_res_scale`.
///
/// Pure arithmetic; a zero `higher_res_scale` propagates as an infinite or
/// NaN result rather than an error.
pub fn compute_scaling_factor(higher_res_scale: f64, lower_res_scale: f64) -> f64 {
    lower_res_scale / higher_res_scale
}

/// Rescales a record's translation in place, leaving the linear part and
/// fixed parameters untouched.
///
/// `tx' = tx·sx + (fixed_origin.x − moving_origin.x)/sx`, and likewise for
/// y. The origin terms re-anchor the transform when the fixed and moving
/// images have different physical origins.
pub fn scale_record(
    record: &ExternalTransformRecord,
    factors: ScalingFactors,
    fixed_origin: [f64; 2],
    moving_origin: [f64; 2],
) -> Result<ExternalTransformRecord> {
    if record.dimension != TRANSFORM_DIMENSION {
        return Err(ValidationError::UnsupportedDimension {
            found: record.dimension,
        }
        .into());
    }
    if record.parameters.len() < AFFINE_PARAMETER_COUNT {
        return Err(ValidationError::ShortParameterVector {
            found: record.parameters.len(),
            needed: AFFINE_PARAMETER_COUNT,
        }
        .into());
    }

    let [sx, sy] = factors.broadcast();
    let mut parameters = record.parameters.clone();
    parameters[4] = parameters[4] * sx + (fixed_origin[0] - moving_origin[0]) / sx;
    parameters[5] = parameters[5] * sy + (fixed_origin[1] - moving_origin[1]) / sy;

    Ok(ExternalTransformRecord {
        transform_type: record.transform_type.clone(),
        dimension: record.dimension,
        parameters,
        fixed_parameters: record.fixed_parameters.clone(),
    })
}

/// Loads the transform at `transform_path`, rescales its translation, and
/// writes the result next to the original under the `_scaled` name.
///
/// Returns the derived path. Load/save failures surface as
/// [`crate::error::RuntimeFailure`] with the original cause attached.
pub fn scale_transform<S: TransformStore>(
    store: &S,
    transform_path: &Path,
    factors: ScalingFactors,
    fixed_origin: [f64; 2],
    moving_origin: [f64; 2],
) -> Result<PathBuf> {
    let record = store.load(transform_path)?;
    let scaled = scale_record(&record, factors, fixed_origin, moving_origin)?;
    let out_path = scaled_variant_path(transform_path);
    store.save(&scaled, &out_path)?;
    log::debug!(
        "scaled transform {} -> {} (factors {:?})",
        transform_path.display(),
        out_path.display(),
        factors.broadcast()
    );
    Ok(out_path)
}
