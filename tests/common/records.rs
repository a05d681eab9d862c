use nalgebra::Matrix3;
use slide_align::{ExternalTransformRecord, MultiscaleImage};

/// 2D affine record with identity linear part and the given translation,
/// centered at the origin.
pub fn translation_record(tx: f64, ty: f64) -> ExternalTransformRecord {
    ExternalTransformRecord::affine_2d(vec![1.0, 0.0, 0.0, 1.0, tx, ty], vec![0.0, 0.0])
}

/// Axis-aligned pyramid metadata: level N maps pixels to global units with
/// a uniform factor of `base^N`.
pub fn downsampled_pyramid(levels: u64, base: f64) -> MultiscaleImage {
    let mut image = MultiscaleImage::new([0.0, 0.0]);
    for level in 0..levels {
        let s = base.powi(level as i32);
        image.insert_level(level, Matrix3::new(s, 0.0, 0.0, 0.0, s, 0.0, 0.0, 0.0, 1.0));
    }
    image
}
