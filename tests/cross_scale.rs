mod common;

use common::records::{downsampled_pyramid, translation_record};
use nalgebra::Matrix3;
use slide_align::{
    build_affine_row, extract_affine_matrix, scale_affine_across_levels, JsonTransformStore,
};

use approx::assert_relative_eq;

#[test]
fn rescaled_transform_round_trips_through_the_output_file() {
    let _ = env_logger::builder().is_test(true).try_init();
    let dir = tempfile::tempdir().expect("temp dir");
    let store = JsonTransformStore;
    let image = downsampled_pyramid(3, 2.0);

    let affine = extract_affine_matrix(&translation_record(5.0, 7.0)).expect("extract");
    let out_path = dir.path().join("scaled_transform.json");
    let (rescaled, path) = scale_affine_across_levels(
        &store,
        &affine,
        &image,
        &2u64.into(),
        &0u64.into(),
        &out_path,
    )
    .expect("rescale across levels");
    assert_eq!(path, out_path);

    // The written record reloads to the matrix that was returned. The
    // converter assumes an origin center, which holds here.
    let reloaded = slide_align::extract_affine_matrix_from_path(&store, &path).expect("reload");
    assert_relative_eq!(reloaded, rescaled, epsilon = 1e-9);

    // Moving from scale2 to scale0 multiplies translation by 4.
    assert_relative_eq!(rescaled[(0, 2)], 4.0 * affine[(0, 2)], epsilon = 1e-9);
    assert_relative_eq!(rescaled[(1, 2)], 4.0 * affine[(1, 2)], epsilon = 1e-9);
}

#[test]
fn same_level_rescale_is_a_no_op() {
    let dir = tempfile::tempdir().expect("temp dir");
    let store = JsonTransformStore;
    let image = downsampled_pyramid(2, 2.0);

    let affine = Matrix3::new(0.9, -0.1, 12.0, 0.1, 0.9, -7.0, 0.0, 0.0, 1.0);
    let (rescaled, _) = scale_affine_across_levels(
        &store,
        &affine,
        &image,
        &1u64.into(),
        &"scale1".into(),
        &dir.path().join("same_level.json"),
    )
    .expect("rescale");
    assert_relative_eq!(rescaled, affine, epsilon = 1e-12);
}

#[test]
fn table_row_reports_the_rescaled_parameters() {
    let dir = tempfile::tempdir().expect("temp dir");
    let store = JsonTransformStore;
    let image = downsampled_pyramid(2, 4.0);

    let affine = extract_affine_matrix(&translation_record(1.0, 2.0)).expect("extract");
    let (rescaled, _) = scale_affine_across_levels(
        &store,
        &affine,
        &image,
        &1u64.into(),
        &0u64.into(),
        &dir.path().join("t.json"),
    )
    .expect("rescale");

    let row = build_affine_row("fixed", "moving", 0, &rescaled);
    assert_eq!(row.scale, "0");
    assert_relative_eq!(row.a, 1.0);
    assert_relative_eq!(row.d, 1.0);
    assert_relative_eq!(row.tx, rescaled[(0, 2)]);
    assert_relative_eq!(row.ty, rescaled[(1, 2)]);
}
