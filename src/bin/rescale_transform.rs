use log::info;
use slide_align::config::{load_config, RescaleToolConfig};
use slide_align::multiscale::MultiscaleImage;
use slide_align::record::JsonTransformStore;
use slide_align::{build_affine_row, extract_affine_matrix_from_path, scale_affine_across_levels};
use std::env;
use std::fs;
use std::path::Path;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn usage() -> String {
    "Usage: rescale_transform <config.json>".to_string()
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config: RescaleToolConfig = load_config(Path::new(&config_path))?;

    let store = JsonTransformStore;
    let image = MultiscaleImage::from_json_file(&config.image_metadata)
        .map_err(|e| format!("Failed to load image metadata: {e}"))?;

    let affine = extract_affine_matrix_from_path(&store, &config.transform)
        .map_err(|e| format!("Failed to extract affine matrix: {e}"))?;
    info!(
        "loaded transform {} at {}",
        config.transform.display(),
        config.source_scale.canonical()
    );

    let (rescaled, out_path) = scale_affine_across_levels(
        &store,
        &affine,
        &image,
        &config.source_scale,
        &config.target_scale,
        &config.output.transform_out,
    )
    .map_err(|e| format!("Failed to rescale transform: {e}"))?;
    info!(
        "wrote rescaled transform for {} to {}",
        config.target_scale.canonical(),
        out_path.display()
    );

    if let Some(table_out) = &config.output.table_out {
        let row = build_affine_row(
            &config.fixed_image_id,
            &config.moving_image_id,
            config.target_scale.raw_label(),
            &rescaled,
        );
        let json = serde_json::to_string_pretty(&row)
            .map_err(|e| format!("Failed to serialize affine table row: {e}"))?;
        fs::write(table_out, json)
            .map_err(|e| format!("Failed to write {}: {e}", table_out.display()))?;
        info!("wrote affine table row to {}", table_out.display());
    }

    Ok(())
}
