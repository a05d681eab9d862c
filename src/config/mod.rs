//! JSON configuration for the command-line tools.
pub mod rescale;

pub use rescale::{load_config, RescaleOutputConfig, RescaleToolConfig};
