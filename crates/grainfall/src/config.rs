//! Sandbox configuration loading

use anyhow::{Context, Result};
use grainfall_core::SandboxConfig;
use std::path::Path;

/// Load a RON config file, or the defaults when no path is given
pub fn load_config(path: Option<&Path>) -> Result<SandboxConfig> {
    let Some(path) = path else {
        log::debug!("No config file given, using defaults");
        return Ok(SandboxConfig::default());
    };

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config = SandboxConfig::from_ron(&content)
        .with_context(|| format!("Invalid sandbox config: {}", path.display()))?;

    log::info!(
        "Loaded config {}: {}x{} cells at {} Hz",
        path.display(),
        config.canvas_width,
        config.canvas_height,
        config.tick_rate
    );
    Ok(config)
}

/// Write a config as pretty RON
pub fn save_config(config: &SandboxConfig, path: impl AsRef<Path>) -> Result<()> {
    let ron = ron::ser::to_string_pretty(config, ron::ser::PrettyConfig::default())
        .context("Failed to serialize config to RON")?;
    std::fs::write(path.as_ref(), ron)
        .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;
    Ok(())
}
