/// Viewer configuration, read from an optional TOML file
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tglobe_core::Controls;

/// File looked up in the working directory at startup
pub const CONFIG_FILE: &str = "tglobe.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GlobeConfig {
    /// Data table with a header row and `lat,lon,field1,field2,field3` rows
    pub data_path: PathBuf,
    /// Equirectangular world image
    pub texture_path: PathBuf,
    pub frame_interval_ms: u64,
    /// Vertical field of view in degrees
    pub fov_deg: f64,
    pub near: f64,
    pub far: f64,
    pub sphere_slices: usize,
    pub sphere_stacks: usize,
    /// Approximate pixel size of one terminal cell, used for the aspect
    /// ratio and to turn cell motion into drag distances
    pub cell_width_px: f64,
    pub cell_height_px: f64,
    pub show_popups: bool,
    pub controls: Controls,
}

impl Default for GlobeConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("sites.csv"),
            texture_path: PathBuf::from("world.jpg"),
            frame_interval_ms: 10,
            fov_deg: 40.0,
            near: 0.1,
            far: 50.0,
            sphere_slices: 50,
            sphere_stacks: 50,
            cell_width_px: 8.0,
            cell_height_px: 16.0,
            show_popups: false,
            controls: Controls::default(),
        }
    }
}

impl GlobeConfig {
    /// Load `path` if it exists, otherwise fall back to defaults
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::info!("no {} found, using defaults", path.display());
            return Ok(Self::default());
        }

        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config = Self::from_toml(&text)
            .with_context(|| format!("invalid config {}", path.display()))?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }
}
