/// tglobe - Interactive textured globe in the terminal
///
/// Loads `sites.csv` and `world.jpg` from the working directory (or the
/// paths in `tglobe.toml`) and shows every row as a marker on the globe.
/// Controls:
///   - Left drag / Arrow Keys: Rotate the globe
///   - Mouse wheel: Zoom
///   - P: Toggle data popups
///   - Q/ESC: Quit
use anyhow::{Context, Result};
use std::path::Path;
use tglobe_core::{load_table, Texture};
use tglobe_terminal::{config::CONFIG_FILE, GlobeConfig, TerminalApp};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = GlobeConfig::load(Path::new(CONFIG_FILE))?;

    let points = load_table(&config.data_path)
        .with_context(|| format!("failed to load data table {}", config.data_path.display()))?;
    log::info!(
        "loaded {} points from {}",
        points.len(),
        config.data_path.display()
    );

    let texture = Texture::open(&config.texture_path)
        .with_context(|| format!("failed to load texture {}", config.texture_path.display()))?;
    log::info!(
        "loaded texture {} ({}x{})",
        config.texture_path.display(),
        texture.width(),
        texture.height()
    );

    let mut app = TerminalApp::new(config, points, texture)
        .context("failed to initialise terminal")?;
    app.run().context("terminal render loop failed")?;

    log::info!("exiting");
    Ok(())
}
