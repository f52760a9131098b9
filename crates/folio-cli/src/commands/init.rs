use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use folio_core::{AppConfig, Portfolio};

const SAMPLE_PORTFOLIO: &str = include_str!("../../assets/portfolio.toml");

/// Write the default config and a sample portfolio, keeping existing files
/// unless `force` is set
pub fn run(config: &AppConfig, config_path: Option<&Path>, force: bool) -> Result<()> {
    let config_path = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(AppConfig::config_path);

    if config_path.exists() && !force {
        println!("Config exists: {} (use --force to overwrite)", config_path.display());
    } else {
        config.save_to(&config_path)?;
        println!("Wrote config: {}", config_path.display());
    }

    let content_path = config.content_path();
    if content_path.exists() && !force {
        println!("Portfolio exists: {} (use --force to overwrite)", content_path.display());
        return Ok(());
    }
    if let Some(parent) = content_path.parent() {
        fs::create_dir_all(parent)?;
    }
    // The sample must stay loadable
    Portfolio::from_toml(SAMPLE_PORTFOLIO)?;
    fs::write(&content_path, SAMPLE_PORTFOLIO)
        .with_context(|| format!("failed to write {}", content_path.display()))?;
    println!("Wrote sample portfolio: {}", content_path.display());
    println!("\nOpen it with:\n  folio");

    Ok(())
}
