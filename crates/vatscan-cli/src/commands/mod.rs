//! Subcommands.

pub mod batch;
pub mod config;
pub mod detect;
pub mod output;
pub mod process;

use std::io::Read;
use std::path::{Path, PathBuf};

use vatscan_core::VatscanConfig;

/// Default configuration file location.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("vatscan")
        .join("config.json")
}

/// The `--config` path if given, otherwise the default location.
pub fn config_path(explicit: Option<&str>) -> PathBuf {
    explicit.map(PathBuf::from).unwrap_or_else(default_config_path)
}

/// Load configuration. An explicit path must exist; a missing default file
/// means default settings.
pub fn load_config(explicit: Option<&str>) -> anyhow::Result<VatscanConfig> {
    if let Some(path) = explicit {
        return Ok(VatscanConfig::from_file(Path::new(path))?);
    }
    let path = default_config_path();
    if path.exists() {
        Ok(VatscanConfig::from_file(&path)?)
    } else {
        Ok(VatscanConfig::default())
    }
}

/// Read text from a file, or from stdin for `-`.
pub fn read_input(input: &Path) -> anyhow::Result<String> {
    if input == Path::new("-") {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        return Ok(text);
    }
    if !input.exists() {
        anyhow::bail!("Input file not found: {}", input.display());
    }
    Ok(std::fs::read_to_string(input)?)
}
