use anyhow::{Context, Result};
use emojify_vision::cache::EMOJI_CDN;
use emojify_vision::cloud::{MAX_RESULTS, VISION_ENDPOINT};
use emojify_vision::compositor::HIGHLIGHT_WIDTH;
use emojify_vision::face::DEFAULT_PAD;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub static CONFIG_PATH: Lazy<&'static Path> = Lazy::new(|| {
    Path::new(option_env!("EMOJIFY_CONFIG_PATH").unwrap_or("/usr/local/etc/emojify/config.toml"))
});

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Fraction of the face size added around each emoji.
    pub pad_fraction: f64,
    /// Label faces with no sentiment signal. Slow: one extra API call per face.
    pub use_labels: bool,
    /// CDN base URL or local directory holding `{code}.png`.
    pub emoji_source: String,
    /// Cloud Vision API key, needed for detection and labels.
    pub api_key: Option<String>,
    /// Cloud Vision `images:annotate` URL.
    pub vision_endpoint: String,
    pub max_results: u32,
    pub output_dir: PathBuf,
    pub highlight_width: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pad_fraction: DEFAULT_PAD,
            use_labels: false,
            emoji_source: EMOJI_CDN.to_string(),
            api_key: None,
            vision_endpoint: VISION_ENDPOINT.to_string(),
            max_results: MAX_RESULTS,
            output_dir: PathBuf::from("gen"),
            highlight_width: HIGHLIGHT_WIDTH,
        }
    }
}

pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let path = path.unwrap_or(&CONFIG_PATH);
    if !path.exists() {
        return Ok(Config::default());
    }
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading config at {}", path.display()))?;
    toml::from_str(&raw).with_context(|| format!("parsing config {}", path.display()))
}

pub fn save_config(cfg: &Config, path: Option<&Path>) -> Result<()> {
    let path = path.unwrap_or(&CONFIG_PATH);
    let data = toml::to_string_pretty(cfg)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, data)?;
    Ok(())
}
