use crate::catalog::EmojiCode;
use crate::error::{EmojifyError, Result};
use crate::face::Bounds;
use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbaImage};
use log::{debug, info};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

/// Emojione 3.1, 128x128 PNGs.
pub const EMOJI_CDN: &str = "https://cdn.jsdelivr.net/emojione/assets/3.1/png/128/";

/// Where emoji templates come from, addressed by code.
pub trait EmojiSource {
    fn fetch(&self, code: EmojiCode) -> Result<DynamicImage>;
}

/// `{base}{code}.png` over HTTP.
pub struct CdnSource {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl CdnSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self {
            base_url,
            client: reqwest::blocking::Client::new(),
        }
    }
}

impl Default for CdnSource {
    fn default() -> Self {
        Self::new(EMOJI_CDN)
    }
}

impl EmojiSource for CdnSource {
    fn fetch(&self, code: EmojiCode) -> Result<DynamicImage> {
        let url = format!("{}{}.png", self.base_url, code);
        info!("Downloading emoji {}", url);
        let unavailable = |reason: String| EmojifyError::AssetUnavailable {
            code: code.to_string(),
            reason,
        };
        let bytes = self
            .client
            .get(&url)
            .send()
            .and_then(|r| r.error_for_status())
            .and_then(|r| r.bytes())
            .map_err(|e| unavailable(e.to_string()))?;
        image::load_from_memory(&bytes).map_err(|e| unavailable(e.to_string()))
    }
}

/// `{dir}/{code}.png` on the local filesystem.
pub struct DirSource {
    dir: PathBuf,
}

impl DirSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl EmojiSource for DirSource {
    fn fetch(&self, code: EmojiCode) -> Result<DynamicImage> {
        let path = self.dir.join(format!("{}.png", code));
        image::open(&path).map_err(|e| EmojifyError::AssetUnavailable {
            code: code.to_string(),
            reason: format!("{}: {}", path.display(), e),
        })
    }
}

/// URLs go to the CDN, anything else is treated as a directory.
pub fn source_from(location: &str) -> Box<dyn EmojiSource> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Box::new(CdnSource::new(location))
    } else {
        Box::new(DirSource::new(location))
    }
}

/// Decoded emoji templates, fetched once per code and kept for the lifetime
/// of the cache. Callers get a fresh scaled copy on every lookup.
pub struct EmojiCache {
    source: Box<dyn EmojiSource>,
    templates: Mutex<HashMap<EmojiCode, RgbaImage>>,
}

impl EmojiCache {
    pub fn new(source: Box<dyn EmojiSource>) -> Self {
        Self {
            source,
            templates: Mutex::new(HashMap::new()),
        }
    }

    /// Emoji for `code` scaled to the size of `bounds`, nearest-neighbor so
    /// edges stay crisp.
    pub fn get_image(&self, code: EmojiCode, bounds: &Bounds) -> Result<RgbaImage> {
        if bounds.is_empty() {
            return Ok(RgbaImage::new(0, 0));
        }
        let mut templates = self.templates.lock().unwrap_or_else(|e| e.into_inner());
        if !templates.contains_key(&code) {
            debug!("emoji cache miss for {}", code);
            let template = self.source.fetch(code)?.to_rgba8();
            templates.insert(code, template);
        }
        let template = templates
            .get(&code)
            .ok_or_else(|| EmojifyError::AssetUnavailable {
                code: code.to_string(),
                reason: "missing from cache after insert".into(),
            })?;
        Ok(imageops::resize(
            template,
            bounds.width() as u32,
            bounds.height() as u32,
            FilterType::Nearest,
        ))
    }

    pub fn contains(&self, code: EmojiCode) -> bool {
        self.templates
            .lock()
            .map(|t| t.contains_key(&code))
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.templates.lock().map(|t| t.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
