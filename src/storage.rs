use anyhow::{Context, Result};
use emojify_vision::FaceAnnotation;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

pub const ALLOWED_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "gif"];

/// Face metadata sidecar, written next to each output image.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Annotations {
    pub faces: Vec<FaceAnnotation>,
}

pub fn load_annotations(path: &Path) -> Result<Annotations> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing metadata {}", path.display()))
}

pub fn save_annotations(path: &Path, annotations: &Annotations) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let data = serde_json::to_string(annotations)?;
    std::fs::write(path, data).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

fn split_name(file_name: &str) -> (&str, &str) {
    match file_name.rfind('.') {
        Some(dot) if dot > 0 => file_name.split_at(dot),
        _ => (file_name, ""),
    }
}

/// `face.jpg` → `face-output.jpg`
pub fn output_name(file_name: &str) -> String {
    let (stem, ext) = split_name(file_name);
    format!("{}-output{}", stem, ext)
}

/// `face.jpg` → `face-highlight.jpg`
pub fn highlight_name(file_name: &str) -> String {
    let (stem, ext) = split_name(file_name);
    format!("{}-highlight{}", stem, ext)
}

/// `face.jpg` → `face-meta.json`
pub fn json_name(file_name: &str) -> String {
    let (stem, _) = split_name(file_name);
    format!("{}-meta.json", stem)
}

pub fn extension(file_name: &str) -> String {
    let (_, ext) = split_name(file_name);
    ext.trim_start_matches('.').to_ascii_lowercase()
}

pub fn allowed_file(file_name: &str) -> bool {
    ALLOWED_EXTENSIONS.contains(&extension(file_name).as_str())
}

/// Keep ASCII alphanumerics, `.`, `_` and `-`; whitespace becomes `_`.
pub fn secure_filename(file_name: &str) -> String {
    let cleaned: String = file_name
        .chars()
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') || c.is_whitespace())
        .collect();
    cleaned
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .trim_matches(|c| c == '.' || c == '_')
        .to_string()
}

/// Unique-ish name for an upload: `<millis>_<sanitized name>`.
pub fn id_name(file_name: &str) -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    format!("{}_{}", millis, secure_filename(file_name))
}
