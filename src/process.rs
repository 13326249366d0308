use crate::config::Config;
use crate::storage::{self, Annotations};
use anyhow::{Context, Result};
use emojify_vision::cache::source_from;
use emojify_vision::cloud::CloudVision;
use emojify_vision::compositor::{self, HIGHLIGHT_COLOR};
use emojify_vision::{Catalog, Compositor, EmojiCache, Selector};
use log::{info, warn};
use std::path::{Path, PathBuf};

/// Selector + emoji cache wired from the config. Build once per process so
/// the emoji cache is shared by every image.
pub fn build_compositor(cfg: &Config) -> Result<Compositor> {
    let mut selector = Selector::new(Catalog::default())
        .context("emoji catalog failed its self-check")?
        .with_pad(cfg.pad_fraction);

    if cfg.use_labels {
        match &cfg.api_key {
            Some(key) => selector = selector.with_labels(Box::new(vision_client(cfg, key))),
            None => warn!("use_labels is set but no api_key is configured, labels disabled"),
        }
    }

    let cache = EmojiCache::new(source_from(&cfg.emoji_source));
    Ok(Compositor::new(selector, cache))
}

fn vision_client(cfg: &Config, key: &str) -> CloudVision {
    CloudVision::new(key)
        .with_endpoint(cfg.vision_endpoint.as_str())
        .with_max_results(cfg.max_results)
}

fn file_name(path: &Path) -> Result<String> {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .with_context(|| format!("{} has no file name", path.display()))
}

/// Faces for `input`: from the given metadata file, or detected with Cloud
/// Vision and saved as a sidecar in the output directory.
pub fn annotations_for(cfg: &Config, input: &Path, meta: Option<&Path>) -> Result<Annotations> {
    if let Some(meta) = meta {
        info!("Loading face metadata: {}", meta.display());
        return storage::load_annotations(meta);
    }

    let Some(key) = &cfg.api_key else {
        anyhow::bail!(
            "No metadata given for {} and no api_key configured for face detection",
            input.display()
        );
    };
    let encoded =
        std::fs::read(input).with_context(|| format!("reading {}", input.display()))?;
    let annotations = Annotations {
        faces: vision_client(cfg, key).detect_faces(&encoded)?,
    };

    let meta_path = cfg.output_dir.join(storage::json_name(&file_name(input)?));
    storage::save_annotations(&meta_path, &annotations)?;
    info!("Wrote face metadata: {}", meta_path.display());
    Ok(annotations)
}

/// Copy `input` into the output directory under a unique `<millis>_<name>`
/// so repeated uploads of the same name never collide.
pub fn import_file(cfg: &Config, input: &Path) -> Result<PathBuf> {
    let stored = cfg.output_dir.join(storage::id_name(&file_name(input)?));
    std::fs::create_dir_all(&cfg.output_dir)?;
    std::fs::copy(input, &stored)
        .with_context(|| format!("copying {} to {}", input.display(), stored.display()))?;
    info!("Stored upload as {}", stored.display());
    Ok(stored)
}

fn save_image(image: &image::DynamicImage, output: &Path) -> Result<()> {
    if let Some(parent) = output.parent() {
        std::fs::create_dir_all(parent)?;
    }
    image
        .save(output)
        .with_context(|| format!("saving {}", output.display()))?;
    info!("Writing to file {}", output.display());
    Ok(())
}

/// Replace every face in `input` with an emoji and save the result.
pub fn process_file(
    cfg: &Config,
    compositor: &Compositor,
    input: &Path,
    meta: Option<&Path>,
    output: Option<PathBuf>,
) -> Result<PathBuf> {
    let annotations = annotations_for(cfg, input, meta)?;
    let mut image =
        image::open(input).with_context(|| format!("opening image {}", input.display()))?;

    info!(
        "Found {} face{}",
        annotations.faces.len(),
        if annotations.faces.len() == 1 { "" } else { "s" }
    );
    compositor
        .render(&mut image, &annotations.faces)
        .with_context(|| format!("rendering emoji onto {}", input.display()))?;

    let output = match output {
        Some(path) => path,
        None => cfg.output_dir.join(storage::output_name(&file_name(input)?)),
    };
    save_image(&image, &output)?;
    Ok(output)
}

/// Outline detected faces instead of covering them.
pub fn highlight_file(
    cfg: &Config,
    input: &Path,
    meta: Option<&Path>,
    output: Option<PathBuf>,
) -> Result<PathBuf> {
    let annotations = annotations_for(cfg, input, meta)?;
    let mut image =
        image::open(input).with_context(|| format!("opening image {}", input.display()))?;
    compositor::highlight(
        &mut image,
        &annotations.faces,
        HIGHLIGHT_COLOR,
        cfg.highlight_width,
    )?;

    let output = match output {
        Some(path) => path,
        None => cfg.output_dir.join(storage::highlight_name(&file_name(input)?)),
    };
    save_image(&image, &output)?;
    Ok(output)
}

/// Process every supported image in `dir`. Files that fail are logged and
/// skipped; returns how many succeeded.
pub fn process_folder(cfg: &Config, compositor: &Compositor, dir: &Path) -> Result<usize> {
    info!("Processing directory {} ...", dir.display());
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)
        .with_context(|| format!("reading directory {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .collect();
    entries.sort();

    let mut processed = 0;
    for path in entries {
        let name = match path.file_name() {
            Some(n) => n.to_string_lossy().into_owned(),
            None => continue,
        };
        if !path.is_file() || !storage::allowed_file(&name) {
            info!("Skipped non-image file {}", name);
            continue;
        }

        // reuse a previously written sidecar instead of detecting again
        let sidecar = cfg.output_dir.join(storage::json_name(&name));
        let meta = sidecar.exists().then_some(sidecar.as_path());

        info!("Processing file {} ...", name);
        match process_file(cfg, compositor, &path, meta, None) {
            Ok(_) => processed += 1,
            Err(e) => warn!("Bad image {}: {:#}", name, e),
        }
    }
    Ok(processed)
}
