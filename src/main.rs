use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use emojify::{config, process};
use log::info;

#[derive(Parser)]
#[command(name = "emojify")]
#[command(version, about = "Cover faces in photos with emoji that match their mood")]
struct Cli {
    /// Config file (defaults to the system config)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replace every face in an image with an emoji
    Render {
        image: PathBuf,
        /// Face metadata JSON (skips face detection)
        #[arg(short, long)]
        meta: Option<PathBuf>,
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Label faces with no clear expression (slow)
        #[arg(long)]
        labels: bool,
    },
    /// Outline detected faces instead of covering them
    Highlight {
        image: PathBuf,
        #[arg(short, long)]
        meta: Option<PathBuf>,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Store a copy of the image under a unique name and write its metadata sidecar
    Detect { image: PathBuf },
    /// Render every image in a directory
    Folder { dir: PathBuf },
    /// Open config file in editor
    Config,
}

fn main() -> Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .format_target(false)
        .format_timestamp(None)
        .init();

    let cli = Cli::parse();
    let mut cfg = config::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Render {
            image,
            meta,
            output,
            labels,
        } => {
            cfg.use_labels |= labels;
            let compositor = process::build_compositor(&cfg)?;
            let output = process::process_file(&cfg, &compositor, &image, meta.as_deref(), output)?;
            info!("✓ Emoji rendered: {}", output.display());
            Ok(())
        }
        Commands::Highlight {
            image,
            meta,
            output,
        } => {
            let output = process::highlight_file(&cfg, &image, meta.as_deref(), output)?;
            info!("✓ Faces highlighted: {}", output.display());
            Ok(())
        }
        Commands::Detect { image } => {
            if cfg.api_key.is_none() {
                anyhow::bail!("detect needs an api_key in the config");
            }
            let stored = process::import_file(&cfg, &image)?;
            let annotations = process::annotations_for(&cfg, &stored, None)?;
            info!(
                "✓ {} face(s) detected in {}",
                annotations.faces.len(),
                stored.display()
            );
            Ok(())
        }
        Commands::Folder { dir } => {
            let compositor = process::build_compositor(&cfg)?;
            let count = process::process_folder(&cfg, &compositor, &dir)?;
            info!("✓ {} image(s) processed", count);
            Ok(())
        }
        Commands::Config => open_config(cli.config),
    }
}

fn open_config(path: Option<PathBuf>) -> Result<()> {
    let config_path = path.unwrap_or_else(|| config::CONFIG_PATH.to_path_buf());
    if !config_path.exists() {
        config::save_config(&config::Config::default(), Some(&config_path))
            .context("Failed to write default config")?;
    }
    let editor = env::var("EDITOR").unwrap_or_else(|_| "vi".to_string());

    info!("Opening config file: {:?}", config_path);

    let status = std::process::Command::new(editor)
        .arg(&config_path)
        .status()
        .context("Failed to open editor")?;

    if !status.success() {
        anyhow::bail!("Editor exited with non-zero status");
    }

    // catch typos before the next run does
    config::load_config(Some(&config_path))?;
    info!("Config OK");
    Ok(())
}
