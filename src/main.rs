use clap::{Parser, Subcommand};
use gradeshot::{ManualRotation, PipelineConfig, config, output, pipeline};
use std::path::{Path, PathBuf};

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup — trivial, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "gradeshot")]
#[command(about = "Normalize collectible photos for vision-analysis upload")]
#[command(long_about = "\
Normalize collectible photos for vision-analysis upload

Each input image is corrected for camera orientation (EXIF), stood upright
when it arrives landscape (collectibles are taller than wide), clamped to
the 1200-2400px longest-edge band, and re-encoded as the highest-fidelity
JPEG that fits the 4.5 MiB transport budget.

For every input, a sibling <name>.payload.json is written containing the
base64 payload and its media type, ready to embed in an upload request
body. Nothing is sent anywhere - transport is the caller's job.

Run 'gradeshot gen-config' for a documented config.toml with every knob.")]
#[command(version = version_string())]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Normalize images into upload-ready payload files
    Normalize {
        /// Image files to normalize, processed in order
        files: Vec<PathBuf>,
        /// Manual rotation override in degrees (0, 90, 180, or 270).
        /// Any non-zero value disables the auto-portrait heuristic.
        #[arg(long, default_value_t = 0)]
        rotate: u32,
        /// Pipeline config file — defaults are the upload contract
        #[arg(long)]
        config: Option<PathBuf>,
        /// Directory for payload files (default: next to each source)
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Normalize {
            files,
            rotate,
            config,
            out_dir,
        } => {
            let manual = ManualRotation::from_degrees(rotate)
                .ok_or("--rotate must be 0, 90, 180, or 270")?;
            let config = match config {
                Some(path) => PipelineConfig::load(&path)?,
                None => PipelineConfig::default(),
            };
            if files.is_empty() {
                return Err("no input files given".into());
            }
            if let Some(dir) = &out_dir {
                std::fs::create_dir_all(dir)?;
            }

            let mut failures = 0usize;
            for file in &files {
                let name = file
                    .file_name()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_else(|| file.display().to_string());

                let bytes = match std::fs::read(file) {
                    Ok(bytes) => bytes,
                    Err(e) => {
                        println!("{}", output::format_failure_line(&name, &e));
                        failures += 1;
                        continue;
                    }
                };
                // Header-only read, for the report line
                let source_dims = image::image_dimensions(file).ok();

                match pipeline::normalize(&bytes, manual, &config) {
                    Ok(result) => {
                        let path = payload_path(file, out_dir.as_deref());
                        std::fs::write(&path, serde_json::to_string_pretty(&result)?)?;
                        println!("{}", output::format_result_line(&name, source_dims, &result));
                    }
                    Err(e) => {
                        println!("{}", output::format_failure_line(&name, &e));
                        failures += 1;
                    }
                }
            }

            if failures > 0 {
                return Err(format!("{failures} image(s) failed").into());
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Payload file destination: `<stem>.payload.json`, in `out_dir` when given,
/// otherwise next to the source.
fn payload_path(source: &Path, out_dir: Option<&Path>) -> PathBuf {
    let stem = source
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("image");
    let name = format!("{stem}.payload.json");
    match out_dir {
        Some(dir) => dir.join(name),
        None => source.with_file_name(name),
    }
}
