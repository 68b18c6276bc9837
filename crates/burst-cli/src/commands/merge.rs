use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use burst_core::config::EngineConfig;
use burst_core::finish::{finish, FinishConfig};
use burst_core::frame::Burst;
use burst_core::io::{load_frame, save_frame, save_preview};
use burst_core::pipeline::align_and_merge;

#[derive(Args)]
pub struct MergeArgs {
    /// Input frames; the first is the reference
    pub inputs: Vec<PathBuf>,

    /// TOML file with engine parameters
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Number of pyramid levels
    #[arg(long)]
    pub levels: Option<usize>,

    /// Per-level search radius in pixels
    #[arg(long)]
    pub search_radius: Option<i32>,

    /// Tile distance mapped to the maximal merge weight
    #[arg(long)]
    pub min_dist: Option<f32>,

    /// Tile distance mapped to zero merge weight
    #[arg(long)]
    pub max_dist: Option<f32>,

    /// Skip level normalization and gamma encode
    #[arg(long)]
    pub no_finish: bool,

    /// Linear gain applied during finishing
    #[arg(long, default_value = "1.0")]
    pub gain: f32,

    /// Output file path
    #[arg(short, long, default_value = "merged.png")]
    pub output: PathBuf,

    /// Also write an 8-bit preview PNG to this path
    #[arg(long)]
    pub preview: Option<PathBuf>,
}

fn load_config(args: &MergeArgs) -> Result<EngineConfig> {
    let mut config: EngineConfig = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            toml::from_str(&text).with_context(|| format!("parsing {}", path.display()))?
        }
        None => EngineConfig::default(),
    };

    if let Some(levels) = args.levels {
        config.align.pyramid_levels = levels;
    }
    if let Some(radius) = args.search_radius {
        config.align.search_radius = radius;
    }
    if let Some(min_dist) = args.min_dist {
        config.merge.min_dist = min_dist;
    }
    if let Some(max_dist) = args.max_dist {
        config.merge.max_dist = max_dist;
    }
    Ok(config)
}

pub fn run(args: &MergeArgs) -> Result<()> {
    if args.inputs.len() < 2 {
        bail!("need a reference frame and at least one alternate");
    }

    let config = load_config(args)?;

    let pb = ProgressBar::new(args.inputs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("Loading [{bar:40}] {pos}/{len}")?
            .progress_chars("=> "),
    );
    let mut frames = Vec::with_capacity(args.inputs.len());
    for path in &args.inputs {
        frames.push(load_frame(path).with_context(|| format!("reading {}", path.display()))?);
        pb.inc(1);
    }
    pb.finish();

    let burst = Burst::new(frames)?;
    println!(
        "Merging {} frames ({}x{})...",
        burst.len(),
        burst.width(),
        burst.height()
    );

    let merged = align_and_merge(&burst, &config)?;

    let result = if args.no_finish {
        merged
    } else {
        finish(
            &merged,
            &FinishConfig {
                gain: args.gain,
                ..Default::default()
            },
        )
    };

    save_frame(&result, &args.output)?;
    if let Some(preview) = &args.preview {
        save_preview(&result, preview)?;
    }
    println!(
        "{} saved to {}",
        style("Done:").green().bold(),
        args.output.display()
    );
    Ok(())
}
