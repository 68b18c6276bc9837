use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use burst_core::io::load_frame;

#[derive(Args)]
pub struct InfoArgs {
    /// Input frame files
    pub files: Vec<PathBuf>,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    for path in &args.files {
        let frame =
            load_frame(path).with_context(|| format!("reading {}", path.display()))?;

        println!("File:        {}", path.display());
        println!("Dimensions:  {}x{}", frame.width(), frame.height());
        println!("Bit depth:   {}", frame.original_bit_depth);

        let mb = (frame.width() * frame.height() * 2) as f64 / (1024.0 * 1024.0);
        println!("Data size:   {:.1} MB", mb);
        println!();
    }
    Ok(())
}
