use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Catalog preview tooling.
#[derive(Parser, Debug)]
#[command(name = "showcase")]
#[command(about = "Normalize and inspect 3D product previews")]
pub struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Center and scale an OBJ asset and report the transform
    Normalize {
        /// OBJ file to normalize
        obj: PathBuf,

        /// Use the target size configured for this preview (product slug or `hero`)
        #[arg(long, conflicts_with = "target_size")]
        category: Option<String>,

        /// Largest dimension of the result, in scene units
        #[arg(long)]
        target_size: Option<f32>,

        /// Write a front-view silhouette PNG of the result
        #[arg(long, value_name = "PNG")]
        thumbnail: Option<PathBuf>,
    },

    /// List catalog products and their preview profiles
    Catalog,

    /// Check an address the way the quote form does
    CheckEmail { email: String },
}
