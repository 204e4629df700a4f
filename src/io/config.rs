use crate::catalog::{PreviewKind, PreviewProfile};
use crate::error::Result;
use crate::scene::normalize::CENTER_TOLERANCE;
use log::warn;
use nalgebra::Vector3;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub normalize: NormalizeConfig,
    #[serde(default)]
    pub assets: AssetConfig,
    #[serde(default)]
    pub thumbnail: ThumbnailConfig,
    #[serde(default)]
    pub products: Vec<ProductConfig>,
}

#[derive(Debug, Deserialize)]
pub struct NormalizeConfig {
    /// Largest per-axis center offset left uncorrected after scaling.
    #[serde(default = "default_tolerance")]
    pub tolerance: f32,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            tolerance: default_tolerance(),
        }
    }
}

fn default_tolerance() -> f32 {
    CENTER_TOLERANCE
}

#[derive(Debug, Deserialize)]
pub struct AssetConfig {
    #[serde(default = "default_asset_root")]
    pub root: String,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            root: default_asset_root(),
        }
    }
}

fn default_asset_root() -> String {
    "assets".to_string()
}

#[derive(Debug, Deserialize)]
pub struct ThumbnailConfig {
    #[serde(default = "default_thumbnail_size")]
    pub width: usize,
    #[serde(default = "default_thumbnail_size")]
    pub height: usize,
    #[serde(default = "default_background")]
    pub background: [u8; 3],
    #[serde(default = "default_foreground")]
    pub foreground: [u8; 3],
}

impl Default for ThumbnailConfig {
    fn default() -> Self {
        Self {
            width: default_thumbnail_size(),
            height: default_thumbnail_size(),
            background: default_background(),
            foreground: default_foreground(),
        }
    }
}

fn default_thumbnail_size() -> usize {
    512
}
fn default_background() -> [u8; 3] {
    [240, 253, 250]
}
fn default_foreground() -> [u8; 3] {
    [17, 94, 89]
}

/// Per-preview override. `category` is a product slug or `hero`.
#[derive(Debug, Deserialize)]
pub struct ProductConfig {
    pub category: String,
    pub asset: Option<String>,
    pub target_size: Option<f32>,
    pub offset: Option<[f32; 3]>,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(content)?;
        let tolerance = config.normalize.tolerance;
        if !(tolerance.is_finite() && tolerance >= 0.0) {
            warn!("Ignoring invalid normalize tolerance {}", tolerance);
            config.normalize.tolerance = default_tolerance();
        }
        for product in &config.products {
            product.category.parse::<PreviewKind>()?;
        }
        Ok(config)
    }

    /// Default profile for `kind` with any configured overrides applied.
    pub fn profile(&self, kind: PreviewKind) -> PreviewProfile {
        let mut profile = PreviewProfile::default_for(kind);
        profile.tolerance = self.normalize.tolerance;
        let overrides = self
            .products
            .iter()
            .filter(|p| p.category.parse::<PreviewKind>().ok() == Some(kind));

        for o in overrides {
            if let Some(asset) = &o.asset {
                profile.asset = asset.clone();
            }
            if let Some(size) = o.target_size {
                if size.is_finite() && size > 0.0 {
                    profile.target_size = size;
                } else {
                    warn!("Ignoring invalid target_size {} for '{}'", size, kind);
                }
            }
            if let Some(offset) = o.offset {
                profile.offset = Vector3::from(offset);
            }
        }
        profile
    }
}
