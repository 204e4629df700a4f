use crate::catalog::{PreviewKind, ProductCategory, find_product};
use crate::contact::validate_email;
use crate::error::{Error, Result};
use crate::io::cli::{Cli, Command};
use crate::io::config::Config;
use crate::io::obj_loader::load_obj;
use crate::io::thumbnail::{ThumbnailOptions, save_thumbnail};
use crate::scene::normalize::normalize_with_tolerance;
use log::info;
use std::path::Path;
use std::time::Instant;

/// Target size used when neither a category nor an explicit size is given.
pub const DEFAULT_TARGET_SIZE: f32 = 2.0;

pub fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => {
            info!("Loading config: {}", path.display());
            Config::load(path)?
        }
        None => Config::default(),
    };

    match cli.command {
        Command::Normalize {
            obj,
            category,
            target_size,
            thumbnail,
        } => {
            let target_size = match (category, target_size) {
                (Some(slug), _) => config.profile(slug.parse::<PreviewKind>()?).target_size,
                (None, Some(size)) => size,
                (None, None) => DEFAULT_TARGET_SIZE,
            };
            run_normalize(&config, &obj, target_size, thumbnail.as_deref())
        }
        Command::Catalog => {
            run_catalog(&config);
            Ok(())
        }
        Command::CheckEmail { email } => {
            run_check_email(&email);
            Ok(())
        }
    }
}

/// Loads one asset, normalizes it and prints the applied transform.
pub fn run_normalize(
    config: &Config,
    obj: &Path,
    target_size: f32,
    thumbnail: Option<&Path>,
) -> Result<()> {
    if !(target_size.is_finite() && target_size > 0.0) {
        return Err(Error::InvalidTargetSize(target_size));
    }

    let start_time = Instant::now();
    let source = load_obj(obj)?;

    let report = normalize_with_tolerance(Some(&source), target_size, config.normalize.tolerance)
        .ok_or_else(|| Error::NotReady(obj.display().to_string()))?;
    info!("Normalized in {:.2?}", start_time.elapsed());

    let bounds = report.node.world_bounds();
    let c = report.original_center;
    let s = report.original_size;
    println!("asset:          {}", obj.display());
    println!("parts:          {}", source.children.len());
    println!("vertices:       {}", source.vertex_count());
    println!("original center ({:.4}, {:.4}, {:.4})", c.x, c.y, c.z);
    println!("original size   ({:.4}, {:.4}, {:.4})", s.x, s.y, s.z);
    println!("scale factor    {:.6}", report.scale_factor);
    println!(
        "correction      ({:.6}, {:.6}, {:.6})",
        report.correction.x, report.correction.y, report.correction.z
    );
    println!(
        "result size     {:.4} (target {:.4})",
        bounds.max_dimension(),
        target_size
    );

    if let Some(path) = thumbnail {
        let options = ThumbnailOptions::from_config(&config.thumbnail, target_size);
        save_thumbnail(&report.node, &options, path)?;
    }
    Ok(())
}

pub fn run_catalog(config: &Config) {
    let hero = config.profile(PreviewKind::Hero);
    println!("{:<10} {:<12} {:>6}  {}", "key", "name", "size", "asset");
    println!(
        "{:<10} {:<12} {:>6.2}  {}",
        "hero", "Hero", hero.target_size, hero.asset
    );
    for category in ProductCategory::ALL {
        let profile = config.profile(PreviewKind::Product(category));
        let name = find_product(category).map_or(category.display_name(), |p| p.name);
        println!(
            "{:<10} {:<12} {:>6.2}  {}",
            category.slug(),
            name,
            profile.target_size,
            profile.asset
        );
    }
}

pub fn run_check_email(email: &str) {
    match validate_email(email) {
        Ok(()) => println!("{}: ok", email.trim()),
        Err(e) => println!("{}: {}", email.trim(), e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;

    #[test]
    fn rejects_bad_target_size_before_loading() {
        let config = Config::default();
        for size in [-1.0, 0.0, f32::INFINITY, f32::NAN] {
            let err = run_normalize(&config, Path::new("missing.obj"), size, None).unwrap_err();
            assert!(matches!(err, Error::InvalidTargetSize(_)), "{size}: {err}");
        }
    }

    #[test]
    fn cli_target_size_is_validated() {
        let cli = Cli::parse_from(["showcase", "normalize", "a.obj", "--target-size=-1"]);
        assert!(matches!(run(cli), Err(Error::InvalidTargetSize(s)) if s == -1.0));
    }

    #[test]
    fn normalizes_obj_from_disk() {
        let dir = std::env::temp_dir().join(format!("showcase-app-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let obj = dir.join("cube.obj");
        fs::write(
            &obj,
            "o cube\nv 0 0 0\nv 4 0 0\nv 4 2 0\nv 0 2 1\nf 1 2 3\nf 1 3 4\n",
        )
        .unwrap();

        assert!(run_normalize(&Config::default(), &obj, 2.0, None).is_ok());
        fs::remove_dir_all(dir).ok();
    }
}
