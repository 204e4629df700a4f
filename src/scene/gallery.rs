use crate::catalog::PreviewKind;
use crate::io::config::Config;
use crate::scene::loader::AssetCache;
use crate::scene::node::SceneNode;
use crate::scene::preview::Preview;
use log::info;
use std::collections::BTreeMap;

/// Every preview surface on the page plus the asset cache feeding them.
#[derive(Debug)]
pub struct Gallery {
    pub assets: AssetCache,
    previews: BTreeMap<PreviewKind, Preview>,
}

impl Gallery {
    /// One preview per catalog entry, profiles taken from `config`.
    /// Nothing is loaded yet; every asset starts out pending.
    pub fn from_config(config: &Config) -> Self {
        let mut assets = AssetCache::new(&config.assets.root);
        let previews: BTreeMap<_, _> = PreviewKind::all()
            .map(|kind| {
                let profile = config.profile(kind);
                assets.request(&profile.asset);
                (kind, Preview::new(profile))
            })
            .collect();

        info!("Gallery initialized with {} previews.", previews.len());
        Self { assets, previews }
    }

    /// Points every preview at the current cache entry for its asset.
    /// Returns how many previews re-normalized.
    pub fn refresh(&mut self) -> usize {
        let assets = &self.assets;
        self.previews
            .values_mut()
            .map(|preview| {
                let source = assets.get(&preview.profile().asset);
                preview.sync(source)
            })
            .filter(|&changed| changed)
            .count()
    }

    /// Loads pending assets from disk, then refreshes.
    pub fn load_and_refresh(&mut self) -> usize {
        self.assets.load_pending();
        self.refresh()
    }

    pub fn preview(&self, kind: PreviewKind) -> Option<&Preview> {
        self.previews.get(&kind)
    }

    /// Advances the sway of one preview and returns what it displays.
    pub fn frame(&mut self, kind: PreviewKind, elapsed_secs: f32) -> Option<&SceneNode> {
        self.previews.get_mut(&kind)?.frame(elapsed_secs)
    }

    pub fn ready_count(&self) -> usize {
        self.previews.values().filter(|p| p.is_ready()).count()
    }
}
