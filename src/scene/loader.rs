use crate::io::obj_loader::load_obj;
use crate::scene::node::SceneNode;
use log::{info, warn};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Load state of one cached asset.
#[derive(Debug, Clone)]
pub enum AssetState {
    /// Requested but not decoded yet.
    Pending,
    Ready(Arc<SceneNode>),
    Failed(String),
}

impl AssetState {
    pub fn ready(&self) -> Option<&Arc<SceneNode>> {
        match self {
            AssetState::Ready(node) => Some(node),
            _ => None,
        }
    }
}

/// Loaded assets keyed by their path relative to `root`.
///
/// Ready assets are handed out as `Arc<SceneNode>` and never modified in
/// place. Publishing a key again swaps in a new `Arc`, which previews see as a
/// new source.
#[derive(Debug)]
pub struct AssetCache {
    root: PathBuf,
    entries: HashMap<String, AssetState>,
}

impl AssetCache {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            entries: HashMap::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Marks `key` as wanted. Existing entries are left alone.
    pub fn request(&mut self, key: &str) -> &AssetState {
        self.entries
            .entry(key.to_string())
            .or_insert(AssetState::Pending)
    }

    /// Loads `key` from disk, replacing any previous entry.
    pub fn load(&mut self, key: &str) -> &AssetState {
        let path = self.root.join(key);
        let state = match load_obj(&path) {
            Ok(node) => AssetState::Ready(Arc::new(node)),
            Err(e) => {
                warn!("Failed to load asset '{}': {}", key, e);
                AssetState::Failed(e.to_string())
            }
        };
        self.entries.insert(key.to_string(), state);
        &self.entries[key]
    }

    /// Loads every pending entry. Returns how many became ready.
    pub fn load_pending(&mut self) -> usize {
        let pending: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, state)| matches!(state, AssetState::Pending))
            .map(|(key, _)| key.clone())
            .collect();

        let mut ready = 0;
        for key in pending {
            if self.load(&key).ready().is_some() {
                ready += 1;
            }
        }
        if ready > 0 {
            info!("{} asset(s) ready", ready);
        }
        ready
    }

    /// Publishes a node decoded elsewhere.
    pub fn insert(&mut self, key: &str, node: SceneNode) -> Arc<SceneNode> {
        let node = Arc::new(node);
        self.entries
            .insert(key.to_string(), AssetState::Ready(Arc::clone(&node)));
        node
    }

    pub fn state(&self, key: &str) -> Option<&AssetState> {
        self.entries.get(key)
    }

    /// The asset if it is ready.
    pub fn get(&self, key: &str) -> Option<&Arc<SceneNode>> {
        self.entries.get(key).and_then(AssetState::ready)
    }

    pub fn evict(&mut self, key: &str) -> Option<AssetState> {
        self.entries.remove(key)
    }
}
