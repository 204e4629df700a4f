use crate::catalog::PreviewProfile;
use crate::scene::node::SceneNode;
use crate::scene::normalize::normalize_with_tolerance;
use log::debug;
use std::sync::Arc;

/// A display surface for one catalog asset.
///
/// Holds the last source it was synced against and the normalized copy made
/// from it. Normalization only re-runs when the source `Arc` changes.
#[derive(Debug)]
pub struct Preview {
    profile: PreviewProfile,
    source: Option<Arc<SceneNode>>,
    /// Swaying group with the normalized asset as its only child.
    display: Option<SceneNode>,
}

impl Preview {
    pub fn new(profile: PreviewProfile) -> Self {
        Self {
            profile,
            source: None,
            display: None,
        }
    }

    pub fn profile(&self) -> &PreviewProfile {
        &self.profile
    }

    /// Points the preview at `source`. Returns `true` if normalization re-ran.
    pub fn sync(&mut self, source: Option<&Arc<SceneNode>>) -> bool {
        let unchanged = match (&self.source, source) {
            (Some(current), Some(next)) => Arc::ptr_eq(current, next),
            (None, None) => true,
            _ => false,
        };
        if unchanged {
            return false;
        }

        self.source = source.cloned();
        let profile = &self.profile;
        self.display = normalize_with_tolerance(
            source.map(|s| s.as_ref()),
            profile.target_size,
            profile.tolerance,
        )
        .map(|normalized| {
            let mut asset = normalized.node;
            asset.position += profile.offset;
            let mut group = SceneNode::group(format!("preview:{}", profile.kind));
            group.add_child(asset);
            group
        });

        if self.display.is_none() {
            debug!("Preview '{}' is waiting for geometry", self.profile.kind);
        }
        true
    }

    pub fn is_ready(&self) -> bool {
        self.display.is_some()
    }

    /// The normalized asset, including the profile's display offset.
    pub fn content(&self) -> Option<&SceneNode> {
        self.display.as_ref().and_then(|group| group.children.first())
    }

    /// Advances the sway animation and returns the node to draw, if any.
    pub fn frame(&mut self, elapsed_secs: f32) -> Option<&SceneNode> {
        let amplitude = self.profile.sway_amplitude;
        let frequency = self.profile.sway_frequency;
        let group = self.display.as_mut()?;
        group.rotation.y = (elapsed_secs * frequency).sin() * amplitude;
        Some(&*group)
    }
}
