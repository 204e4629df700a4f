use crate::scene::node::SceneNode;
use log::{debug, warn};
use nalgebra::{Point3, Vector3};

/// Largest per-axis offset of a normalized node's center from the origin
/// before a corrective translation is applied.
pub const CENTER_TOLERANCE: f32 = 1e-3;

/// A normalized copy of a source node plus the parameters that produced it.
#[derive(Debug, Clone)]
pub struct Normalized {
    pub node: SceneNode,
    /// Center of the source bounds before any transform.
    pub original_center: Point3<f32>,
    /// Extents of the source bounds before any transform.
    pub original_size: Vector3<f32>,
    pub scale_factor: f32,
    /// Translation applied by the corrective pass, zero when none was needed.
    pub correction: Vector3<f32>,
}

/// Returns a copy of `source` centered at the origin whose largest dimension
/// equals `target_size`.
///
/// `None` means there is nothing to display yet: the source is absent, has no
/// geometric children, or none of its parts has decoded vertices. Callers
/// retry when their source changes.
pub fn normalize(source: Option<&SceneNode>, target_size: f32) -> Option<SceneNode> {
    normalize_with_report(source, target_size).map(|n| n.node)
}

/// Same as [`normalize`], also returning the applied center, scale and correction.
pub fn normalize_with_report(source: Option<&SceneNode>, target_size: f32) -> Option<Normalized> {
    normalize_with_tolerance(source, target_size, CENTER_TOLERANCE)
}

/// [`normalize_with_report`] with a caller-chosen centering tolerance for the
/// corrective pass.
pub fn normalize_with_tolerance(
    source: Option<&SceneNode>,
    target_size: f32,
    tolerance: f32,
) -> Option<Normalized> {
    let source = source?;
    if !source.has_geometry_children() {
        return None;
    }
    if !(target_size.is_finite() && target_size > 0.0) {
        warn!(
            "Refusing to normalize '{}' to non-positive target size {}",
            source.name, target_size
        );
        return None;
    }

    // The source is shared with other previews; only the copy is transformed.
    let mut node = source.clone();

    let bounds = node.world_bounds();
    if bounds.is_empty() {
        debug!("'{}' has no decoded geometry yet", node.name);
        return None;
    }

    let center = bounds.center();
    let size = bounds.size();
    node.position -= center.coords;

    let max_dimension = bounds.max_dimension();
    let scale_factor = if max_dimension > 0.0 {
        target_size / max_dimension
    } else {
        1.0
    };
    node.scale *= scale_factor;

    // Scaling about a pivot other than the bounds center shifts the bounds again.
    let correction = recenter(&mut node, tolerance);

    debug!(
        "Normalized '{}': center {:?}, size {:?}, scale {:.4}, correction {:?}",
        node.name, center, size, scale_factor, correction
    );

    Some(Normalized {
        node,
        original_center: center,
        original_size: size,
        scale_factor,
        correction,
    })
}

/// Moves `node` so its bounds are centered at the origin if any axis is off by
/// more than `tolerance`. Returns the offset that was removed.
///
/// Idempotent: a second call on the result removes nothing.
pub fn recenter(node: &mut SceneNode, tolerance: f32) -> Vector3<f32> {
    let center = node.world_bounds().center();
    if center.coords.iter().any(|c| c.abs() > tolerance) {
        node.position -= center.coords;
        center.coords
    } else {
        Vector3::zeros()
    }
}
