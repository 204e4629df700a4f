use crate::core::bounds::Aabb;
use crate::core::math::transform::TransformFactory;
use crate::scene::mesh::Mesh;
use nalgebra::{Matrix4, Vector3};
use rayon::prelude::*;
use std::sync::Arc;

/// A node in an asset's scene graph.
///
/// `Clone` copies the node tree but shares geometry through `Arc<Mesh>`, so a
/// clone can be repositioned and rescaled without touching the source asset.
#[derive(Debug, Clone)]
pub struct SceneNode {
    pub name: String,
    pub position: Vector3<f32>,
    /// Euler angles in radians, applied X then Y then Z.
    pub rotation: Vector3<f32>,
    pub scale: Vector3<f32>,
    pub mesh: Option<Arc<Mesh>>,
    pub children: Vec<SceneNode>,
}

impl SceneNode {
    /// An empty group with an identity transform.
    pub fn group(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            position: Vector3::zeros(),
            rotation: Vector3::zeros(),
            scale: Vector3::new(1.0, 1.0, 1.0),
            mesh: None,
            children: Vec::new(),
        }
    }

    pub fn with_mesh(name: impl Into<String>, mesh: Mesh) -> Self {
        Self::with_shared_mesh(name, Arc::new(mesh))
    }

    pub fn with_shared_mesh(name: impl Into<String>, mesh: Arc<Mesh>) -> Self {
        Self {
            mesh: Some(mesh),
            ..Self::group(name)
        }
    }

    pub fn add_child(&mut self, child: SceneNode) {
        self.children.push(child);
    }

    pub fn local_matrix(&self) -> Matrix4<f32> {
        TransformFactory::compose(&self.position, &self.rotation, &self.scale)
    }

    /// Whether the node carries any geometric sub-part, directly or as children.
    pub fn has_geometry_children(&self) -> bool {
        self.mesh.is_some() || !self.children.is_empty()
    }

    /// Bounds of every vertex under this node, in the node's parent space.
    pub fn world_bounds(&self) -> Aabb {
        self.bounds_under(&Matrix4::identity())
    }

    fn bounds_under(&self, parent: &Matrix4<f32>) -> Aabb {
        let world = parent * self.local_matrix();
        let own = self
            .mesh
            .as_ref()
            .map(|mesh| mesh.bounds_with(&world))
            .unwrap_or_default();

        self.children
            .par_iter()
            .map(|child| child.bounds_under(&world))
            .reduce(Aabb::empty, |a, b| a.union(&b))
            .union(&own)
    }

    pub fn vertex_count(&self) -> usize {
        let own = self.mesh.as_ref().map_or(0, |m| m.vertices.len());
        own + self.children.iter().map(SceneNode::vertex_count).sum::<usize>()
    }

    /// Visits every mesh under this node with its accumulated world matrix.
    pub fn visit_meshes<F>(&self, f: &mut F)
    where
        F: FnMut(&Mesh, &Matrix4<f32>),
    {
        self.visit_under(&Matrix4::identity(), f);
    }

    fn visit_under<F>(&self, parent: &Matrix4<f32>, f: &mut F)
    where
        F: FnMut(&Mesh, &Matrix4<f32>),
    {
        let world = parent * self.local_matrix();
        if let Some(mesh) = &self.mesh {
            f(mesh, &world);
        }
        for child in &self.children {
            child.visit_under(&world, f);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Point3;

    fn unit_box() -> Mesh {
        Mesh::create_box(Point3::new(-0.5, -0.5, -0.5), Point3::new(0.5, 0.5, 0.5))
    }

    #[test]
    fn bounds_follow_nested_transforms() {
        let mut child = SceneNode::with_mesh("part", unit_box());
        child.position = Vector3::new(2.0, 0.0, 0.0);

        let mut root = SceneNode::group("root");
        root.scale = Vector3::new(2.0, 2.0, 2.0);
        root.position = Vector3::new(0.0, 1.0, 0.0);
        root.add_child(child);

        let aabb = root.world_bounds();
        assert_relative_eq!(aabb.min.x, 3.0);
        assert_relative_eq!(aabb.max.x, 5.0);
        assert_relative_eq!(aabb.min.y, 0.0);
        assert_relative_eq!(aabb.max.y, 2.0);
    }

    #[test]
    fn bounds_union_over_children() {
        let mut left = SceneNode::with_mesh("left", unit_box());
        left.position.x = -3.0;
        let mut right = SceneNode::with_mesh("right", unit_box());
        right.position.x = 3.0;

        let mut root = SceneNode::group("root");
        root.add_child(left);
        root.add_child(right);

        let aabb = root.world_bounds();
        assert_relative_eq!(aabb.min.x, -3.5);
        assert_relative_eq!(aabb.max.x, 3.5);
        assert_eq!(root.vertex_count(), 16);
    }

    #[test]
    fn clone_shares_geometry() {
        let root = SceneNode::with_mesh("root", unit_box());
        let mut copy = root.clone();
        copy.position.x = 10.0;

        let (a, b) = (root.mesh.as_ref().unwrap(), copy.mesh.as_ref().unwrap());
        assert!(Arc::ptr_eq(a, b));
        assert_eq!(root.position.x, 0.0);
    }

    #[test]
    fn group_without_children_has_no_geometry() {
        let root = SceneNode::group("root");
        assert!(!root.has_geometry_children());
        assert!(root.world_bounds().is_empty());
    }

    #[test]
    fn visit_meshes_passes_world_matrix() {
        let mut child = SceneNode::with_mesh("part", unit_box());
        child.position = Vector3::new(0.0, 0.0, 5.0);
        let mut root = SceneNode::group("root");
        root.add_child(child);

        let mut visited = Vec::new();
        root.visit_meshes(&mut |_: &Mesh, world: &Matrix4<f32>| {
            visited.push(world.transform_point(&Point3::origin()))
        });
        assert_eq!(visited, vec![Point3::new(0.0, 0.0, 5.0)]);
    }
}
