use crate::core::bounds::Aabb;
use crate::core::geometry::Vertex;
use nalgebra::{Matrix4, Point3, Vector2, Vector3};

/// Triangle geometry of one sub-part of an imported asset.
///
/// Meshes are shared between every node cloned from the same source through
/// `Arc<Mesh>` and are never mutated after loading.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    /// List of vertices.
    pub vertices: Vec<Vertex>,
    /// List of indices defining triangles (3 indices per triangle).
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    /// A mesh whose geometry has not been decoded yet.
    pub fn empty() -> Self {
        Self::new(Vec::new(), Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Bounds of the vertices after applying `world`.
    pub fn bounds_with(&self, world: &Matrix4<f32>) -> Aabb {
        let mut aabb = Aabb::empty();
        for vertex in &self.vertices {
            aabb.expand(&vertex.world_position(world));
        }
        aabb
    }

    /// Iterates the triangles as index triples, skipping a trailing partial one.
    pub fn triangles(&self) -> impl Iterator<Item = [usize; 3]> + '_ {
        self.indices
            .chunks_exact(3)
            .map(|t| [t[0] as usize, t[1] as usize, t[2] as usize])
    }

    /// Axis-aligned box spanning `min..max`, 8 corners and 12 triangles.
    pub fn create_box(min: Point3<f32>, max: Point3<f32>) -> Self {
        let corners = [
            Point3::new(min.x, min.y, min.z),
            Point3::new(max.x, min.y, min.z),
            Point3::new(max.x, max.y, min.z),
            Point3::new(min.x, max.y, min.z),
            Point3::new(min.x, min.y, max.z),
            Point3::new(max.x, min.y, max.z),
            Point3::new(max.x, max.y, max.z),
            Point3::new(min.x, max.y, max.z),
        ];
        let center = nalgebra::center(&min, &max);
        let vertices = corners
            .iter()
            .map(|&p| {
                let n = (p - center).try_normalize(1e-6).unwrap_or_else(Vector3::y);
                Vertex::new(p, n, Vector2::zeros())
            })
            .collect();

        #[rustfmt::skip]
        let indices = vec![
            0, 2, 1, 0, 3, 2, // -Z
            4, 5, 6, 4, 6, 7, // +Z
            0, 1, 5, 0, 5, 4, // -Y
            3, 7, 6, 3, 6, 2, // +Y
            0, 4, 7, 0, 7, 3, // -X
            1, 2, 6, 1, 6, 5, // +X
        ];

        Self::new(vertices, indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_bounds_match_corners() {
        let mesh = Mesh::create_box(Point3::new(-1.0, 0.0, -2.0), Point3::new(3.0, 4.0, 2.0));
        let aabb = mesh.bounds_with(&Matrix4::identity());
        assert_eq!(aabb.min, Point3::new(-1.0, 0.0, -2.0));
        assert_eq!(aabb.max, Point3::new(3.0, 4.0, 2.0));
        assert_eq!(mesh.triangles().count(), 12);
    }

    #[test]
    fn empty_mesh_has_empty_bounds() {
        let mesh = Mesh::empty();
        assert!(mesh.is_empty());
        assert!(mesh.bounds_with(&Matrix4::identity()).is_empty());
    }
}
