use nalgebra::{Matrix4, Point3, Vector2, Vector3};

/// A single vertex of an imported mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// Position in local object space.
    pub position: Point3<f32>,
    /// Surface normal, carried through untouched by the normalizer.
    pub normal: Vector3<f32>,
    /// Texture coordinates (UV).
    pub texcoord: Vector2<f32>,
}

impl Vertex {
    pub fn new(position: Point3<f32>, normal: Vector3<f32>, texcoord: Vector2<f32>) -> Self {
        Self {
            position,
            normal,
            texcoord,
        }
    }

    /// Vertex at `position` with a +Y normal and zero UV.
    pub fn at(x: f32, y: f32, z: f32) -> Self {
        Self::new(Point3::new(x, y, z), Vector3::y(), Vector2::zeros())
    }

    /// Position of this vertex after applying a homogeneous world matrix.
    #[inline]
    pub fn world_position(&self, world: &Matrix4<f32>) -> Point3<f32> {
        world.transform_point(&self.position)
    }
}
