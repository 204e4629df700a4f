use nalgebra::{Matrix4, Point2, Point3, Vector3, Vector4};

//=================================
// Transform Matrix Factory
//=================================

/// Factory for the homogeneous matrices used by scene nodes and thumbnails.
/// Right-handed, column vectors.
pub struct TransformFactory;

#[rustfmt::skip]
impl TransformFactory {
    /// Creates a rotation matrix around the X-axis.
    pub fn rotation_x(angle_rad: f32) -> Matrix4<f32> {
        let c = angle_rad.cos();
        let s = angle_rad.sin();
        Matrix4::new(
            1.0, 0.0, 0.0, 0.0,
            0.0, c,  -s,   0.0,
            0.0, s,   c,   0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Creates a rotation matrix around the Y-axis.
    pub fn rotation_y(angle_rad: f32) -> Matrix4<f32> {
        let c = angle_rad.cos();
        let s = angle_rad.sin();
        Matrix4::new(
            c,   0.0, s,   0.0,
            0.0, 1.0, 0.0, 0.0,
           -s,   0.0, c,   0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Creates a rotation matrix around the Z-axis.
    pub fn rotation_z(angle_rad: f32) -> Matrix4<f32> {
        let c = angle_rad.cos();
        let s = angle_rad.sin();
        Matrix4::new(
            c,  -s,   0.0, 0.0,
            s,   c,   0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Euler rotation (radians), applied X then Y then Z in local space.
    pub fn rotation_euler(euler: &Vector3<f32>) -> Matrix4<f32> {
        Self::rotation_x(euler.x) * Self::rotation_y(euler.y) * Self::rotation_z(euler.z)
    }

    /// Creates a translation matrix.
    pub fn translation(translation: &Vector3<f32>) -> Matrix4<f32> {
        Matrix4::new(
            1.0, 0.0, 0.0, translation.x,
            0.0, 1.0, 0.0, translation.y,
            0.0, 0.0, 1.0, translation.z,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Creates a non-uniform scaling matrix.
    pub fn scaling_nonuniform(scale: &Vector3<f32>) -> Matrix4<f32> {
        Matrix4::new(
            scale.x, 0.0,     0.0,     0.0,
            0.0,     scale.y, 0.0,     0.0,
            0.0,     0.0,     scale.z, 0.0,
            0.0,     0.0,     0.0,     1.0,
        )
    }

    /// Local node matrix: `T * R * S`.
    pub fn compose(
        position: &Vector3<f32>,
        rotation: &Vector3<f32>,
        scale: &Vector3<f32>,
    ) -> Matrix4<f32> {
        Self::translation(position) * Self::rotation_euler(rotation) * Self::scaling_nonuniform(scale)
    }

    /// Creates an Orthographic Projection matrix (Right-Handed).
    pub fn orthographic(
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        near: f32,
        far: f32,
    ) -> Matrix4<f32> {
        let rl = 1.0 / (right - left);
        let tb = 1.0 / (top - bottom);
        let nf = 1.0 / (near - far);

        Matrix4::new(
            2.0 * rl,      0.0,           0.0,          -(right + left) * rl,
            0.0,           2.0 * tb,      0.0,          -(top + bottom) * tb,
            0.0,           0.0,           2.0 * nf,     (far + near) * nf,
            0.0,           0.0,           0.0,          1.0,
        )
    }
}

//=================================
// Core Transformation Functions
//=================================

/// Clip space -> NDC. Degenerate `w` maps to the origin.
#[inline]
pub fn apply_perspective_division(clip: &Vector4<f32>) -> Point3<f32> {
    let w = clip.w;
    if w.abs() > 1e-6 {
        Point3::new(clip.x / w, clip.y / w, clip.z / w)
    } else {
        Point3::origin()
    }
}

/// Converts NDC coordinates to Screen coordinates (Viewport Transform).
/// Note: Y-axis is flipped (NDC +Y is up, Screen +Y is down).
#[inline]
pub fn ndc_to_screen(ndc_x: f32, ndc_y: f32, width: f32, height: f32) -> Point2<f32> {
    Point2::new(
        (ndc_x + 1.0) * 0.5 * width,
        (1.0 - (ndc_y + 1.0) * 0.5) * height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn compose_applies_scale_then_rotation_then_translation() {
        let m = TransformFactory::compose(
            &Vector3::new(1.0, 0.0, 0.0),
            &Vector3::new(0.0, FRAC_PI_2, 0.0),
            &Vector3::new(2.0, 2.0, 2.0),
        );
        // (1,0,0) -> scaled (2,0,0) -> rotated about Y (0,0,-2) -> translated (1,0,-2)
        let p = m.transform_point(&Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(p.x, 1.0, epsilon = 1e-6);
        assert_relative_eq!(p.y, 0.0, epsilon = 1e-6);
        assert_relative_eq!(p.z, -2.0, epsilon = 1e-6);
    }

    #[test]
    fn orthographic_maps_frame_to_ndc() {
        let proj = TransformFactory::orthographic(-2.0, 2.0, -1.0, 1.0, 0.1, 10.0);
        let clip = proj * Vector4::new(2.0, -1.0, -1.0, 1.0);
        let ndc = apply_perspective_division(&clip);
        assert_relative_eq!(ndc.x, 1.0, epsilon = 1e-6);
        assert_relative_eq!(ndc.y, -1.0, epsilon = 1e-6);

        let screen = ndc_to_screen(ndc.x, ndc.y, 100.0, 50.0);
        assert_relative_eq!(screen.x, 100.0, epsilon = 1e-4);
        assert_relative_eq!(screen.y, 50.0, epsilon = 1e-4);
    }
}
