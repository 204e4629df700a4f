use nalgebra::{Point3, Vector3};

/// Axis-aligned bounding box.
///
/// A box with no points added is empty: `min` sits at `f32::MAX` and `max` at
/// `f32::MIN` on every axis. Its center is the origin and its size is zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Point3<f32>,
    pub max: Point3<f32>,
}

impl Default for Aabb {
    fn default() -> Self {
        Self::empty()
    }
}

impl Aabb {
    pub fn new(min: Point3<f32>, max: Point3<f32>) -> Self {
        Self { min, max }
    }

    pub fn empty() -> Self {
        Self {
            min: Point3::new(f32::MAX, f32::MAX, f32::MAX),
            max: Point3::new(f32::MIN, f32::MIN, f32::MIN),
        }
    }

    pub fn from_points<'a, I>(points: I) -> Self
    where
        I: IntoIterator<Item = &'a Point3<f32>>,
    {
        let mut aabb = Self::empty();
        for p in points {
            aabb.expand(p);
        }
        aabb
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    #[inline]
    pub fn expand(&mut self, p: &Point3<f32>) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.min.z = self.min.z.min(p.z);

        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
        self.max.z = self.max.z.max(p.z);
    }

    /// Smallest box containing both boxes. Empty boxes are neutral.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: self.min.inf(&other.min),
            max: self.max.sup(&other.max),
        }
    }

    pub fn center(&self) -> Point3<f32> {
        if self.is_empty() {
            return Point3::origin();
        }
        nalgebra::center(&self.min, &self.max)
    }

    /// Extent along each axis.
    pub fn size(&self) -> Vector3<f32> {
        if self.is_empty() {
            return Vector3::zeros();
        }
        self.max - self.min
    }

    pub fn max_dimension(&self) -> f32 {
        let size = self.size();
        size.x.max(size.y).max(size.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn empty_box_has_no_extent() {
        let aabb = Aabb::empty();
        assert!(aabb.is_empty());
        assert_eq!(aabb.center(), Point3::origin());
        assert_eq!(aabb.size(), Vector3::zeros());
        assert_eq!(aabb.max_dimension(), 0.0);
    }

    #[test]
    fn single_point_is_not_empty() {
        let aabb = Aabb::from_points(&[Point3::new(1.0, 2.0, 3.0)]);
        assert!(!aabb.is_empty());
        assert_eq!(aabb.center(), Point3::new(1.0, 2.0, 3.0));
        assert_eq!(aabb.max_dimension(), 0.0);
    }

    #[test]
    fn center_and_size() {
        let aabb = Aabb::from_points(&[Point3::new(-1.0, 0.0, -2.0), Point3::new(3.0, 4.0, 2.0)]);
        let center = aabb.center();
        assert_relative_eq!(center.x, 1.0);
        assert_relative_eq!(center.y, 2.0);
        assert_relative_eq!(center.z, 0.0);
        assert_eq!(aabb.size(), Vector3::new(4.0, 4.0, 4.0));
    }

    #[test]
    fn union_ignores_empty() {
        let a = Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0));
        assert_eq!(a.union(&Aabb::empty()), a);
        assert_eq!(Aabb::empty().union(&a), a);

        let b = Aabb::new(Point3::new(-2.0, 0.5, 0.5), Point3::new(0.0, 3.0, 0.5));
        let u = a.union(&b);
        assert_eq!(u.min, Point3::new(-2.0, 0.0, 0.0));
        assert_eq!(u.max, Point3::new(1.0, 3.0, 1.0));
    }
}
