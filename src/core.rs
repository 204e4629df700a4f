pub mod bounds;
pub mod geometry;
pub mod math;
