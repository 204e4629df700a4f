pub mod gallery;
pub mod loader;
pub mod mesh;
pub mod node;
pub mod normalize;
pub mod preview;
