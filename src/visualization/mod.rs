pub mod camera;
pub mod viewer;
