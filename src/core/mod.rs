pub mod color;
pub mod film;
pub mod intersection;
pub mod loader;
pub mod ray;
pub mod scene;
pub mod store;
