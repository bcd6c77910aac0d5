//! Data-parallel ray tracer over a small fixed scene.
//!
//! Geometry and materials live in fixed-capacity registries of closed enums
//! ([`primitive::GeometryRegistry`], [`material::MaterialRegistry`]) that are built once
//! and then shared read-only by the render workers. [`renderer::Renderer`] maps each
//! pixel of a [`core::film::Film`] to a camera ray and packs the color produced by one
//! of four shading strategies.

pub mod camera;
pub mod core;
pub mod loader;
pub mod material;
pub mod primitive;
pub mod renderer;
