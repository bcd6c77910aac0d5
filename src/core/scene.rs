use crate::{
    core::color::Color,
    material::{Checker, Material, MaterialRegistry, Phong},
    primitive::{Geometry, GeometryRegistry, GeometryT, Plane, Sphere},
};

/// Geometry and materials of one render, read-only once built.
#[derive(Copy, Clone)]
pub struct Scene {
    geometries: GeometryRegistry,
    materials: MaterialRegistry,
}

impl Scene {
    /// Fails if any primitive refers to a material slot that does not exist.
    pub fn new(geometries: GeometryRegistry, materials: MaterialRegistry) -> anyhow::Result<Self> {
        for (index, geometry) in geometries.iter().enumerate() {
            if geometry.material() >= materials.len() {
                anyhow::bail!(format!(
                    "scene - geometry {} uses material {} but only {} materials exist",
                    index,
                    geometry.material(),
                    materials.len()
                ));
            }
        }
        Ok(Self {
            geometries,
            materials,
        })
    }

    pub fn geometries(&self) -> &GeometryRegistry {
        &self.geometries
    }

    pub fn materials(&self) -> &MaterialRegistry {
        &self.materials
    }

    /// One white sphere of radius 10 at (0, 10, -10).
    pub fn single_sphere() -> anyhow::Result<Self> {
        let geometries = GeometryRegistry::from_geometries(vec![Geometry::from(Sphere::new(
            glam::Vec3A::new(0.0, 10.0, -10.0),
            10.0,
            0,
        ))])?;
        let materials = MaterialRegistry::from_materials(vec![Material::from(Phong::new(
            Color::WHITE,
            Color::WHITE,
            16.0,
            0.0,
        ))])?;
        Scene::new(geometries, materials)
    }

    /// Red and blue spheres standing on a checkered floor.
    pub fn demo() -> anyhow::Result<Self> {
        let mut materials = MaterialRegistry::builder(3)?;
        materials.construct(0, Phong::new(Color::RED, Color::WHITE, 16.0, 0.25))?;
        materials.construct(1, Phong::new(Color::BLUE, Color::WHITE, 16.0, 0.25))?;
        materials.construct(2, Checker::new(0.1, 0.5))?;

        let mut geometries = GeometryRegistry::builder(3)?;
        geometries.construct(2, Plane::new(glam::Vec3A::Y, 0.0, 2))?;
        geometries.construct(0, Sphere::new(glam::Vec3A::new(-15.0, 15.0, -10.0), 15.0, 0))?;
        geometries.construct(1, Sphere::new(glam::Vec3A::new(12.0, 10.0, -10.0), 10.0, 1))?;

        Scene::new(
            GeometryRegistry::new(geometries.build()?),
            MaterialRegistry::new(materials.build()?),
        )
    }
}
