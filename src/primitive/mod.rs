mod plane;
mod sphere;

pub use plane::*;
pub use sphere::*;

use crate::core::{
    intersection::HitResult,
    loader::InputParams,
    ray::Ray,
    store::{ObjectStore, ObjectStoreBuilder, OBJECT_SLOT_SIZE},
};

pub const MAX_GEOMETRIES: usize = 16;

#[enum_dispatch::enum_dispatch(Geometry)]
pub trait GeometryT: Send + Sync {
    fn intersect(&self, ray: &Ray) -> HitResult;

    fn material(&self) -> usize;
}

#[enum_dispatch::enum_dispatch]
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Geometry {
    Sphere,
    Plane,
}

const _: () = assert!(std::mem::size_of::<Geometry>() <= OBJECT_SLOT_SIZE);

/// Fixed set of primitives tested by linear scan.
#[derive(Copy, Clone)]
pub struct GeometryRegistry {
    geometries: ObjectStore<Geometry, MAX_GEOMETRIES>,
}

impl GeometryRegistry {
    pub fn new(geometries: ObjectStore<Geometry, MAX_GEOMETRIES>) -> Self {
        Self { geometries }
    }

    pub fn builder(count: usize) -> anyhow::Result<ObjectStoreBuilder<Geometry, MAX_GEOMETRIES>> {
        ObjectStoreBuilder::new(count)
    }

    pub fn from_geometries<I: IntoIterator<Item = Geometry>>(
        geometries: I,
    ) -> anyhow::Result<Self> {
        Ok(Self::new(ObjectStore::from_values(geometries)?))
    }

    pub fn len(&self) -> usize {
        self.geometries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.geometries.is_empty()
    }

    pub fn get(&self, index: usize) -> &Geometry {
        self.geometries.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Geometry> + '_ {
        self.geometries.iter()
    }

    /// Closest hit over every primitive. Equal distances keep the earlier slot.
    pub fn intersect(&self, ray: &Ray) -> HitResult {
        let mut min_result = HitResult::MISS;
        for geometry in self.geometries.iter() {
            let result = geometry.intersect(ray);
            if result.is_hit && result.distance < min_result.distance {
                min_result = result;
            }
        }
        min_result
    }
}

pub fn create_geometry_from_params(params: &mut InputParams) -> anyhow::Result<Geometry> {
    params.set_name("geometry".into());
    let ty = params.get_str("type")?;
    params.set_name(format!("geometry-{}", ty).into());

    let res = match ty.as_str() {
        "sphere" => Sphere::load(params)?.into(),
        "plane" => Plane::load(params)?.into(),
        _ => anyhow::bail!(format!("{}: unknown type '{}'", params.name(), ty)),
    };

    Ok(res)
}

#[cfg(test)]
mod tests {
    use rand::{Rng, SeedableRng};

    use super::*;

    fn demo_geometries() -> GeometryRegistry {
        GeometryRegistry::from_geometries(vec![
            Sphere::new(glam::Vec3A::new(-15.0, 15.0, -10.0), 15.0, 0).into(),
            Sphere::new(glam::Vec3A::new(12.0, 10.0, -10.0), 10.0, 1).into(),
            Plane::new(glam::Vec3A::Y, 0.0, 2).into(),
        ])
        .unwrap()
    }

    #[test]
    fn ray_into_empty_sky_misses() {
        let registry = demo_geometries();
        let ray = Ray::new(glam::Vec3A::new(0.0, 5.0, 15.0), glam::Vec3A::Y);
        let hit = registry.intersect(&ray);
        assert!(!hit.is_hit);
        assert_eq!(hit.distance, f32::INFINITY);
    }

    #[test]
    fn nearest_primitive_wins() {
        let registry = demo_geometries();
        let ray = Ray::new(glam::Vec3A::new(12.0, 10.0, 30.0), -glam::Vec3A::Z);
        let hit = registry.intersect(&ray);
        assert!(hit.is_hit);
        assert_eq!(hit.material, 1);
        assert!((hit.distance - 30.0).abs() < 1e-3);
    }

    #[test]
    fn single_primitive_registry_matches_primitive() {
        let sphere = Sphere::new(glam::Vec3A::new(0.0, 10.0, -10.0), 10.0, 0);
        let registry = GeometryRegistry::from_geometries(vec![sphere.into()]).unwrap();
        let ray = Ray::new(
            glam::Vec3A::new(0.0, 10.0, 10.0),
            glam::Vec3A::new(0.1, 0.05, -1.0).normalize(),
        );
        assert_eq!(registry.intersect(&ray), sphere.intersect(&ray));
    }

    #[test]
    fn coincident_primitives_keep_first_slot() {
        let registry = GeometryRegistry::from_geometries(vec![
            Plane::new(glam::Vec3A::Y, 0.0, 4).into(),
            Plane::new(glam::Vec3A::Y, 0.0, 5).into(),
        ])
        .unwrap();
        let ray = Ray::new(glam::Vec3A::new(0.0, 1.0, 0.0), -glam::Vec3A::Y);
        assert_eq!(registry.intersect(&ray).material, 4);
    }

    #[test]
    fn registry_distance_is_minimum_over_primitives() {
        let registry = demo_geometries();
        let mut rng = rand::rngs::SmallRng::seed_from_u64(7);
        for _ in 0..2000 {
            let origin = glam::Vec3A::new(
                rng.gen_range(-40.0..40.0),
                rng.gen_range(0.5..40.0),
                rng.gen_range(-40.0..40.0),
            );
            let direction = glam::Vec3A::new(
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
            );
            if direction.length_squared() < 1e-6 {
                continue;
            }
            let ray = Ray::new(origin, direction.normalize());

            let expected = registry
                .iter()
                .map(|geometry| geometry.intersect(&ray))
                .filter(|hit| hit.is_hit)
                .map(|hit| hit.distance)
                .fold(f32::INFINITY, f32::min);
            let hit = registry.intersect(&ray);
            assert_eq!(hit.is_hit, expected.is_finite());
            if hit.is_hit {
                assert_eq!(hit.distance, expected);
                assert!(hit.distance >= 0.0);
            }
        }
    }

    #[test]
    fn geometry_fits_an_object_slot() {
        assert!(std::mem::size_of::<Geometry>() <= OBJECT_SLOT_SIZE);
    }

    #[test]
    fn unknown_geometry_type_is_rejected() {
        let value: serde_json::Value = serde_json::from_str(r#"{ "type": "torus" }"#).unwrap();
        let mut params: InputParams = std::convert::TryFrom::try_from(&value).unwrap();
        assert!(create_geometry_from_params(&mut params).is_err());
    }
}
