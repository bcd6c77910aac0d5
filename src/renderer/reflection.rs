use crate::{
    core::{color::Color, ray::Ray, scene::Scene},
    material::MaterialRegistry,
    primitive::GeometryRegistry,
};

use super::ShadingT;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Reflection {
    pub color: Color,
    /// Iterations that hit geometry.
    pub bounces: u32,
}

/// Follows mirror bounces for at most `max_reflect` iterations, weighting each local
/// sample by the reflectiveness left over from the surfaces before it.
pub fn trace_reflection(
    mut ray: Ray,
    geometries: &GeometryRegistry,
    materials: &MaterialRegistry,
    max_reflect: u32,
) -> Reflection {
    let mut final_color = Color::BLACK;
    let mut reflectiveness = 1.0;
    let mut bounces = 0;

    for _ in 0..max_reflect {
        let hit = geometries.intersect(&ray);
        if !hit.is_hit {
            break;
        }
        bounces += 1;

        let ref_c = materials.reflectiveness(hit.material);
        let color = materials.sample(hit.material, &ray, hit.position, hit.normal);
        final_color += color * (1.0 - ref_c) * reflectiveness;
        reflectiveness *= ref_c;

        if reflectiveness > 0.0 {
            ray = ray.reflected(hit.position, hit.normal);
        } else {
            break;
        }
    }

    Reflection {
        color: final_color,
        bounces,
    }
}

#[derive(Copy, Clone, Debug)]
pub struct ReflectionShading {
    max_reflect: u32,
}

impl ReflectionShading {
    pub fn new(max_reflect: u32) -> Self {
        Self { max_reflect }
    }
}

impl ShadingT for ReflectionShading {
    fn shade(&self, scene: &Scene, ray: &Ray) -> u32 {
        trace_reflection(*ray, scene.geometries(), scene.materials(), self.max_reflect)
            .color
            .to_packed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        material::{Checker, Phong},
        primitive::{Plane, Sphere},
    };

    fn mirror_box() -> (GeometryRegistry, MaterialRegistry) {
        let geometries = GeometryRegistry::from_geometries(vec![
            Plane::new(glam::Vec3A::Y, 0.0, 0).into(),
            Plane::new(-glam::Vec3A::Y, -10.0, 0).into(),
        ])
        .unwrap();
        let materials = MaterialRegistry::from_materials(vec![Phong::new(
            Color::WHITE,
            Color::WHITE,
            16.0,
            1.0,
        )
        .into()])
        .unwrap();
        (geometries, materials)
    }

    #[test]
    fn miss_is_black() {
        let scene = Scene::demo().unwrap();
        let ray = Ray::new(glam::Vec3A::new(0.0, 5.0, 15.0), glam::Vec3A::Y);
        let result = trace_reflection(ray, scene.geometries(), scene.materials(), 3);
        assert_eq!(result.color, Color::BLACK);
        assert_eq!(result.bounces, 0);
    }

    #[test]
    fn diffuse_surface_gives_one_sample() {
        let geometries = GeometryRegistry::from_geometries(vec![Sphere::new(
            glam::Vec3A::new(0.0, 0.0, -10.0),
            5.0,
            0,
        )
        .into()])
        .unwrap();
        let materials =
            MaterialRegistry::from_materials(vec![Phong::new(Color::RED, Color::WHITE, 16.0, 0.0)
                .into()])
            .unwrap();
        let ray = Ray::new(glam::Vec3A::ZERO, -glam::Vec3A::Z);

        let hit = geometries.intersect(&ray);
        let expected = materials.sample(0, &ray, hit.position, hit.normal);
        let result = trace_reflection(ray, &geometries, &materials, 3);
        assert_eq!(result.color, expected);
        assert_eq!(result.bounces, 1);
    }

    #[test]
    fn perfect_mirrors_use_every_bounce_and_stay_black() {
        let (geometries, materials) = mirror_box();
        let ray = Ray::new(
            glam::Vec3A::new(0.0, 5.0, 0.0),
            glam::Vec3A::new(1.0, -1.0, 0.0).normalize(),
        );
        for max_reflect in 1..6 {
            let result = trace_reflection(ray, &geometries, &materials, max_reflect);
            assert_eq!(result.bounces, max_reflect);
            assert_eq!(result.color, Color::BLACK);
        }
    }

    #[test]
    fn perfect_mirror_stops_when_bounce_escapes() {
        let (geometries, materials) = mirror_box();
        let floor_only =
            GeometryRegistry::from_geometries(vec![*geometries.get(0)]).unwrap();
        let ray = Ray::new(glam::Vec3A::new(0.0, 5.0, 0.0), -glam::Vec3A::Y);
        let result = trace_reflection(ray, &floor_only, &materials, 5);
        assert_eq!(result.bounces, 1);
        assert_eq!(result.color, Color::BLACK);
    }

    #[test]
    fn half_reflective_floor_keeps_half_its_color() {
        let geometries =
            GeometryRegistry::from_geometries(vec![Plane::new(glam::Vec3A::Y, 0.0, 0).into()])
                .unwrap();
        let materials =
            MaterialRegistry::from_materials(vec![Checker::new(0.1, 0.5).into()]).unwrap();
        let ray = Ray::new(glam::Vec3A::new(15.0, 10.0, 5.0), -glam::Vec3A::Y);
        let result = trace_reflection(ray, &geometries, &materials, 3);
        assert_eq!(result.color, Color::gray(0.5));
        assert_eq!(result.bounces, 1);
    }

    #[test]
    fn zero_bounce_limit_is_black() {
        let scene = Scene::demo().unwrap();
        let ray = Ray::new(glam::Vec3A::new(12.0, 10.0, 30.0), -glam::Vec3A::Z);
        let result = trace_reflection(ray, scene.geometries(), scene.materials(), 0);
        assert_eq!(result, Reflection { color: Color::BLACK, bounces: 0 });
    }

    #[test]
    fn reflectiveness_outside_unit_range_is_not_clamped() {
        let geometries =
            GeometryRegistry::from_geometries(vec![Plane::new(glam::Vec3A::Y, 0.0, 0).into()])
                .unwrap();
        // (15, 0, 5) lies on a white square of a scale 0.1 checker
        let ray = Ray::new(glam::Vec3A::new(15.0, 1.0, 5.0), -glam::Vec3A::Y);

        let over = MaterialRegistry::from_materials(vec![Checker::new(0.1, 2.0).into()]).unwrap();
        let result = trace_reflection(ray, &geometries, &over, 3);
        assert_eq!(result.color, Color::gray(-1.0));
        assert_eq!(result.bounces, 1);
        assert_eq!(result.color.to_packed(), 0xff00_0000);

        let under = MaterialRegistry::from_materials(vec![Checker::new(0.1, -0.5).into()]).unwrap();
        let result = trace_reflection(ray, &geometries, &under, 3);
        assert_eq!(result.color, Color::gray(1.5));
        assert_eq!(result.bounces, 1);
        assert_eq!(result.color.to_packed(), 0xffff_ffff);
    }
}
