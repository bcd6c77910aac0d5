use crate::core::{intersection::HitResult, loader::InputParams, ray::Ray};

use super::GeometryT;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Sphere {
    center: glam::Vec3A,
    radius: f32,
    sqr_radius: f32,
    material: usize,
}

impl Sphere {
    pub fn new(center: glam::Vec3A, radius: f32, material: usize) -> Self {
        Self {
            center,
            radius,
            sqr_radius: radius * radius,
            material,
        }
    }

    pub fn load(params: &mut InputParams) -> anyhow::Result<Self> {
        let center = params.get_float3_or("center", [0.0, 0.0, 0.0]);
        let radius = params.get_float("radius")?;
        if radius <= 0.0 {
            anyhow::bail!(format!("{} - 'radius' should be positive", params.name()));
        }
        let material = params.get_index("material")?;

        Ok(Sphere::new(center.into(), radius, material))
    }
}

impl GeometryT for Sphere {
    fn intersect(&self, ray: &Ray) -> HitResult {
        let v = ray.origin - self.center;
        let d_dot_v = ray.direction.dot(v);
        if d_dot_v <= 0.0 {
            let discr = d_dot_v * d_dot_v - (v.length_squared() - self.sqr_radius);
            if discr >= 0.0 {
                let distance = -d_dot_v - discr.sqrt();
                if distance >= 0.0 {
                    let position = ray.point_at(distance);
                    let normal = (position - self.center) / self.radius;
                    return HitResult::hit(distance, position, normal, self.material);
                }
            }
        }
        HitResult::MISS
    }

    fn material(&self) -> usize {
        self.material
    }
}
