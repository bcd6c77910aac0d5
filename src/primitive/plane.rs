use crate::core::{intersection::HitResult, loader::InputParams, ray::Ray};

use super::GeometryT;

/// Points `p` with `normal . p = offset`, visible from the side `normal` faces.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Plane {
    normal: glam::Vec3A,
    offset: f32,
    material: usize,
}

impl Plane {
    pub fn new(normal: glam::Vec3A, offset: f32, material: usize) -> Self {
        let normal = normal.normalize();
        Self {
            normal,
            offset,
            material,
        }
    }

    pub fn load(params: &mut InputParams) -> anyhow::Result<Self> {
        let normal = glam::Vec3A::from(params.get_float3("normal")?);
        if normal.length_squared() == 0.0 {
            anyhow::bail!(format!("{} - 'normal' should be non-zero", params.name()));
        }
        let offset = params.get_float_or("offset", 0.0);
        let material = params.get_index("material")?;

        Ok(Plane::new(normal, offset, material))
    }
}

impl GeometryT for Plane {
    fn intersect(&self, ray: &Ray) -> HitResult {
        let a = ray.direction.dot(self.normal);
        if a >= 0.0 {
            return HitResult::MISS;
        }

        let b = self.normal.dot(ray.origin) - self.offset;
        let distance = -b / a;
        if distance >= 0.0 {
            HitResult::hit(distance, ray.point_at(distance), self.normal, self.material)
        } else {
            HitResult::MISS
        }
    }

    fn material(&self) -> usize {
        self.material
    }
}
