use crate::core::{color::pack_rgb, ray::Ray, scene::Scene};

use super::ShadingT;

/// One material evaluation at the first hit, no reflection.
#[derive(Copy, Clone, Debug, Default)]
pub struct MaterialShading;

impl MaterialShading {
    pub fn new() -> Self {
        Self
    }
}

impl ShadingT for MaterialShading {
    fn shade(&self, scene: &Scene, ray: &Ray) -> u32 {
        let hit = scene.geometries().intersect(ray);
        if !hit.is_hit {
            return pack_rgb(0, 0, 0);
        }
        scene
            .materials()
            .sample(hit.material, ray, hit.position, hit.normal)
            .to_packed()
    }
}
