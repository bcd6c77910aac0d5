use crate::core::{color::pack_rgb, ray::Ray, scene::Scene};

use super::ShadingT;

#[derive(Copy, Clone, Debug, Default)]
pub struct NormalShading;

impl NormalShading {
    pub fn new() -> Self {
        Self
    }
}

/// `(n + 1) * 128`, saturating at 255 for axis-aligned normals.
fn normal_channel(n: f32) -> u8 {
    ((n + 1.0) * 128.0) as u8
}

impl ShadingT for NormalShading {
    fn shade(&self, scene: &Scene, ray: &Ray) -> u32 {
        let hit = scene.geometries().intersect(ray);
        if !hit.is_hit {
            return pack_rgb(0, 0, 0);
        }
        pack_rgb(
            normal_channel(hit.normal.x),
            normal_channel(hit.normal.y),
            normal_channel(hit.normal.z),
        )
    }
}
