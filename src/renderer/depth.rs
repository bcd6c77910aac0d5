use crate::core::{
    color::{pack_rgb, saturate},
    ray::Ray,
    scene::Scene,
};

use super::ShadingT;

/// Grayscale distance to the camera, white when close, black at `max_depth` and on misses.
#[derive(Copy, Clone, Debug)]
pub struct DepthShading {
    max_depth: f32,
}

impl DepthShading {
    pub fn new(max_depth: f32) -> Self {
        Self { max_depth }
    }
}

impl ShadingT for DepthShading {
    fn shade(&self, scene: &Scene, ray: &Ray) -> u32 {
        let hit = scene.geometries().intersect(ray);
        if !hit.is_hit {
            return pack_rgb(0, 0, 0);
        }
        let depth = 255.0 - 255.0 * saturate(hit.distance / self.max_depth);
        let depth = depth as u8;
        pack_rgb(depth, depth, depth)
    }
}
