use crate::core::{color::Color, loader::InputParams, ray::Ray};

use super::MaterialT;

/// Black and white squares of side `1 / scale` on the x-z plane.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Checker {
    scale: f32,
    reflectiveness: f32,
}

impl Checker {
    pub fn new(scale: f32, reflectiveness: f32) -> Self {
        Self {
            scale,
            reflectiveness,
        }
    }

    pub fn load(params: &mut InputParams) -> anyhow::Result<Self> {
        let scale = params.get_float_or("scale", 0.1);
        let reflectiveness = params.get_float_or("reflectiveness", 0.0);

        Ok(Checker::new(scale, reflectiveness))
    }
}

impl MaterialT for Checker {
    fn sample(&self, _ray: &Ray, position: glam::Vec3A, _normal: glam::Vec3A) -> Color {
        let cell = (position.x * self.scale).floor() + (position.z * self.scale).floor();
        if (cell % 2.0).abs() < 1.0 {
            Color::BLACK
        } else {
            Color::WHITE
        }
    }

    fn reflectiveness(&self) -> f32 {
        self.reflectiveness
    }
}
