use crate::core::{color::Color, loader::InputParams, ray::Ray};

use super::MaterialT;

/// Diffuse plus Blinn-Phong specular under one white directional light.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Phong {
    diffuse: Color,
    specular: Color,
    shininess: f32,
    reflectiveness: f32,
}

impl Phong {
    pub fn new(diffuse: Color, specular: Color, shininess: f32, reflectiveness: f32) -> Self {
        Self {
            diffuse,
            specular,
            shininess,
            reflectiveness,
        }
    }

    pub fn load(params: &mut InputParams) -> anyhow::Result<Self> {
        let diffuse = params.get_float3("diffuse")?.into();
        let specular = params.get_float3_or("specular", [1.0, 1.0, 1.0]).into();
        let shininess = params.get_float_or("shininess", 16.0);
        let reflectiveness = params.get_float_or("reflectiveness", 0.0);

        Ok(Phong::new(diffuse, specular, shininess, reflectiveness))
    }
}

pub fn light_direction() -> glam::Vec3A {
    glam::Vec3A::ONE.normalize()
}

const LIGHT_COLOR: Color = Color::WHITE;

impl MaterialT for Phong {
    fn sample(&self, ray: &Ray, _position: glam::Vec3A, normal: glam::Vec3A) -> Color {
        let light_dir = light_direction();
        let n_dot_l = normal.dot(light_dir);
        let h = (light_dir - ray.direction).normalize();
        let n_dot_h = normal.dot(h);
        let diffuse_term = self.diffuse * n_dot_l.max(0.0);
        let specular_term = self.specular * n_dot_h.max(0.0).powf(self.shininess);
        LIGHT_COLOR * (diffuse_term + specular_term)
    }

    fn reflectiveness(&self) -> f32 {
        self.reflectiveness
    }
}
