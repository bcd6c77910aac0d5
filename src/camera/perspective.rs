use crate::core::{loader::InputParams, ray::Ray};

use super::CameraT;

#[derive(Copy, Clone, Debug)]
pub struct PerspectiveCamera {
    eye: glam::Vec3A,
    forward: glam::Vec3A,
    up: glam::Vec3A,
    right: glam::Vec3A,
    half_cot_half_fov: f32,
}

impl PerspectiveCamera {
    /// `fov` is the full vertical field of view in radians.
    pub fn new(eye: glam::Vec3A, forward: glam::Vec3A, up: glam::Vec3A, fov: f32) -> Self {
        let forward = forward.normalize();
        let right = forward.cross(up).normalize();
        let up = right.cross(forward);
        Self {
            eye,
            forward,
            up,
            right,
            half_cot_half_fov: 0.5 / (fov * 0.5).tan(),
        }
    }

    /// Camera circling the origin at distance `eyedist`, `phi` and `theta` in degrees.
    pub fn orbit(phi: f32, theta: f32, eyedist: f32) -> Self {
        let r_theta = (theta - 85.0).to_radians();
        let r_phi = (270.0 - phi).to_radians();
        let r_theta_up = (theta + 5.0).to_radians();

        let (sin_phi, cos_phi) = r_phi.sin_cos();
        let position = glam::Vec3A::new(
            r_theta.sin() * cos_phi,
            r_theta.cos(),
            r_theta.sin() * sin_phi,
        );
        let up = glam::Vec3A::new(
            r_theta_up.sin() * cos_phi,
            r_theta_up.cos(),
            r_theta_up.sin() * sin_phi,
        );

        Self::new(position * eyedist, -position, up, 46.0_f32.to_radians())
    }

    pub fn load(params: &mut InputParams) -> anyhow::Result<Self> {
        let eye = params.get_float3("eye")?.into();
        let forward = params.get_float3("forward")?.into();
        let up = params.get_float3_or("up", [0.0, 1.0, 0.0]).into();
        let fov_deg = params.get_float("fov")?;
        let fov = fov_deg * std::f32::consts::PI / 180.0;

        Ok(Self::new(eye, forward, up, fov))
    }

    pub fn eye(&self) -> glam::Vec3A {
        self.eye
    }
}

impl CameraT for PerspectiveCamera {
    fn generate_ray(&self, point: (f32, f32)) -> Ray {
        let origin = self.eye;
        let direction = (self.forward * self.half_cot_half_fov
            + self.right * (point.0 - 0.5)
            + self.up * (point.1 - 0.5))
            .normalize();
        Ray::new(origin, direction)
    }
}
