mod depth;
mod material;
mod normal;
mod reflection;
pub mod util;

pub use depth::*;
pub use material::*;
pub use normal::*;
pub use reflection::*;

use crate::{
    camera::{Camera, CameraT, PerspectiveCamera},
    core::{film::Film, ray::Ray, scene::Scene},
};

/// Distance mapped to black by the depth view.
pub const MAX_DEPTH: f32 = 20.0;
/// Bounce limit of the reflection view.
pub const MAX_REFLECT: u32 = 3;
/// Side of the sampling region before anti-aliasing scale.
pub const BASE_EDGE: u32 = 640;

#[enum_dispatch::enum_dispatch(Shading)]
pub trait ShadingT: Send + Sync {
    /// Packed `0xFFRRGGBB` pixel for one camera ray.
    fn shade(&self, scene: &Scene, ray: &Ray) -> u32;
}

#[enum_dispatch::enum_dispatch]
#[derive(Copy, Clone, Debug)]
pub enum Shading {
    DepthShading,
    NormalShading,
    MaterialShading,
    ReflectionShading,
}

pub struct Renderer {
    shading: Shading,
    camera: Camera,
    edge: u32,
    show_progress: bool,
}

impl Renderer {
    pub fn new(shading: Shading, camera: Camera) -> Self {
        Self {
            shading,
            camera,
            edge: BASE_EDGE,
            show_progress: false,
        }
    }

    pub fn with_edge(mut self, edge: u32) -> Self {
        self.edge = edge;
        self
    }

    /// Enlarges the sampling region by `aa_factor` without touching the film size.
    pub fn with_anti_aliasing(self, aa_factor: u32) -> anyhow::Result<Self> {
        let edge = match BASE_EDGE.checked_mul(aa_factor.max(1)) {
            Some(edge) => edge,
            None => anyhow::bail!(format!(
                "renderer - anti-aliasing factor {} is too large",
                aa_factor
            )),
        };
        Ok(self.with_edge(edge))
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn shade_pixel(&self, scene: &Scene, region: &util::SamplingRegion, x: u32, y: u32) -> u32 {
        let ray = self.camera.generate_ray(region.view_coords(x, y));
        self.shading.shade(scene, &ray)
    }

    /// Writes every pixel of `film` exactly once. Rows are split into contiguous
    /// ranges, one worker per range, each owning its slice of the film.
    pub fn render(&self, scene: &Scene, film: &mut Film) -> anyhow::Result<()> {
        let width = film.width();
        let height = film.height();
        if width == 0 || height == 0 {
            return Ok(());
        }

        let region = util::SamplingRegion::new(width, height, self.edge);
        let progress_bar = if self.show_progress {
            util::render_progress_bar(width, height)
        } else {
            indicatif::ProgressBar::hidden()
        };

        let num_threads = (num_cpus::get() as u32 * 2).min(height);
        let ranges = util::create_image_ranges(num_threads, height);
        log::debug!(
            "rendering {}x{} with {} workers, sampling edge {}",
            width,
            height,
            ranges.len(),
            self.edge
        );

        let mut rest = film.pixels_mut();
        crossbeam::scope(|scope| {
            for range in ranges {
                let rows = (range.to - range.from) as usize;
                let (chunk, tail) = std::mem::take(&mut rest).split_at_mut(rows * width as usize);
                rest = tail;
                let progress_bar = progress_bar.clone();
                let renderer = self;

                scope.spawn(move |_| {
                    for (j, row) in (range.from..range.to).zip(chunk.chunks_mut(width as usize)) {
                        for (i, pixel) in row.iter_mut().enumerate() {
                            *pixel = renderer.shade_pixel(scene, &region, i as u32, j);
                        }
                        progress_bar.inc(width as u64);
                    }
                });
            }
        })
        .map_err(|_| anyhow::anyhow!("renderer - a render worker panicked"))?;

        progress_bar.finish_and_clear();
        Ok(())
    }
}

/// Camera of the depth and normal views, looking down -z at the single sphere.
pub fn sphere_camera() -> Camera {
    PerspectiveCamera::new(
        glam::Vec3A::new(0.0, 10.0, 10.0),
        -glam::Vec3A::Z,
        glam::Vec3A::Y,
        90.0_f32.to_radians(),
    )
    .into()
}

/// Camera of the material view, looking down -z at the demo scene.
pub fn demo_camera() -> Camera {
    PerspectiveCamera::new(
        glam::Vec3A::new(0.0, 5.0, 15.0),
        -glam::Vec3A::Z,
        glam::Vec3A::Y,
        90.0_f32.to_radians(),
    )
    .into()
}

pub fn render_depth(film: &mut Film) -> anyhow::Result<()> {
    let scene = Scene::single_sphere()?;
    Renderer::new(DepthShading::new(MAX_DEPTH).into(), sphere_camera()).render(&scene, film)
}

pub fn render_normal(film: &mut Film) -> anyhow::Result<()> {
    let scene = Scene::single_sphere()?;
    Renderer::new(NormalShading::new().into(), sphere_camera()).render(&scene, film)
}

pub fn render_material(film: &mut Film) -> anyhow::Result<()> {
    let scene = Scene::demo()?;
    Renderer::new(MaterialShading::new().into(), demo_camera()).render(&scene, film)
}

pub fn render_reflection(
    film: &mut Film,
    phi: f32,
    theta: f32,
    eyedist: f32,
    aa_factor: u32,
) -> anyhow::Result<()> {
    let scene = Scene::demo()?;
    let camera = PerspectiveCamera::orbit(phi, theta, eyedist).into();
    Renderer::new(ReflectionShading::new(MAX_REFLECT).into(), camera)
        .with_anti_aliasing(aa_factor)?
        .render(&scene, film)
}
