use std::{
    path::{Path, PathBuf},
    str::FromStr,
};

use simple_ray_tracer::{
    camera::{Camera, PerspectiveCamera},
    core::{film::Film, scene::Scene},
    loader,
    renderer::{self, Renderer, Shading},
};
use structopt::StructOpt;

#[derive(Copy, Clone, Debug, PartialEq)]
enum RenderMode {
    Depth,
    Normal,
    Material,
    Reflection,
}

impl FromStr for RenderMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "depth" => Ok(Self::Depth),
            "normal" => Ok(Self::Normal),
            "material" => Ok(Self::Material),
            "reflection" => Ok(Self::Reflection),
            _ => anyhow::bail!(format!("unknown render mode '{}'", s)),
        }
    }
}

#[derive(Debug, StructOpt)]
#[structopt(name = "simple-ray-tracer", about = "Ray trace a small scene into a PNG image")]
struct Opt {
    /// depth, normal, material or reflection
    #[structopt(short, long, default_value = "reflection")]
    mode: RenderMode,
    #[structopt(long, default_value = "640")]
    width: u32,
    #[structopt(long, default_value = "640")]
    height: u32,
    /// Orbit angle around the vertical axis, degrees
    #[structopt(long, default_value = "0")]
    phi: f32,
    /// Orbit elevation, degrees
    #[structopt(long, default_value = "10")]
    theta: f32,
    /// Orbit distance from the origin
    #[structopt(long, default_value = "50")]
    eyedist: f32,
    /// Supersampling factor, the film is rendered this much larger and box filtered
    #[structopt(long, default_value = "1")]
    aa: u32,
    #[structopt(long, default_value = "3")]
    max_reflect: u32,
    #[structopt(long, default_value = "20")]
    max_depth: f32,
    /// Frames of a full orbit, reflection mode only
    #[structopt(long, default_value = "1")]
    frames: u32,
    /// Scene JSON, replaces the built-in scene
    #[structopt(long, parse(from_os_str))]
    scene: Option<PathBuf>,
    #[structopt(short, long, parse(from_os_str), default_value = "output.png")]
    output: PathBuf,
    /// Hide the progress bar
    #[structopt(short, long)]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let opt = Opt::from_args();
    if opt.aa == 0 {
        anyhow::bail!("--aa should be at least 1");
    }
    if opt.frames == 0 {
        anyhow::bail!("--frames should be at least 1");
    }
    let frames = if opt.mode != RenderMode::Reflection && opt.frames > 1 {
        log::warn!("--frames only orbits in reflection mode, rendering one frame");
        1
    } else {
        opt.frames
    };

    let (scene, scene_camera) = match &opt.scene {
        Some(path) => {
            let loaded = loader::load_scene(path)?;
            (loaded.scene, loaded.camera)
        }
        None => (default_scene(opt.mode)?, None),
    };

    if opt.mode == RenderMode::Reflection && scene_camera.is_some() && frames > 1 {
        log::warn!("the scene camera is ignored while orbiting, using the orbit camera");
    }
    let film_size = (opt.width.checked_mul(opt.aa), opt.height.checked_mul(opt.aa));
    let (film_width, film_height) = match film_size {
        (Some(width), Some(height)) => (width, height),
        _ => anyhow::bail!("--aa is too large for a {}x{} image", opt.width, opt.height),
    };

    let shading: Shading = match opt.mode {
        RenderMode::Depth => renderer::DepthShading::new(opt.max_depth).into(),
        RenderMode::Normal => renderer::NormalShading::new().into(),
        RenderMode::Material => renderer::MaterialShading::new().into(),
        RenderMode::Reflection => renderer::ReflectionShading::new(opt.max_reflect).into(),
    };

    for frame in 0..frames {
        let phi = opt.phi + 360.0 * frame as f32 / frames as f32;
        let camera = frame_camera(opt.mode, scene_camera, frames, phi, &opt);

        let mut film = Film::new(film_width, film_height);
        let renderer = Renderer::new(shading, camera)
            .with_anti_aliasing(opt.aa)?
            .with_progress(!opt.quiet);

        let begin_time = std::time::Instant::now();
        renderer.render(&scene, &mut film)?;
        log::info!(
            "{:?} frame {}/{} rendered in {:?}",
            opt.mode,
            frame + 1,
            frames,
            begin_time.elapsed()
        );

        let output = frame_path(&opt.output, frame, frames);
        film.downsample(opt.aa).save(&output)?;
        log::info!("saved '{}'", output.display());
    }

    Ok(())
}

/// A scene file camera wins unless a reflection render orbits over several frames.
fn frame_camera(
    mode: RenderMode,
    scene_camera: Option<Camera>,
    frames: u32,
    phi: f32,
    opt: &Opt,
) -> Camera {
    match mode {
        RenderMode::Reflection => match scene_camera {
            Some(camera) if frames == 1 => camera,
            _ => PerspectiveCamera::orbit(phi, opt.theta, opt.eyedist).into(),
        },
        RenderMode::Depth | RenderMode::Normal => {
            scene_camera.unwrap_or_else(renderer::sphere_camera)
        }
        RenderMode::Material => scene_camera.unwrap_or_else(renderer::demo_camera),
    }
}

fn default_scene(mode: RenderMode) -> anyhow::Result<Scene> {
    match mode {
        RenderMode::Depth | RenderMode::Normal => Scene::single_sphere(),
        RenderMode::Material | RenderMode::Reflection => Scene::demo(),
    }
}

fn frame_path(output: &Path, frame: u32, frames: u32) -> PathBuf {
    if frames == 1 {
        return output.to_path_buf();
    }
    let stem = output
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_owned());
    let ext = output
        .extension()
        .map(|ext| ext.to_string_lossy().into_owned())
        .unwrap_or_else(|| "png".to_owned());
    output.with_file_name(format!("{}_{:03}.{}", stem, frame, ext))
}
