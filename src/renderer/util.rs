#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ImageRange {
    pub from: u32,
    pub to: u32,
}

pub fn create_image_ranges(num_thread: u32, height: u32) -> Vec<ImageRange> {
    let height_per_cpu = height / num_thread;
    let mut ranges = Vec::with_capacity(num_thread as usize);
    for t in 0..num_thread {
        let from = t * height_per_cpu;
        let to = if t + 1 == num_thread {
            height
        } else {
            (t + 1) * height_per_cpu
        };
        ranges.push(ImageRange { from, to });
    }
    ranges
}

pub fn render_progress_bar(width: u32, height: u32) -> indicatif::ProgressBar {
    let progress_bar = indicatif::ProgressBar::new(width as u64 * height as u64);
    progress_bar.set_style(
        indicatif::ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} (eta: {eta})")
            .progress_chars("#>-"),
    );
    progress_bar
}

/// Square of `edge` pixels centered on the film, mapped onto the camera view plane.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SamplingRegion {
    edge: u32,
    xshift: i64,
    yshift: i64,
}

impl SamplingRegion {
    pub fn new(width: u32, height: u32, edge: u32) -> Self {
        Self {
            edge,
            xshift: (width as i64 - edge as i64) / 2,
            yshift: (height as i64 - edge as i64) / 2,
        }
    }

    pub fn edge(&self) -> u32 {
        self.edge
    }

    pub fn shift(&self) -> (i64, i64) {
        (self.xshift, self.yshift)
    }

    /// First and last pixel of the region map to exactly 0 and 1; y grows downwards
    /// on the film and upwards on the view plane.
    pub fn view_coords(&self, x: u32, y: u32) -> (f32, f32) {
        let span = (self.edge.max(2) - 1) as f32;
        let sx = (x as i64 - self.xshift) as f32 / span;
        let sy = 1.0 - (y as i64 - self.yshift) as f32 / span;
        (sx, sy)
    }
}
