/// Outcome of testing a ray against one primitive or a whole registry.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct HitResult {
    pub is_hit: bool,
    /// Only meaningful when `is_hit`.
    pub distance: f32,
    pub position: glam::Vec3A,
    pub normal: glam::Vec3A,
    pub material: usize,
}

impl HitResult {
    pub const MISS: HitResult = HitResult {
        is_hit: false,
        distance: f32::INFINITY,
        position: glam::Vec3A::ZERO,
        normal: glam::Vec3A::Y,
        material: 0,
    };

    pub fn hit(distance: f32, position: glam::Vec3A, normal: glam::Vec3A, material: usize) -> Self {
        Self {
            is_hit: true,
            distance,
            position,
            normal,
            material,
        }
    }
}

impl Default for HitResult {
    fn default() -> Self {
        Self::MISS
    }
}
