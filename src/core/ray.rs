#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: glam::Vec3A,
    pub direction: glam::Vec3A,
}

impl Ray {
    pub fn new(origin: glam::Vec3A, direction: glam::Vec3A) -> Self {
        Self { origin, direction }
    }

    pub fn point_at(&self, t: f32) -> glam::Vec3A {
        self.origin + self.direction * t
    }

    /// Mirror bounce leaving `position` on a surface with unit `normal`.
    pub fn reflected(&self, position: glam::Vec3A, normal: glam::Vec3A) -> Self {
        let direction = self.direction - normal * (2.0 * normal.dot(self.direction));
        Self::new(position, direction)
    }
}
