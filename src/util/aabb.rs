use crate::util::vec2::Vec2;

/// Axis-aligned bounding box. Positions are top-left anchored, matching the
/// coordinate system of the gameplay logs (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Aabb {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_pos(pos: Vec2, width: f32, height: f32) -> Self {
        Self::new(pos.x, pos.y, width, height)
    }

    /// Center point of the box
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Strict four-way overlap test (touching edges do not intersect)
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.x < other.x + other.width
            && self.x + self.width > other.x
            && self.y < other.y + other.height
            && self.y + self.height > other.y
    }
}
