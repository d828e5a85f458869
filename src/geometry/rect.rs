use bevy::math::Vec2;

/// Axis-aligned box in the layout frame (x right, y down)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub fn from_corners(min: Vec2, max: Vec2) -> Self {
        Rect {
            left: min.x,
            top: min.y,
            right: max.x,
            bottom: max.y,
        }
    }

    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self::from_corners(center - half, center + half)
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width(), self.height())
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(
            self.left + self.width() * 0.5,
            self.top + self.height() * 0.5,
        )
    }

    /// Top-left corner
    pub fn origin(&self) -> Vec2 {
        Vec2::new(self.left, self.top)
    }

    /// Same box expressed relative to `origin`
    pub fn relative_to(&self, origin: Vec2) -> Self {
        Rect {
            left: self.left - origin.x,
            top: self.top - origin.y,
            right: self.right - origin.x,
            bottom: self.bottom - origin.y,
        }
    }

    /// Closed-interval overlap: boxes that only touch along an edge still overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        !(self.left > other.right
            || self.right < other.left
            || self.top > other.bottom
            || self.bottom < other.top)
    }

    /// Inclusive on every edge
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.left >= self.left
            && other.right <= self.right
            && other.top >= self.top
            && other.bottom <= self.bottom
    }

    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.left && point.x <= self.right && point.y >= self.top && point.y <= self.bottom
    }

    /// Shrink by `amount` on all four sides
    pub fn inset(&self, amount: f32) -> Self {
        Rect {
            left: self.left + amount,
            top: self.top + amount,
            right: self.right - amount,
            bottom: self.bottom - amount,
        }
    }
}
