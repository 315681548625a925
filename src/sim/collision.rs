//! Collision detection between falling numbers and the player
//!
//! Everything in the playfield is an axis-aligned box with its origin at the
//! top-left corner and y growing downward.

use glam::Vec2;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Top-left corner
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Overlap test. Boxes that only share an edge do not intersect, and an
    /// empty box intersects nothing.
    pub fn intersects(&self, other: &Aabb) -> bool {
        if self.size.x <= 0.0 || self.size.y <= 0.0 || other.size.x <= 0.0 || other.size.y <= 0.0 {
            return false;
        }
        let a_max = self.max();
        let b_max = other.max();
        self.min.x < b_max.x
            && other.min.x < a_max.x
            && self.min.y < b_max.y
            && other.min.y < a_max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x: f32, y: f32, side: f32) -> Aabb {
        Aabb::new(Vec2::new(x, y), Vec2::splat(side))
    }

    #[test]
    fn test_overlap() {
        let player = Aabb::new(Vec2::new(100.0, 520.0), Vec2::new(50.0, 60.0));
        assert!(square(120.0, 500.0, 45.0).intersects(&player));
        assert!(player.intersects(&square(120.0, 500.0, 45.0)));
    }

    #[test]
    fn test_touching_edges_do_not_intersect() {
        let a = square(0.0, 0.0, 10.0);
        assert!(!a.intersects(&square(10.0, 0.0, 10.0)));
        assert!(!a.intersects(&square(0.0, 10.0, 10.0)));
        assert!(a.intersects(&square(9.5, 9.5, 10.0)));
    }

    #[test]
    fn test_separated() {
        let player = Aabb::new(Vec2::new(100.0, 520.0), Vec2::new(50.0, 60.0));
        assert!(!square(300.0, 520.0, 45.0).intersects(&player));
        assert!(!square(110.0, 0.0, 45.0).intersects(&player));
    }

    #[test]
    fn test_empty_box_never_intersects() {
        let empty = Aabb::new(Vec2::new(5.0, 5.0), Vec2::ZERO);
        assert!(!empty.intersects(&square(0.0, 0.0, 10.0)));
    }
}
