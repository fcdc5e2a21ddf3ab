use core::ops::{Index, IndexMut};

use crate::coords::{ColorRgba, Vec2};

use super::Point;

const TOP_LEFT: usize = 0;
const TOP_RIGHT: usize = 1;
const BOT_LEFT: usize = 2;
const BOT_RIGHT: usize = 3;

/// Exactly four colored corners.
///
/// Storage order is top-left, top-right, bottom-left, bottom-right. Corners are
/// free points, so the quad need not be axis-aligned.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    points: [Point; 4],
}

impl Rect {
    /// Axis-aligned rect from origin and size, every corner `color`.
    pub fn from_origin_size(origin: Vec2, size: Vec2, color: ColorRgba) -> Self {
        let corner = |x: f32, y: f32| Point::new(Vec2::new(x, y), color);
        Self {
            points: [
                corner(origin.x, origin.y),
                corner(origin.x + size.x, origin.y),
                corner(origin.x, origin.y + size.y),
                corner(origin.x + size.x, origin.y + size.y),
            ],
        }
    }

    #[inline]
    pub fn top_left(&self) -> &Point {
        &self.points[TOP_LEFT]
    }

    #[inline]
    pub fn top_right(&self) -> &Point {
        &self.points[TOP_RIGHT]
    }

    #[inline]
    pub fn bot_left(&self) -> &Point {
        &self.points[BOT_LEFT]
    }

    #[inline]
    pub fn bot_right(&self) -> &Point {
        &self.points[BOT_RIGHT]
    }

    #[inline]
    pub fn top_left_mut(&mut self) -> &mut Point {
        &mut self.points[TOP_LEFT]
    }

    #[inline]
    pub fn top_right_mut(&mut self) -> &mut Point {
        &mut self.points[TOP_RIGHT]
    }

    #[inline]
    pub fn bot_left_mut(&mut self) -> &mut Point {
        &mut self.points[BOT_LEFT]
    }

    #[inline]
    pub fn bot_right_mut(&mut self) -> &mut Point {
        &mut self.points[BOT_RIGHT]
    }

    pub fn set_color(&mut self, color: ColorRgba) {
        for point in &mut self.points {
            point.color = color;
        }
    }

    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }
}

impl Index<usize> for Rect {
    type Output = Point;
    #[inline]
    fn index(&self, index: usize) -> &Point {
        &self.points[index]
    }
}

impl IndexMut<usize> for Rect {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Point {
        &mut self.points[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_origin_size_corners() {
        let r = Rect::from_origin_size(Vec2::new(1.0, 2.0), Vec2::new(10.0, 20.0), ColorRgba::white());
        assert_eq!(r.top_left().position, Vec2::new(1.0, 2.0));
        assert_eq!(r.top_right().position, Vec2::new(11.0, 2.0));
        assert_eq!(r.bot_left().position, Vec2::new(1.0, 22.0));
        assert_eq!(r.bot_right().position, Vec2::new(11.0, 22.0));
    }

    #[test]
    fn corner_order_matches_indices() {
        let mut r = Rect::default();
        r.bot_left_mut().color = ColorRgba::red();
        assert_eq!(r[2].color, ColorRgba::red());
        assert_eq!(r.points().len(), 4);
    }
}
