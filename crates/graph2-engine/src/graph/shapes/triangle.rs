use core::ops::{Index, IndexMut};

use crate::coords::{ColorRgba, Vec2};

use super::Point;

/// Exactly three colored points.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Triangle {
    points: [Point; 3],
}

impl Triangle {
    #[inline]
    pub const fn new(a: Point, b: Point, c: Point) -> Self {
        Self { points: [a, b, c] }
    }

    #[inline]
    pub fn a(&self) -> &Point {
        &self.points[0]
    }

    #[inline]
    pub fn b(&self) -> &Point {
        &self.points[1]
    }

    #[inline]
    pub fn c(&self) -> &Point {
        &self.points[2]
    }

    #[inline]
    pub fn a_mut(&mut self) -> &mut Point {
        &mut self.points[0]
    }

    #[inline]
    pub fn b_mut(&mut self) -> &mut Point {
        &mut self.points[1]
    }

    #[inline]
    pub fn c_mut(&mut self) -> &mut Point {
        &mut self.points[2]
    }

    /// Replaces positions only; colors are kept.
    pub fn set_positions(&mut self, positions: [Vec2; 3]) {
        for (point, position) in self.points.iter_mut().zip(positions) {
            point.position = position;
        }
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

impl Index<usize> for Triangle {
    type Output = Point;
    #[inline]
    fn index(&self, index: usize) -> &Point {
        &self.points[index]
    }
}

impl IndexMut<usize> for Triangle {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Point {
        &mut self.points[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_positions_keeps_colors() {
        let mut t = Triangle::default();
        t.set_color(ColorRgba::red());
        t.set_positions([Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0)]);

        assert_eq!(t.a().position, Vec2::new(0.0, 0.0));
        assert_eq!(t.b().position, Vec2::new(1.0, 0.0));
        assert_eq!(t.c().position, Vec2::new(0.0, 1.0));
        assert!(t.points().iter().all(|p| p.color == ColorRgba::red()));
    }

    #[test]
    fn named_accessors_alias_indices() {
        let mut t = Triangle::default();
        t.c_mut().position = Vec2::new(5.0, 5.0);
        assert_eq!(t[2].position, Vec2::new(5.0, 5.0));
    }
}
