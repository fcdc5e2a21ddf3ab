use core::ops::{Index, IndexMut};

use super::Point;

/// Polyline: an ordered, resizable run of colored points plus a stroke thickness.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    points: Vec<Point>,
    thickness: f32,
}

impl Default for Line {
    fn default() -> Self {
        Self {
            points: Vec::new(),
            thickness: 1.0,
        }
    }
}

impl Line {
    pub fn new(points: Vec<Point>, thickness: f32) -> Self {
        Self { points, thickness }
    }

    #[inline]
    pub fn thickness(&self) -> f32 {
        self.thickness
    }

    #[inline]
    pub fn set_thickness(&mut self, thickness: f32) {
        self.thickness = thickness;
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn push(&mut self, point: Point) {
        self.points.push(point);
    }

    /// # Panics
    /// Panics if `index > len`.
    #[inline]
    pub fn insert(&mut self, index: usize, point: Point) {
        self.points.insert(index, point);
    }

    /// New points are `Point::default()`.
    #[inline]
    pub fn resize(&mut self, len: usize) {
        self.points.resize(len, Point::default());
    }

    #[inline]
    pub fn reserve(&mut self, additional: usize) {
        self.points.reserve(additional);
    }

    #[inline]
    pub fn clear(&mut self) {
        self.points.clear();
    }

    #[inline]
    pub fn front(&self) -> Option<&Point> {
        self.points.first()
    }

    #[inline]
    pub fn back(&self) -> Option<&Point> {
        self.points.last()
    }

    #[inline]
    pub fn front_mut(&mut self) -> Option<&mut Point> {
        self.points.first_mut()
    }

    #[inline]
    pub fn back_mut(&mut self) -> Option<&mut Point> {
        self.points.last_mut()
    }

    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    #[inline]
    pub fn points_mut(&mut self) -> &mut [Point] {
        &mut self.points
    }
}

impl Index<usize> for Line {
    type Output = Point;
    #[inline]
    fn index(&self, index: usize) -> &Point {
        &self.points[index]
    }
}

impl IndexMut<usize> for Line {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Point {
        &mut self.points[index]
    }
}

impl Extend<Point> for Line {
    fn extend<I: IntoIterator<Item = Point>>(&mut self, iter: I) {
        self.points.extend(iter);
    }
}
