//! Shape payloads stored in registry slots.
//!
//! The set of kinds is closed: the dispatcher switches on [`ShapePayload`]
//! instead of calling through a trait object.

mod line;
mod rect;
mod triangle;

pub use line::Line;
pub use rect::Rect;
pub use triangle::Triangle;

use crate::coords::{ColorRgba, Vec2};

/// A colored point in the shape's local space.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Point {
    pub position: Vec2,
    pub color: ColorRgba,
}

impl Point {
    #[inline]
    pub const fn new(position: Vec2, color: ColorRgba) -> Self {
        Self { position, color }
    }
}

/// Discriminant of [`ShapePayload`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ShapeKind {
    /// No geometry; the slot only carries a `DrawConfig` for others to attach to.
    Empty,
    Triangle,
    Rect,
    Line,
}

/// Geometry owned by a registry slot.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapePayload {
    Empty,
    Triangle(Triangle),
    Rect(Rect),
    Line(Line),
}

impl ShapePayload {
    /// Zero value for `kind`: all points at the origin, transparent black; empty line.
    pub fn zero(kind: ShapeKind) -> Self {
        match kind {
            ShapeKind::Empty => ShapePayload::Empty,
            ShapeKind::Triangle => ShapePayload::Triangle(Triangle::default()),
            ShapeKind::Rect => ShapePayload::Rect(Rect::default()),
            ShapeKind::Line => ShapePayload::Line(Line::default()),
        }
    }

    #[inline]
    pub fn kind(&self) -> ShapeKind {
        match self {
            ShapePayload::Empty => ShapeKind::Empty,
            ShapePayload::Triangle(_) => ShapeKind::Triangle,
            ShapePayload::Rect(_) => ShapeKind::Rect,
            ShapePayload::Line(_) => ShapeKind::Line,
        }
    }

    /// Points in submission order.
    pub fn points(&self) -> &[Point] {
        match self {
            ShapePayload::Empty => &[],
            ShapePayload::Triangle(t) => t.points(),
            ShapePayload::Rect(r) => r.points(),
            ShapePayload::Line(l) => l.points(),
        }
    }

    /// Mutable view that cannot change the payload's kind.
    #[inline]
    pub fn as_mut(&mut self) -> ShapeMut<'_> {
        match self {
            ShapePayload::Empty => ShapeMut::Empty,
            ShapePayload::Triangle(t) => ShapeMut::Triangle(t),
            ShapePayload::Rect(r) => ShapeMut::Rect(r),
            ShapePayload::Line(l) => ShapeMut::Line(l),
        }
    }
}

/// Kind-preserving mutable borrow of a slot payload.
///
/// Triangle and rect arities are fixed by their types; only a line can grow
/// or shrink.
#[derive(Debug)]
pub enum ShapeMut<'a> {
    Empty,
    Triangle(&'a mut Triangle),
    Rect(&'a mut Rect),
    Line(&'a mut Line),
}

impl<'a> ShapeMut<'a> {
    #[inline]
    pub fn kind(&self) -> ShapeKind {
        match self {
            ShapeMut::Empty => ShapeKind::Empty,
            ShapeMut::Triangle(_) => ShapeKind::Triangle,
            ShapeMut::Rect(_) => ShapeKind::Rect,
            ShapeMut::Line(_) => ShapeKind::Line,
        }
    }

    #[inline]
    pub fn into_triangle(self) -> Option<&'a mut Triangle> {
        match self {
            ShapeMut::Triangle(t) => Some(t),
            _ => None,
        }
    }

    #[inline]
    pub fn into_rect(self) -> Option<&'a mut Rect> {
        match self {
            ShapeMut::Rect(r) => Some(r),
            _ => None,
        }
    }

    #[inline]
    pub fn into_line(self) -> Option<&'a mut Line> {
        match self {
            ShapeMut::Line(l) => Some(l),
            _ => None,
        }
    }
}
