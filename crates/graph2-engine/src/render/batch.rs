use core::ops::Range;

use bytemuck::{Pod, Zeroable};

use crate::coords::Vec2;
use crate::graph::{Backend, DrawConfig, Point, ShapeKind, Submission};

use super::key::SortKey;

/// GPU vertex: local position and color, plus the effective transform and tint.
///
/// Positions stay in local space; the vertex shader applies `basis`/`translation`.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct GraphicsVertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
    pub tint: [f32; 4],
    /// Linear part of the transform, `[a, b, c, d]`.
    pub basis: [f32; 4],
    /// Translation part of the transform, `[e, f]`.
    pub translation: [f32; 2],
}

impl GraphicsVertex {
    const ATTRS: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
        0 => Float32x2, // position
        1 => Float32x4, // color
        2 => Float32x4, // tint
        3 => Float32x4, // basis
        4 => Float32x2  // translation
    ];

    pub(super) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<GraphicsVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }

    fn new(position: Vec2, point: &Point, config: &DrawConfig) -> Self {
        Self {
            position: [position.x, position.y],
            color: point.color.to_array(),
            tint: config.color_multiplier.to_array(),
            basis: config.transform.linear(),
            translation: config.transform.translation(),
        }
    }
}

#[derive(Debug, Clone)]
struct BatchItem {
    key: SortKey,
    vertices: Range<usize>,
}

/// Frame batch of tessellated graphics; the CPU half of the wgpu backend.
///
/// Implements [`Backend`]: each submission is turned into triangle-list
/// vertices immediately and tagged with `(layer, submission order)`.
///
/// Performance characteristics:
/// - `submit()` is O(vertices)
/// - paint-order vertices are rebuilt only when the batch changed; buffers are reused across frames
#[derive(Debug, Default)]
pub struct GraphicsBatch {
    vertices: Vec<GraphicsVertex>,
    items: Vec<BatchItem>,
    next_order: u32,

    sorted: Vec<GraphicsVertex>,
    sorted_dirty: bool,
}

impl GraphicsBatch {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears recorded shapes. Keeps allocated capacity for reuse.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.items.clear();
        self.next_order = 0;
        self.sorted.clear();
        self.sorted_dirty = true;
    }

    /// Number of submissions that produced geometry.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Vertices ordered back-to-front.
    pub fn vertices_in_paint_order(&mut self) -> &[GraphicsVertex] {
        if self.sorted_dirty {
            self.rebuild_sorted();
        }
        &self.sorted
    }

    fn rebuild_sorted(&mut self) {
        // Stable ordering is ensured by SortKey including submission order.
        self.items.sort_by_key(|item| item.key);

        self.sorted.clear();
        self.sorted.reserve(self.vertices.len());
        for item in &self.items {
            self.sorted.extend_from_slice(&self.vertices[item.vertices.clone()]);
        }
        self.sorted_dirty = false;
    }
}

impl Backend for GraphicsBatch {
    fn submit(&mut self, submission: Submission<'_>) {
        if !is_drawable(&submission) {
            log::debug!("dropping {:?} submission with non-finite geometry", submission.kind);
            return;
        }

        let start = self.vertices.len();
        tessellate(&submission, &mut self.vertices);
        let end = self.vertices.len();
        if start == end {
            return;
        }

        let order = self.next_order;
        self.next_order = self.next_order.wrapping_add(1);
        self.items.push(BatchItem {
            key: SortKey::new(submission.config.layer, order),
            vertices: start..end,
        });
        self.sorted_dirty = true;
    }
}

/// NaN or infinite inputs would rasterize as garbage across the whole target.
fn is_drawable(submission: &Submission<'_>) -> bool {
    let config = submission.config;
    config.transform.is_finite()
        && config.color_multiplier.is_finite()
        && submission
            .vertices
            .iter()
            .all(|p| p.position.is_finite() && p.color.is_finite())
}

/// Appends triangle-list vertices for `submission` to `out`.
fn tessellate(submission: &Submission<'_>, out: &mut Vec<GraphicsVertex>) {
    let config = submission.config;
    let emit = |out: &mut Vec<GraphicsVertex>, p: &Point| {
        out.push(GraphicsVertex::new(p.position, p, config));
    };

    match submission.kind {
        ShapeKind::Empty => {}
        ShapeKind::Triangle => {
            if let [a, b, c] = submission.vertices {
                emit(out, a);
                emit(out, b);
                emit(out, c);
            }
        }
        ShapeKind::Rect => {
            if let [tl, tr, bl, br] = submission.vertices {
                for p in [tl, tr, bl, tr, br, bl] {
                    emit(out, p);
                }
            }
        }
        ShapeKind::Line => {
            let half = submission.line_thickness.unwrap_or(0.0) * 0.5;
            if half <= 0.0 || !half.is_finite() {
                return;
            }
            for segment in submission.vertices.windows(2) {
                let (p0, p1) = (&segment[0], &segment[1]);
                let Some(dir) = (p1.position - p0.position).normalized() else { continue };
                let offset = dir.perp() * half;

                let corners = [
                    (p0.position + offset, p0),
                    (p0.position - offset, p0),
                    (p1.position + offset, p1),
                    (p0.position - offset, p0),
                    (p1.position - offset, p1),
                    (p1.position + offset, p1),
                ];
                for (position, point) in corners {
                    out.push(GraphicsVertex::new(position, point, config));
                }
            }
        }
    }
}
