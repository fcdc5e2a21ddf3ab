use super::Vec2;

/// 2D affine transform.
///
/// Stored as `[a, b, c, d, e, f]`, mapping a point as:
///
/// ```text
/// x' = a*x + c*y + e
/// y' = b*x + d*y + f
/// ```
///
/// Composition is written in application order: `s.then(t)` maps a point
/// through `s` first and `t` second.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform2 {
    coeffs: [f32; 6],
}

impl Transform2 {
    pub const IDENTITY: Transform2 = Transform2::new([1.0, 0.0, 0.0, 1.0, 0.0, 0.0]);

    #[inline]
    pub const fn new(coeffs: [f32; 6]) -> Self {
        Self { coeffs }
    }

    #[inline]
    pub const fn scale(s: f32) -> Self {
        Self::scale_non_uniform(s, s)
    }

    #[inline]
    pub const fn scale_non_uniform(sx: f32, sy: f32) -> Self {
        Self::new([sx, 0.0, 0.0, sy, 0.0, 0.0])
    }

    #[inline]
    pub const fn translate(offset: Vec2) -> Self {
        Self::new([1.0, 0.0, 0.0, 1.0, offset.x, offset.y])
    }

    /// Rotation by `radians`. With +Y down this turns clockwise on screen.
    #[inline]
    pub fn rotate(radians: f32) -> Self {
        let (sin, cos) = radians.sin_cos();
        Self::new([cos, sin, -sin, cos, 0.0, 0.0])
    }

    #[inline]
    pub const fn coeffs(self) -> [f32; 6] {
        self.coeffs
    }

    /// Linear part as `[a, b, c, d]`.
    #[inline]
    pub const fn linear(self) -> [f32; 4] {
        let [a, b, c, d, _, _] = self.coeffs;
        [a, b, c, d]
    }

    /// Translation part as `[e, f]`.
    #[inline]
    pub const fn translation(self) -> [f32; 2] {
        [self.coeffs[4], self.coeffs[5]]
    }

    #[inline]
    pub fn apply(self, p: Vec2) -> Vec2 {
        let [a, b, c, d, e, f] = self.coeffs;
        Vec2::new(a * p.x + c * p.y + e, b * p.x + d * p.y + f)
    }

    /// Returns the transform that applies `self` first, then `next`.
    pub fn then(self, next: Transform2) -> Transform2 {
        let [a1, b1, c1, d1, e1, f1] = self.coeffs;
        let [a2, b2, c2, d2, e2, f2] = next.coeffs;
        Transform2::new([
            a2 * a1 + c2 * b1,
            b2 * a1 + d2 * b1,
            a2 * c1 + c2 * d1,
            b2 * c1 + d2 * d1,
            a2 * e1 + c2 * f1 + e2,
            b2 * e1 + d2 * f1 + f2,
        ])
    }

    /// Appends a uniform scale.
    #[inline]
    pub fn scale_by(&mut self, amount: f32) {
        *self = self.then(Transform2::scale(amount));
    }

    /// Appends a translation.
    #[inline]
    pub fn translate_by(&mut self, offset: Vec2) {
        *self = self.then(Transform2::translate(offset));
    }

    /// Appends a rotation.
    #[inline]
    pub fn rotate_by(&mut self, radians: f32) {
        *self = self.then(Transform2::rotate(radians));
    }

    pub fn approx_eq(self, other: Transform2, eps: f32) -> bool {
        self.coeffs
            .iter()
            .zip(other.coeffs.iter())
            .all(|(a, b)| (a - b).abs() <= eps)
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.coeffs.iter().all(|v| v.is_finite())
    }
}

impl Default for Transform2 {
    #[inline]
    fn default() -> Self {
        Self::IDENTITY
    }
}
