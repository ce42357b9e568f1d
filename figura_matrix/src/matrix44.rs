// Copyright 2026 the Figura Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Point;

/// 4×4 column-major affine matrix.
///
/// Only the axis-aligned 2D subspace is exercised: scale lives at elements
/// `0` and `5`, translation at `12` and `13`. All operations mutate in place
/// and allocate nothing. The type is deliberately not `Copy`: handing a
/// matrix to a consumer by value is a move, which keeps a projection that
/// the callee mutates in place from being accidentally reused afterwards.
/// `Clone` it when a snapshot is wanted.
///
/// Composition is right-multiply: [`Matrix44::multiply`] and the
/// `*_relative` operations compose the new transform in front of the
/// existing one, so it is applied to a point first.
///
/// Matrices are expected to stay invertible (scale components never zero);
/// feeding a zero scale into the inverse transforms is a caller contract
/// violation, not a checked error.
#[derive(Clone, Debug, PartialEq)]
pub struct Matrix44 {
    m: [f64; 16],
}

impl Matrix44 {
    /// The identity matrix.
    pub const IDENTITY: Self = Self {
        m: [
            1.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ],
    };

    /// Returns a matrix scaling by `(sx, sy)`.
    #[must_use]
    pub const fn from_scale(sx: f64, sy: f64) -> Self {
        let mut out = Self::IDENTITY;
        out.m[0] = sx;
        out.m[5] = sy;
        out
    }

    /// Returns a matrix translating by `(x, y)`.
    #[must_use]
    pub const fn from_translation(x: f64, y: f64) -> Self {
        let mut out = Self::IDENTITY;
        out.m[12] = x;
        out.m[13] = y;
        out
    }

    /// Resets this matrix to the identity.
    pub fn load_identity(&mut self) {
        *self = Self::IDENTITY;
    }

    /// Replaces the scale components with `(sx, sy)`.
    pub fn set_scale(&mut self, sx: f64, sy: f64) {
        self.m[0] = sx;
        self.m[5] = sy;
    }

    /// Composes a scale by `(sx, sy)` in front of this matrix.
    pub fn scale_relative(&mut self, sx: f64, sy: f64) {
        self.multiply(&Self::from_scale(sx, sy));
    }

    /// Replaces the translation components with `(x, y)`.
    pub fn set_translation(&mut self, x: f64, y: f64) {
        self.m[12] = x;
        self.m[13] = y;
    }

    /// Replaces the X translation component.
    pub fn set_translation_x(&mut self, x: f64) {
        self.m[12] = x;
    }

    /// Replaces the Y translation component.
    pub fn set_translation_y(&mut self, y: f64) {
        self.m[13] = y;
    }

    /// Composes a translation by `(x, y)` in front of this matrix.
    ///
    /// Because the translation is applied to points first, it is expressed in
    /// the matrix's *input* space and ends up scaled by the current scale.
    pub fn translate_relative(&mut self, x: f64, y: f64) {
        self.multiply(&Self::from_translation(x, y));
    }

    /// Composes `other` in front of this matrix (`self = self × other`).
    pub fn multiply(&mut self, other: &Self) {
        let a = &self.m;
        let b = &other.m;
        let mut out = [0.0; 16];
        for col in 0..4 {
            for row in 0..4 {
                let mut acc = 0.0;
                for k in 0..4 {
                    acc += a[k * 4 + row] * b[col * 4 + k];
                }
                out[col * 4 + row] = acc;
            }
        }
        self.m = out;
    }

    /// Applies this matrix to an X coordinate.
    #[must_use]
    pub fn transform_x(&self, x: f64) -> f64 {
        self.m[0] * x + self.m[12]
    }

    /// Applies this matrix to a Y coordinate.
    #[must_use]
    pub fn transform_y(&self, y: f64) -> f64 {
        self.m[5] * y + self.m[13]
    }

    /// Applies the inverse of this matrix to an X coordinate.
    #[must_use]
    pub fn invert_transform_x(&self, x: f64) -> f64 {
        (x - self.m[12]) / self.m[0]
    }

    /// Applies the inverse of this matrix to a Y coordinate.
    #[must_use]
    pub fn invert_transform_y(&self, y: f64) -> f64 {
        (y - self.m[13]) / self.m[5]
    }

    /// Applies this matrix to a point.
    #[must_use]
    pub fn transform_point(&self, pt: Point) -> Point {
        Point::new(self.transform_x(pt.x), self.transform_y(pt.y))
    }

    /// Applies the inverse of this matrix to a point.
    #[must_use]
    pub fn invert_transform_point(&self, pt: Point) -> Point {
        Point::new(self.invert_transform_x(pt.x), self.invert_transform_y(pt.y))
    }

    /// Returns the X scale component.
    #[must_use]
    pub fn scale_x(&self) -> f64 {
        self.m[0]
    }

    /// Returns the Y scale component.
    #[must_use]
    pub fn scale_y(&self) -> f64 {
        self.m[5]
    }

    /// Returns the X translation component.
    #[must_use]
    pub fn translation_x(&self) -> f64 {
        self.m[12]
    }

    /// Returns the Y translation component.
    #[must_use]
    pub fn translation_y(&self) -> f64 {
        self.m[13]
    }

    /// Returns the raw column-major elements.
    #[must_use]
    pub fn as_array(&self) -> &[f64; 16] {
        &self.m
    }

    /// Copies all sixteen elements from `values`.
    ///
    /// This is always an element-wise copy; later mutation of the source can
    /// never observably affect this matrix.
    pub fn set_array(&mut self, values: &[f64; 16]) {
        self.m = *values;
    }
}

impl Default for Matrix44 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Device→screen chain for an 800×600 surface: shorter axis spans two
    /// logical units, Y inverted, origin centered.
    fn device_to_screen_800x600() -> Matrix44 {
        let mut m = Matrix44::IDENTITY;
        m.scale_relative(2.0 / 600.0, -2.0 / 600.0);
        m.translate_relative(-400.0, -300.0);
        m
    }

    #[test]
    fn identity_leaves_points_unchanged() {
        let m = Matrix44::IDENTITY;
        assert_eq!(m.transform_x(12.5), 12.5);
        assert_eq!(m.transform_y(-3.0), -3.0);
    }

    #[test]
    fn relative_ops_compose_in_front() {
        // Scale first in code, translate second: the translation is applied
        // to points before the scale.
        let mut m = Matrix44::IDENTITY;
        m.scale_relative(2.0, 2.0);
        m.translate_relative(10.0, 0.0);
        assert_eq!(m.transform_x(0.0), 20.0);
        assert_eq!(m.transform_x(5.0), 30.0);
    }

    #[test]
    fn device_to_screen_maps_center_and_edges() {
        let m = device_to_screen_800x600();
        assert!(m.transform_x(400.0).abs() < 1e-9);
        assert!(m.transform_y(300.0).abs() < 1e-9);
        // Device right edge lands at +aspect, device top edge at +1 (Y up).
        assert!((m.transform_x(800.0) - 800.0 / 600.0).abs() < 1e-9);
        assert!((m.transform_y(0.0) - 1.0).abs() < 1e-9);
        assert!((m.transform_y(600.0) + 1.0).abs() < 1e-9);
    }

    #[test]
    fn transform_invert_round_trips() {
        let m = device_to_screen_800x600();
        for &(x, y) in &[
            (0.0, 0.0),
            (400.0, 300.0),
            (800.0, 600.0),
            (13.7, 521.9),
            (-42.0, 1234.5),
        ] {
            let p = m.transform_point(Point::new(x, y));
            let back = m.invert_transform_point(p);
            assert!((back.x - x).abs() < 1e-6);
            assert!((back.y - y).abs() < 1e-6);
        }
    }

    #[test]
    fn multiply_matches_sequential_application() {
        let mut chain = Matrix44::IDENTITY;
        chain.scale_relative(3.0, 0.5);
        chain.translate_relative(7.0, -2.0);

        let mut composed = Matrix44::from_scale(3.0, 0.5);
        composed.multiply(&Matrix44::from_translation(7.0, -2.0));

        assert_eq!(chain, composed);
        let p = composed.transform_point(Point::new(1.0, 1.0));
        assert_eq!(p, Point::new(24.0, -0.5));
    }

    #[test]
    fn set_scale_and_translation_are_absolute() {
        let mut m = Matrix44::from_scale(4.0, 4.0);
        m.set_scale(2.0, 3.0);
        assert_eq!(m.scale_x(), 2.0);
        assert_eq!(m.scale_y(), 3.0);
        m.set_translation(5.0, 6.0);
        m.set_translation_x(-1.0);
        assert_eq!(m.translation_x(), -1.0);
        assert_eq!(m.translation_y(), 6.0);
    }

    #[test]
    fn set_array_copies_elements() {
        let mut src = Matrix44::from_scale(2.0, 2.0);
        let mut dst = Matrix44::IDENTITY;
        dst.set_array(src.as_array());
        assert_eq!(dst, src);

        // Mutating the source never reaches the copy.
        src.set_scale(9.0, 9.0);
        assert_eq!(dst.scale_x(), 2.0);
    }
}
