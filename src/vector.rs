//! Rotation and heading helpers over [`Vec2`](crate::Vec2).

use crate::{Fp, Vec2};

pub trait VecExt: Sized {
    /// Returns the vector rotated counter-clockwise (clockwise on a y-down screen) by `radians`.
    fn rotated(self, radians: Fp) -> Self;
    /// Unit vector at `degrees` from the positive x axis, scaled to `length`.
    fn from_heading(degrees: Fp, length: Fp) -> Self;
    /// Angle from the positive x axis in degrees, within `(-180, 180]`. A zero vector has heading `0`.
    fn heading(self) -> Fp;
    fn normalize_or_zero_safe(self) -> Self;
    fn with_length(self, length: Fp) -> Self;
    fn limited(self, max: Fp) -> Self;
}

impl VecExt for Vec2 {
    #[inline]
    fn rotated(self, radians: Fp) -> Vec2 {
        if radians == 0.0 {
            return self;
        }
        let (sin, cos) = radians.sin_cos();
        Vec2::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }

    #[inline]
    fn from_heading(degrees: Fp, length: Fp) -> Vec2 {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Vec2::new(cos * length, sin * length)
    }

    #[inline]
    fn heading(self) -> Fp {
        let heading = self.y.atan2(self.x);
        if heading.is_nan() {
            0.0
        } else {
            heading.to_degrees()
        }
    }

    #[inline]
    fn normalize_or_zero_safe(self) -> Vec2 {
        let len = self.length();
        if len > 0.0 && len.is_finite() {
            self / len
        } else {
            Vec2::ZERO
        }
    }

    #[inline]
    fn with_length(self, length: Fp) -> Vec2 {
        self.normalize_or_zero_safe() * length
    }

    fn limited(self, max: Fp) -> Vec2 {
        //! Clamps the magnitude to `max`, keeping the direction.
        if self.length_squared() > max * max {
            self.with_length(max)
        } else {
            self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn heading_quadrants() {
        assert_eq!(Vec2::ZERO.heading(), 0.0);
        assert_relative_eq!(Vec2::new(1.0, 0.0).heading(), 0.0);
        assert_relative_eq!(Vec2::new(-1.0, 0.0).heading(), 180.0, epsilon = 1e-4);
        assert_relative_eq!(Vec2::new(1.0, 1.0).heading(), 45.0, epsilon = 1e-4);
        assert_relative_eq!(Vec2::new(0.0, 1.0).heading(), 90.0, epsilon = 1e-4);
        assert_relative_eq!(Vec2::new(-1.0, 1.0).heading(), 135.0, epsilon = 1e-4);
        assert_relative_eq!(Vec2::new(-1.0, -1.0).heading(), -135.0, epsilon = 1e-4);
        assert_relative_eq!(Vec2::new(0.0, -1.0).heading(), -90.0, epsilon = 1e-4);
    }

    #[test]
    fn rotation_is_counter_clockwise() {
        let r = Vec2::new(2.0, 3.0).rotated((90.0 as Fp).to_radians());
        assert_relative_eq!(r.x, -3.0, epsilon = 1e-5);
        assert_relative_eq!(r.y, 2.0, epsilon = 1e-5);
        assert_eq!(Vec2::new(2.0, 3.0).rotated(0.0), Vec2::new(2.0, 3.0));
    }

    #[test]
    fn magnitude_helpers() {
        let v = Vec2::new(3.0, 4.0);
        assert_eq!(v.length(), 5.0);
        assert_eq!(v, Vec2::new(3.0, 4.0));
        assert_relative_eq!(v.limited(2.5).length(), 2.5, epsilon = 1e-5);
        assert_eq!(v.limited(10.0), v);
        assert_eq!(Vec2::ZERO.with_length(3.0), Vec2::ZERO);

        let h = Vec2::from_heading(100.0, 5.0);
        assert_relative_eq!(h.length(), 5.0, epsilon = 1e-4);
        assert_relative_eq!(h.heading(), 100.0, epsilon = 1e-3);
    }
}
