//! World-space shape primitives and their overlap queries.

pub mod sat;

use crate::{vector::VecExt, Fp, Vec2};

// ---------- Primitives ---------- //

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle {
    pub rad: Fp,
    pub pos: Vec2,
}
impl Circle {
    #[inline]
    pub fn new(rad: Fp, posx: Fp, posy: Fp) -> Circle {
        Circle {
            rad: rad.abs(),
            pos: Vec2::new(posx, posy),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}
impl Aabb {
    #[inline]
    pub fn new(minx: Fp, miny: Fp, maxx: Fp, maxy: Fp) -> Aabb {
        Aabb {
            min: Vec2::new(minx, miny),
            max: Vec2::new(maxx, maxy),
        }
    }
    #[inline]
    pub fn from_center(center: Vec2, half: Vec2) -> Aabb {
        //! Builds the box from its center and half extents. Negative extents are flipped.
        let half = half.abs();
        Aabb {
            min: center - half,
            max: center + half,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }
    #[inline]
    pub fn half_extents(&self) -> Vec2 {
        (self.max - self.min) * 0.5
    }
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        //! Strict: boxes sharing only an edge do not intersect.
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }
    #[inline]
    pub fn to_obb(&self) -> Obb {
        //! An AABB is an OBB without rotation.
        Obb {
            center: self.center(),
            half: self.half_extents(),
            rot: 0.0,
        }
    }
}

/// An oriented box: `half` extents along its local axes, rotated by `rot` radians about `center`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obb {
    pub center: Vec2,
    pub half: Vec2,
    pub rot: Fp,
}
impl Obb {
    #[inline]
    pub fn new(center: Vec2, width: Fp, height: Fp, rot: Fp) -> Obb {
        Obb {
            center,
            half: Vec2::new(width.abs() * 0.5, height.abs() * 0.5),
            rot,
        }
    }

    #[inline]
    pub fn axes(&self) -> [Vec2; 2] {
        //! Unit edge normals of the box, local x first.
        if self.rot == 0.0 {
            return [Vec2::X, Vec2::Y];
        }
        let (sin, cos) = self.rot.sin_cos();
        [Vec2::new(cos, sin), Vec2::new(-sin, cos)]
    }

    #[inline]
    pub fn to_local(&self, point: Vec2) -> Vec2 {
        (point - self.center).rotated(-self.rot)
    }
}

// ---------- Intersect ---------- //

pub trait Intersect {
    fn get_bounding_box(&self) -> Aabb;

    /// Strict containment: points on the boundary are outside.
    fn point_test(&self, point: Vec2) -> bool;
    /// Half-length of the shape's projection onto the unit vector `axis`.
    fn extent_on_axis(&self, axis: Vec2) -> Fp;
}

impl Intersect for Circle {
    #[inline]
    fn get_bounding_box(&self) -> Aabb {
        Aabb::from_center(self.pos, Vec2::splat(self.rad))
    }

    #[inline]
    fn point_test(&self, point: Vec2) -> bool {
        (self.pos - point).length_squared() < self.rad * self.rad
    }
    #[inline]
    fn extent_on_axis(&self, _axis: Vec2) -> Fp {
        self.rad
    }
}
impl Intersect for Aabb {
    #[inline]
    fn get_bounding_box(&self) -> Aabb {
        *self
    }

    #[inline]
    fn point_test(&self, point: Vec2) -> bool {
        point.x > self.min.x
            && point.x < self.max.x
            && point.y > self.min.y
            && point.y < self.max.y
    }
    #[inline]
    fn extent_on_axis(&self, axis: Vec2) -> Fp {
        let half = self.half_extents();
        half.x * axis.x.abs() + half.y * axis.y.abs()
    }
}
impl Intersect for Obb {
    fn get_bounding_box(&self) -> Aabb {
        let half = Vec2::new(self.extent_on_axis(Vec2::X), self.extent_on_axis(Vec2::Y));
        Aabb::from_center(self.center, half)
    }

    #[inline]
    fn point_test(&self, point: Vec2) -> bool {
        let local = self.to_local(point);
        local.x.abs() < self.half.x && local.y.abs() < self.half.y
    }
    #[inline]
    fn extent_on_axis(&self, axis: Vec2) -> Fp {
        let [u, v] = self.axes();
        self.half.x * axis.dot(u).abs() + self.half.y * axis.dot(v).abs()
    }
}

// ---------- Shape ---------- //

/// A collider resolved into world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Point(Vec2),
    Circle(Circle),
    Aabb(Aabb),
    Obb(Obb),
}
impl Shape {
    pub fn center(&self) -> Vec2 {
        match self {
            Shape::Point(p) => *p,
            Shape::Circle(c) => c.pos,
            Shape::Aabb(a) => a.center(),
            Shape::Obb(o) => o.center,
        }
    }

    pub fn translation_vector(&self, other: &Shape) -> Option<Vec2> {
        //! Returns the minimum translation vector separating `self` from `other`, pointing from
        //! `other` toward `self`, or `None` if the shapes do not overlap. Touching is not overlap.
        use sat::*;
        if !self.get_bounding_box().intersects(&other.get_bounding_box()) {
            return None;
        }
        match (self, other) {
            (Shape::Point(_), Shape::Point(_)) => None,
            (Shape::Point(p), Shape::Circle(c)) => point_circle_mtv(*p, c),
            (Shape::Point(p), Shape::Aabb(a)) => point_obb_mtv(*p, &a.to_obb()),
            (Shape::Point(p), Shape::Obb(o)) => point_obb_mtv(*p, o),

            (Shape::Circle(c), Shape::Point(p)) => point_circle_mtv(*p, c).map(|v| -v),
            (Shape::Circle(c1), Shape::Circle(c2)) => circle_circle_mtv(c1, c2),
            (Shape::Circle(c), Shape::Aabb(a)) => circle_obb_mtv(c, &a.to_obb()),
            (Shape::Circle(c), Shape::Obb(o)) => circle_obb_mtv(c, o),

            (Shape::Aabb(a), Shape::Point(p)) => point_obb_mtv(*p, &a.to_obb()).map(|v| -v),
            (Shape::Aabb(a), Shape::Circle(c)) => circle_obb_mtv(c, &a.to_obb()).map(|v| -v),
            (Shape::Aabb(a1), Shape::Aabb(a2)) => aabb_aabb_mtv(a1, a2),
            (Shape::Aabb(a), Shape::Obb(o)) => obb_obb_mtv(&a.to_obb(), o),

            (Shape::Obb(o), Shape::Point(p)) => point_obb_mtv(*p, o).map(|v| -v),
            (Shape::Obb(o), Shape::Circle(c)) => circle_obb_mtv(c, o).map(|v| -v),
            (Shape::Obb(o), Shape::Aabb(a)) => obb_obb_mtv(o, &a.to_obb()),
            (Shape::Obb(o1), Shape::Obb(o2)) => obb_obb_mtv(o1, o2),
        }
    }

    #[inline]
    pub fn overlaps(&self, other: &Shape) -> bool {
        self.translation_vector(other).is_some()
    }
}

impl Intersect for Shape {
    fn get_bounding_box(&self) -> Aabb {
        match self {
            Shape::Point(p) => Aabb::from_center(*p, Vec2::ZERO),
            Shape::Circle(c) => c.get_bounding_box(),
            Shape::Aabb(a) => *a,
            Shape::Obb(o) => o.get_bounding_box(),
        }
    }

    fn point_test(&self, point: Vec2) -> bool {
        match self {
            Shape::Point(_) => false,
            Shape::Circle(c) => c.point_test(point),
            Shape::Aabb(a) => a.point_test(point),
            Shape::Obb(o) => o.point_test(point),
        }
    }
    fn extent_on_axis(&self, axis: Vec2) -> Fp {
        match self {
            Shape::Point(_) => 0.0,
            Shape::Circle(c) => c.extent_on_axis(axis),
            Shape::Aabb(a) => a.extent_on_axis(axis),
            Shape::Obb(o) => o.extent_on_axis(axis),
        }
    }
}

impl From<Circle> for Shape {
    fn from(circle: Circle) -> Self {
        Shape::Circle(circle)
    }
}
impl From<Aabb> for Shape {
    fn from(aabb: Aabb) -> Self {
        Shape::Aabb(aabb)
    }
}
impl From<Obb> for Shape {
    fn from(obb: Obb) -> Self {
        Shape::Obb(obb)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn point_tests_are_strict() {
        let aabb = Aabb::new(0.0, 0.0, 100.0, 100.0);
        assert!(!aabb.point_test(Vec2::new(0.0, 0.0)));
        assert!(aabb.point_test(Vec2::new(1.0, 1.0)));
        assert!(aabb.point_test(Vec2::new(99.0, 99.0)));
        assert!(!aabb.point_test(Vec2::new(100.0, 100.0)));

        let c = Circle::new(2.0, 1.0, 1.0);
        assert!(c.point_test(Vec2::new(1.0, 1.0)));
        assert!(!c.point_test(Vec2::new(3.0, 1.0)));
        assert!(!c.point_test(Vec2::new(3.5, 3.5)));

        assert!(!Shape::Point(Vec2::ZERO).point_test(Vec2::ZERO));
    }

    #[test]
    fn rotated_obb_containment() {
        let o = Obb::new(Vec2::ZERO, 4.0, 1.0, (90.0 as Fp).to_radians());
        assert!(o.point_test(Vec2::new(0.0, 1.8)));
        assert!(!o.point_test(Vec2::new(1.8, 0.0)));
    }

    #[test]
    fn extents_and_bounds() {
        let o = Obb::new(Vec2::new(5.0, 5.0), 2.0, 2.0, (45.0 as Fp).to_radians());
        let r = (2.0 as Fp).sqrt();
        assert_relative_eq!(o.extent_on_axis(Vec2::X), r, epsilon = 1e-5);
        let bb = o.get_bounding_box();
        assert_relative_eq!(bb.min.x, 5.0 - r, epsilon = 1e-5);
        assert_relative_eq!(bb.max.y, 5.0 + r, epsilon = 1e-5);

        let a = Aabb::new(-1.0, -2.0, 1.0, 2.0);
        assert_eq!(a.to_obb(), Obb { center: Vec2::ZERO, half: Vec2::new(1.0, 2.0), rot: 0.0 });
        assert_eq!(Shape::from(a).extent_on_axis(Vec2::Y), 2.0);
        assert_eq!(Shape::Circle(Circle::new(3.0, 0.0, 0.0)).extent_on_axis(Vec2::X), 3.0);
    }

    #[test]
    fn bounds_reject_distant_pairs() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.intersects(&Aabb::new(9.0, 9.0, 12.0, 12.0)));
        assert!(!a.intersects(&Aabb::new(10.0, 0.0, 12.0, 10.0)));

        let far = Shape::Obb(Obb::new(Vec2::new(40.0, 0.0), 4.0, 4.0, 0.7));
        let circle = Shape::Circle(Circle::new(3.0, 0.0, 0.0));
        assert!(!circle.get_bounding_box().intersects(&far.get_bounding_box()));
        assert_eq!(circle.translation_vector(&far), None);
        assert_eq!(Shape::Point(Vec2::new(3.0, 0.0)).translation_vector(&circle), None);
        assert!(Shape::Point(Vec2::new(2.0, 0.0)).overlaps(&circle));
    }

    #[test]
    fn translation_vectors_are_antisymmetric() {
        let shapes = [
            Shape::Point(Vec2::new(0.5, 0.2)),
            Shape::Circle(Circle::new(1.0, 0.0, 0.0)),
            Shape::Aabb(Aabb::new(-0.4, -0.9, 1.1, 0.9)),
            Shape::Obb(Obb::new(Vec2::new(0.3, 0.1), 1.5, 1.0, 0.4)),
        ];
        for a in shapes.iter() {
            for b in shapes.iter() {
                if a == b {
                    continue; // coincident centers have no preferred direction
                }
                let ab = a.translation_vector(b);
                let ba = b.translation_vector(a);
                assert_eq!(ab.is_some(), ba.is_some(), "{:?} vs {:?}", a, b);
                if let (Some(ab), Some(ba)) = (ab, ba) {
                    assert_relative_eq!(ab.x, -ba.x, epsilon = 1e-4);
                    assert_relative_eq!(ab.y, -ba.y, epsilon = 1e-4);
                }
            }
        }
    }
}
