//! Minimum translation vectors between shape pairs.
//!
//! Every function returns the vector pointing from the second shape toward the first: adding it
//! to the first shape (or subtracting it from the second) leaves the pair exactly touching.
//! Touching shapes produce `None`, as do shapes overlapping by no more than [`CONTACT_EPSILON`].

use super::{Aabb, Circle, Intersect, Obb};
use crate::{vector::VecExt, Fp, Vec2};

/// Axes closer to parallel than this are tested once.
const PARALLEL_EPSILON: Fp = 1e-6;
/// Penetration depth at or below which two shapes count as touching.
pub const CONTACT_EPSILON: Fp = 1e-3;

#[inline]
fn oriented(axis: Vec2, d: Vec2) -> Vec2 {
    //! Flips `axis` to point along `d`. A zero projection keeps the axis as is.
    if d.dot(axis) < 0.0 {
        -axis
    } else {
        axis
    }
}

pub fn aabb_aabb_mtv(a: &Aabb, b: &Aabb) -> Option<Vec2> {
    let d = a.center() - b.center();
    let overlap = a.half_extents() + b.half_extents() - d.abs();
    if overlap.x <= CONTACT_EPSILON || overlap.y <= CONTACT_EPSILON {
        return None;
    }
    // x wins ties
    if overlap.x <= overlap.y {
        Some(oriented(Vec2::X, d) * overlap.x)
    } else {
        Some(oriented(Vec2::Y, d) * overlap.y)
    }
}

pub fn obb_obb_mtv(a: &Obb, b: &Obb) -> Option<Vec2> {
    //! Separating axis test over both boxes' edge normals, `a`'s first.
    let [a0, a1] = a.axes();
    let [b0, b1] = b.axes();
    let axes = [a0, a1, b0, b1];
    let d = a.center - b.center;

    let mut best: Option<(Fp, Vec2)> = None;
    for (i, &axis) in axes.iter().enumerate() {
        if axes[..i].iter().any(|prev| prev.perp_dot(axis).abs() < PARALLEL_EPSILON) {
            continue;
        }
        let overlap = a.extent_on_axis(axis) + b.extent_on_axis(axis) - d.dot(axis).abs();
        if overlap <= CONTACT_EPSILON {
            return None; // separating axis found
        }
        if best.map_or(true, |(depth, _)| overlap < depth) {
            best = Some((overlap, oriented(axis, d)));
        }
    }
    best.map(|(depth, axis)| axis * depth)
}

pub fn point_obb_mtv(p: Vec2, o: &Obb) -> Option<Vec2> {
    //! Treats the point as a box without extent sharing `o`'s rotation, so only `o`'s axes count.
    let point = Obb { center: p, half: Vec2::ZERO, rot: o.rot };
    obb_obb_mtv(&point, o)
}

pub fn point_circle_mtv(p: Vec2, c: &Circle) -> Option<Vec2> {
    let d = p - c.pos;
    let dist = d.length();
    if dist >= c.rad - CONTACT_EPSILON {
        return None;
    }
    let dir = if dist > 0.0 { d / dist } else { Vec2::X };
    Some(dir * (c.rad - dist))
}

pub fn circle_circle_mtv(a: &Circle, b: &Circle) -> Option<Vec2> {
    let d = a.pos - b.pos;
    let dist = d.length();
    let reach = a.rad + b.rad;
    if dist >= reach - CONTACT_EPSILON {
        return None;
    }
    let dir = if dist > 0.0 { d / dist } else { Vec2::X };
    Some(dir * (reach - dist))
}

pub fn circle_obb_mtv(c: &Circle, o: &Obb) -> Option<Vec2> {
    //! Closest-point test in the box's frame. A center inside the box leaves through the nearest face.
    let local = o.to_local(c.pos);
    let closest = local.max(-o.half).min(o.half);

    if closest == local {
        let gap = o.half - local.abs();
        let push = if gap.x <= gap.y {
            oriented(Vec2::X, local) * (gap.x + c.rad)
        } else {
            oriented(Vec2::Y, local) * (gap.y + c.rad)
        };
        return Some(push.rotated(o.rot));
    }

    let delta = local - closest;
    let dist = delta.length();
    if dist >= c.rad - CONTACT_EPSILON {
        return None;
    }
    Some((delta / dist * (c.rad - dist)).rotated(o.rot))
}
