//! Pairwise collision response between two sprites.

use crate::{sprite::Sprite, vector::VecExt, Fp, Vec2};

/// Describes what happens to a pair of sprites whose colliders overlap.
///
/// In every case the minimum translation vector points from the second sprite toward the first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Response {
    /// Reports the overlap and changes nothing.
    Overlap = 0,
    /// Pushes the other sprite out, leaving the first untouched.
    Displace = 1,
    /// Moves the first sprite out and stops both along the contact normal.
    Collide = 2,
    /// Moves the first sprite out and exchanges momentum along the contact normal.
    Bounce = 3,
    /// Moves the first sprite out and reflects its own velocity.
    BounceOff = 4,
}

impl Response {
    pub const ALL: [Response; 5] = [
        Response::Overlap,
        Response::Displace,
        Response::Collide,
        Response::Bounce,
        Response::BounceOff,
    ];

    pub fn resolve(self, a: &mut Sprite, b: &mut Sprite) -> bool {
        //! Tests `a` against `b` and applies the response if they overlap. Removed sprites never
        //! overlap anything. Sprites without a collider receive their default one first.
        //!
        //! Returns whether the colliders overlapped before any correction.
        if a.is_removed() || b.is_removed() {
            lverbose!("{:?} skipped: removed sprite", self);
            return false;
        }

        let mtv = match a.collision_shape().translation_vector(&b.collision_shape()) {
            Some(mtv) => mtv,
            None => return false,
        };

        match self {
            Response::Overlap => (),
            Response::Displace => displace_response(b, mtv),
            Response::Collide => collide_response(a, b, mtv),
            Response::Bounce => bounce_response(a, b, mtv),
            Response::BounceOff => bounce_off_response(a, mtv),
        }
        true
    }
}

// ---------- Responses ---------- //

#[inline]
fn normal_of(mtv: Vec2) -> Vec2 {
    mtv.normalize_or_zero_safe()
}

fn displace_response(b: &mut Sprite, mtv: Vec2) {
    b.position -= mtv;
    b.refresh_collider();
}

fn collide_response(a: &mut Sprite, b: &mut Sprite, mtv: Vec2) {
    // remove the velocity along the normal from both
    let norm = normal_of(mtv);
    a.position += mtv;
    a.velocity -= norm * a.velocity.dot(norm);
    b.velocity -= norm * b.velocity.dot(norm);
    a.refresh_collider();
}

fn bounce_response(a: &mut Sprite, b: &mut Sprite, mtv: Vec2) {
    let norm = normal_of(mtv);
    a.position += mtv;
    a.refresh_collider();

    let va = a.velocity.dot(norm);
    let vb = b.velocity.dot(norm);
    let (ma, mb) = masses(a.mass, b.mass);
    let e = a.restitution;
    let momentum = ma * va + mb * vb;
    let va_new = (momentum + mb * e * (vb - va)) / (ma + mb);
    let vb_new = (momentum + ma * e * (va - vb)) / (ma + mb);
    a.velocity += norm * (va_new - va);
    b.velocity += norm * (vb_new - vb);
}

fn bounce_off_response(a: &mut Sprite, mtv: Vec2) {
    // r = d - (1 + e)(d.n)n, so the normal component flips and scales by e
    let norm = normal_of(mtv);
    a.position += mtv;
    a.refresh_collider();

    let vn = a.velocity.dot(norm);
    a.velocity -= norm * (vn * (1.0 + a.restitution));
}

#[inline]
fn masses(ma: Fp, mb: Fp) -> (Fp, Fp) {
    if ma > 0.0 && mb > 0.0 && (ma + mb).is_finite() {
        (ma, mb)
    } else {
        lwarn!("non-positive sprite mass ({}, {}), bouncing as equal masses", ma, mb);
        (1.0, 1.0)
    }
}
