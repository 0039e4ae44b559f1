//! Colliders attached to sprites.
//!
//! A [`Collider`] keeps its construction parameters in the owning sprite's local frame, unscaled
//! and unrotated, and caches the world-space pose derived from the sprite on the last refresh.

use crate::{
    narrow::{Aabb, Circle, Intersect, Obb, Shape},
    vector::VecExt,
    Fp, Vec2,
};
use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    str::FromStr,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColliderKind {
    Point,
    Circle,
    Aabb,
    Obb,
}
impl ColliderKind {
    pub fn name(self) -> &'static str {
        match self {
            ColliderKind::Point => "point",
            ColliderKind::Circle => "circle",
            ColliderKind::Aabb => "aabb",
            ColliderKind::Obb => "obb",
        }
    }

    /// Positional argument counts accepted after the kind.
    pub fn arities(self) -> &'static [usize] {
        match self {
            ColliderKind::Point => &[0, 2],
            ColliderKind::Circle => &[0, 2, 3],
            ColliderKind::Aabb => &[0, 2, 4],
            ColliderKind::Obb => &[0, 2, 4, 5],
        }
    }
}
impl FromStr for ColliderKind {
    type Err = ColliderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "point" => Ok(ColliderKind::Point),
            "circle" => Ok(ColliderKind::Circle),
            "aabb" => Ok(ColliderKind::Aabb),
            "obb" | "rectangle" => Ok(ColliderKind::Obb),
            _ => Err(ColliderError::UnknownKind(s.to_owned())),
        }
    }
}
impl Display for ColliderKind {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ColliderError {
    UnknownKind(String),
    Arity {
        kind: ColliderKind,
        given: usize,
        accepted: &'static [usize],
    },
}
impl Display for ColliderError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            ColliderError::UnknownKind(kind) => write!(
                f,
                "set_collider expects the first argument to be one of \"point\", \"circle\", \"rectangle\", \"aabb\" or \"obb\", got {:?}",
                kind
            ),
            ColliderError::Arity { kind, given, accepted } => write!(
                f,
                "set_collider({:?}) takes {:?} arguments after the kind, got {}",
                kind.name(),
                accepted,
                given
            ),
        }
    }
}
impl Error for ColliderError {}

/// Construction parameters of a collider. Dimensions left as `None` are derived from the sprite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColliderSpec {
    Point { offset: Vec2 },
    Circle { offset: Vec2, radius: Option<Fp> },
    Aabb { offset: Vec2, size: Option<Vec2> },
    /// `rotation` is in degrees, relative to the sprite.
    Obb { offset: Vec2, size: Option<Vec2>, rotation: Option<Fp> },
}
impl ColliderSpec {
    pub fn parse(kind: &str, args: &[Fp]) -> Result<ColliderSpec, ColliderError> {
        //! Parses `kind` followed by `(offsetX, offsetY, ...dimensions)`, rejecting any argument
        //! count the kind does not accept.
        let kind: ColliderKind = kind.parse()?;
        if !kind.arities().contains(&args.len()) {
            return Err(ColliderError::Arity { kind, given: args.len(), accepted: kind.arities() });
        }

        let offset = match args {
            [x, y, ..] => Vec2::new(*x, *y),
            _ => Vec2::ZERO,
        };
        let size = match args {
            [_, _, w, h, ..] => Some(Vec2::new(*w, *h)),
            _ => None,
        };
        Ok(match kind {
            ColliderKind::Point => ColliderSpec::Point { offset },
            ColliderKind::Circle => ColliderSpec::Circle { offset, radius: args.get(2).copied() },
            ColliderKind::Aabb => ColliderSpec::Aabb { offset, size },
            ColliderKind::Obb => ColliderSpec::Obb { offset, size, rotation: args.get(4).copied() },
        })
    }

    pub fn kind(&self) -> ColliderKind {
        match self {
            ColliderSpec::Point { .. } => ColliderKind::Point,
            ColliderSpec::Circle { .. } => ColliderKind::Circle,
            ColliderSpec::Aabb { .. } => ColliderKind::Aabb,
            ColliderSpec::Obb { .. } => ColliderKind::Obb,
        }
    }
}

/// The owning sprite's transform. `rotation` is in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: Vec2,
    pub rotation: Fp,
    pub scale: Fp,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Collider {
    kind: ColliderKind,
    /// Unscaled, unrotated offset from the sprite's position.
    offset: Vec2,
    radius: Fp,
    size: Vec2,
    /// Radians, added to the sprite's rotation.
    local_rotation: Fp,
    track_rotation: bool,

    // world-space cache
    center: Vec2,
    scale: Fp,
    rotation: Fp,
}

impl Collider {
    pub fn new(spec: ColliderSpec, sprite_size: Vec2, pose: &Pose) -> Collider {
        //! Builds a collider, taking missing dimensions from the sprite's unscaled `sprite_size`.
        //! A default circle spans the larger dimension.
        let (offset, radius, size, local_rotation) = match spec {
            ColliderSpec::Point { offset } => (offset, 0.0, Vec2::ZERO, 0.0),
            ColliderSpec::Circle { offset, radius } => {
                let radius = radius.unwrap_or_else(|| sprite_size.x.max(sprite_size.y) * 0.5);
                (offset, radius.abs(), Vec2::ZERO, 0.0)
            }
            ColliderSpec::Aabb { offset, size } => (offset, 0.0, size.unwrap_or(sprite_size), 0.0),
            ColliderSpec::Obb { offset, size, rotation } => (
                offset,
                0.0,
                size.unwrap_or(sprite_size),
                rotation.map_or(0.0, Fp::to_radians),
            ),
        };

        let mut collider = Collider {
            kind: spec.kind(),
            offset,
            radius,
            size,
            local_rotation,
            track_rotation: true,
            center: pose.position,
            scale: pose.scale,
            rotation: local_rotation,
        };
        collider.update_from_pose(pose);
        collider
    }

    pub fn update_from_pose(&mut self, pose: &Pose) {
        //! Re-derives the world-space center, scale and rotation: the offset is rotated, then
        //! scaled, then added to the position.
        let radians = pose.rotation.to_radians();
        self.center = pose.position + self.offset.rotated(radians) * pose.scale;
        self.scale = pose.scale;
        if self.track_rotation {
            self.rotation = self.local_rotation + radians;
        }
    }

    #[inline]
    pub fn kind(&self) -> ColliderKind {
        self.kind
    }
    #[inline]
    pub fn offset(&self) -> Vec2 {
        self.offset
    }
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.center
    }
    /// Unscaled circle radius. Zero for other kinds.
    #[inline]
    pub fn radius(&self) -> Fp {
        self.radius
    }
    /// Unscaled box width. Zero for points and circles.
    #[inline]
    pub fn width(&self) -> Fp {
        self.size.x
    }
    #[inline]
    pub fn height(&self) -> Fp {
        self.size.y
    }
    /// World rotation in radians. Only boxes of kind `Obb` use it.
    #[inline]
    pub fn rotation(&self) -> Fp {
        self.rotation
    }
    #[inline]
    pub fn scale(&self) -> Fp {
        self.scale
    }

    pub fn set_track_rotation(&mut self, track: bool) {
        //! A frozen collider keeps its current world rotation while the sprite turns.
        self.track_rotation = track;
    }
    #[inline]
    pub fn tracks_rotation(&self) -> bool {
        self.track_rotation
    }

    pub fn shape(&self) -> Shape {
        //! The collider in world space, as of the last refresh.
        match self.kind {
            ColliderKind::Point => Shape::Point(self.center),
            ColliderKind::Circle => Shape::Circle(Circle {
                rad: (self.radius * self.scale).abs(),
                pos: self.center,
            }),
            ColliderKind::Aabb => Shape::Aabb(Aabb::from_center(self.center, self.size * self.scale * 0.5)),
            ColliderKind::Obb => Shape::Obb(Obb {
                center: self.center,
                half: (self.size * self.scale * 0.5).abs(),
                rot: self.rotation,
            }),
        }
    }

    #[inline]
    pub fn minimum_translation_vector(&self, other: &Collider) -> Option<Vec2> {
        //! Minimum translation vector from `other` toward `self`, `None` when not overlapping.
        self.shape().translation_vector(&other.shape())
    }
    #[inline]
    pub fn overlaps(&self, other: &Collider) -> bool {
        self.minimum_translation_vector(other).is_some()
    }
    #[inline]
    pub fn contains_point(&self, point: Vec2) -> bool {
        self.shape().point_test(point)
    }
    #[inline]
    pub fn extent_on_axis(&self, axis: Vec2) -> Fp {
        self.shape().extent_on_axis(axis)
    }
}
