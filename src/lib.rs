//! Sprites, colliders and pairwise collision response for frame-stepped 2D games.
//!
//! A [`Sprite`] integrates its own velocity once per tick and carries an optional
//! [`Collider`]. Pairs of sprites are resolved with one of the [`Response`] strategies,
//! either directly (`a.collide(&mut b)`) or through the [`World`] arena.

#[macro_use]
pub mod diagnostics;

pub mod animation;
pub mod collider;
pub mod mouse;
pub mod narrow;
pub mod response;
pub mod sprite;
pub mod vector;
pub mod world;

#[cfg(not(feature = "f64"))]
pub type Fp = f32;
#[cfg(not(feature = "f64"))]
pub use glam::Vec2;

#[cfg(feature = "f64")]
pub type Fp = f64;
#[cfg(feature = "f64")]
pub use glam::DVec2 as Vec2;

pub use animation::{Animation, Frame, SpriteSheet};
pub use collider::{Collider, ColliderError, ColliderKind, ColliderSpec, Pose};
pub use mouse::{MouseState, MouseTransitions, Pointer};
pub use narrow::Shape;
pub use response::Response;
pub use sprite::{MouseEvent, Sprite};
pub use vector::VecExt;
pub use world::{AngleMode, Config, SpriteId, World};
