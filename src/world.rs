//! An arena of sprites addressed by stable handles.

use crate::{
    animation::{Animation, SpriteSheet, DEFAULT_FRAME_DELAY},
    mouse::{MouseTransitions, Pointer},
    response::Response,
    sprite::{Sprite, DEFAULT_SIZE},
    Fp, Vec2,
};
use anyhow::{Context, Result};

/// Handle of a sprite in a [`World`]. Handles are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpriteId(usize);

impl SpriteId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Unit of the angles the host passes in. Sprites store degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AngleMode {
    Degrees,
    Radians,
}
impl AngleMode {
    #[inline]
    pub fn to_degrees(self, angle: Fp) -> Fp {
        match self {
            AngleMode::Degrees => angle,
            AngleMode::Radians => angle.to_degrees(),
        }
    }
    #[inline]
    pub fn from_degrees(self, degrees: Fp) -> Fp {
        match self {
            AngleMode::Degrees => degrees,
            AngleMode::Radians => degrees.to_radians(),
        }
    }
}
impl Default for AngleMode {
    fn default() -> Self {
        AngleMode::Degrees
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    /// Size of sprites created without one and without an animation.
    pub default_size: Vec2,
    /// Frame delay of animations built with [`World::animation`].
    pub frame_delay: u32,
    pub angle_mode: AngleMode,
}
impl Default for Config {
    fn default() -> Self {
        Config {
            default_size: Vec2::splat(DEFAULT_SIZE),
            frame_delay: DEFAULT_FRAME_DELAY,
            angle_mode: AngleMode::default(),
        }
    }
}

#[derive(Debug, Default)]
pub struct World {
    sprites: Vec<Option<Sprite>>,
    config: Config,
    pointer: Pointer,
}

impl World {
    pub fn new(config: Config) -> World {
        World {
            sprites: Vec::new(),
            config,
            pointer: Pointer::default(),
        }
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }
    #[inline]
    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    // ---------- Sprites ---------- //

    pub fn add_sprite(&mut self, sprite: Sprite) -> SpriteId {
        self.sprites.push(Some(sprite));
        SpriteId(self.sprites.len() - 1)
    }
    #[inline]
    pub fn create_sprite(&mut self, x: Fp, y: Fp) -> SpriteId {
        let sprite = Sprite::from_config(x, y, &self.config);
        self.add_sprite(sprite)
    }
    pub fn create_sprite_sized(&mut self, x: Fp, y: Fp, width: Fp, height: Fp) -> SpriteId {
        let mut sprite = Sprite::from_config(x, y, &self.config);
        sprite.set_width(width);
        sprite.set_height(height);
        self.add_sprite(sprite)
    }

    pub fn animation(&self, sheet: SpriteSheet) -> Animation {
        //! An animation over `sheet` using the configured frame delay.
        Animation::new(sheet).with_frame_delay(self.config.frame_delay)
    }

    #[inline]
    pub fn get(&self, id: SpriteId) -> Option<&Sprite> {
        self.sprites.get(id.0).and_then(Option::as_ref)
    }
    #[inline]
    pub fn get_mut(&mut self, id: SpriteId) -> Option<&mut Sprite> {
        self.sprites.get_mut(id.0).and_then(Option::as_mut)
    }
    pub fn sprite(&self, id: SpriteId) -> Result<&Sprite> {
        self.get(id).with_context(|| format!("no sprite with id {}", id.0))
    }
    pub fn sprite_mut(&mut self, id: SpriteId) -> Result<&mut Sprite> {
        self.get_mut(id).with_context(|| format!("no sprite with id {}", id.0))
    }

    pub fn pair_mut(&mut self, a: SpriteId, b: SpriteId) -> Option<(&mut Sprite, &mut Sprite)> {
        //! Borrows two distinct sprites at once. Panics if `a == b`.
        assert_ne!(a, b, "a sprite cannot be paired with itself");
        let (lo, hi) = if a.0 < b.0 { (a.0, b.0) } else { (b.0, a.0) };
        if hi >= self.sprites.len() {
            return None;
        }

        let (left, right) = self.sprites.split_at_mut(hi);
        let low = left[lo].as_mut()?;
        let high = right[0].as_mut()?;
        if a.0 < b.0 {
            Some((low, high))
        } else {
            Some((high, low))
        }
    }

    /// Live sprites, skipping removed ones.
    pub fn iter(&self) -> impl Iterator<Item = (SpriteId, &Sprite)> {
        self.sprites
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|s| (SpriteId(i), s)))
            .filter(|(_, s)| !s.is_removed())
    }
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (SpriteId, &mut Sprite)> {
        self.sprites
            .iter_mut()
            .enumerate()
            .filter_map(|(i, s)| s.as_mut().map(|s| (SpriteId(i), s)))
            .filter(|(_, s)| !s.is_removed())
    }
    #[inline]
    pub fn len(&self) -> usize {
        self.iter().count()
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    pub fn remove(&mut self, id: SpriteId) -> bool {
        //! Marks the sprite removed. Returns `false` if there is no such sprite.
        match self.get_mut(id) {
            Some(sprite) => {
                sprite.remove();
                true
            }
            None => false,
        }
    }

    pub fn cull_removed(&mut self) -> Vec<SpriteId> {
        //! Drops removed sprites from the arena, returning their handles.
        let mut culled = Vec::new();
        for (i, slot) in self.sprites.iter_mut().enumerate() {
            if slot.as_ref().map_or(false, Sprite::is_removed) {
                *slot = None;
                culled.push(SpriteId(i));
            }
        }
        if !culled.is_empty() {
            lverbose!("culled {} removed sprites", culled.len());
        }
        culled
    }

    // ---------- Frame ---------- //

    #[inline]
    pub fn set_pointer(&mut self, pointer: Pointer) {
        self.pointer = pointer;
    }
    #[inline]
    pub fn pointer(&self) -> Pointer {
        self.pointer
    }

    pub fn update(&mut self) -> Vec<(SpriteId, MouseTransitions)> {
        //! Updates every sprite once against the current pointer, in creation order. Returns the
        //! sprites whose mouse state changed.
        let pointer = self.pointer;
        let mut events = Vec::new();
        for (i, slot) in self.sprites.iter_mut().enumerate() {
            if let Some(sprite) = slot {
                let transitions = sprite.update(&pointer);
                if transitions.any() {
                    events.push((SpriteId(i), transitions));
                }
            }
        }
        events
    }

    // ---------- Collision ---------- //

    pub fn resolve(&mut self, response: Response, a: SpriteId, b: SpriteId) -> bool {
        //! Resolves `a` against `b`. Culled or unknown sprites never overlap.
        match self.pair_mut(a, b) {
            Some((a, b)) => response.resolve(a, b),
            None => false,
        }
    }

    pub fn resolve_with<F>(&mut self, response: Response, a: SpriteId, b: SpriteId, callback: F) -> bool
    where
        F: FnOnce(&mut Sprite, &mut Sprite),
    {
        match self.pair_mut(a, b) {
            Some((a, b)) => a.resolve_with(response, b, callback),
            None => false,
        }
    }

    pub fn resolve_group(&mut self, response: Response, a: SpriteId, group: &[SpriteId]) -> bool {
        //! Resolves `a` against each member of `group` in order, skipping `a` itself.
        //! Returns whether any pair overlapped.
        let mut hit = false;
        for &b in group.iter().filter(|&&b| b != a) {
            hit |= self.resolve(response, a, b);
        }
        hit
    }

    #[inline]
    pub fn overlap(&mut self, a: SpriteId, b: SpriteId) -> bool {
        self.resolve(Response::Overlap, a, b)
    }
    #[inline]
    pub fn is_touching(&mut self, a: SpriteId, b: SpriteId) -> bool {
        self.resolve(Response::Overlap, a, b)
    }
    #[inline]
    pub fn displace(&mut self, a: SpriteId, b: SpriteId) -> bool {
        self.resolve(Response::Displace, a, b)
    }
    #[inline]
    pub fn collide(&mut self, a: SpriteId, b: SpriteId) -> bool {
        self.resolve(Response::Collide, a, b)
    }
    #[inline]
    pub fn bounce(&mut self, a: SpriteId, b: SpriteId) -> bool {
        self.resolve(Response::Bounce, a, b)
    }
    #[inline]
    pub fn bounce_off(&mut self, a: SpriteId, b: SpriteId) -> bool {
        self.resolve(Response::BounceOff, a, b)
    }

    // ---------- Host-facing setters ---------- //

    pub fn set_collider(&mut self, id: SpriteId, kind: &str, args: &[Fp]) -> Result<()> {
        let sprite = self.sprite_mut(id)?;
        sprite
            .set_collider(kind, args)
            .with_context(|| format!("setting the collider of sprite {}", id.0))
    }

    /// Rotation of the sprite in the host's angle unit.
    pub fn rotation(&self, id: SpriteId) -> Result<Fp> {
        let mode = self.config.angle_mode;
        Ok(mode.from_degrees(self.sprite(id)?.rotation))
    }
    pub fn set_rotation(&mut self, id: SpriteId, angle: Fp) -> Result<()> {
        let mode = self.config.angle_mode;
        self.sprite_mut(id)?.rotation = mode.to_degrees(angle);
        Ok(())
    }
    pub fn set_speed_and_direction(&mut self, id: SpriteId, speed: Fp, angle: Fp) -> Result<()> {
        //! `angle` is in the host's unit. [`Sprite::direction`] reads back in degrees.
        let mode = self.config.angle_mode;
        self.sprite_mut(id)?.set_speed_and_direction(speed, mode.to_degrees(angle));
        Ok(())
    }
    pub fn add_speed(&mut self, id: SpriteId, speed: Fp, angle: Fp) -> Result<()> {
        let mode = self.config.angle_mode;
        self.sprite_mut(id)?.add_speed(speed, mode.to_degrees(angle));
        Ok(())
    }
}
