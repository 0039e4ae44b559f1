//! Sprites: positioned, moving entities with an optional collider, animations and mouse callbacks.

use crate::{
    animation::Animation,
    collider::{Collider, ColliderError, ColliderSpec, Pose},
    mouse::{MouseState, MouseTransitions, Pointer},
    narrow::Shape,
    response::Response,
    vector::VecExt,
    world::Config,
    Fp, Vec2,
};
use fnv::FnvBuildHasher;
use indexmap::IndexMap;
use std::fmt::{self, Debug, Formatter};

/// Fallback size of sprites without an explicit size or animation.
pub const DEFAULT_SIZE: Fp = 100.0;

pub type MouseCallback = Box<dyn FnMut(&mut Sprite)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseEvent {
    Over,
    Out,
    Pressed,
    Released,
}

#[derive(Default)]
struct MouseHandlers {
    over: Option<MouseCallback>,
    out: Option<MouseCallback>,
    pressed: Option<MouseCallback>,
    released: Option<MouseCallback>,
}
impl MouseHandlers {
    fn slot(&mut self, event: MouseEvent) -> &mut Option<MouseCallback> {
        match event {
            MouseEvent::Over => &mut self.over,
            MouseEvent::Out => &mut self.out,
            MouseEvent::Pressed => &mut self.pressed,
            MouseEvent::Released => &mut self.released,
        }
    }
}
impl Debug for MouseHandlers {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("MouseHandlers")
            .field("over", &self.over.is_some())
            .field("out", &self.out.is_some())
            .field("pressed", &self.pressed.is_some())
            .field("released", &self.released.is_some())
            .finish()
    }
}

#[derive(Debug)]
pub struct Sprite {
    pub position: Vec2,
    /// Displacement per update.
    pub velocity: Vec2,
    /// Degrees.
    pub rotation: Fp,
    pub scale: Fp,
    /// Fraction of velocity lost each update, `0.0` to `1.0`.
    pub friction: Fp,
    /// Coefficient of restitution used when this sprite bounces.
    pub restitution: Fp,
    pub mass: Fp,
    /// Updates left before the sprite removes itself. `None` lives forever.
    pub life: Option<u32>,
    pub max_speed: Option<Fp>,
    /// Turns the sprite to face its velocity on each update.
    pub rotate_to_direction: bool,

    width: Option<Fp>,
    height: Option<Fp>,
    default_size: Vec2,
    collider: Option<Collider>,
    animations: IndexMap<String, Animation, FnvBuildHasher>,
    current_animation: Option<usize>,
    removed: bool,
    mouse: MouseState,
    handlers: MouseHandlers,
}

impl Sprite {
    pub fn new(x: Fp, y: Fp) -> Sprite {
        Sprite {
            position: Vec2::new(x, y),
            velocity: Vec2::ZERO,
            rotation: 0.0,
            scale: 1.0,
            friction: 0.0,
            restitution: 1.0,
            mass: 1.0,
            life: None,
            max_speed: None,
            rotate_to_direction: false,

            width: None,
            height: None,
            default_size: Vec2::splat(DEFAULT_SIZE),
            collider: None,
            animations: IndexMap::default(),
            current_animation: None,
            removed: false,
            mouse: MouseState::default(),
            handlers: MouseHandlers::default(),
        }
    }

    pub fn with_size(x: Fp, y: Fp, width: Fp, height: Fp) -> Sprite {
        let mut sprite = Sprite::new(x, y);
        sprite.width = Some(width);
        sprite.height = Some(height);
        sprite
    }

    pub fn from_config(x: Fp, y: Fp, config: &Config) -> Sprite {
        let mut sprite = Sprite::new(x, y);
        sprite.default_size = config.default_size;
        sprite
    }

    // ---------- Update ---------- //

    pub fn update(&mut self, pointer: &Pointer) -> MouseTransitions {
        //! Advances the sprite by one tick: friction, speed limit, facing, movement and lifetime,
        //! then pointer bookkeeping and animation. Removed sprites do nothing.
        if self.removed {
            return MouseTransitions::default();
        }
        self.refresh_collider();

        self.velocity *= 1.0 - self.friction;
        if let Some(max) = self.max_speed {
            self.velocity = self.velocity.limited(max);
        }
        if self.rotate_to_direction && self.velocity != Vec2::ZERO {
            self.rotation = self.direction();
        }
        self.position += self.velocity;

        if let Some(life) = self.life {
            let life = life.saturating_sub(1);
            self.life = Some(life);
            if life == 0 {
                lverbose!("sprite at {:?} expired", self.position);
                self.remove();
                return MouseTransitions::default();
            }
        }

        let transitions = self.update_mouse(pointer);
        if let Some(animation) = self.animation_mut() {
            animation.update();
        }
        transitions
    }

    fn update_mouse(&mut self, pointer: &Pointer) -> MouseTransitions {
        self.refresh_collider();
        let over = match &self.collider {
            Some(collider) => collider.contains_point(pointer.pos),
            None => self.default_collider().contains_point(pointer.pos),
        };

        let transitions = self.mouse.step(over, pointer.pressed);
        if transitions.over {
            self.fire(MouseEvent::Over);
        }
        if transitions.out {
            self.fire(MouseEvent::Out);
        }
        if transitions.pressed {
            self.fire(MouseEvent::Pressed);
        }
        if transitions.released {
            self.fire(MouseEvent::Released);
        }
        transitions
    }

    fn fire(&mut self, event: MouseEvent) {
        //! Runs the handler with the sprite borrowed mutably. A handler installed by the callback
        //! itself replaces the running one.
        if let Some(mut callback) = self.handlers.slot(event).take() {
            callback(self);
            let slot = self.handlers.slot(event);
            if slot.is_none() {
                *slot = Some(callback);
            }
        }
    }

    // ---------- Mouse ---------- //

    pub fn set_mouse_callback<F: FnMut(&mut Sprite) + 'static>(&mut self, event: MouseEvent, callback: F) {
        *self.handlers.slot(event) = Some(Box::new(callback));
    }
    pub fn clear_mouse_callback(&mut self, event: MouseEvent) {
        *self.handlers.slot(event) = None;
    }
    #[inline]
    pub fn on_mouse_over<F: FnMut(&mut Sprite) + 'static>(&mut self, callback: F) {
        self.set_mouse_callback(MouseEvent::Over, callback);
    }
    #[inline]
    pub fn on_mouse_out<F: FnMut(&mut Sprite) + 'static>(&mut self, callback: F) {
        self.set_mouse_callback(MouseEvent::Out, callback);
    }
    #[inline]
    pub fn on_mouse_pressed<F: FnMut(&mut Sprite) + 'static>(&mut self, callback: F) {
        self.set_mouse_callback(MouseEvent::Pressed, callback);
    }
    #[inline]
    pub fn on_mouse_released<F: FnMut(&mut Sprite) + 'static>(&mut self, callback: F) {
        self.set_mouse_callback(MouseEvent::Released, callback);
    }

    #[inline]
    pub fn mouse_state(&self) -> MouseState {
        self.mouse
    }
    #[inline]
    pub fn mouse_is_over(&self) -> bool {
        self.mouse.is_over()
    }
    #[inline]
    pub fn mouse_is_pressed(&self) -> bool {
        self.mouse.is_pressed()
    }

    // ---------- Colliders ---------- //

    #[inline]
    pub fn pose(&self) -> Pose {
        Pose {
            position: self.position,
            rotation: self.rotation,
            scale: self.scale,
        }
    }

    #[inline]
    pub fn collider(&self) -> Option<&Collider> {
        self.collider.as_ref()
    }
    #[inline]
    pub fn collider_mut(&mut self) -> Option<&mut Collider> {
        self.collider.as_mut()
    }

    pub fn set_collider(&mut self, kind: &str, args: &[Fp]) -> Result<(), ColliderError> {
        //! Replaces the collider with one of `kind` built from `(offsetX, offsetY, ...dimensions)`.
        //! On error the current collider is kept.
        let spec = ColliderSpec::parse(kind, args).map_err(|err| {
            lwarn!("{}", err);
            err
        })?;
        self.set_collider_spec(spec);
        Ok(())
    }

    pub fn set_collider_spec(&mut self, spec: ColliderSpec) {
        self.collider = Some(Collider::new(spec, self.size(), &self.pose()));
    }

    pub fn default_collider(&self) -> Collider {
        //! A box matching the sprite's unscaled size and rotation.
        let spec = ColliderSpec::Obb { offset: Vec2::ZERO, size: None, rotation: None };
        Collider::new(spec, self.size(), &self.pose())
    }

    pub fn refresh_collider(&mut self) {
        let pose = self.pose();
        if let Some(collider) = self.collider.as_mut() {
            collider.update_from_pose(&pose);
        }
    }

    pub fn collision_shape(&mut self) -> Shape {
        //! The collider in world space at the current pose. Attaches the default collider if the
        //! sprite has none.
        match self.collider.as_mut() {
            Some(collider) => {
                let pose = Pose { position: self.position, rotation: self.rotation, scale: self.scale };
                collider.update_from_pose(&pose);
                collider.shape()
            }
            None => {
                lverbose!("attaching default collider to sprite at {:?}", self.position);
                let collider = self.default_collider();
                let shape = collider.shape();
                self.collider = Some(collider);
                shape
            }
        }
    }

    // ---------- Collision ---------- //

    #[inline]
    pub fn resolve(&mut self, response: Response, other: &mut Sprite) -> bool {
        response.resolve(self, other)
    }

    pub fn resolve_with<F>(&mut self, response: Response, other: &mut Sprite, callback: F) -> bool
    where
        F: FnOnce(&mut Sprite, &mut Sprite),
    {
        //! Resolves the pair and, if they overlapped, hands both sprites to `callback`.
        let hit = response.resolve(self, other);
        if hit {
            callback(self, other);
        }
        hit
    }

    #[inline]
    pub fn overlap(&mut self, other: &mut Sprite) -> bool {
        Response::Overlap.resolve(self, other)
    }
    /// Alias of [`Sprite::overlap`] reading as a query.
    #[inline]
    pub fn is_touching(&mut self, other: &mut Sprite) -> bool {
        Response::Overlap.resolve(self, other)
    }
    #[inline]
    pub fn displace(&mut self, other: &mut Sprite) -> bool {
        Response::Displace.resolve(self, other)
    }
    #[inline]
    pub fn collide(&mut self, other: &mut Sprite) -> bool {
        Response::Collide.resolve(self, other)
    }
    #[inline]
    pub fn bounce(&mut self, other: &mut Sprite) -> bool {
        Response::Bounce.resolve(self, other)
    }
    #[inline]
    pub fn bounce_off(&mut self, other: &mut Sprite) -> bool {
        Response::BounceOff.resolve(self, other)
    }

    // ---------- Lifetime ---------- //

    #[inline]
    pub fn remove(&mut self) {
        self.removed = true;
    }
    #[inline]
    pub fn destroy(&mut self) {
        self.remove();
    }
    #[inline]
    pub fn is_removed(&self) -> bool {
        self.removed
    }

    #[inline]
    pub fn lifetime(&self) -> Option<u32> {
        self.life
    }
    #[inline]
    pub fn set_lifetime(&mut self, life: Option<u32>) {
        self.life = life;
    }

    // ---------- Dimensions ---------- //

    pub fn width(&self) -> Fp {
        //! Unscaled width: explicit, else the current animation frame's, else the default size.
        self.width
            .or_else(|| self.frame_size().map(|s| s.x))
            .unwrap_or(self.default_size.x)
    }
    pub fn height(&self) -> Fp {
        self.height
            .or_else(|| self.frame_size().map(|s| s.y))
            .unwrap_or(self.default_size.y)
    }
    #[inline]
    pub fn set_width(&mut self, width: Fp) {
        self.width = Some(width);
    }
    #[inline]
    pub fn set_height(&mut self, height: Fp) {
        self.height = Some(height);
    }
    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width(), self.height())
    }
    #[inline]
    pub fn scaled_width(&self) -> Fp {
        self.width() * self.scale
    }
    #[inline]
    pub fn scaled_height(&self) -> Fp {
        self.height() * self.scale
    }

    // ---------- Kinematics ---------- //

    #[inline]
    pub fn x(&self) -> Fp {
        self.position.x
    }
    #[inline]
    pub fn set_x(&mut self, x: Fp) {
        self.position.x = x;
    }
    #[inline]
    pub fn y(&self) -> Fp {
        self.position.y
    }
    #[inline]
    pub fn set_y(&mut self, y: Fp) {
        self.position.y = y;
    }
    #[inline]
    pub fn velocity_x(&self) -> Fp {
        self.velocity.x
    }
    #[inline]
    pub fn set_velocity_x(&mut self, vx: Fp) {
        self.velocity.x = vx;
    }
    #[inline]
    pub fn velocity_y(&self) -> Fp {
        self.velocity.y
    }
    #[inline]
    pub fn set_velocity_y(&mut self, vy: Fp) {
        self.velocity.y = vy;
    }
    #[inline]
    pub fn set_velocity(&mut self, vx: Fp, vy: Fp) {
        self.velocity = Vec2::new(vx, vy);
    }

    #[inline]
    pub fn bounciness(&self) -> Fp {
        self.restitution
    }
    #[inline]
    pub fn set_bounciness(&mut self, bounciness: Fp) {
        self.restitution = bounciness;
    }

    #[inline]
    pub fn speed(&self) -> Fp {
        self.velocity.length()
    }
    /// Heading of the velocity in degrees. A still sprite has direction `0`.
    #[inline]
    pub fn direction(&self) -> Fp {
        self.velocity.heading()
    }

    pub fn set_speed(&mut self, speed: Fp) {
        //! Keeps the current direction.
        self.velocity = Vec2::from_heading(self.direction(), speed);
    }
    pub fn set_speed_and_direction(&mut self, speed: Fp, degrees: Fp) {
        self.velocity = Vec2::from_heading(degrees, speed);
    }
    pub fn add_speed(&mut self, speed: Fp, degrees: Fp) {
        self.velocity += Vec2::from_heading(degrees, speed);
    }
    pub fn limit_speed(&mut self, max: Fp) {
        self.velocity = self.velocity.limited(max.abs());
    }
    pub fn attraction_point(&mut self, magnitude: Fp, x: Fp, y: Fp) {
        //! Accelerates toward `(x, y)` by `magnitude`. Nothing happens at the point itself.
        let toward = (Vec2::new(x, y) - self.position).normalize_or_zero_safe();
        self.velocity += toward * magnitude;
    }

    // ---------- Animation ---------- //

    pub fn add_animation(&mut self, label: &str, animation: Animation) {
        //! Stores `animation` under `label`, replacing any with the same label, and makes it current.
        let (index, _) = self.animations.insert_full(label.to_owned(), animation);
        self.current_animation = Some(index);
    }

    pub fn change_animation(&mut self, label: &str) -> bool {
        match self.animations.get_index_of(label) {
            Some(index) => {
                self.current_animation = Some(index);
                true
            }
            None => {
                lwarn!("no animation labelled {:?}", label);
                false
            }
        }
    }

    #[inline]
    pub fn animation(&self) -> Option<&Animation> {
        self.current_animation.and_then(|i| self.animations.get_index(i)).map(|(_, a)| a)
    }
    #[inline]
    pub fn animation_mut(&mut self) -> Option<&mut Animation> {
        let index = self.current_animation?;
        self.animations.get_index_mut(index).map(|(_, a)| a)
    }
    #[inline]
    pub fn animation_label(&self) -> Option<&str> {
        self.current_animation
            .and_then(|i| self.animations.get_index(i))
            .map(|(label, _)| label.as_str())
    }
    #[inline]
    pub fn animation_labels(&self) -> impl Iterator<Item = &str> {
        self.animations.keys().map(String::as_str)
    }
    #[inline]
    fn frame_size(&self) -> Option<Vec2> {
        self.animation().and_then(Animation::frame_size)
    }

    pub fn set_frame(&mut self, frame: usize) -> bool {
        self.animation_mut().map_or(false, |a| a.change_frame(frame))
    }
    pub fn next_frame(&mut self) {
        if let Some(animation) = self.animation_mut() {
            animation.next_frame();
        }
    }
    pub fn previous_frame(&mut self) {
        if let Some(animation) = self.animation_mut() {
            animation.previous_frame();
        }
    }
    pub fn pause(&mut self) {
        if let Some(animation) = self.animation_mut() {
            animation.stop();
        }
    }
    pub fn play(&mut self) {
        if let Some(animation) = self.animation_mut() {
            animation.play();
        }
    }
}
