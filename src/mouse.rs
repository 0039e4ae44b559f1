//! Per-sprite pointer tracking.

use crate::Vec2;

/// Pointer input for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pointer {
    pub pos: Vec2,
    pub pressed: bool,
}
impl Pointer {
    #[inline]
    pub fn new(x: crate::Fp, y: crate::Fp, pressed: bool) -> Pointer {
        Pointer { pos: Vec2::new(x, y), pressed }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseState {
    /// The pointer is not over the sprite.
    Idle,
    Hovered,
    /// Over the sprite while a press that began or entered over it is held.
    HoveredPressed,
}
impl Default for MouseState {
    fn default() -> Self {
        MouseState::Idle
    }
}

/// Events raised by a single [`MouseState::step`]. At most one of `over` and `out` is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MouseTransitions {
    pub over: bool,
    pub out: bool,
    pub pressed: bool,
    pub released: bool,
}
impl MouseTransitions {
    #[inline]
    pub fn any(&self) -> bool {
        self.over || self.out || self.pressed || self.released
    }
}

impl MouseState {
    #[inline]
    pub fn is_over(self) -> bool {
        self != MouseState::Idle
    }
    #[inline]
    pub fn is_pressed(self) -> bool {
        self == MouseState::HoveredPressed
    }

    pub fn step(&mut self, over: bool, held: bool) -> MouseTransitions {
        //! Advances the machine with this tick's containment test and button state.
        //!
        //! Leaving the sprite forgets any press. A press held while entering counts as pressing
        //! the sprite, and a release only counts if the press was associated with it.
        let mut t = MouseTransitions::default();
        if !over {
            t.out = self.is_over();
            *self = MouseState::Idle;
            return t;
        }

        t.over = !self.is_over();
        let next = match (*self, held) {
            (MouseState::HoveredPressed, true) => MouseState::HoveredPressed,
            (_, true) => {
                t.pressed = true;
                MouseState::HoveredPressed
            }
            (MouseState::HoveredPressed, false) => {
                t.released = true;
                MouseState::Hovered
            }
            (_, false) => MouseState::Hovered,
        };
        *self = next;
        t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(steps: &[(bool, bool)]) -> Vec<MouseTransitions> {
        let mut state = MouseState::default();
        steps.iter().map(|&(over, held)| state.step(over, held)).collect()
    }

    #[test]
    fn hover_in_and_out() {
        let t = run(&[(true, false), (true, false), (false, false), (false, false), (true, false)]);
        assert!(t[0].over && !t[0].out);
        assert!(!t[1].any());
        assert!(t[2].out && !t[2].over);
        assert!(!t[3].any());
        assert!(t[4].over);
    }

    #[test]
    fn press_and_release() {
        let t = run(&[(true, false), (true, true), (true, true), (true, false), (true, false)]);
        assert!(t[1].pressed);
        assert!(!t[2].any());
        assert!(t[3].released && !t[3].pressed);
        assert!(!t[4].any());
    }

    #[test]
    fn press_entering_counts() {
        let t = run(&[(false, true), (true, true)]);
        assert!(!t[0].any());
        assert!(t[1].over && t[1].pressed);
    }

    #[test]
    fn leaving_forgets_press() {
        let mut state = MouseState::default();
        state.step(true, true);
        assert!(state.is_pressed());

        let t = state.step(false, true);
        assert!(t.out);
        assert_eq!(state, MouseState::Idle);

        // released outside, then hovering back in raises no release
        state.step(false, false);
        let t = state.step(true, false);
        assert!(t.over && !t.released);
    }
}
