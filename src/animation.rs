//! Frame sequencing for sprites. Images are not handled here, only frame geometry and timing.

use crate::{Fp, Vec2};

/// Default number of updates each frame is shown for.
pub const DEFAULT_FRAME_DELAY: u32 = 4;

/// A region of a sheet image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub x: Fp,
    pub y: Fp,
    pub width: Fp,
    pub height: Fp,
}
impl Frame {
    #[inline]
    pub fn new(x: Fp, y: Fp, width: Fp, height: Fp) -> Frame {
        Frame { x, y, width, height }
    }
    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpriteSheet {
    frames: Vec<Frame>,
}
impl SpriteSheet {
    pub fn new(frames: Vec<Frame>) -> SpriteSheet {
        SpriteSheet { frames }
    }

    #[inline]
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    sheet: SpriteSheet,
    frame: usize,
    frame_delay: u32,
    ticks: u32,
    pub looping: bool,
    playing: bool,
}

impl Animation {
    pub fn new(sheet: SpriteSheet) -> Animation {
        Animation {
            sheet,
            frame: 0,
            frame_delay: DEFAULT_FRAME_DELAY,
            ticks: 0,
            looping: true,
            playing: true,
        }
    }

    pub fn with_frame_delay(mut self, delay: u32) -> Animation {
        self.set_frame_delay(delay);
        self
    }

    #[inline]
    pub fn frame_delay(&self) -> u32 {
        self.frame_delay
    }
    #[inline]
    pub fn set_frame_delay(&mut self, delay: u32) {
        self.frame_delay = delay.max(1);
    }

    #[inline]
    pub fn frame(&self) -> usize {
        self.frame
    }
    #[inline]
    pub fn frame_count(&self) -> usize {
        self.sheet.frames().len()
    }
    #[inline]
    pub fn last_frame(&self) -> usize {
        self.frame_count().saturating_sub(1)
    }
    #[inline]
    pub fn current_frame(&self) -> Option<&Frame> {
        self.sheet.frames().get(self.frame)
    }
    #[inline]
    pub fn frame_size(&self) -> Option<Vec2> {
        self.current_frame().map(Frame::size)
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.playing
    }
    #[inline]
    pub fn play(&mut self) {
        self.playing = true;
    }
    #[inline]
    pub fn stop(&mut self) {
        self.playing = false;
    }
    pub fn rewind(&mut self) {
        self.frame = 0;
        self.ticks = 0;
    }

    pub fn update(&mut self) {
        //! Counts one tick, stepping to the next frame every `frame_delay` ticks while playing.
        //! A non-looping animation stops on its last frame.
        if !self.playing || self.frame_count() < 2 {
            return;
        }
        self.ticks += 1;
        if self.ticks < self.frame_delay {
            return;
        }
        self.ticks = 0;

        if self.frame < self.last_frame() {
            self.frame += 1;
        } else if self.looping {
            self.frame = 0;
        } else {
            self.playing = false;
        }
    }

    pub fn change_frame(&mut self, frame: usize) -> bool {
        //! Jumps to `frame`. Out-of-range indices are ignored and reported with `false`.
        if frame >= self.frame_count() {
            lwarn!("animation has {} frames, cannot change to frame {}", self.frame_count(), frame);
            return false;
        }
        self.frame = frame;
        self.ticks = 0;
        true
    }

    pub fn next_frame(&mut self) {
        if self.frame < self.last_frame() {
            self.frame += 1;
        } else if self.looping {
            self.frame = 0;
        }
        self.ticks = 0;
    }

    pub fn previous_frame(&mut self) {
        if self.frame > 0 {
            self.frame -= 1;
        } else if self.looping {
            self.frame = self.last_frame();
        }
        self.ticks = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet() -> SpriteSheet {
        SpriteSheet::new(vec![
            Frame::new(0.0, 0.0, 50.0, 50.0),
            Frame::new(100.0, 0.0, 40.0, 60.0),
            Frame::new(0.0, 80.0, 70.0, 30.0),
        ])
    }

    #[test]
    fn advances_after_delay() {
        let mut anim = Animation::new(sheet());
        assert_eq!(anim.frame_size(), Some(Vec2::new(50.0, 50.0)));

        for _ in 0..3 {
            anim.update();
        }
        assert_eq!(anim.frame(), 0);
        anim.update();
        assert_eq!(anim.frame_size(), Some(Vec2::new(40.0, 60.0)));

        for _ in 0..4 {
            anim.update();
        }
        assert_eq!(anim.frame_size(), Some(Vec2::new(70.0, 30.0)));

        for _ in 0..4 {
            anim.update();
        }
        assert_eq!(anim.frame(), 0);
    }

    #[test]
    fn non_looping_stops_on_last_frame() {
        let mut anim = Animation::new(sheet()).with_frame_delay(1);
        anim.looping = false;
        for _ in 0..10 {
            anim.update();
        }
        assert_eq!(anim.frame(), 2);
        assert!(!anim.is_playing());

        anim.next_frame();
        assert_eq!(anim.frame(), 2);
    }

    #[test]
    fn manual_stepping() {
        let mut anim = Animation::new(sheet());
        anim.previous_frame();
        assert_eq!(anim.frame(), 2);
        anim.next_frame();
        assert_eq!(anim.frame(), 0);

        assert!(anim.change_frame(1));
        assert!(!anim.change_frame(3));
        assert_eq!(anim.frame(), 1);

        anim.stop();
        for _ in 0..8 {
            anim.update();
        }
        assert_eq!(anim.frame(), 1);
        anim.play();
        anim.rewind();
        assert_eq!(anim.frame(), 0);
    }

    #[test]
    fn empty_sheet_has_no_size() {
        let mut anim = Animation::new(SpriteSheet::default());
        anim.update();
        anim.next_frame();
        assert_eq!(anim.frame_size(), None);
        assert_eq!(anim.frame_delay(), DEFAULT_FRAME_DELAY);
        assert_eq!(Animation::new(sheet()).with_frame_delay(0).frame_delay(), 1);
    }
}
