//! # Page Scroll
//!
//! The page's scroll position plus an optional smooth-scroll animation.
//! The animation is a simple frame loop: each tick samples an
//! ease-in-out-quad curve between the start and target offsets.

use crate::core::schedule::Millis;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothScroll {
    pub from: u32,
    pub to: u32,
    pub started: Millis,
    pub duration: Millis,
}

impl SmoothScroll {
    /// Offset at `now`, and whether the animation has finished.
    pub fn sample(&self, now: Millis) -> (u32, bool) {
        if self.duration == 0 || now >= self.started + self.duration {
            return (self.to, true);
        }
        let progress = now.saturating_sub(self.started) as f64 / self.duration as f64;
        let eased = ease_in_out_quad(progress);
        let from = f64::from(self.from);
        let to = f64::from(self.to);
        let offset = (from + (to - from) * eased).round().max(0.0) as u32;
        (offset, false)
    }
}

fn ease_in_out_quad(t: f64) -> f64 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        -1.0 + (4.0 - 2.0 * t) * t
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageScroll {
    offset: u32,
    content_height: u32,
    viewport_height: u32,
    animation: Option<SmoothScroll>,
    /// Set while a modal holds the page in place.
    locked: bool,
}

impl PageScroll {
    pub fn offset(&self) -> u32 {
        self.offset
    }

    pub fn max_offset(&self) -> u32 {
        self.content_height.saturating_sub(self.viewport_height)
    }

    pub fn viewport_height(&self) -> u32 {
        self.viewport_height
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
        if locked {
            self.animation = None;
        }
    }

    /// New page geometry; the offset is clamped to fit.
    pub fn resize(&mut self, content_height: u32, viewport_height: u32) {
        self.content_height = content_height;
        self.viewport_height = viewport_height;
        self.offset = self.offset.min(self.max_offset());
    }

    /// Jump to `offset` (clamped). Cancels any animation. Returns the new offset.
    pub fn jump_to(&mut self, offset: u32) -> u32 {
        self.animation = None;
        self.offset = offset.min(self.max_offset());
        self.offset
    }

    pub fn scroll_by(&mut self, delta: i64) -> u32 {
        let target = (i64::from(self.offset) + delta).max(0);
        self.jump_to(u32::try_from(target).unwrap_or(u32::MAX))
    }

    /// Start animating towards `target` (clamped). A zero duration jumps.
    pub fn animate_to(&mut self, target: u32, now: Millis, duration: Millis) {
        let to = target.min(self.max_offset());
        if duration == 0 || to == self.offset {
            self.jump_to(to);
            return;
        }
        self.animation = Some(SmoothScroll {
            from: self.offset,
            to,
            started: now,
            duration,
        });
    }

    /// Advance the animation. Returns the new offset if it moved.
    pub fn step(&mut self, now: Millis) -> Option<u32> {
        let animation = self.animation?;
        let (offset, done) = animation.sample(now);
        if done {
            self.animation = None;
        }
        let offset = offset.min(self.max_offset());
        if offset == self.offset {
            return None;
        }
        self.offset = offset;
        Some(offset)
    }
}
