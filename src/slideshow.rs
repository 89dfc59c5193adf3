//! Manually triggered transitions: each `next()` tweens progress from 0 to 1
//! and then promotes the incoming texture to current.

use crate::easing::Easing;
use crate::progress::TexturePair;

#[derive(Debug, Clone, Copy)]
struct Tween {
    start: f64,
    next: usize,
}

#[derive(Debug, Clone)]
pub struct Slideshow {
    len: usize,
    current: usize,
    duration: f64,
    easing: Easing,
    tween: Option<Tween>,
    progress: f32,
}

impl Slideshow {
    /// `duration` is in seconds; timestamps passed to `next`/`tick` share its unit.
    pub fn new(len: usize, duration: f64, easing: Easing) -> Self {
        Self {
            len: len.max(1),
            current: 0,
            duration,
            easing,
            tween: None,
            progress: 0.0,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn is_running(&self) -> bool {
        self.tween.is_some()
    }

    /// Starts a transition to the following texture. Ignored while one runs.
    pub fn next(&mut self, now: f64) -> bool {
        if self.tween.is_some() {
            return false;
        }
        self.tween = Some(Tween {
            start: now,
            next: (self.current + 1) % self.len,
        });
        self.progress = 0.0;
        true
    }

    /// Advances the running tween. Returns `true` on the tick that completes it.
    pub fn tick(&mut self, now: f64) -> bool {
        let Some(tween) = self.tween else {
            return false;
        };
        let elapsed = (now - tween.start).max(0.0);
        let t = if self.duration > 0.0 {
            (elapsed / self.duration) as f32
        } else {
            1.0
        };
        if t >= 1.0 {
            self.current = tween.next;
            self.progress = 0.0;
            self.tween = None;
            log::debug!("transition finished, showing texture {}", self.current);
            return true;
        }
        self.progress = self.easing.sample(t);
        false
    }

    pub fn pair(&self) -> TexturePair {
        let next = match self.tween {
            Some(tween) => tween.next,
            None => (self.current + 1) % self.len,
        };
        TexturePair {
            current: self.current,
            next,
            progress: self.progress,
        }
    }
}
