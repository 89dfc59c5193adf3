//! Scroll position to transition progress.
//!
//! The tracked element's vertical span is the reference frame. Scrolling
//! through the first `domain` percent of that span walks through every
//! adjacent texture pair in order; positions outside the span saturate.

/// Percentage of the tracked region over which all pairs are traversed.
pub const DEFAULT_SCROLL_DOMAIN: f64 = 33.0;

/// Geometry of the tracked region, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ReferenceFrame {
    pub region_offset: f64,
    pub region_length: f64,
    pub document_height: f64,
}

impl ReferenceFrame {
    pub fn new(region_offset: f64, region_length: f64, document_height: f64) -> Self {
        Self {
            region_offset,
            region_length,
            document_height,
        }
    }

    pub fn region_end(&self) -> f64 {
        self.region_offset + self.region_length
    }

    /// Fraction of the region scrolled past, saturated to `[0, 1]`.
    pub fn fraction_scrolled(&self, scroll_top: f64) -> f64 {
        if !scroll_top.is_finite() || scroll_top < self.region_offset {
            return 0.0;
        }
        if self.region_length <= 0.0 || scroll_top > self.region_end() {
            return 1.0;
        }
        ((scroll_top - self.region_offset) / self.region_length).clamp(0.0, 1.0)
    }
}

/// Which adjacent pair is blending and how far.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TransitionState {
    pub active_index: usize,
    pub local_progress: f32,
}

impl TransitionState {
    pub fn pair(&self) -> TexturePair {
        TexturePair {
            current: self.active_index,
            next: self.active_index + 1,
            progress: self.local_progress,
        }
    }
}

/// Texture indices and blend factor handed to the renderer each frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TexturePair {
    pub current: usize,
    pub next: usize,
    pub progress: f32,
}

#[derive(Debug, Clone)]
pub struct ProgressMapper {
    frame: ReferenceFrame,
    texture_count: usize,
    domain: f64,
    state: TransitionState,
}

impl ProgressMapper {
    /// `texture_count` must be at least 2; configuration validation enforces it.
    pub fn new(texture_count: usize, domain: f64) -> Self {
        debug_assert!(texture_count >= 2);
        Self {
            frame: ReferenceFrame::default(),
            texture_count: texture_count.max(2),
            domain,
            state: TransitionState::default(),
        }
    }

    pub fn frame(&self) -> ReferenceFrame {
        self.frame
    }

    pub fn state(&self) -> TransitionState {
        self.state
    }

    pub fn on_resize(&mut self, frame: ReferenceFrame) {
        self.frame = frame;
    }

    pub fn on_scroll(&mut self, scroll_top: f64) -> TransitionState {
        self.state = map_progress(&self.frame, scroll_top, self.texture_count, self.domain);
        self.state
    }
}

/// Maps a scroll offset to the active pair and its local blend progress.
pub fn map_progress(
    frame: &ReferenceFrame,
    scroll_top: f64,
    texture_count: usize,
    domain: f64,
) -> TransitionState {
    let last_pair = texture_count.saturating_sub(2);
    let segments = texture_count.saturating_sub(1) as f64;

    if !scroll_top.is_finite() || scroll_top < frame.region_offset {
        return TransitionState::default();
    }
    if frame.region_length <= 0.0 || scroll_top > frame.region_end() {
        return saturated(last_pair);
    }

    let percentage = frame.fraction_scrolled(scroll_top) * 100.0;
    let global = (percentage / domain * segments).clamp(0.0, segments);
    if global >= segments {
        return saturated(last_pair);
    }

    let active_index = (global.floor() as usize).min(last_pair);
    let local_progress = (global - active_index as f64).clamp(0.0, 1.0) as f32;
    TransitionState {
        active_index,
        local_progress,
    }
}

fn saturated(last_pair: usize) -> TransitionState {
    TransitionState {
        active_index: last_pair,
        local_progress: 1.0,
    }
}
