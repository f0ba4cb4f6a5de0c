//! Rendering backends the controller drives.

pub mod log;
#[cfg(test)]
pub mod recording;
#[cfg(feature = "window")]
pub mod window;

use crate::sizing::Size;

/// One run of the progress indicator from empty to `full_width`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndicatorAnimation {
    pub full_width: u32,
    pub duration_ms: u64,
    /// Fade the indicator in over this many milliseconds before it is shown.
    pub reveal_ms: Option<u64>,
}

/// Capability interface between the controller and whatever draws the slides.
pub trait PresentationSurface {
    fn show_slide(&mut self, index: usize);
    fn hide_slide(&mut self, index: usize);

    /// Creates the progress indicator at full width, hidden or visible.
    fn mount_indicator(&mut self, width: u32, visible: bool);
    fn animate_indicator(&mut self, animation: IndicatorAnimation);

    /// Natural size of the content once it is loaded, `None` while loading.
    fn report_ready(&mut self) -> Option<Size>;
    fn viewport_size(&self) -> Size;
    fn resize_slides(&mut self, size: Size);
}

/// Linear width/opacity interpolation of an [`IndicatorAnimation`],
/// advanced frame by frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorTrack {
    animation: IndicatorAnimation,
    elapsed_ms: u64,
    pub visible: bool,
}

impl IndicatorTrack {
    pub fn new(animation: IndicatorAnimation, visible: bool) -> Self {
        Self {
            animation,
            elapsed_ms: 0,
            visible: visible || animation.reveal_ms.is_some(),
        }
    }

    pub fn update(&mut self, dt_ms: u64) {
        self.elapsed_ms = (self.elapsed_ms + dt_ms).min(self.animation.duration_ms);
    }

    pub fn width(&self) -> f32 {
        if self.animation.duration_ms == 0 {
            return self.animation.full_width as f32;
        }
        let t = self.elapsed_ms as f32 / self.animation.duration_ms as f32;
        self.animation.full_width as f32 * t.min(1.0)
    }

    pub fn opacity(&self) -> f32 {
        if !self.visible {
            return 0.0;
        }
        match self.animation.reveal_ms {
            Some(reveal_ms) if reveal_ms > 0 => (self.elapsed_ms as f32 / reveal_ms as f32).min(1.0),
            _ => 1.0,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed_ms >= self.animation.duration_ms
    }
}
