use std::path::PathBuf;

use tracing::{debug, info};

use super::{IndicatorAnimation, PresentationSurface};
use crate::config::SliderOptions;
use crate::constants::*;
use crate::sizing::Size;
use crate::slides::SlideSet;

/// Headless surface: every command becomes a log event.
pub struct LogSurface {
    slides: SlideSet<PathBuf>,
    slide_element: String,
    indicator_element: String,
    natural: Size,
    viewport: Size,
}

impl LogSurface {
    pub fn new(slides: SlideSet<PathBuf>, options: &SliderOptions) -> Self {
        Self {
            slides,
            slide_element: options.element_name("slide"),
            indicator_element: options.element_name("progressbar"),
            natural: Size::new(RENDER_WIDTH as u32, RENDER_HEIGHT as u32),
            viewport: Size::new(RENDER_WIDTH as u32, RENDER_HEIGHT as u32),
        }
    }

    fn name(&self, index: usize) -> String {
        self.slides
            .get(index)
            .and_then(|path| path.file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| format!("#{}", index))
    }
}

impl PresentationSurface for LogSurface {
    fn show_slide(&mut self, index: usize) {
        info!(element = %self.slide_element, index, slide = %self.name(index), "show slide");
    }

    fn hide_slide(&mut self, index: usize) {
        debug!(element = %self.slide_element, index, slide = %self.name(index), "hide slide");
    }

    fn mount_indicator(&mut self, width: u32, visible: bool) {
        debug!(element = %self.indicator_element, width, visible, "mount progress bar");
    }

    fn animate_indicator(&mut self, animation: IndicatorAnimation) {
        debug!(
            element = %self.indicator_element,
            width = animation.full_width,
            duration_ms = animation.duration_ms,
            reveal_ms = ?animation.reveal_ms,
            "animate progress bar"
        );
    }

    fn report_ready(&mut self) -> Option<Size> {
        Some(self.natural)
    }

    fn viewport_size(&self) -> Size {
        self.viewport
    }

    fn resize_slides(&mut self, size: Size) {
        debug!(width = size.width, height = size.height, "resize slides");
    }
}
