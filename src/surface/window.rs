use std::fs;
use std::path::Path;

use raylib::prelude::*;
use tracing::{debug, warn};

use super::{IndicatorAnimation, IndicatorTrack, PresentationSurface};
use crate::constants::PROGRESS_BAR_HEIGHT;
use crate::scan::read_exif_orientation;
use crate::sizing::{Size, centered_origin};
use crate::slides::SlideSet;

struct WindowSlide {
    image: Texture2D,
    visible: bool,
}

/// Draws the current slide centered in a raylib window, progress bar on top.
pub struct RaylibSurface {
    slides: Vec<WindowSlide>,
    slide_size: Option<Size>,
    viewport: Size,
    indicator_visible: bool,
    indicator: Option<IndicatorTrack>,
}

impl RaylibSurface {
    /// Loads every slide as a texture. Slides that fail to load are skipped.
    pub fn load(rl: &mut RaylibHandle, thread: &RaylibThread, paths: &SlideSet<std::path::PathBuf>) -> Self {
        let mut slides = Vec::new();
        for path in paths {
            match load_texture_with_exif_rotation(rl, thread, path) {
                Ok(image) => slides.push(WindowSlide { image, visible: false }),
                Err(e) => warn!("skipping {}: {}", path.display(), e),
            }
        }

        Self {
            slides,
            slide_size: None,
            viewport: Size::new(rl.get_screen_width() as u32, rl.get_screen_height() as u32),
            indicator_visible: false,
            indicator: None,
        }
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    pub fn set_viewport(&mut self, width: i32, height: i32) {
        self.viewport = Size::new(width.max(0) as u32, height.max(0) as u32);
    }

    pub fn update(&mut self, dt_ms: u64) {
        if let Some(track) = self.indicator.as_mut() {
            track.update(dt_ms);
        }
    }

    pub fn draw(&self, d: &mut RaylibDrawHandle) {
        // Nothing to draw before the controller asked for the size
        let Some(size) = self.slide_size else {
            return;
        };
        let screen = Size::new(d.get_screen_width().max(0) as u32, d.get_screen_height().max(0) as u32);
        let (left, top) = centered_origin(screen, size);

        for slide in self.slides.iter().filter(|s| s.visible) {
            let tex_width = slide.image.width() as f32;
            let tex_height = slide.image.height() as f32;

            d.draw_texture_pro(
                &slide.image,
                Rectangle::new(0.0, 0.0, tex_width, tex_height),
                Rectangle::new(left, top, size.width as f32, size.height as f32),
                Vector2::new(0.0, 0.0),
                0.0,
                Color::WHITE,
            );
        }

        // Progress bar sits on the top edge of the slide
        if let Some(track) = &self.indicator {
            let opacity = track.opacity();
            if opacity > 0.0 {
                d.draw_rectangle(
                    left as i32,
                    top as i32,
                    track.width() as i32,
                    PROGRESS_BAR_HEIGHT,
                    Color::new(255, 255, 255, (opacity * 200.0) as u8),
                );
            }
        }
    }
}

impl PresentationSurface for RaylibSurface {
    fn show_slide(&mut self, index: usize) {
        if let Some(slide) = self.slides.get_mut(index) {
            slide.visible = true;
        }
    }

    fn hide_slide(&mut self, index: usize) {
        if let Some(slide) = self.slides.get_mut(index) {
            slide.visible = false;
        }
    }

    fn mount_indicator(&mut self, width: u32, visible: bool) {
        debug!(width, visible, "progress bar mounted");
        self.indicator_visible = visible;
    }

    fn animate_indicator(&mut self, animation: IndicatorAnimation) {
        self.indicator = Some(IndicatorTrack::new(animation, self.indicator_visible));
        if animation.reveal_ms.is_some() {
            self.indicator_visible = true;
        }
    }

    fn report_ready(&mut self) -> Option<Size> {
        let natural = self
            .slides
            .first()
            .map(|slide| Size::new(slide.image.width() as u32, slide.image.height() as u32))?;
        // Drawn at natural size unless the controller resizes
        self.slide_size.get_or_insert(natural);
        Some(natural)
    }

    fn viewport_size(&self) -> Size {
        self.viewport
    }

    fn resize_slides(&mut self, size: Size) {
        self.slide_size = Some(size);
    }
}

// --- Load Image, Apply EXIF Rotation, Create Texture ---
fn load_texture_with_exif_rotation(
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    image_path: &Path,
) -> Result<Texture2D, String> {
    let file_bytes = fs::read(image_path)
        .map_err(|e| format!("Failed to read file {:?}: {}", image_path, e))?;

    let extension = image_path.extension().and_then(|s| s.to_str()).unwrap_or("").to_lowercase();
    let orientation = if extension == "jpg" || extension == "jpeg" {
        read_exif_orientation(&file_bytes)
    } else {
        1
    };

    let mut image = Image::load_image_from_mem(&(".".to_string() + &extension), &file_bytes)
        .map_err(|e| format!("Failed to load image data for {:?}: {}", image_path, e))?;

    // 3 = 180 deg, 6 = 90 deg clockwise, 8 = 90 deg counter-clockwise.
    // Flipped orientations are left as they are.
    match orientation {
        3 => {
            image.rotate_cw();
            image.rotate_cw();
        }
        6 => image.rotate_cw(),
        8 => image.rotate_ccw(),
        _ => {}
    }

    rl.load_texture_from_image(thread, &image)
        .map_err(|e| format!("Failed to create texture for {:?}: {}", image_path, e))
}
