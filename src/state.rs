#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Phase {
    Idle,                                  // Waiting for the surface to report ready
    Displaying { index: usize },           // Showing a slide, accepting navigation
    Transitioning { from: usize, to: usize }, // Slides swapping, navigation locked
    Destroyed,                             // Torn down, every call is ignored
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct SlideshowState {
    pub current_index: usize,
    pub is_transitioning: bool,
    pub autoplay_enabled: bool,
    pub interval_ms: u64,
}

impl SlideshowState {
    pub fn new(autoplay_enabled: bool, interval_ms: u64) -> Self {
        Self {
            current_index: 0,
            is_transitioning: false,
            autoplay_enabled,
            interval_ms,
        }
    }
}
