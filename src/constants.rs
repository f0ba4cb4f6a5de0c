pub const RENDER_WIDTH: i32 = 1920;           // Width of the window at startup
pub const RENDER_HEIGHT: i32 = 1080;          // Height of the window at startup
pub const FPS: u32 = 60;                      // Frames per second
pub const FRAME_TIME_MS: u64 = 1000 / FPS as u64; // Time per frame (milliseconds)

pub const DEFAULT_INTERVAL_MS: u64 = 4000;    // How long each slide is shown
pub const DEFAULT_SELECTOR: &str = "*";       // Every supported image counts as a slide
pub const DEFAULT_CLASS_PREFIX: &str = "s-";  // Prefix of generated element names

pub const PROGRESS_BAR_HEIGHT: i32 = 4;       // Thickness of the progress bar (pixels)
pub const REVEAL_FADE_MS: u64 = 300;          // Fade-in of a hidden progress bar
pub const TRANSITION_MS: u64 = 300;           // Navigation is locked while slides swap

pub const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "bmp", "gif"];
