//! Timer-driven slideshow: a single-threaded controller cycles through an
//! ordered set of slides, drives a progress bar and answers keyboard
//! navigation, talking to its renderer only through [`PresentationSurface`].

pub mod config;
pub mod constants;
pub mod controller;
pub mod error;
pub mod input;
pub mod scan;
pub mod sizing;
pub mod slides;
pub mod state;
pub mod surface;
pub mod timer;

pub use config::{ProgressBarMode, SliderOptions};
pub use controller::SlideshowController;
pub use error::{Result, SlideshowError};
pub use input::{KeyboardMode, NavKey};
pub use surface::PresentationSurface;
