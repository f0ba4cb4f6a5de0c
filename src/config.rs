//! Slideshow options and their TOML representation.

use std::fs;
use std::path::Path;

use globset::{Glob, GlobMatcher};
use serde::Deserialize;

use crate::constants::*;
use crate::error::{Result, SlideshowError};
use crate::input::KeyboardMode;

/// How the progress bar is displayed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ProgressBarMode {
    /// No progress bar is mounted.
    Off,
    /// Mounted visible and stays visible.
    #[default]
    AlwaysVisible,
    /// Mounted hidden and faded in when the first display period starts.
    RevealOnStart,
}

impl ProgressBarMode {
    pub fn is_enabled(self) -> bool {
        self != ProgressBarMode::Off
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SliderOptions {
    /// Glob over file names selecting which entries are slides.
    pub selector: String,
    /// Prefix for the names of generated presentation elements.
    pub class_prefix: String,
    /// Explicit size; inferred from the first slide when absent.
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub progress_bar: ProgressBarMode,
    /// Start the autoplay loop as soon as the surface is ready.
    pub auto_play: bool,
    #[serde(rename = "interval")]
    pub interval_ms: u64,
    pub keyboard: KeyboardMode,
}

impl Default for SliderOptions {
    fn default() -> Self {
        Self {
            selector: DEFAULT_SELECTOR.to_string(),
            class_prefix: DEFAULT_CLASS_PREFIX.to_string(),
            width: None,
            height: None,
            progress_bar: ProgressBarMode::default(),
            auto_play: true,
            interval_ms: DEFAULT_INTERVAL_MS,
            keyboard: KeyboardMode::default(),
        }
    }
}

impl SliderOptions {
    pub fn from_toml_str(text: &str, origin: &Path) -> Result<Self> {
        let options: SliderOptions = toml::from_str(text).map_err(|source| SlideshowError::ParseConfig {
            path: origin.to_path_buf(),
            source,
        })?;
        options.validate()?;
        Ok(options)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| SlideshowError::ReadConfig {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text, path)
    }

    pub fn validate(&self) -> Result<()> {
        if self.interval_ms == 0 {
            return Err(SlideshowError::InvalidInterval(self.interval_ms));
        }
        self.selector_matcher()?;
        Ok(())
    }

    pub fn selector_matcher(&self) -> Result<GlobMatcher> {
        Glob::new(&self.selector)
            .map(|glob| glob.compile_matcher())
            .map_err(|source| SlideshowError::InvalidSelector {
                pattern: self.selector.clone(),
                source,
            })
    }

    /// Name of a generated element, e.g. `s-progressbar`.
    pub fn element_name(&self, element: &str) -> String {
        format!("{}{}", self.class_prefix, element)
    }
}
