//! Keyboard navigation.

use serde::Deserialize;

/// Keys the slideshow cares about, independent of the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Left,
    Up,
    Right,
    Down,
    Space,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavCommand {
    Prev,
    Next,
}

/// Which keys navigate.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum KeyboardMode {
    Off,
    /// Left/right arrows only.
    Horizontal,
    /// Left/up go back, right/down go forward.
    #[default]
    Arrows,
}

impl KeyboardMode {
    pub fn command_for(self, key: NavKey) -> Option<NavCommand> {
        match (self, key) {
            (KeyboardMode::Off, _) => None,
            (_, NavKey::Left) => Some(NavCommand::Prev),
            (_, NavKey::Right) => Some(NavCommand::Next),
            (KeyboardMode::Arrows, NavKey::Up) => Some(NavCommand::Prev),
            (KeyboardMode::Arrows, NavKey::Down) => Some(NavCommand::Next),
            _ => None,
        }
    }
}
