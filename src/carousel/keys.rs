// Keyboard handling for the certificate viewer
//
// Keybindings (only while the viewer is open):
// - Escape: Close viewer
// - ArrowLeft: Previous item
// - ArrowRight: Next item
//
// Everything else is ignored.

use std::convert::Infallible;
use std::str::FromStr;

/// Navigation direction through the carousel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

/// A key as reported by the host, reduced to what the viewer cares about
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Escape,
    ArrowLeft,
    ArrowRight,
    Other(String),
}

/// What a key press asks the viewer to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Close,
    Navigate(Direction),
}

impl Key {
    /// Parse a host key name (`"Escape"`, `"ArrowLeft"`, ...)
    pub fn from_name(name: &str) -> Self {
        match name {
            "Escape" | "Esc" => Self::Escape,
            "ArrowLeft" | "Left" => Self::ArrowLeft,
            "ArrowRight" | "Right" => Self::ArrowRight,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn action(&self) -> Option<KeyAction> {
        match self {
            Self::Escape => Some(KeyAction::Close),
            Self::ArrowLeft => Some(KeyAction::Navigate(Direction::Previous)),
            Self::ArrowRight => Some(KeyAction::Navigate(Direction::Next)),
            Self::Other(_) => None,
        }
    }
}

impl FromStr for Key {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_name(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_names() {
        assert_eq!(Key::from_name("Escape"), Key::Escape);
        assert_eq!(Key::from_name("ArrowLeft"), Key::ArrowLeft);
        assert_eq!(Key::from_name("ArrowRight"), Key::ArrowRight);
        assert_eq!(Key::from_name("a"), Key::Other("a".into()));
        // Key names are case sensitive, as in the DOM
        assert_eq!(Key::from_name("escape"), Key::Other("escape".into()));
    }

    #[test]
    fn test_key_actions() {
        assert_eq!(Key::Escape.action(), Some(KeyAction::Close));
        assert_eq!(
            Key::ArrowLeft.action(),
            Some(KeyAction::Navigate(Direction::Previous))
        );
        assert_eq!(
            Key::ArrowRight.action(),
            Some(KeyAction::Navigate(Direction::Next))
        );
        assert_eq!(Key::Other("Enter".into()).action(), None);
    }
}
