//! Key event classification
//!
//! The host polls its input device and hands over one classified key-down
//! event at a time. Anything that is not in [`KeyEvent`] is dropped at the
//! edge and never reaches the simulation.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyEvent {
    Quit,
    Escape,
    Backspace,
    Up,
    Down,
    Enter,
    /// A lowercase ASCII letter
    Letter(char),
}

impl KeyEvent {
    /// Classify a raw character (terminal style input)
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'a'..='z' => Some(KeyEvent::Letter(c)),
            '\u{8}' | '\u{7f}' => Some(KeyEvent::Backspace),
            '\u{1b}' => Some(KeyEvent::Escape),
            '\r' | '\n' => Some(KeyEvent::Enter),
            _ => None,
        }
    }

    /// Classify a DOM `KeyboardEvent.key` style name
    pub fn from_key_name(name: &str) -> Option<Self> {
        match name {
            "Escape" | "Esc" => Some(KeyEvent::Escape),
            "Backspace" => Some(KeyEvent::Backspace),
            "ArrowUp" | "Up" => Some(KeyEvent::Up),
            "ArrowDown" | "Down" => Some(KeyEvent::Down),
            "Enter" | "Return" => Some(KeyEvent::Enter),
            "Quit" => Some(KeyEvent::Quit),
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c @ 'a'..='z'), None) => Some(KeyEvent::Letter(c)),
                    _ => None,
                }
            }
        }
    }

    pub fn letter(self) -> Option<char> {
        match self {
            KeyEvent::Letter(c) => Some(c),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_char() {
        assert_eq!(KeyEvent::from_char('q'), Some(KeyEvent::Letter('q')));
        assert_eq!(KeyEvent::from_char('\u{7f}'), Some(KeyEvent::Backspace));
        assert_eq!(KeyEvent::from_char('\u{1b}'), Some(KeyEvent::Escape));
        assert_eq!(KeyEvent::from_char('Q'), None);
        assert_eq!(KeyEvent::from_char('7'), None);
    }

    #[test]
    fn test_from_key_name() {
        assert_eq!(KeyEvent::from_key_name("ArrowUp"), Some(KeyEvent::Up));
        assert_eq!(KeyEvent::from_key_name("Enter"), Some(KeyEvent::Enter));
        assert_eq!(KeyEvent::from_key_name("k"), Some(KeyEvent::Letter('k')));
        assert_eq!(KeyEvent::from_key_name("K"), None);
        assert_eq!(KeyEvent::from_key_name("Shift"), None);
        assert_eq!(KeyEvent::Letter('x').letter(), Some('x'));
        assert_eq!(KeyEvent::Enter.letter(), None);
    }
}
