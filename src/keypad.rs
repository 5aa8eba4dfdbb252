//! The button grid of the calculator.
//!
//! Four operator keys are dual-purpose: with shift latched they send the
//! alternate action instead of the binary operator.
//!
//! | key | plain | shifted |
//! |-----|-------|---------|
//! | `÷` | Divide | Pi |
//! | `×` | Multiply | 1/x |
//! | `−` | Subtract | x² |
//! | `+` | Add | √x |

use crate::action::{Action, Operation};
use crate::calculator::{Calculator, CalculatorError};
use thiserror::Error;

const SHIFT: &str = "\u{21E7}";
const PI: &str = "\u{03C0}";
const EQUALS: &str = "=";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Digit(u8),
    Point,
    Equals,
    AllClear,
    Delete,
    Shift,
    Divide,
    Multiply,
    Minus,
    Plus,
}

impl Key {
    pub fn action(self, shifted: bool) -> Action {
        use Key::*;

        match (self, shifted) {
            (Digit(d), _) => Action::Number(d),
            (Point, _) => Action::DecimalPoint,
            (Equals, _) => Action::Calculate,
            (AllClear, _) => Action::Clear,
            (Delete, _) => Action::Delete,
            (Shift, _) => Action::Shift,
            (Divide, false) => Action::Operation(Operation::Divide),
            (Divide, true) => Action::Pi,
            (Multiply, false) => Action::Operation(Operation::Multiply),
            (Multiply, true) => Action::Operation(Operation::OneOverX),
            (Minus, false) => Action::Operation(Operation::Subtract),
            (Minus, true) => Action::Operation(Operation::PowerOfTwo),
            (Plus, false) => Action::Operation(Operation::Add),
            (Plus, true) => Action::Operation(Operation::SquareRoot),
        }
    }

    /// Sends this key to `calculator`, honoring its current shift state.
    pub fn press(self, calculator: &mut Calculator) -> Result<(), CalculatorError> {
        calculator.dispatch(self.action(calculator.is_shift_active()))
    }

    /// Text printed on the key for the given shift state.
    pub fn label(self, shifted: bool) -> &'static str {
        const DIGITS: [&str; 10] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];

        match self.action(shifted) {
            Action::Number(d) => DIGITS.get(d as usize).copied().unwrap_or("?"),
            Action::DecimalPoint => ".",
            Action::Calculate => EQUALS,
            Action::Clear => "AC",
            Action::Delete => "Del",
            Action::Shift => SHIFT,
            Action::Pi => PI,
            Action::Operation(op) => op.label(),
        }
    }

    pub fn from_char(c: char) -> Option<Key> {
        let key = match c {
            '0'..='9' => Key::Digit(c as u8 - b'0'),
            '.' => Key::Point,
            '=' => Key::Equals,
            '+' => Key::Plus,
            '-' => Key::Minus,
            '*' => Key::Multiply,
            '/' => Key::Divide,
            's' | 'S' => Key::Shift,
            'd' | 'D' => Key::Delete,
            'c' | 'C' => Key::AllClear,
            _ => return None,
        };
        Some(key)
    }
}

/// Turns a typed key script into keys. Whitespace is ignored.
pub fn parse_keys(script: &str) -> Result<Vec<Key>, KeyError> {
    script
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| Key::from_char(c).ok_or(KeyError::UnknownKey(c)))
        .collect()
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum KeyError {
    #[error("Unknown key: {0:?}")]
    UnknownKey(char),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shifted_keys() {
        assert_eq!(Key::Divide.action(true), Action::Pi);
        assert_eq!(
            Key::Plus.action(true),
            Action::Operation(Operation::SquareRoot)
        );
        assert_eq!(Key::Plus.action(false), Action::Operation(Operation::Add));
        assert_eq!(Key::Digit(4).action(true), Action::Number(4));
    }

    #[test]
    fn test_labels() {
        assert_eq!(Key::Multiply.label(false), "\u{00D7}");
        assert_eq!(Key::Multiply.label(true), "1/x");
        assert_eq!(Key::Minus.label(true), "x\u{00B2}");
        assert_eq!(Key::Divide.label(true), "\u{03C0}");
        assert_eq!(Key::Digit(7).label(false), "7");
        assert_eq!(Key::AllClear.label(true), "AC");
    }

    #[test]
    fn test_parse_keys() {
        assert_eq!(
            parse_keys("12 + s/"),
            Ok(vec![
                Key::Digit(1),
                Key::Digit(2),
                Key::Plus,
                Key::Shift,
                Key::Divide
            ])
        );
        assert_eq!(parse_keys("2x3"), Err(KeyError::UnknownKey('x')));
    }

    #[test]
    fn test_shift_stays_latched() {
        let mut calculator = Calculator::new();
        for key in parse_keys("9s+-").unwrap() {
            key.press(&mut calculator).unwrap();
        }
        // sqrt(9) = 3, then squared
        assert_eq!(calculator.display(), "9");
        assert!(calculator.is_shift_active());
    }
}
