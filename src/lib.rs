pub mod accumulator;
pub mod action;
pub mod calculator;
pub mod display;
pub mod keypad;

pub use action::{Action, BinaryOp, Operation};
pub use calculator::{Calculator, CalculatorError};
pub use keypad::{parse_keys, Key, KeyError};
