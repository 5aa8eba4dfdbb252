use crate::accumulator::Accumulator;
use crate::action::{Action, BinaryOp, OperationKind, UnaryOp};
use crate::display::{format_value, Segment, Segments, EVALUATE_PLACES, INCREMENTAL_PLACES, PI};
use compact_str::{format_compact, CompactString};
use std::fmt;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Default, Clone, PartialEq)]
struct EngineState {
    pending: Accumulator,
    operands: Vec<f64>,
    operators: Vec<BinaryOp>,
    segments: Segments,
    shifted: bool,
}

type Observer = Box<dyn FnMut(&str, bool)>;

/// Incremental expression engine driven one key press at a time.
///
/// Numbers and operators go onto two stacks. A multiplicative operator on
/// top of the stack is reduced as soon as an additive one arrives; all other
/// reductions wait for [`Action::Calculate`]. The display is a projection of
/// the stacks plus the number being typed.
#[derive(Default)]
pub struct Calculator {
    state: EngineState,
    observer: Option<Observer>,
}

impl fmt::Debug for Calculator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Calculator")
            .field("state", &self.state)
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

impl Calculator {
    pub fn new() -> Self {
        Self::default()
    }

    /// The observer receives the display and the shift flag after every
    /// action that succeeds.
    pub fn with_observer(observer: impl FnMut(&str, bool) + 'static) -> Self {
        Self {
            state: EngineState::default(),
            observer: Some(Box::new(observer)),
        }
    }

    /// Applies one action. A failing action leaves the engine exactly as it
    /// was before the call.
    pub fn dispatch(&mut self, action: Action) -> Result<(), CalculatorError> {
        debug!(?action, "dispatch");
        let snapshot = self.state.clone();

        if let Err(e) = self.apply(action) {
            warn!(?action, error = %e, "action rolled back");
            self.state = snapshot;
            return Err(e);
        }

        if let Some(observer) = self.observer.as_mut() {
            let display = self.state.segments.render(self.state.pending.as_str());
            observer(&display, self.state.shifted);
        }
        Ok(())
    }

    pub fn display(&self) -> String {
        self.state.segments.render(self.state.pending.as_str())
    }

    pub fn is_shift_active(&self) -> bool {
        self.state.shifted
    }

    pub fn operands(&self) -> &[f64] {
        &self.state.operands
    }

    pub fn operators(&self) -> &[BinaryOp] {
        &self.state.operators
    }

    /// Number currently being typed, empty if none.
    pub fn pending(&self) -> &str {
        self.state.pending.as_str()
    }

    fn apply(&mut self, action: Action) -> Result<(), CalculatorError> {
        use Action::*;

        match action {
            Number(digit) if digit > 9 => return Err(CalculatorError::InvalidDigit(digit)),
            Number(digit) => self.enter_digit(digit),
            DecimalPoint => self.enter_point(),
            Pi => self.enter_pi(),
            Shift => self.state.shifted = !self.state.shifted,
            Clear => self.state = EngineState::default(),
            Delete => self.delete(),
            Calculate => self.calculate()?,
            Operation(operation) => match operation.kind() {
                OperationKind::Binary(op) => self.enter_operator(op)?,
                OperationKind::Unary(op) => self.apply_unary(op)?,
                OperationKind::Reserved => {
                    debug!(?operation, "operation not implemented, ignored")
                }
            },
        }

        Ok(())
    }

    fn enter_digit(&mut self, digit: u8) {
        // Typing after a result keeps editing that number
        if self.state.pending.is_empty() {
            if let Some(text) = self.pop_committed_number() {
                if is_editable(&text) {
                    self.state.pending.reopen(&text);
                }
            }
        }
        self.state.pending.push_digit(digit);
    }

    fn enter_point(&mut self) {
        // A point after a result starts a fresh "0." in its place
        if self.state.pending.is_empty() {
            self.pop_committed_number();
        }
        self.state.pending.push_point();
    }

    fn enter_pi(&mut self) {
        if !self.state.pending.is_empty() {
            self.state.pending.clear();
        } else {
            self.pop_committed_number();
        }
        self.state.operands.push(PI);
        self.state.segments.push_number(format_compact!("{}", PI));
    }

    /// Takes the trailing committed number off both the display and the
    /// operand stack.
    fn pop_committed_number(&mut self) -> Option<CompactString> {
        if !self.state.segments.last_is_number() {
            return None;
        }
        self.state.operands.pop();
        match self.state.segments.pop() {
            Some(Segment::Number(text)) => Some(text),
            _ => None,
        }
    }

    /// Moves the pending token onto the operand stack.
    fn commit(&mut self) -> Result<(), CalculatorError> {
        if let Some((value, text)) = self.state.pending.commit()? {
            self.state.operands.push(value);
            self.state.segments.push_number(text);
        }
        Ok(())
    }

    fn enter_operator(&mut self, op: BinaryOp) -> Result<(), CalculatorError> {
        self.commit()?;

        if self.state.segments.last_is_operator() {
            // Pressing a second operator replaces the first
            self.state.segments.pop();
            self.state.operators.pop();
        }
        if self.state.operands.is_empty() {
            debug!(?op, "no operand yet, operator ignored");
            return Ok(());
        }

        while self
            .state
            .operators
            .last()
            .map(|top| top.outranks(op))
            .unwrap_or(false)
            && self.state.operands.len() >= 2
        {
            self.reduce()?;
        }

        self.state.operators.push(op);
        self.state.segments.push_operator(op);
        Ok(())
    }

    fn apply_unary(&mut self, op: UnaryOp) -> Result<(), CalculatorError> {
        self.commit()?;

        if !self.state.segments.last_is_number() {
            return Ok(());
        }
        let Some(&value) = self.state.operands.last() else {
            return Ok(());
        };
        let result = op.apply(value).ok_or(CalculatorError::DivisionByZero)?;
        debug!(?op, value, result, "unary");

        self.state.operands.pop();
        self.state.operands.push(result);
        self.state
            .segments
            .replace_last_number(format_value(result, INCREMENTAL_PLACES));
        Ok(())
    }

    fn delete(&mut self) {
        if self.state.pending.pop().is_some() {
            return;
        }

        match self.state.segments.last() {
            None => {}
            Some(Segment::Operator(_)) => {
                self.state.segments.pop();
                self.state.operators.pop();
            }
            Some(Segment::Number(_)) => {
                let Some(mut text) = self.pop_committed_number() else {
                    return;
                };
                text.pop();
                if is_editable(&text) && text.parse::<f64>().is_ok() {
                    self.state.pending.reopen(&text);
                }
            }
        }
    }

    fn calculate(&mut self) -> Result<(), CalculatorError> {
        self.commit()?;

        if self.state.segments.last_is_operator() {
            // Nothing to apply a trailing operator to
            self.state.segments.pop();
            self.state.operators.pop();
        }

        while !self.state.operators.is_empty() && self.state.operands.len() >= 2 {
            self.reduce()?;
        }

        if let Some(&result) = self.state.operands.last() {
            debug!(result, "calculate");
            self.state
                .segments
                .replace_last_number(format_value(result, EVALUATE_PLACES));
        }
        Ok(())
    }

    /// Pops one operator and its two operands and pushes the result. The
    /// divisor is checked before anything is popped.
    fn reduce(&mut self) -> Result<(), CalculatorError> {
        let state = &mut self.state;
        let (Some(&op), [.., left, right]) = (state.operators.last(), state.operands.as_slice())
        else {
            return Ok(());
        };
        let result = op
            .apply(*left, *right)
            .ok_or(CalculatorError::DivisionByZero)?;
        debug!(left, ?op, right, result, "reduce");

        state.operators.pop();
        state.operands.pop();
        state.operands.pop();
        state.operands.push(result);
        state
            .segments
            .collapse(format_value(result, INCREMENTAL_PLACES));
        Ok(())
    }
}

/// Whether a committed number can be typed into again.
fn is_editable(text: &str) -> bool {
    let digits = text.strip_prefix('-').unwrap_or(text);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit() || b == b'.')
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CalculatorError {
    #[error("Division by zero")]
    DivisionByZero,
    #[error("Malformed number: {0}")]
    ParseError(CompactString),
    #[error("Not a digit: {0}")]
    InvalidDigit(u8),
}
