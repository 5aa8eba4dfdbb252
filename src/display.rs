use crate::action::BinaryOp;
use compact_str::{format_compact, CompactString};

/// Decimal places used while an expression is still being entered.
pub const INCREMENTAL_PLACES: usize = 2;
/// Decimal places used for the result of `Calculate`.
pub const EVALUATE_PLACES: usize = 5;

pub const PI: f64 = 3.1416;

/// Integral values print without a fractional part, everything else with
/// exactly `places` decimals.
pub fn format_value(value: f64, places: usize) -> CompactString {
    if value % 1.0 == 0.0 {
        // `+ 0.0` folds negative zero into zero
        format_compact!("{:.0}", value + 0.0)
    } else {
        format_compact!("{:.*}", places, value)
    }
}

/// A committed piece of the display. The number being typed is not a
/// segment yet; it is rendered after the last one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Number(CompactString),
    Operator(BinaryOp),
}

/// Ordered history of committed numbers, operators and reduced results.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Segments {
    items: Vec<Segment>,
}

impl Segments {
    pub fn push_number(&mut self, text: CompactString) {
        self.items.push(Segment::Number(text));
    }

    pub fn push_operator(&mut self, op: BinaryOp) {
        self.items.push(Segment::Operator(op));
    }

    pub fn pop(&mut self) -> Option<Segment> {
        self.items.pop()
    }

    pub fn last(&self) -> Option<&Segment> {
        self.items.last()
    }

    pub fn last_is_number(&self) -> bool {
        matches!(self.items.last(), Some(Segment::Number(_)))
    }

    pub fn last_is_operator(&self) -> bool {
        matches!(self.items.last(), Some(Segment::Operator(_)))
    }

    /// Rewrites the trailing number. Does nothing if the display does not
    /// end with one.
    pub fn replace_last_number(&mut self, text: CompactString) {
        if let Some(Segment::Number(last)) = self.items.last_mut() {
            *last = text;
        }
    }

    /// Replaces `left op right` with a single result segment. The three
    /// trailing segments are only dropped when there are that many.
    pub fn collapse(&mut self, result: CompactString) {
        if self.items.len() >= 3 {
            self.items.truncate(self.items.len() - 3);
        }
        self.items.push(Segment::Number(result));
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Segment> {
        self.items.iter()
    }

    /// Concatenates every segment followed by the number being typed.
    pub fn render(&self, pending: &str) -> String {
        let mut out = String::new();
        for segment in &self.items {
            match segment {
                Segment::Number(text) => out.push_str(text),
                Segment::Operator(op) => out.push(op.symbol()),
            }
        }
        out.push_str(pending);
        out
    }
}
