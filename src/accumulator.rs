use crate::calculator::CalculatorError;
use compact_str::CompactString;

/// Collects the characters of the number currently being typed.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Accumulator {
    token: CompactString,
}

impl Accumulator {
    /// `digit` must already be in `0..=9`.
    pub fn push_digit(&mut self, digit: u8) {
        debug_assert!(digit <= 9);
        self.token.push(char::from(b'0' + digit));
    }

    /// Bare decimal entry gets a leading zero. A second point is not
    /// rejected here; such a token fails later in [`Accumulator::commit`].
    pub fn push_point(&mut self) {
        if self.token.is_empty() {
            self.token.push('0');
        }
        self.token.push('.');
    }

    /// Drops the last typed character. A sign left on its own by a
    /// reopened negative number goes with it.
    pub fn pop(&mut self) -> Option<char> {
        let c = self.token.pop()?;
        if self.token == "-" {
            self.token.clear();
        }
        Some(c)
    }

    /// Continues editing an already committed number, e.g. a result that
    /// gets more digits typed after it.
    pub fn reopen(&mut self, text: &str) {
        self.token = CompactString::from(text);
    }

    /// Parses the pending token and hands back its value together with the
    /// text as typed. On failure the token is kept.
    pub fn commit(&mut self) -> Result<Option<(f64, CompactString)>, CalculatorError> {
        if self.token.is_empty() {
            return Ok(None);
        }
        let value = self
            .token
            .parse::<f64>()
            .map_err(|_| CalculatorError::ParseError(self.token.clone()))?;
        Ok(Some((value, std::mem::take(&mut self.token))))
    }

    pub fn clear(&mut self) {
        self.token.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.token.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.token
    }
}
