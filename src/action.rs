/// Input events accepted by [`Calculator::dispatch`](crate::Calculator::dispatch).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Number(u8),
    DecimalPoint,
    Pi,
    Shift,
    Clear,
    Delete,
    Calculate,
    Operation(Operation),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
    SquareRoot,
    PowerOfTwo,
    OneOverX,
    // Declared but not implemented yet, dispatching them is a no-op
    Factorial,
    Percent,
    LogBaseE,
    LogBase10,
    EToThePowerOfX,
    Sin,
    Cos,
    Tan,
    Csc,
    Sec,
    Cot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Binary(BinaryOp),
    Unary(UnaryOp),
    Reserved,
}

impl Operation {
    pub fn kind(self) -> OperationKind {
        use Operation::*;

        match self {
            Add => OperationKind::Binary(BinaryOp::Add),
            Subtract => OperationKind::Binary(BinaryOp::Sub),
            Multiply => OperationKind::Binary(BinaryOp::Mul),
            Divide => OperationKind::Binary(BinaryOp::Div),
            SquareRoot => OperationKind::Unary(UnaryOp::SquareRoot),
            PowerOfTwo => OperationKind::Unary(UnaryOp::Square),
            OneOverX => OperationKind::Unary(UnaryOp::Reciprocal),
            Factorial | Percent | LogBaseE | LogBase10 | EToThePowerOfX | Sin | Cos | Tan | Csc
            | Sec | Cot => OperationKind::Reserved,
        }
    }

    /// Glyph shown on the key bound to this operation.
    pub fn label(self) -> &'static str {
        use Operation::*;

        match self {
            Add => "+",
            Subtract => "\u{2212}",
            Multiply => "\u{00D7}",
            Divide => "\u{00F7}",
            SquareRoot => "\u{221A}x",
            PowerOfTwo => "x\u{00B2}",
            OneOverX => "1/x",
            Factorial => "!",
            Percent => "%",
            LogBaseE => "log\u{208E}",
            LogBase10 => "log\u{2081}\u{2080}",
            EToThePowerOfX => "e\u{02E3}",
            Sin => "sin",
            Cos => "cos",
            Tan => "tan",
            Csc => "csc",
            Sec => "sec",
            Cot => "cot",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOp {
    /// Character pushed onto the display for this operator.
    pub fn symbol(self) -> char {
        match self {
            BinaryOp::Add => '+',
            BinaryOp::Sub => '-',
            BinaryOp::Mul => '*',
            BinaryOp::Div => '/',
        }
    }

    pub fn precedence(self) -> u8 {
        match self {
            BinaryOp::Add | BinaryOp::Sub => 10,
            BinaryOp::Mul | BinaryOp::Div => 20,
        }
    }

    /// Whether `self` sitting on the operator stack must be reduced before
    /// `incoming` is pushed. Only a strictly higher tier qualifies, so
    /// chains of equal precedence stay unreduced until evaluation.
    pub fn outranks(self, incoming: BinaryOp) -> bool {
        self.precedence() > incoming.precedence()
    }

    /// Checked application. `None` when dividing by exactly zero.
    pub fn apply(self, l: f64, r: f64) -> Option<f64> {
        match self {
            BinaryOp::Add => Some(l + r),
            BinaryOp::Sub => Some(l - r),
            BinaryOp::Mul => Some(l * r),
            BinaryOp::Div if r == 0.0 => None,
            BinaryOp::Div => Some(l / r),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    SquareRoot,
    Square,
    Reciprocal,
}

impl UnaryOp {
    /// Checked application. `None` for the reciprocal of exactly zero.
    pub fn apply(self, v: f64) -> Option<f64> {
        match self {
            UnaryOp::SquareRoot => Some(v.sqrt()),
            UnaryOp::Square => Some(v * v),
            UnaryOp::Reciprocal if v == 0.0 => None,
            UnaryOp::Reciprocal => Some(1.0 / v),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_multiplicative_outranks_additive() {
        assert!(BinaryOp::Mul.outranks(BinaryOp::Add));
        assert!(BinaryOp::Div.outranks(BinaryOp::Sub));
        assert!(!BinaryOp::Sub.outranks(BinaryOp::Sub));
        assert!(!BinaryOp::Mul.outranks(BinaryOp::Div));
        assert!(!BinaryOp::Add.outranks(BinaryOp::Mul));
    }

    #[test]
    fn test_checked_division() {
        assert_eq!(BinaryOp::Div.apply(5.0, 0.0), None);
        assert_eq!(BinaryOp::Div.apply(6.0, 3.0), Some(2.0));
        assert_eq!(UnaryOp::Reciprocal.apply(0.0), None);
        assert_eq!(UnaryOp::Reciprocal.apply(4.0), Some(0.25));
    }

    #[test]
    fn test_reserved_operations() {
        for op in [Operation::Factorial, Operation::Sin, Operation::Cot] {
            assert_eq!(op.kind(), OperationKind::Reserved);
        }
        assert_eq!(
            Operation::PowerOfTwo.kind(),
            OperationKind::Unary(UnaryOp::Square)
        );
    }
}
