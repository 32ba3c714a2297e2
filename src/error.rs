use std::fmt;

// the five user-visible failure kinds; Display gives the exact strings the
// command loop prints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalcError {
    InvalidExpression,
    InvalidAssignment,
    InvalidIdentifier,
    UnknownVariable,
    DivisionByZero,
}

impl fmt::Display for CalcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            CalcError::InvalidExpression => "Invalid expression",
            CalcError::InvalidAssignment => "Invalid assignment",
            CalcError::InvalidIdentifier => "Invalid identifier",
            CalcError::UnknownVariable => "Unknown variable",
            CalcError::DivisionByZero => "Division by zero",
        };
        write!(f, "{}", message)
    }
}
impl std::error::Error for CalcError {}
