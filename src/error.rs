//! Analysis-surface errors.
//!
//! Interactive editing never produces hard failures: interior algorithms
//! degrade to safe defaults. The only recognized errors are the handful of
//! "nothing to analyze" conditions surfaced to the user, and their `Display`
//! output is exactly the text the editor shows in place of a table or
//! expression.

use std::fmt;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LogicError {
    /// The typed expression failed structural validation.
    InvalidExpression,
    /// The typed expression contains no variables.
    NoVariables,
    /// The circuit has no Input gates.
    NoInputGates,
    /// No Input gate has a path to any Output gate.
    NoConnectedInputs,
    /// The circuit has no Output gates.
    NoOutputGates,
}

impl fmt::Display for LogicError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogicError::InvalidExpression => "Invalid expression",
            LogicError::NoVariables => "No variables found in expression",
            LogicError::NoInputGates => "No input gates found in circuit",
            LogicError::NoConnectedInputs => "No inputs connected to outputs",
            LogicError::NoOutputGates => "No output gates in circuit",
        };
        write!(f, "{}", s)
    }
}

impl std::error::Error for LogicError {}
