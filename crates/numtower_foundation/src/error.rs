//! Error types for numeric operations.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.

use std::fmt;

use thiserror::Error;

/// Result type for numeric operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for numeric operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Records the primitive the error surfaced from.
    ///
    /// An existing context keeps its frames; the primitive is pushed as the
    /// outermost frame.
    #[must_use]
    pub fn in_primitive(mut self, primitive: &'static str) -> Self {
        let context = self.context.take().unwrap_or_default();
        self.context = Some(context.with_frame(primitive));
        self
    }

    /// Creates a bad number error for a non-numeric operand.
    #[must_use]
    pub fn bad_number(value: impl fmt::Display) -> Self {
        Self::new(ErrorKind::BadNumber(value.to_string()))
    }

    /// Creates an error for an operand that must be real.
    #[must_use]
    pub fn not_a_real_number(value: impl fmt::Display) -> Self {
        Self::new(ErrorKind::NotARealNumber(value.to_string()))
    }

    /// Creates an error for an operand that must be an integer.
    #[must_use]
    pub fn not_an_integer(value: impl fmt::Display) -> Self {
        Self::new(ErrorKind::NotAnInteger(value.to_string()))
    }

    /// Creates a division by exact zero error.
    #[must_use]
    pub fn divide_by_zero(dividend: impl fmt::Display) -> Self {
        Self::new(ErrorKind::DivideByZero(dividend.to_string()))
    }

    /// Creates an out of range error.
    #[must_use]
    pub fn out_of_range(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::OutOfRange(message.into()))
    }

    /// Creates an incorrect radix error.
    #[must_use]
    pub fn incorrect_radix(radix: i64, expected: &'static str) -> Self {
        Self::new(ErrorKind::IncorrectRadix { radix, expected })
    }

    /// Creates an error for an operation that has no meaning on its operands.
    ///
    /// The typed operations in this crate never produce it; a host that
    /// dispatches its own dynamically typed values onto them raises it for
    /// operand pairs it cannot route.
    #[must_use]
    pub fn cannot_operate(
        operation: &'static str,
        left: impl fmt::Display,
        right: impl fmt::Display,
    ) -> Self {
        Self::new(ErrorKind::CannotOperate {
            operation,
            left: left.to_string(),
            right: right.to_string(),
        })
    }

    /// Creates an error for a NaN accessor applied to a non-NaN.
    #[must_use]
    pub fn bad_nan(value: impl fmt::Display) -> Self {
        Self::new(ErrorKind::BadNaN(value.to_string()))
    }

    /// Creates an arity mismatch error.
    #[must_use]
    pub fn arity_mismatch(expected: impl Into<String>, actual: usize) -> Self {
        Self::new(ErrorKind::ArityMismatch {
            expected: expected.into(),
            actual,
        })
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    /// An operand was not a number.
    #[error("bad number: {0}")]
    BadNumber(String),

    /// An operand was required to be real.
    #[error("not a real number: {0}")]
    NotARealNumber(String),

    /// An operand was required to be an integer.
    #[error("not an integer: {0}")]
    NotAnInteger(String),

    /// Exact division by zero.
    #[error("cannot divide {0} by 0")]
    DivideByZero(String),

    /// An argument fell outside the domain of the operation.
    #[error("out of range: {0}")]
    OutOfRange(String),

    /// Unsupported radix for reading or printing.
    #[error("incorrect radix {radix}: expected {expected}")]
    IncorrectRadix {
        /// The radix that was requested.
        radix: i64,
        /// Description of the acceptable radices.
        expected: &'static str,
    },

    /// The operation is undefined for this pair of operands.
    ///
    /// Raised by hosts through [`Error::cannot_operate`]; [`Number`]
    /// operands always have a common kind.
    ///
    /// [`Number`]: crate::Number
    #[error("cannot perform {operation} on {left} and {right}")]
    CannotOperate {
        /// The operation name.
        operation: &'static str,
        /// Rendering of the left operand.
        left: String,
        /// Rendering of the right operand.
        right: String,
    },

    /// A NaN accessor was applied to a value that is not a NaN.
    #[error("bad NaN value: {0}")]
    BadNaN(String),

    /// Wrong number of arguments to a variadic primitive.
    #[error("arity mismatch: expected {expected}, got {actual}")]
    ArityMismatch {
        /// Description of expected arity.
        expected: String,
        /// Actual number of arguments.
        actual: usize,
    },
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Primitive call chain, innermost first.
    pub stack: Vec<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a stack frame.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.stack.push(frame.into());
        self
    }

    /// Returns the outermost primitive, if any was recorded.
    #[must_use]
    pub fn primitive(&self) -> Option<&str> {
        self.stack.last().map(String::as_str)
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for frame in &self.stack {
            writeln!(f, "  in {frame}")?;
        }
        Ok(())
    }
}
