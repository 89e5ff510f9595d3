use std::fmt::Display;

#[derive(Debug, Clone, PartialEq)]
pub enum ListAggError {
    /// Construction requested with an argument count outside [1, 2].
    ArgumentCount { got: usize },
    /// Argument at `index` has an unsupported category: a non-primitive value
    /// argument, a non-integer order argument, or a row value that does not
    /// match its declared descriptor.
    ArgumentType { index: usize, expected: &'static str, got: String },
    /// `init` given descriptors inconsistent with the requested mode.
    Configuration(String),
    /// A lifecycle operation invoked in a mode that does not support it,
    /// before `init`, or with a row shape the resolved arity does not allow.
    Protocol(String),
    /// A merged partial result does not conform to the codec shape.
    Decode(String),
}

impl ListAggError {
    pub fn err<T>(self) -> Result<T, ListAggError> {
        Err(self)
    }
}

impl Display for ListAggError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListAggError::ArgumentCount { got } =>
                write!(f, "one or two arguments are expected, got {got}"),
            ListAggError::ArgumentType { index, expected, got } =>
                write!(f, "argument {index}: expected {expected}, got {got}"),
            ListAggError::Configuration(msg) =>
                write!(f, "invalid evaluator configuration: {msg}"),
            ListAggError::Protocol(msg) =>
                write!(f, "protocol violation: {msg}"),
            ListAggError::Decode(msg) =>
                write!(f, "malformed partial result: {msg}"),
        }
    }
}

impl std::error::Error for ListAggError {}
