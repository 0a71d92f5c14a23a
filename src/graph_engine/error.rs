use thiserror::Error;

/// The equation or command could not be understood. The carried text is the
/// fragment the parser was looking at when it gave up.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("the equation appears to be incorrectly formatted: could not read {0:?}")]
    UnrecognizedToken(String),
    #[error("the equation appears to be incorrectly formatted: {0:?} does not start with a known function")]
    MismatchedFunction(String),
    #[error("the equation appears to be incorrectly formatted: too many nested parentheses")]
    TooManyParens,
    #[error("the equation appears to be incorrectly formatted: it is nested too deeply to read")]
    RecursionLimit,
    #[error("zoom arguments were not in the format \"z n\" where n is a number or a decimal: got {0:?}")]
    BadZoomArgument(String),
    #[error("{0} pan arguments were not in the format \"{0} n\" where n is a positive or negative whole number: got {1:?}")]
    BadPanArgument(char, String),
    #[error("{0:?} is not an equation or a command; pan with \"x n\" or \"y n\", zoom with \"z n\"")]
    UnknownCommand(String),
}

/// The requested character grid cannot be laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("could not draw the graph: the dimensions are flipped (left {left}, right {right}, bottom {bottom}, top {top})")]
pub struct DimensionError {
    pub left: i32,
    pub right: i32,
    pub bottom: i32,
    pub top: i32,
}
