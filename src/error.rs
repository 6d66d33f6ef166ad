use thiserror::Error;

/// Errors produced while parsing a markdown document.
///
/// Malformed block structure never errors (it falls back to a paragraph);
/// the only user-input error the parser surfaces is an inline formatting
/// marker that is opened but never closed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("no closing delimiter for `{0}`")]
    UnterminatedDelimiter(String),
}

/// Errors produced while generating site pages.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("no level-1 heading to use as the page title")]
    MissingTitle,
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
