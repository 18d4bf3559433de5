use std::fmt;

/// Extraction faults: the archive file could not be read, or the requested
/// line does not exist in it.
#[derive(Debug)]
pub enum ExtractError {
    Io(std::io::Error),
    LineOutOfRange { line_number: usize, lines_read: usize },
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractError::Io(e) => write!(f, "failed to read archive: {}", e),
            ExtractError::LineOutOfRange { line_number, lines_read } => {
                write!(f, "line {} does not exist, archive has {} line(s)", line_number, lines_read)
            }
        }
    }
}

impl std::error::Error for ExtractError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExtractError::Io(e) => Some(e),
            ExtractError::LineOutOfRange { .. } => None,
        }
    }
}

impl From<std::io::Error> for ExtractError {
    fn from(e: std::io::Error) -> Self {
        ExtractError::Io(e)
    }
}

/// Grammar faults in the drive list line or in one of its point strings.
#[derive(Debug, Clone, PartialEq)]
pub enum FormatError {
    /// The structural scanner wanted `expected` at byte offset `at`.
    Syntax { expected: char, at: usize },
    /// A quoted string ran past the end of the line.
    UnterminatedString { at: usize },
    /// Object `index` does not have exactly one field.
    EntryCount { index: usize, found: usize },
    /// Leftover text after the closing `]`.
    TrailingContent { at: usize },
    /// A point string with no `(` between timestamp and position.
    MissingOpenParen { token: String },
    /// A point string whose position is not closed by `)`.
    MissingCloseParen { token: String },
    /// A timestamp prefix not matching `YYYY-MM-DD HH:MM:SS`.
    BadTimestamp { token: String },
    /// A position without exactly two numeric coordinates.
    BadPosition { token: String },
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::Syntax { expected, at } => {
                write!(f, "expected '{}' at byte {}", expected, at)
            }
            FormatError::UnterminatedString { at } => {
                write!(f, "unterminated string starting near byte {}", at)
            }
            FormatError::EntryCount { index, found } => {
                write!(f, "drive object {} has {} fields, expected exactly one", index, found)
            }
            FormatError::TrailingContent { at } => {
                write!(f, "unexpected content after the drive list at byte {}", at)
            }
            FormatError::MissingOpenParen { token } => {
                write!(f, "point \"{}\" has no '(' before its position", token)
            }
            FormatError::MissingCloseParen { token } => {
                write!(f, "point \"{}\" has no closing ')'", token)
            }
            FormatError::BadTimestamp { token } => {
                write!(f, "\"{}\" is not a YYYY-MM-DD HH:MM:SS timestamp", token)
            }
            FormatError::BadPosition { token } => {
                write!(f, "position \"{}\" is not two comma-separated numbers", token)
            }
        }
    }
}

impl std::error::Error for FormatError {}

/// Arithmetic fault: a segment whose endpoints share a timestamp has no
/// defined speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeedError {
    ZeroDuration,
}

impl fmt::Display for SpeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpeedError::ZeroDuration => write!(f, "segment duration is zero, speed is undefined"),
        }
    }
}

impl std::error::Error for SpeedError {}
