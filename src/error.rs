//! Error types for wrapping and text changes

/// Errors raised while laying out rows
#[derive(Debug, Clone, PartialEq)]
pub enum WrapError {
    /// The viewport budget cannot fit both continuation markers plus one character
    InvalidWidth { width: f32, max_characters: usize },
}

impl std::fmt::Display for WrapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidWidth {
                width,
                max_characters,
            } => write!(
                f,
                "invalid width provided ({} px fits {} characters)",
                width, max_characters
            ),
        }
    }
}

impl std::error::Error for WrapError {}

/// Errors raised while building or applying document edits
#[derive(Debug, Clone, PartialEq)]
pub enum EditError {
    /// Replace-all was asked for a non-literal pattern
    UnsupportedPattern(String),
    /// Re-wrapping after the edit failed
    Wrap(WrapError),
}

impl std::fmt::Display for EditError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedPattern(pattern) => {
                write!(f, "replace all only supports plain strings, got /{}/", pattern)
            }
            Self::Wrap(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for EditError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Wrap(e) => Some(e),
            Self::UnsupportedPattern(_) => None,
        }
    }
}

impl From<WrapError> for EditError {
    fn from(e: WrapError) -> Self {
        Self::Wrap(e)
    }
}
