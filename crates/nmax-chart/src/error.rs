use std::fmt;
use std::path::PathBuf;

use plotters::drawing::DrawingAreaErrorKind;

#[derive(Debug)]
pub enum RenderError {
    Io(std::io::Error),
    /// Drawing or encoding failed inside the plotting backend.
    Backend(String),
    InvalidLayout(String),
    InvalidConfig(String),
    UnsupportedFormat(PathBuf),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::Io(e) => write!(f, "I/O error: {e}"),
            RenderError::Backend(msg) => write!(f, "drawing failed: {msg}"),
            RenderError::InvalidLayout(msg) => write!(f, "invalid layout: {msg}"),
            RenderError::InvalidConfig(msg) => write!(f, "invalid chart config: {msg}"),
            RenderError::UnsupportedFormat(path) => {
                write!(f, "unsupported image format: {} (expected .png)", path.display())
            }
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for RenderError {
    fn from(e: std::io::Error) -> Self {
        RenderError::Io(e)
    }
}

impl<E: std::error::Error + Send + Sync> From<DrawingAreaErrorKind<E>> for RenderError {
    fn from(e: DrawingAreaErrorKind<E>) -> Self {
        RenderError::Backend(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, RenderError>;
