use std::fmt;

use crate::host::TextField;
use crate::selector::ImageId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchError {
    /// The resource service could not materialize the image.
    ResourceUnavailable { image: ImageId },
    /// The build-time image table cannot drive a display.
    InvalidConfiguration(&'static str),
    /// A formatted string did not fit its fixed buffer.
    TextOverflow { field: TextField, capacity: usize },
}

impl fmt::Display for WatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WatchError::ResourceUnavailable { image } => {
                write!(f, "image resource {} is unavailable", image)
            }
            WatchError::InvalidConfiguration(reason) => {
                write!(f, "invalid image configuration: {}", reason)
            }
            WatchError::TextOverflow { field, capacity } => {
                write!(f, "{:?} text does not fit in {} bytes", field, capacity)
            }
        }
    }
}

impl std::error::Error for WatchError {}
