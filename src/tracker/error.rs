use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum TrackerError {
    /// The host has no location capability at all.
    LocationUnsupported,
}

impl fmt::Display for TrackerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackerError::LocationUnsupported => {
                write!(f, "location tracking is not supported on this platform")
            }
        }
    }
}

impl std::error::Error for TrackerError {}
