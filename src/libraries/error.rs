//! PPM engine errors

use core::fmt;

use crate::platform::PlatformError;

/// Errors reported by the PPM generator and reader
///
/// Invalid channel indices and pulses beyond the reader capacity are not
/// errors; they are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PpmError {
    /// Channel table already claimed by another generator
    ResourceExhausted,
    /// Platform collaborator failed
    Platform(PlatformError),
    /// Edge dispatcher has no room for another decoder
    ListenerCapacity,
    /// Decoder was never attached to a line
    NotAttached,
}

impl From<PlatformError> for PpmError {
    fn from(err: PlatformError) -> Self {
        PpmError::Platform(err)
    }
}

impl fmt::Display for PpmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PpmError::ResourceExhausted => write!(f, "Channel table already claimed"),
            PpmError::Platform(e) => write!(f, "Platform error: {}", e),
            PpmError::ListenerCapacity => write!(f, "No room for another listener"),
            PpmError::NotAttached => write!(f, "Decoder not attached"),
        }
    }
}
