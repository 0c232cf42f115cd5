//! Generator and reader parameter blocks
//!
//! Out-of-range values are never rejected; [`GeneratorConfig::normalized`]
//! clamps them into the supported envelope.

/// Maximum number of channels in a generated frame
pub const MAX_CHANNELS: u8 = 8;

/// Shortest supported frame period (µs)
pub const MIN_FRAME_PERIOD_US: u16 = 10_000;

/// Longest supported frame period (µs)
pub const MAX_FRAME_PERIOD_US: u16 = 40_000;

/// Default frame period (µs)
pub const DEFAULT_FRAME_PERIOD_US: u16 = 20_000;

/// Channel header pulse duration (µs)
pub const DEFAULT_HEADER_US: u16 = 300;

/// Neutral channel width (µs)
pub const NEUTRAL_WIDTH_US: u16 = 1500;

/// Shortest inter-edge interval treated as a synchro gap (µs)
pub const SYNCHRO_THRESHOLD_US: u16 = 3000;

/// Modulation polarity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Polarity {
    /// Output idles low, headers are high pulses
    #[default]
    Positive,
    /// Output idles high, headers are low pulses
    Negative,
}

impl Polarity {
    /// Pin level between headers (`true` = high)
    pub const fn idle_level(self) -> bool {
        matches!(self, Polarity::Negative)
    }
}

/// PPM generator parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Modulation polarity
    pub polarity: Polarity,
    /// Channels per frame (1..=8)
    pub channel_count: u8,
    /// Constant frame period in µs (10000..=40000)
    pub frame_period_us: u16,
    /// Header pulse duration in µs
    pub header_us: u16,
    /// Width every channel starts at
    pub neutral_us: u16,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            polarity: Polarity::Positive,
            channel_count: MAX_CHANNELS,
            frame_period_us: DEFAULT_FRAME_PERIOD_US,
            header_us: DEFAULT_HEADER_US,
            neutral_us: NEUTRAL_WIDTH_US,
        }
    }
}

impl GeneratorConfig {
    /// Configuration with the given polarity and channel count, other fields default
    pub fn new(polarity: Polarity, channel_count: u8) -> Self {
        Self {
            polarity,
            channel_count,
            ..Self::default()
        }
    }

    /// Override the frame period
    pub fn with_frame_period_us(mut self, frame_period_us: u16) -> Self {
        self.frame_period_us = frame_period_us;
        self
    }

    /// Clamp channel count and frame period into the supported range
    pub fn normalized(&self) -> Self {
        Self {
            channel_count: self.channel_count.clamp(1, MAX_CHANNELS),
            frame_period_us: self
                .frame_period_us
                .clamp(MIN_FRAME_PERIOD_US, MAX_FRAME_PERIOD_US),
            ..*self
        }
    }

    /// Whether [`Self::normalized`] would change anything
    pub fn is_normalized(&self) -> bool {
        *self == self.normalized()
    }
}

/// PPM reader parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReaderConfig {
    /// Intervals at least this long mark the end of a frame
    pub synchro_threshold_us: u16,
    /// Width reported for every channel before the first frame
    pub neutral_us: u16,
}

impl ReaderConfig {
    /// Default reader parameters (usable in `const` context)
    pub const DEFAULT: Self = Self {
        synchro_threshold_us: SYNCHRO_THRESHOLD_US,
        neutral_us: NEUTRAL_WIDTH_US,
    };
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
