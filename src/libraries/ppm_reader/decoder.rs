//! Single-line PPM frame decoder

use rc_ppm_core::traits::TimeSource;
use rc_ppm_core::{EdgeOutcome, FrameCollector, ReaderConfig, SynchroClients};

use crate::libraries::error::PpmError;
use crate::libraries::synchro::SynchroClientRegistry;
use crate::platform::traits::{EdgeCapture, InputLine};
use crate::runtime::{CsState, SharedState};
use crate::{log_debug, log_info};

#[derive(Debug)]
struct DecoderState {
    line: Option<InputLine>,
    listening: bool,
    collector: FrameCollector,
}

/// PPM decoder bound to one input line
///
/// Edge handling runs in interrupt context through
/// [`PpmFrameDecoder::on_falling_edge`]; every getter takes a short critical
/// section, so values are never read half-updated.
///
/// # Example
///
/// ```
/// use rc_ppm::{PpmFrameDecoder, ReaderConfig};
///
/// static PPM_IN: PpmFrameDecoder = PpmFrameDecoder::new(ReaderConfig::DEFAULT);
/// assert_eq!(PPM_IN.detected_channel_nb(), 0);
/// ```
pub struct PpmFrameDecoder {
    state: CsState<DecoderState>,
    synchro: SynchroClientRegistry,
}

impl PpmFrameDecoder {
    /// Detached decoder
    pub const fn new(config: ReaderConfig) -> Self {
        Self {
            state: CsState::new(DecoderState {
                line: None,
                listening: false,
                collector: FrameCollector::new(config),
            }),
            synchro: SynchroClientRegistry::new(),
        }
    }

    /// Register `line` with the capture source and start listening
    ///
    /// Resets every width to neutral. Attaching again moves the decoder to
    /// the new line and gives the slot of the old one back.
    ///
    /// # Errors
    ///
    /// Returns `PpmError::Platform` if the capture source has no slot for
    /// `line`. The decoder is then left detached.
    pub fn attach<C: EdgeCapture>(&self, capture: &mut C, line: InputLine) -> Result<(), PpmError> {
        if let Some(previous) = self.line().filter(|&p| p != line) {
            capture.disable_line(previous);
            capture.release_line(previous);
            self.state.with_mut(|state| {
                state.line = None;
                state.listening = false;
            });
        }
        capture.register_line(line)?;
        self.state.with_mut(|state| {
            state.line = Some(line);
            state.listening = true;
            state.collector.reset();
        });
        self.synchro.clear();
        capture.enable_line(line);
        log_info!("PPM reader attached to line {}", line);
        Ok(())
    }

    /// Falling-edge handler
    ///
    /// Edges of other lines are ignored, as are edges while suspended.
    /// Returns the classification, or `None` if the edge was not for this
    /// decoder.
    pub fn on_falling_edge(&self, line: InputLine, timestamp_us: u16) -> Option<EdgeOutcome> {
        let outcome = self.state.with_mut(|state| {
            if state.listening && state.line == Some(line) {
                Some(state.collector.on_falling_edge(timestamp_us))
            } else {
                None
            }
        });
        if outcome == Some(EdgeOutcome::Synchro) {
            self.synchro.signal();
        }
        outcome
    }

    /// Line the decoder is attached to
    pub fn line(&self) -> Option<InputLine> {
        self.state.with(|state| state.line)
    }

    /// Whether edges are being processed
    pub fn is_listening(&self) -> bool {
        self.state.with(|state| state.listening)
    }

    /// Channels in the last complete frame (0 until one was seen)
    pub fn detected_channel_nb(&self) -> u8 {
        self.state.with(|state| state.collector.detected_channel_count())
    }

    /// Width of `channel` (1-based) in µs, or 0 if not in the last frame
    pub fn width_us(&self, channel: u8) -> u16 {
        self.state.with(|state| state.collector.width_us(channel))
    }

    /// Time between the last two synchro gaps in µs (0 until measured)
    pub fn ppm_period_us(&self) -> u16 {
        self.state.with(|state| state.collector.period_us())
    }

    /// Pending "new frame" clients among `clients` (cleared on read)
    pub fn poll_synchro(&self, clients: SynchroClients) -> SynchroClients {
        self.synchro.poll_and_clear(clients)
    }

    /// Whether a frame completed since `clients` last asked
    pub fn is_synchro(&self, clients: SynchroClients) -> bool {
        self.synchro.is_synchro(clients)
    }

    /// Stop listening; the frame in progress is discarded
    ///
    /// # Errors
    ///
    /// Returns `PpmError::NotAttached` if the decoder has no line.
    pub fn suspend<C: EdgeCapture>(&self, capture: &mut C) -> Result<(), PpmError> {
        let line = self.line().ok_or(PpmError::NotAttached)?;
        capture.disable_line(line);
        self.state.with_mut(|state| {
            state.listening = false;
            state.collector.invalidate();
        });
        log_debug!("PPM reader on line {} suspended", line);
        Ok(())
    }

    /// Listen again after [`Self::suspend`]
    ///
    /// The previous edge time is re-primed to "now", so the gap spent
    /// suspended is not measured as a channel. Does nothing while the
    /// decoder is already listening.
    ///
    /// # Errors
    ///
    /// Returns `PpmError::NotAttached` if the decoder has no line.
    pub fn resume<C: EdgeCapture, S: TimeSource>(
        &self,
        capture: &mut C,
        time: &S,
    ) -> Result<(), PpmError> {
        let line = self.line().ok_or(PpmError::NotAttached)?;
        let now = time.edge_timestamp_us();
        let resumed = self.state.with_mut(|state| {
            if state.listening {
                return false;
            }
            state.collector.prime(now);
            state.listening = true;
            true
        });
        if !resumed {
            return Ok(());
        }
        capture.enable_line(line);
        log_debug!("PPM reader on line {} resumed", line);
        Ok(())
    }
}

impl Default for PpmFrameDecoder {
    fn default() -> Self {
        Self::new(ReaderConfig::DEFAULT)
    }
}
