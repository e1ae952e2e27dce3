//! Speed control over the serial channel
//!
//! Each received byte is one command: `+` shortens the period by one step,
//! `-` lengthens it by one step. The period is clamped to the configured
//! bounds; hitting a bound is reported as "limit reached". Any other byte is
//! reported as invalid and changes nothing.

use core::fmt::Write;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use heapless::String;

use crate::StatusSink;
use crate::config::PeriodBounds;
use crate::serial::SerialQueue;
use crate::state::ChaserState;

/// Byte that speeds the chase up
pub const SPEED_UP_BYTE: u8 = b'+';

/// Byte that slows the chase down
pub const SLOW_DOWN_BYTE: u8 = b'-';

/// Maximum length of a single status line
pub const STATUS_LINE_LEN: usize = 64;

/// Recognized speed commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SpeedCommand {
    /// Shorter period
    SpeedUp,
    /// Longer period
    SlowDown,
}

impl SpeedCommand {
    /// Parse a command byte
    pub const fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            SPEED_UP_BYTE => Some(Self::SpeedUp),
            SLOW_DOWN_BYTE => Some(Self::SlowDown),
            _ => None,
        }
    }
}

/// Outcome of a single command byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SpeedStatus {
    /// Period was shortened by one step
    SpedUp { period_ms: i32 },
    /// Period was lengthened by one step
    SlowedDown { period_ms: i32 },
    /// Period is clamped to the minimum
    FastestReached { period_ms: i32 },
    /// Period is clamped to the maximum
    SlowestReached { period_ms: i32 },
    /// Byte is not a command
    Invalid(u8),
}

impl SpeedStatus {
    /// Period after the command, `None` for invalid bytes
    pub const fn period_ms(self) -> Option<i32> {
        match self {
            Self::SpedUp { period_ms }
            | Self::SlowedDown { period_ms }
            | Self::FastestReached { period_ms }
            | Self::SlowestReached { period_ms } => Some(period_ms),
            Self::Invalid(_) => None,
        }
    }

    /// Whether a period bound was hit
    pub const fn is_limit(self) -> bool {
        matches!(
            self,
            Self::FastestReached { .. } | Self::SlowestReached { .. }
        )
    }
}

impl core::fmt::Display for SpeedStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SpeedStatus::SpedUp { period_ms } => write!(f, "speed up: period {period_ms} ms"),
            SpeedStatus::SlowedDown { period_ms } => {
                write!(f, "slow down: period {period_ms} ms")
            }
            SpeedStatus::FastestReached { period_ms } => {
                write!(f, "limit reached: minimum period {period_ms} ms")
            }
            SpeedStatus::SlowestReached { period_ms } => {
                write!(f, "limit reached: maximum period {period_ms} ms")
            }
            SpeedStatus::Invalid(byte) if byte.is_ascii_graphic() => {
                write!(f, "invalid command '{}'", char::from(*byte))
            }
            SpeedStatus::Invalid(byte) => write!(f, "invalid command 0x{byte:02x}"),
        }
    }
}

/// Status sink that drops every line, for boards without an outbound channel
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl StatusSink for NullSink {
    fn write_status(&mut self, _line: &str) {}
}

/// Speed controller
///
/// Sole writer of the shared period. Runs in the serial receive context and
/// never blocks.
#[derive(Debug, Clone, Copy)]
pub struct SpeedController<'a> {
    state: &'a ChaserState,
    bounds: PeriodBounds,
}

impl<'a> SpeedController<'a> {
    pub const fn new(state: &'a ChaserState, bounds: PeriodBounds) -> Self {
        Self { state, bounds }
    }

    pub const fn bounds(&self) -> PeriodBounds {
        self.bounds
    }

    /// Handle one received byte and report the outcome to `sink`
    pub fn on_byte<S: StatusSink>(&self, byte: u8, sink: &mut S) -> SpeedStatus {
        let status = match SpeedCommand::from_byte(byte) {
            Some(command) => self.apply(command),
            None => SpeedStatus::Invalid(byte),
        };

        #[cfg(feature = "esp32-log")]
        println!("[SpeedController.on_byte] {:?}", status);

        let mut line: String<STATUS_LINE_LEN> = String::new();
        if write!(line, "{status}").is_ok() {
            sink.write_status(&line);
        }

        status
    }

    /// Apply a command to the shared period
    pub fn apply(&self, command: SpeedCommand) -> SpeedStatus {
        let current = self.state.period_ms();
        let PeriodBounds {
            min_ms,
            max_ms,
            step_ms,
        } = self.bounds;

        let status = match command {
            SpeedCommand::SpeedUp => {
                let period_ms = current.saturating_sub(step_ms);
                if period_ms <= min_ms {
                    SpeedStatus::FastestReached { period_ms: min_ms }
                } else {
                    SpeedStatus::SpedUp { period_ms }
                }
            }
            SpeedCommand::SlowDown => {
                let period_ms = current.saturating_add(step_ms);
                if period_ms >= max_ms {
                    SpeedStatus::SlowestReached { period_ms: max_ms }
                } else {
                    SpeedStatus::SlowedDown { period_ms }
                }
            }
        };

        if let Some(period_ms) = status.period_ms() {
            if period_ms != current {
                self.state.set_period_ms(period_ms);
            }
        }

        status
    }

    /// Process every byte queued by the receive interrupt
    ///
    /// Returns the number of bytes handled.
    pub fn drain<S: StatusSink, const SIZE: usize>(
        &self,
        queue: &SerialQueue<SIZE>,
        sink: &mut S,
    ) -> usize {
        let mut handled = 0;
        while let Some(byte) = queue.pop() {
            self.on_byte(byte, sink);
            handled += 1;
        }
        handled
    }
}
