#![no_std]

//! Ring chaser core
//!
//! Drives a ring of output lines so that exactly one LED is lit at a time,
//! advances the lit position on a timer and lets two asynchronous inputs
//! change the walk: a debounced push-button flips the direction and serial
//! command bytes change the step period.
//!
//! Hardware is reached only through the collaborator traits below; the board
//! crate implements them on top of its HAL.

pub mod config;
pub mod cursor;
pub mod direction;
pub mod ring;
pub mod scheduler;
pub mod serial;
pub mod speed;
pub mod state;

pub use config::{ChaserConfig, ConfigError, PeriodBounds};
pub use cursor::{ChaseCursor, Direction, Step, next_index};
pub use direction::{DebouncePhase, DirectionController, EdgeOutcome, PolledButton};
pub use ring::LedRing;
pub use scheduler::{ChaseScheduler, PollResult};
pub use serial::{Overflow, SerialQueue};
pub use speed::{NullSink, SpeedCommand, SpeedController, SpeedStatus};
pub use state::ChaserState;

pub use embassy_time::{Duration, Instant};

/// Hardware identifier of a single output or input line
pub type LineId = u8;

/// Abstract line driver
///
/// Implement this trait on top of the board GPIO layer.
/// The driver is assumed to never fail.
pub trait LineDriver {
    /// Configure the given lines as push-pull outputs, initially low
    fn configure_lines(&mut self, ids: &[LineId]);

    /// Configure a line as an input with pull-up
    fn configure_input(&mut self, _id: LineId) {}

    /// Drive a line to the given level
    fn set_line(&mut self, id: LineId, level: bool);

    /// Read the current level of a line
    fn read_line(&self, id: LineId) -> bool;
}

/// Falling-edge event source for the direction button
///
/// The board delivers each accepted edge by calling
/// [`DirectionController::on_edge`] from its interrupt handler.
pub trait EdgeSource {
    /// Start delivering edge events
    fn enable(&mut self);

    /// Stop delivering edge events
    fn disable(&mut self);
}

/// One-shot timer service
///
/// `schedule_once` must fire exactly once after `delay`. The board delivers
/// the firing by calling [`DirectionController::on_timer_fired`]. Scheduled
/// timers are never cancelled.
pub trait OneShotTimer {
    fn schedule_once(&mut self, delay: Duration);
}

/// Outbound half of the serial channel
pub trait StatusSink {
    /// Write one human-readable status line (without line terminator)
    fn write_status(&mut self, line: &str);
}
