//! Direction control with software debounce
//!
//! A press produces a burst of falling edges while the contacts bounce. The
//! first edge flips the chase direction, disables the edge source and starts
//! a one-shot timer; edges arriving before the timer fires are dropped. When
//! the timer fires the edge source is enabled again.
//!
//! ```text
//!  ARMED --edge--> COOLDOWN --timer--> ARMED
//! ```

#[cfg(feature = "esp32-log")]
use esp_println::println;

use embassy_time::Duration;

use crate::cursor::Direction;
use crate::state::ChaserState;
use crate::{EdgeSource, LineDriver, LineId, OneShotTimer};

/// Debounce state of the direction button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DebouncePhase {
    /// Edge detection is active
    Armed,
    /// Edge detection is disabled until the debounce timer fires
    Cooldown,
}

/// Result of delivering an edge to the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EdgeOutcome {
    /// The edge was accepted and the direction is now the contained one
    Flipped(Direction),
    /// The edge arrived during cooldown and was dropped
    Ignored,
}

/// Direction controller
///
/// Owns the edge source and the debounce timer. The board calls
/// [`Self::on_edge`] from the edge interrupt and [`Self::on_timer_fired`] from
/// the timer callback; both must run to completion and never preempt each
/// other, e.g. by keeping the controller in a `critical_section::Mutex`.
pub struct DirectionController<'a, E: EdgeSource, T: OneShotTimer> {
    state: &'a ChaserState,
    edges: E,
    timer: T,
    debounce: Duration,
}

impl<'a, E: EdgeSource, T: OneShotTimer> DirectionController<'a, E, T> {
    /// Create the controller and enable edge detection
    pub fn new(state: &'a ChaserState, mut edges: E, timer: T, debounce: Duration) -> Self {
        state.set_armed(true);
        edges.enable();
        Self {
            state,
            edges,
            timer,
            debounce,
        }
    }

    /// Current debounce phase
    pub fn phase(&self) -> DebouncePhase {
        if self.state.is_armed() {
            DebouncePhase::Armed
        } else {
            DebouncePhase::Cooldown
        }
    }

    /// Handle a falling edge on the button line
    pub fn on_edge(&mut self) -> EdgeOutcome {
        if !self.state.is_armed() {
            return EdgeOutcome::Ignored;
        }

        // Detection goes off before anything else so a bounce cannot slip in
        // between the flip and the timer.
        self.edges.disable();
        self.state.set_armed(false);
        self.timer.schedule_once(self.debounce);
        let direction = self.state.flip_direction();

        #[cfg(feature = "esp32-log")]
        println!(
            "[DirectionController.on_edge] direction {}, cooldown {} ms",
            direction.as_str(),
            self.debounce.as_millis()
        );

        EdgeOutcome::Flipped(direction)
    }

    /// Handle the debounce timer firing
    ///
    /// Returns `true` if detection was re-armed. A firing while already armed
    /// changes nothing.
    pub fn on_timer_fired(&mut self) -> bool {
        if self.state.is_armed() {
            return false;
        }

        self.state.set_armed(true);
        self.edges.enable();

        #[cfg(feature = "esp32-log")]
        println!("[DirectionController.on_timer_fired] edge detection re-armed");

        true
    }

    pub const fn edges(&self) -> &E {
        &self.edges
    }

    pub const fn timer(&self) -> &T {
        &self.timer
    }

    pub fn timer_mut(&mut self) -> &mut T {
        &mut self.timer
    }
}

/// Button sampled from the chase loop instead of an edge interrupt
///
/// The line is active low with a pull-up. A released to pressed transition
/// counts as one falling edge.
#[derive(Debug, Clone, Copy)]
pub struct PolledButton {
    line: LineId,
    was_pressed: bool,
}

impl PolledButton {
    /// Create a button on `line`, configuring it as a pulled-up input
    pub fn new<D: LineDriver>(line: LineId, driver: &mut D) -> Self {
        driver.configure_input(line);
        Self {
            line,
            was_pressed: false,
        }
    }

    pub const fn line(&self) -> LineId {
        self.line
    }

    /// Sample the line, returning `true` on a falling edge
    pub fn sample<D: LineDriver>(&mut self, driver: &D) -> bool {
        let pressed = !driver.read_line(self.line);
        let edge = pressed && !self.was_pressed;
        self.was_pressed = pressed;
        edge
    }
}
