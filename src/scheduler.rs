//! Chase loop
//!
//! Lights position 0, waits one period, then forever turns the lit LED off,
//! moves the cursor in the current direction, turns the new LED on and waits
//! the current period. Direction and period are re-read from the shared state
//! on every step, so input changes show up at the next step boundary.
//!
//! Three ways to drive it:
//! - [`ChaseScheduler::run`] on an async executor
//! - [`ChaseScheduler::run_blocking`] in a bare super-loop
//! - [`ChaseScheduler::poll`] when the caller owns timing

use embassy_time::{Duration, Instant, Timer};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::cursor::{ChaseCursor, Step};
use crate::direction::{DirectionController, EdgeOutcome, PolledButton};
use crate::ring::LedRing;
use crate::state::ChaserState;
use crate::{EdgeSource, LineDriver, OneShotTimer};

/// Result of a [`ChaseScheduler::poll`] call
#[derive(Debug, Clone, Copy)]
pub struct PollResult {
    /// The step taken by this call, if any
    pub step: Option<Step>,
    /// When the next step is due
    pub next_deadline: Instant,
    /// How long to wait until the next step (zero if already due)
    pub sleep_duration: Duration,
}

/// Chase scheduler
pub struct ChaseScheduler<'a, D: LineDriver, const N: usize> {
    ring: LedRing<D, N>,
    cursor: ChaseCursor,
    state: &'a ChaserState,
    next_step: Option<Instant>,
}

impl<'a, D: LineDriver, const N: usize> ChaseScheduler<'a, D, N> {
    pub const fn new(ring: LedRing<D, N>, state: &'a ChaserState) -> Self {
        Self {
            ring,
            cursor: ChaseCursor::new(N),
            state,
            next_step: None,
        }
    }

    /// Light position 0 with every other LED off
    ///
    /// Returns the period to wait before the first step.
    pub fn start(&mut self) -> Duration {
        self.ring.clear();
        self.cursor.reset();
        self.ring.set(self.cursor.index(), true);

        #[cfg(feature = "esp32-log")]
        println!(
            "[ChaseScheduler.start] {} LEDs, period {} ms",
            N,
            self.state.period_ms()
        );

        self.period()
    }

    /// Move the lit LED one position
    ///
    /// The previous LED goes off before the next one comes on, so two LEDs
    /// are never lit at once.
    pub fn step(&mut self) -> Step {
        let direction = self.state.direction();
        self.ring.set(self.cursor.index(), false);
        let step = self.cursor.advance(direction);
        self.ring.set(step.next, true);
        step
    }

    /// Sample a polled button, deliver a press to `controller`, then step
    pub fn step_polled<E, T>(
        &mut self,
        button: &mut PolledButton,
        controller: &mut DirectionController<'_, E, T>,
    ) -> (Step, EdgeOutcome)
    where
        E: EdgeSource,
        T: OneShotTimer,
    {
        let outcome = if button.sample(self.ring.driver()) {
            controller.on_edge()
        } else {
            EdgeOutcome::Ignored
        };
        (self.step(), outcome)
    }

    /// Deadline-driven step
    ///
    /// The first call starts the chase. Later calls step once the previous
    /// deadline has passed; the next deadline is one current period from `now`.
    pub fn poll(&mut self, now: Instant) -> PollResult {
        let (step, next_deadline) = match self.next_step {
            None => {
                let period = self.start();
                (None, now + period)
            }
            Some(deadline) if now >= deadline => {
                let step = self.step();
                (Some(step), now + self.period())
            }
            Some(deadline) => (None, deadline),
        };
        self.next_step = Some(next_deadline);

        PollResult {
            step,
            next_deadline,
            sleep_duration: next_deadline.saturating_duration_since(now),
        }
    }

    /// Run the chase forever on an async executor
    pub async fn run(&mut self) -> ! {
        let mut period = self.start();
        loop {
            Timer::after(period).await;
            self.step();
            period = self.period();
        }
    }

    /// Run the chase forever, busy-waiting between steps
    pub fn run_blocking(&mut self) -> ! {
        let mut period = self.start();
        loop {
            embassy_time::block_for(period);
            self.step();
            period = self.period();
        }
    }

    /// Current step period
    pub fn period(&self) -> Duration {
        Duration::from_millis(u64::from(self.state.period_ms().unsigned_abs()))
    }

    /// Currently lit ring position
    pub const fn lit(&self) -> usize {
        self.cursor.index()
    }

    pub const fn ring(&self) -> &LedRing<D, N> {
        &self.ring
    }

    pub fn ring_mut(&mut self) -> &mut LedRing<D, N> {
        &mut self.ring
    }

    pub const fn state(&self) -> &'a ChaserState {
        self.state
    }
}
