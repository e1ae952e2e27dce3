//! State shared between the chase loop and the input handlers
//!
//! Each value has exactly one writer:
//! - direction: the edge handler ([`crate::DirectionController`])
//! - period: the serial handler ([`crate::SpeedController`])
//! - debounce guard: the edge handler disarms, the debounce timer re-arms,
//!   and the two never run for the same press at the same time
//!
//! The chase loop only reads. With one writer per word no lock is needed,
//! but the values must live in atomics so the loop never caches a stale copy.
//! Only `load` and `store` are used, which keeps the crate usable on cores
//! without compare-and-swap.

use core::sync::atomic::{AtomicBool, AtomicI32, Ordering};

use crate::cursor::Direction;

/// Shared chaser state
#[derive(Debug)]
pub struct ChaserState {
    forward: AtomicBool,
    period_ms: AtomicI32,
    edge_armed: AtomicBool,
}

impl ChaserState {
    /// Create the state: forward, armed, with the given period
    pub const fn new(initial_period_ms: i32) -> Self {
        Self {
            forward: AtomicBool::new(true),
            period_ms: AtomicI32::new(initial_period_ms),
            edge_armed: AtomicBool::new(true),
        }
    }

    /// Current chase direction
    pub fn direction(&self) -> Direction {
        if self.forward.load(Ordering::Acquire) {
            Direction::Forward
        } else {
            Direction::Backward
        }
    }

    /// Reverse the chase direction and return the new one
    ///
    /// Must only be called from the single direction writer.
    pub(crate) fn flip_direction(&self) -> Direction {
        let flipped = self.direction().reversed();
        self.forward
            .store(flipped == Direction::Forward, Ordering::Release);
        flipped
    }

    /// Current period in milliseconds
    pub fn period_ms(&self) -> i32 {
        self.period_ms.load(Ordering::Acquire)
    }

    /// Must only be called from the single period writer.
    pub(crate) fn set_period_ms(&self, period_ms: i32) {
        self.period_ms.store(period_ms, Ordering::Release);
    }

    /// Whether edge detection is currently armed
    pub fn is_armed(&self) -> bool {
        self.edge_armed.load(Ordering::Acquire)
    }

    pub(crate) fn set_armed(&self, armed: bool) {
        self.edge_armed.store(armed, Ordering::Release);
    }
}
