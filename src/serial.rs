//! Serial receive queue for poll-driven boards
//!
//! The UART receive interrupt pushes bytes, the chase loop drains them through
//! [`crate::SpeedController::drain`]. Built on `critical-section` and
//! `heapless::Deque`, so it is safe to share between interrupt and thread
//! context.

use core::cell::RefCell;
use core::sync::atomic::{AtomicU32, Ordering};

use critical_section::Mutex;
use heapless::Deque;

#[cfg(feature = "esp32-log")]
use esp_println::println;

/// Error returned when a byte arrives while the queue is full
///
/// Carries the dropped byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Overflow(pub u8);

/// Bounded queue of received bytes
pub struct SerialQueue<const SIZE: usize> {
    inner: Mutex<RefCell<Deque<u8, SIZE>>>,
    dropped: AtomicU32,
}

impl<const SIZE: usize> SerialQueue<SIZE> {
    /// Create an empty queue
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Deque::new())),
            dropped: AtomicU32::new(0),
        }
    }

    /// Queue a received byte
    ///
    /// Never blocks. A full queue drops the byte and counts it.
    pub fn push(&self, byte: u8) -> Result<(), Overflow> {
        let result = critical_section::with(|cs| {
            let mut queue = self.inner.borrow(cs).borrow_mut();
            queue.push_back(byte).map_err(Overflow)
        });

        if result.is_err() {
            // Single writer (the receive interrupt), so load + store is enough.
            let dropped = self.dropped.load(Ordering::Relaxed);
            self.dropped
                .store(dropped.wrapping_add(1), Ordering::Relaxed);

            #[cfg(feature = "esp32-log")]
            println!("[SerialQueue.push] queue full, dropped 0x{:02x}", byte);
        }

        result
    }

    /// Take the oldest queued byte
    pub fn pop(&self) -> Option<u8> {
        critical_section::with(|cs| self.inner.borrow(cs).borrow_mut().pop_front())
    }

    /// Number of queued bytes
    pub fn len(&self) -> usize {
        critical_section::with(|cs| self.inner.borrow(cs).borrow().len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of bytes dropped because the queue was full
    pub fn dropped(&self) -> u32 {
        self.dropped.load(Ordering::Relaxed)
    }
}

impl<const SIZE: usize> Default for SerialQueue<SIZE> {
    fn default() -> Self {
        Self::new()
    }
}
