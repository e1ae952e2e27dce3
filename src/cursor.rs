//! Chase cursor
//!
//! Walks a lit index around a ring of `len` positions with wraparound in
//! both directions.

/// Chase direction along the ring order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Towards higher ring positions
    #[default]
    Forward,
    /// Towards lower ring positions
    Backward,
}

impl Direction {
    /// The opposite direction
    pub const fn reversed(self) -> Self {
        match self {
            Self::Forward => Self::Backward,
            Self::Backward => Self::Forward,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Forward => "forward",
            Self::Backward => "backward",
        }
    }
}

/// Index of the position after `index` on a ring of `len` positions
///
/// `len` must be non-zero and `index` must be below `len`.
pub const fn next_index(index: usize, len: usize, direction: Direction) -> usize {
    match direction {
        Direction::Forward => {
            if index == len - 1 {
                0
            } else {
                index + 1
            }
        }
        Direction::Backward => {
            if index == 0 {
                len - 1
            } else {
                index - 1
            }
        }
    }
}

/// A single cursor movement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Step {
    /// Position that was lit before the step
    pub previous: usize,
    /// Position lit after the step
    pub next: usize,
}

/// Lit position on the ring
///
/// The direction is not stored here: it is shared with the edge handler
/// through [`crate::ChaserState`] and passed in on every step, so a flip only
/// affects steps taken after it.
#[derive(Debug, Clone, Copy)]
pub struct ChaseCursor {
    index: usize,
    len: usize,
}

impl ChaseCursor {
    /// Create a cursor at position 0 of a ring with `len` positions
    ///
    /// `len` must be non-zero.
    pub const fn new(len: usize) -> Self {
        Self { index: 0, len }
    }

    /// Currently lit position
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Number of ring positions
    pub const fn len(&self) -> usize {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Move one position in `direction`
    pub fn advance(&mut self, direction: Direction) -> Step {
        let previous = self.index;
        self.index = next_index(previous, self.len, direction);
        Step {
            previous,
            next: self.index,
        }
    }

    /// Move back to position 0
    pub fn reset(&mut self) {
        self.index = 0;
    }
}
