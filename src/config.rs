//! Build-time configuration of the chaser
//!
//! Everything the chaser needs is fixed when the firmware is built: the ring
//! lines, the button line, the period bounds and the debounce window.

use embassy_time::Duration;

use crate::LineId;

/// Number of LEDs on the reference board
pub const REFERENCE_LED_COUNT: usize = 9;

/// Fixed period of the polled-button firmware
pub const LEGACY_PERIOD_MS: i32 = 250;

/// Inclusive bounds and step of the chase period, in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PeriodBounds {
    pub min_ms: i32,
    pub max_ms: i32,
    pub step_ms: i32,
}

impl PeriodBounds {
    /// Check whether a period lies within the bounds
    pub const fn contains(self, period_ms: i32) -> bool {
        period_ms >= self.min_ms && period_ms <= self.max_ms
    }
}

/// Chaser configuration for a ring of `N` LEDs
#[derive(Debug, Clone, Copy)]
pub struct ChaserConfig<const N: usize> {
    /// Ring lines, in chase order
    pub lines: [LineId; N],
    /// Direction button line (active low)
    pub button: LineId,
    /// Period used until the first speed command
    pub initial_period_ms: i32,
    /// Period bounds and step
    pub bounds: PeriodBounds,
    /// Edge detection is disabled for this long after an accepted press
    pub debounce: Duration,
}

impl ChaserConfig<REFERENCE_LED_COUNT> {
    /// Reference board: nine LEDs on lines 2..=10, button on line 16
    pub const REFERENCE: Self = Self {
        lines: [2, 3, 4, 5, 6, 7, 8, 9, 10],
        button: 16,
        initial_period_ms: 500,
        bounds: PeriodBounds {
            min_ms: 50,
            max_ms: 60_000,
            step_ms: 50,
        },
        debounce: Duration::from_millis(200),
    };

    /// Reference board wired for the polled button loop
    pub const POLLED: Self = Self {
        initial_period_ms: LEGACY_PERIOD_MS,
        ..Self::REFERENCE
    };
}

impl<const N: usize> ChaserConfig<N> {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if N < 2 {
            return Err(ConfigError::TooFewLines);
        }
        for (i, line) in self.lines.iter().enumerate() {
            if self.lines[i + 1..].contains(line) {
                return Err(ConfigError::DuplicateLine(*line));
            }
        }
        if self.lines.contains(&self.button) {
            return Err(ConfigError::ButtonOnRing(self.button));
        }

        let bounds = self.bounds;
        if bounds.step_ms <= 0 {
            return Err(ConfigError::InvalidStep);
        }
        if bounds.min_ms <= 0 || bounds.min_ms > bounds.max_ms {
            return Err(ConfigError::InvalidBounds);
        }
        if !bounds.contains(self.initial_period_ms) {
            return Err(ConfigError::InitialPeriodOutOfBounds);
        }

        Ok(())
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// The ring has fewer than two lines
    TooFewLines,
    /// A line id appears twice in the ring
    DuplicateLine(LineId),
    /// The button line is also a ring line
    ButtonOnRing(LineId),
    /// Step is zero or negative
    InvalidStep,
    /// Minimum is not positive or exceeds maximum
    InvalidBounds,
    /// Initial period is outside the bounds
    InitialPeriodOutOfBounds,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::TooFewLines => write!(f, "ring needs at least two lines"),
            ConfigError::DuplicateLine(line) => write!(f, "line {line} used twice in ring"),
            ConfigError::ButtonOnRing(line) => {
                write!(f, "button line {line} is also a ring line")
            }
            ConfigError::InvalidStep => write!(f, "period step must be positive"),
            ConfigError::InvalidBounds => {
                write!(f, "period minimum must be positive and not above maximum")
            }
            ConfigError::InitialPeriodOutOfBounds => {
                write!(f, "initial period outside period bounds")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_configs_are_valid() {
        assert_eq!(ChaserConfig::REFERENCE.validate(), Ok(()));
        assert_eq!(ChaserConfig::POLLED.validate(), Ok(()));
    }

    #[test]
    fn duplicate_line_is_rejected() {
        let mut config = ChaserConfig::REFERENCE;
        config.lines[4] = 2;
        assert_eq!(config.validate(), Err(ConfigError::DuplicateLine(2)));
    }

    #[test]
    fn button_on_ring_is_rejected() {
        let mut config = ChaserConfig::REFERENCE;
        config.button = 7;
        assert_eq!(config.validate(), Err(ConfigError::ButtonOnRing(7)));
    }

    #[test]
    fn single_line_ring_is_rejected() {
        let reference = ChaserConfig::REFERENCE;
        let config = ChaserConfig {
            lines: [2],
            button: reference.button,
            initial_period_ms: reference.initial_period_ms,
            bounds: reference.bounds,
            debounce: reference.debounce,
        };
        assert_eq!(config.validate(), Err(ConfigError::TooFewLines));
    }

    #[test]
    fn bad_bounds_are_rejected() {
        let mut config = ChaserConfig::REFERENCE;
        config.bounds.step_ms = 0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidStep));

        let mut config = ChaserConfig::REFERENCE;
        config.bounds.min_ms = 70_000;
        assert_eq!(config.validate(), Err(ConfigError::InvalidBounds));

        let mut config = ChaserConfig::REFERENCE;
        config.initial_period_ms = 10;
        assert_eq!(
            config.validate(),
            Err(ConfigError::InitialPeriodOutOfBounds)
        );
    }
}
