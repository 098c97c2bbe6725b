//! Reader and printer configuration.
//!
//! A [`NumberConfig`] can be passed explicitly to the `*_with` entry points.
//! The plain entry points read the process-wide configuration, which is
//! changed only through [`set_real_precision`] and [`set_accept_underscores`].

use std::sync::{PoisonError, RwLock};

use log::debug;

use crate::error::{Error, Result};

/// Largest accepted printing precision for inexact reals.
pub const MAX_REAL_PRECISION: u8 = 50;

/// Default printing precision for inexact reals.
pub const DEFAULT_REAL_PRECISION: u8 = 15;

/// Settings that affect how numeric literals are read and printed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NumberConfig {
    /// Significant digits used when printing inexact reals, in `1..=50`.
    pub real_precision: u8,

    /// Whether `_` digit separators are accepted by the reader.
    pub accept_underscores: bool,
}

impl Default for NumberConfig {
    fn default() -> Self {
        Self {
            real_precision: DEFAULT_REAL_PRECISION,
            accept_underscores: true,
        }
    }
}

impl NumberConfig {
    /// Creates a configuration with round-trip precision for doubles.
    #[must_use]
    pub fn round_trip() -> Self {
        Self {
            real_precision: 17,
            ..Self::default()
        }
    }

    /// Creates a configuration that rejects digit separators.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            accept_underscores: false,
            ..Self::default()
        }
    }

    /// Builder method to set the printing precision.
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` unless `0 < precision <= 50`.
    pub fn with_real_precision(mut self, precision: u8) -> Result<Self> {
        check_precision(precision)?;
        self.real_precision = precision;
        Ok(self)
    }

    /// Builder method to toggle digit separators.
    #[must_use]
    pub fn with_accept_underscores(mut self, accept: bool) -> Self {
        self.accept_underscores = accept;
        self
    }
}

fn check_precision(precision: u8) -> Result<()> {
    if precision == 0 || precision > MAX_REAL_PRECISION {
        return Err(Error::out_of_range(format!(
            "real precision must be in 1..={MAX_REAL_PRECISION}, got {precision}"
        )));
    }
    Ok(())
}

// =============================================================================
// Process-wide configuration
// =============================================================================

static CURRENT: RwLock<NumberConfig> = RwLock::new(NumberConfig {
    real_precision: DEFAULT_REAL_PRECISION,
    accept_underscores: true,
});

/// Returns a snapshot of the process-wide configuration.
#[must_use]
pub fn current() -> NumberConfig {
    *CURRENT.read().unwrap_or_else(PoisonError::into_inner)
}

/// Sets the process-wide printing precision and returns the previous one.
///
/// # Errors
///
/// Returns `OutOfRange` unless `0 < precision <= 50`; the setting is left
/// unchanged in that case.
pub fn set_real_precision(precision: u8) -> Result<u8> {
    check_precision(precision)?;
    let mut config = CURRENT.write().unwrap_or_else(PoisonError::into_inner);
    let previous = config.real_precision;
    config.real_precision = precision;
    debug!("real precision changed from {previous} to {precision}");
    Ok(previous)
}

/// Toggles process-wide acceptance of `_` separators; returns the previous value.
pub fn set_accept_underscores(accept: bool) -> bool {
    let mut config = CURRENT.write().unwrap_or_else(PoisonError::into_inner);
    let previous = config.accept_underscores;
    config.accept_underscores = accept;
    debug!("underscore separators accepted: {accept}");
    previous
}
