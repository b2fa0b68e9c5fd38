// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Brightness type for the LED output.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValueError;

/// Brightness level as a percentage (0-100).
///
/// # Examples
///
/// ```
/// use twinkly_lib::types::Brightness;
///
/// let b = Brightness::new(42).unwrap();
/// assert_eq!(b.value(), 42);
///
/// assert_eq!(Brightness::OFF.value(), 0);
/// assert!(Brightness::new(101).is_err());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct Brightness(u8);

impl Brightness {
    /// Brightness reported for a device whose mode is `off`.
    pub const OFF: Self = Self(0);

    /// Full brightness (100%).
    pub const MAX: Self = Self(100);

    /// Creates a new brightness value.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if value exceeds 100.
    pub fn new(value: u8) -> Result<Self, ValueError> {
        if value > 100 {
            return Err(ValueError::OutOfRange {
                min: 0,
                max: 100,
                actual: u16::from(value),
            });
        }
        Ok(Self(value))
    }

    /// Creates a brightness value from a wide integer, such as the one a
    /// device reports.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if value is negative or exceeds 100.
    pub fn from_i64(value: i64) -> Result<Self, ValueError> {
        u8::try_from(value)
            .ok()
            .filter(|v| *v <= 100)
            .map(Self)
            .ok_or(ValueError::OutOfRange {
                min: 0,
                max: 100,
                actual: u16::try_from(value.clamp(0, i64::from(u16::MAX))).unwrap_or(u16::MAX),
            })
    }

    /// Returns the brightness percentage value.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for Brightness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl TryFrom<u8> for Brightness {
    type Error = ValueError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Brightness> for u8 {
    fn from(value: Brightness) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brightness_bounds() {
        assert_eq!(Brightness::new(0).unwrap(), Brightness::OFF);
        assert_eq!(Brightness::new(100).unwrap(), Brightness::MAX);
        assert!(Brightness::new(101).is_err());
    }

    #[test]
    fn brightness_from_device_value() {
        assert_eq!(Brightness::from_i64(42).unwrap().value(), 42);
        assert!(Brightness::from_i64(-1).is_err());
        assert_eq!(
            Brightness::from_i64(300),
            Err(ValueError::OutOfRange {
                min: 0,
                max: 100,
                actual: 300
            })
        );
    }

    #[test]
    fn brightness_display() {
        assert_eq!(Brightness::new(75).unwrap().to_string(), "75%");
    }

    #[test]
    fn brightness_deserialize_rejects_out_of_range() {
        let ok: Brightness = serde_json::from_str("55").unwrap();
        assert_eq!(ok.value(), 55);
        assert!(serde_json::from_str::<Brightness>("150").is_err());
    }
}
