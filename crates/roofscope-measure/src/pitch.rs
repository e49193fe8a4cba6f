//! The fixed pitch table: rise/run keys mapped to area multipliers.

use serde::{Deserialize, Serialize};

use crate::{MeasureError, Result};

/// Roof pitch, expressed as rise over a 12-unit run.
///
/// The table is a fixed ordered enumeration from [`Pitch::Flat`] (×1.00)
/// through [`Pitch::Steep`] (×1.50); multipliers increase monotonically
/// with slope. Serialized as the rise/run key string (e.g. `"6/12"`).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum Pitch {
    /// No slope, multiplier 1.00.
    #[default]
    #[serde(rename = "flat")]
    Flat,
    /// 1/12 rise.
    #[serde(rename = "1/12")]
    Rise1,
    /// 2/12 rise.
    #[serde(rename = "2/12")]
    Rise2,
    /// 3/12 rise.
    #[serde(rename = "3/12")]
    Rise3,
    /// 4/12 rise.
    #[serde(rename = "4/12")]
    Rise4,
    /// 5/12 rise.
    #[serde(rename = "5/12")]
    Rise5,
    /// 6/12 rise.
    #[serde(rename = "6/12")]
    Rise6,
    /// 7/12 rise.
    #[serde(rename = "7/12")]
    Rise7,
    /// 8/12 rise.
    #[serde(rename = "8/12")]
    Rise8,
    /// 9/12 rise.
    #[serde(rename = "9/12")]
    Rise9,
    /// 10/12 rise.
    #[serde(rename = "10/12")]
    Rise10,
    /// 11/12 rise.
    #[serde(rename = "11/12")]
    Rise11,
    /// Steeper than 11/12, multiplier 1.50.
    #[serde(rename = "steep")]
    Steep,
}

impl Pitch {
    /// All pitches in slope order, flat first.
    pub const ALL: [Pitch; 13] = [
        Pitch::Flat,
        Pitch::Rise1,
        Pitch::Rise2,
        Pitch::Rise3,
        Pitch::Rise4,
        Pitch::Rise5,
        Pitch::Rise6,
        Pitch::Rise7,
        Pitch::Rise8,
        Pitch::Rise9,
        Pitch::Rise10,
        Pitch::Rise11,
        Pitch::Steep,
    ];

    /// The key string used in documents and UI (e.g. `"6/12"`).
    pub fn key(self) -> &'static str {
        match self {
            Pitch::Flat => "flat",
            Pitch::Rise1 => "1/12",
            Pitch::Rise2 => "2/12",
            Pitch::Rise3 => "3/12",
            Pitch::Rise4 => "4/12",
            Pitch::Rise5 => "5/12",
            Pitch::Rise6 => "6/12",
            Pitch::Rise7 => "7/12",
            Pitch::Rise8 => "8/12",
            Pitch::Rise9 => "9/12",
            Pitch::Rise10 => "10/12",
            Pitch::Rise11 => "11/12",
            Pitch::Steep => "steep",
        }
    }

    /// Parse a pitch from its key string.
    ///
    /// # Errors
    ///
    /// Returns [`MeasureError::InvalidPitchKey`] for any key not in the
    /// table. Never falls back to flat.
    pub fn from_key(key: &str) -> Result<Self> {
        Pitch::ALL
            .into_iter()
            .find(|p| p.key() == key)
            .ok_or_else(|| MeasureError::InvalidPitchKey(key.to_string()))
    }

    /// Area multiplier for this pitch: true sloped surface area is
    /// flat area times this factor.
    pub fn multiplier(self) -> f64 {
        match self {
            Pitch::Flat => 1.00,
            Pitch::Rise1 => 1.01,
            Pitch::Rise2 => 1.02,
            Pitch::Rise3 => 1.03,
            Pitch::Rise4 => 1.05,
            Pitch::Rise5 => 1.08,
            Pitch::Rise6 => 1.12,
            Pitch::Rise7 => 1.16,
            Pitch::Rise8 => 1.20,
            Pitch::Rise9 => 1.25,
            Pitch::Rise10 => 1.30,
            Pitch::Rise11 => 1.36,
            Pitch::Steep => 1.50,
        }
    }
}

impl std::fmt::Display for Pitch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}
