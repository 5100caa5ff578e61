use serde::Deserialize;

use crate::error::{Error, Result};

/// Smallest bar drawn for a day that has at least one event.
pub const MIN_FILL_FRACTION: f64 = 0.1;
/// Above this share of the threshold a day is overly full.
pub const OVERLY_FULL_RATIO: f64 = 1.0;
/// Above this share of the threshold a day is extremely full.
pub const EXTREMELY_FULL_RATIO: f64 = 1.5;

pub const DEFAULT_FULL_DAY_THRESHOLD: u32 = 10;

/// Number of events that counts as a full day. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "u32")]
pub struct FullDayThreshold(u32);

impl FullDayThreshold {
    pub fn new(events: u32) -> Result<Self> {
        if events == 0 {
            return Err(Error::InvalidThreshold(events));
        }
        Ok(Self(events))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for FullDayThreshold {
    fn default() -> Self {
        Self(DEFAULT_FULL_DAY_THRESHOLD)
    }
}

impl TryFrom<u32> for FullDayThreshold {
    type Error = Error;

    fn try_from(events: u32) -> Result<Self> {
        Self::new(events)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DensityTier {
    Normal,
    OverlyFull,
    ExtremelyFull,
}

impl DensityTier {
    pub fn label(self) -> &'static str {
        match self {
            DensityTier::Normal => "normal",
            DensityTier::OverlyFull => "overly full",
            DensityTier::ExtremelyFull => "extremely full",
        }
    }
}

/// How busy a day looks: bar size in `[0, 1]` plus a tier for colouring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DensityDescriptor {
    /// `event_count / threshold`, unclamped.
    pub percent: f64,
    pub fill_fraction: f64,
    pub tier: DensityTier,
}

pub fn classify(event_count: u32, threshold: FullDayThreshold) -> DensityDescriptor {
    let percent = f64::from(event_count) / f64::from(threshold.get());

    let fill_fraction = if event_count == 0 {
        0.0
    } else {
        (MIN_FILL_FRACTION + (1.0 - MIN_FILL_FRACTION) * percent).min(1.0)
    };

    let tier = if percent <= OVERLY_FULL_RATIO {
        DensityTier::Normal
    } else if percent <= EXTREMELY_FULL_RATIO {
        DensityTier::OverlyFull
    } else {
        DensityTier::ExtremelyFull
    };

    DensityDescriptor {
        percent,
        fill_fraction,
        tier,
    }
}
