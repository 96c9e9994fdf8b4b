//! Platform fee rate and gross/fee/net split.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use serde::Serialize;

use crate::domain::foundation::{Money, ValidationError};

/// Basis points in one hundred percent.
const FULL_RATE_BPS: u32 = 10_000;

/// Platform fee applied when nothing else is configured (15%).
pub const DEFAULT_FEE_BPS: u32 = 1_500;

/// Fraction of a gross payment the platform retains, in basis points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct FeeRate(u32);

impl FeeRate {
    /// Creates a rate from basis points (0..=10000).
    pub fn from_basis_points(bps: u32) -> Result<Self, ValidationError> {
        if bps > FULL_RATE_BPS {
            return Err(ValidationError::out_of_range(
                "fee_basis_points",
                0,
                i64::from(FULL_RATE_BPS),
                i64::from(bps),
            ));
        }
        Ok(Self(bps))
    }

    /// Creates a rate from a percentage such as `15` or `12.5`.
    ///
    /// Precision beyond two decimal places is rounded to the nearest basis point.
    pub fn from_percentage(percent: f64) -> Result<Self, ValidationError> {
        if !percent.is_finite() || !(0.0..=100.0).contains(&percent) {
            return Err(ValidationError::out_of_range(
                "fee_percentage",
                0,
                100,
                percent as i64,
            ));
        }
        Ok(Self((percent * 100.0).round() as u32))
    }

    pub fn basis_points(&self) -> u32 {
        self.0
    }

    pub fn as_percentage(&self) -> f64 {
        f64::from(self.0) / 100.0
    }

    /// Fee owed on `gross_minor`, rounded half-up to the minor unit.
    pub fn fee_on(&self, gross_minor: i64) -> i64 {
        let scaled = i128::from(gross_minor) * i128::from(self.0) + i128::from(FULL_RATE_BPS / 2);
        (scaled / i128::from(FULL_RATE_BPS)) as i64
    }
}

impl Default for FeeRate {
    fn default() -> Self {
        Self(DEFAULT_FEE_BPS)
    }
}

/// Gross payment divided into platform fee and coach net.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeeSplit {
    pub gross: Money,
    pub platform_fee: Money,
    pub net: Money,
}

impl FeeSplit {
    /// Splits `gross` at `rate`. `net = gross - platform_fee` always holds.
    pub fn compute(gross: Money, rate: FeeRate) -> Self {
        let fee_minor = rate.fee_on(gross.minor()).clamp(0, gross.minor());
        let currency = gross.currency().clone();
        Self {
            platform_fee: Money::from_minor(fee_minor, currency.clone())
                .unwrap_or_else(|_| Money::zero(currency.clone())),
            net: Money::from_minor(gross.minor() - fee_minor, currency.clone())
                .unwrap_or_else(|_| Money::zero(currency)),
            gross,
        }
    }
}

/// Process-wide, runtime-adjustable platform fee.
///
/// Cloned into every handler that needs it; all clones observe the same value.
/// Read once per payment event.
#[derive(Debug, Clone)]
pub struct PlatformFeeSetting {
    bps: Arc<AtomicU32>,
}

impl PlatformFeeSetting {
    pub fn new(initial: FeeRate) -> Self {
        Self {
            bps: Arc::new(AtomicU32::new(initial.basis_points())),
        }
    }

    pub fn current(&self) -> FeeRate {
        FeeRate(self.bps.load(Ordering::Acquire))
    }

    pub fn set(&self, rate: FeeRate) {
        self.bps.store(rate.basis_points(), Ordering::Release);
    }
}

impl Default for PlatformFeeSetting {
    fn default() -> Self {
        Self::new(FeeRate::default())
    }
}
