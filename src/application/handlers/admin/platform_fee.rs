//! SetPlatformFeeHandler - Adjusts the platform fee at runtime.
//!
//! The new rate applies to payment events processed after the call. Existing
//! transactions keep the split they were recorded with.

use tracing::info;

use crate::domain::admin::{AdminCapability, AdminError};
use crate::domain::monetization::{FeeRate, PlatformFeeSetting};

#[derive(Debug, Clone, Copy)]
pub struct SetPlatformFeeCommand {
    /// Percentage in `0..=100`.
    pub percentage: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct SetPlatformFeeResult {
    pub previous: FeeRate,
    pub current: FeeRate,
}

pub struct SetPlatformFeeHandler {
    fee: PlatformFeeSetting,
}

impl SetPlatformFeeHandler {
    pub fn new(fee: PlatformFeeSetting) -> Self {
        Self { fee }
    }

    pub fn handle(
        &self,
        capability: &AdminCapability,
        cmd: SetPlatformFeeCommand,
    ) -> Result<SetPlatformFeeResult, AdminError> {
        let rate = FeeRate::from_percentage(cmd.percentage)
            .map_err(|_| AdminError::InvalidFeePercentage)?;
        let previous = self.fee.current();
        self.fee.set(rate);

        info!(
            previous_bps = previous.basis_points(),
            current_bps = rate.basis_points(),
            admin = capability.principal(),
            "Platform fee updated"
        );

        Ok(SetPlatformFeeResult {
            previous,
            current: rate,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_is_visible_through_shared_setting() {
        let fee = PlatformFeeSetting::default();
        let handler = SetPlatformFeeHandler::new(fee.clone());

        let result = handler
            .handle(
                &AdminCapability::issue("test-key"),
                SetPlatformFeeCommand { percentage: 12.5 },
            )
            .unwrap();

        assert_eq!(result.previous.basis_points(), 1_500);
        assert_eq!(fee.current().basis_points(), 1_250);
    }

    #[test]
    fn out_of_range_leaves_rate_unchanged() {
        let fee = PlatformFeeSetting::default();
        let handler = SetPlatformFeeHandler::new(fee.clone());
        let admin = AdminCapability::issue("test-key");

        for percentage in [-1.0, 100.5, f64::NAN] {
            let err = handler
                .handle(&admin, SetPlatformFeeCommand { percentage })
                .unwrap_err();
            assert_eq!(err, AdminError::InvalidFeePercentage);
        }
        assert_eq!(fee.current().basis_points(), 1_500);
    }
}
