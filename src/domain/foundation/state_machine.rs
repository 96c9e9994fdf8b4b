//! Lifecycle status transitions.
//!
//! Payout and transaction statuses declare their edges once; checked moves
//! and terminal detection are derived from them.

use std::fmt;

use super::ValidationError;

/// A status enum with a fixed set of allowed moves.
///
/// ```ignore
/// let next = PayoutStatus::Pending.transition_to(PayoutStatus::Processing)?;
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + fmt::Display + 'static {
    /// Every status, in lifecycle order.
    const ALL: &'static [Self];

    /// The single source of truth for edges.
    fn can_transition_to(&self, target: &Self) -> bool;

    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if self.can_transition_to(&target) {
            return Ok(target);
        }
        Err(ValidationError::invalid_format(
            "status",
            format!("'{}' cannot move to '{}'", self, target),
        ))
    }

    fn successors(&self) -> Vec<Self> {
        Self::ALL
            .iter()
            .copied()
            .filter(|s| self.can_transition_to(s))
            .collect()
    }

    fn is_terminal(&self) -> bool {
        !Self::ALL.iter().any(|s| self.can_transition_to(s))
    }
}
