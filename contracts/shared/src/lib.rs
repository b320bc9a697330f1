#![no_std]

//! Shared schedule math, fixed-point constants and token collaborator
//! interfaces used by the Harvest farm contracts.

mod schedule;
mod token;

pub use schedule::{bonus_multiplier, validate_schedule, BonusWindow};
pub use token::{AssetTokenClient, AssetTokenInterface, RewardTokenClient, RewardTokenInterface};

// ============================================================================
// Constants
// ============================================================================

/// Fixed-point scale of a pool's accumulated reward per staked unit.
pub const ACC_REWARD_SCALE: i128 = 1_000_000_000_000;

/// Basis points representing 100% (10000 basis points = 100%)
pub const MAX_BASIS_POINTS: u32 = 10_000;

// ============================================================================
// Validation helpers
// ============================================================================

/// Validate that an amount is zero or positive
pub fn validate_non_negative_amount(amount: i128) -> bool {
    amount >= 0
}

/// Validate that a share is within valid range (0-100%)
pub fn validate_basis_points(basis_points: u32) -> bool {
    basis_points <= MAX_BASIS_POINTS
}

/// Apply a basis-point share to an amount, rounding down.
pub fn apply_basis_points(amount: i128, basis_points: u32) -> Option<i128> {
    amount
        .checked_mul(i128::from(basis_points))?
        .checked_div(i128::from(MAX_BASIS_POINTS))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_basis_point_helpers() {
        assert!(validate_basis_points(0));
        assert!(validate_basis_points(MAX_BASIS_POINTS));
        assert!(!validate_basis_points(MAX_BASIS_POINTS + 1));

        assert_eq!(apply_basis_points(1_000, 1_000), Some(100));
        assert_eq!(apply_basis_points(999, 1), Some(0));
        assert_eq!(apply_basis_points(i128::MAX, 2), None);
    }

    #[test]
    fn test_amount_helpers() {
        assert!(validate_non_negative_amount(0));
        assert!(!validate_non_negative_amount(-1));
    }
}
