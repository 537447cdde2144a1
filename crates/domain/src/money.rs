// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Fixed-point money.
//!
//! All monetary values are integer minor units (cents). Floating point is
//! never used for money anywhere in the system. Where rounding is required
//! (multipliers, deposit splits) the rounding mode is banker's rounding
//! (round half to even), and any residual goes to the balance so that the
//! parts always sum exactly to the total.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};

/// A monetary amount in integer minor units.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// The zero amount.
    pub const ZERO: Self = Self(0);

    /// Creates an amount from integer minor units.
    #[must_use]
    pub const fn from_minor_units(minor_units: i64) -> Self {
        Self(minor_units)
    }

    /// Returns the amount in integer minor units.
    #[must_use]
    pub const fn minor_units(self) -> i64 {
        self.0
    }

    /// Adds two amounts.
    ///
    /// # Errors
    ///
    /// Returns an error on overflow.
    pub fn checked_add(self, other: Self) -> Result<Self, DomainError> {
        self.0
            .checked_add(other.0)
            .map(Self)
            .ok_or_else(|| DomainError::MoneyArithmeticOverflow {
                operation: String::from("adding amounts"),
            })
    }

    /// Subtracts another amount from this one.
    ///
    /// # Errors
    ///
    /// Returns an error on overflow.
    pub fn checked_sub(self, other: Self) -> Result<Self, DomainError> {
        self.0
            .checked_sub(other.0)
            .map(Self)
            .ok_or_else(|| DomainError::MoneyArithmeticOverflow {
                operation: String::from("subtracting amounts"),
            })
    }

    /// Multiplies this amount by an integer scalar.
    ///
    /// # Errors
    ///
    /// Returns an error on overflow.
    pub fn checked_mul(self, scalar: u32) -> Result<Self, DomainError> {
        self.0
            .checked_mul(i64::from(scalar))
            .map(Self)
            .ok_or_else(|| DomainError::MoneyArithmeticOverflow {
                operation: String::from("scaling an amount"),
            })
    }

    /// Multiplies by `numerator / denominator` with banker's rounding.
    ///
    /// Used for per-hour amounts over fractional hours and for
    /// basis-point multipliers.
    ///
    /// # Errors
    ///
    /// Returns an error if the denominator is zero or the result does not
    /// fit in the fixed-point range.
    pub fn mul_div_round(self, numerator: i64, denominator: i64) -> Result<Self, DomainError> {
        if denominator == 0 {
            return Err(DomainError::MoneyArithmeticOverflow {
                operation: String::from("dividing by zero"),
            });
        }
        let rounded = round_half_even(
            i128::from(self.0) * i128::from(numerator),
            i128::from(denominator),
        );
        i64::try_from(rounded)
            .map(Self)
            .map_err(|_| DomainError::MoneyArithmeticOverflow {
                operation: String::from("rounding a scaled amount"),
            })
    }

    /// Applies a basis-point multiplier (10 000 = x1.0) with banker's rounding.
    ///
    /// # Errors
    ///
    /// Returns an error if the result does not fit in the fixed-point range.
    pub fn apply_multiplier_bp(self, basis_points: u32) -> Result<Self, DomainError> {
        self.mul_div_round(i64::from(basis_points), 10_000)
    }

    /// Clamps this amount to an optional `[min, max]` range.
    #[must_use]
    pub fn clamp_to(self, min: Option<Self>, max: Option<Self>) -> Self {
        let mut value = self;
        if let Some(floor) = min {
            value = value.max(floor);
        }
        if let Some(ceiling) = max {
            value = value.min(ceiling);
        }
        value
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

/// Rounds `numerator / denominator` half to even.
///
/// The denominator must be positive.
fn round_half_even(numerator: i128, denominator: i128) -> i128 {
    let quotient = numerator.div_euclid(denominator);
    let remainder = numerator.rem_euclid(denominator);
    let doubled = remainder * 2;
    if doubled > denominator || (doubled == denominator && quotient % 2 != 0) {
        quotient + 1
    } else {
        quotient
    }
}

/// Splits a total into a deposit and a balance.
///
/// The deposit is `total x deposit_basis_points` rounded half to even; the
/// balance is whatever remains, so the two always sum exactly to the total.
///
/// # Errors
///
/// Returns an error if the arithmetic overflows the fixed-point range.
pub fn split_deposit(total: Money, deposit_basis_points: u32) -> Result<(Money, Money), DomainError> {
    let deposit = total.apply_multiplier_bp(deposit_basis_points)?;
    let balance = total.checked_sub(deposit)?;
    Ok((deposit, balance))
}

/// A named adjustment applied on top of the base price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceModifier {
    /// Human-readable modifier name (e.g., "hourly", "seasonal multiplier").
    pub name: String,
    /// The amount this modifier contributed. May be negative.
    pub amount: Money,
}

impl PriceModifier {
    /// Creates a new `PriceModifier`.
    #[must_use]
    pub const fn new(name: String, amount: Money) -> Self {
        Self { name, amount }
    }
}

/// The customer-facing price decomposition for a booking.
///
/// Invariant: `deposit_amount + balance_amount == total`, exactly, in minor
/// units. The constructor enforces this by deriving the balance from the
/// total and the deposit, never computing both independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    /// The matched rule's base price.
    pub base: Money,
    /// Named adjustments (hourly, per-person, multiplier, clamping).
    pub modifiers: Vec<PriceModifier>,
    /// The clamped linear amount before the multiplier.
    pub subtotal: Money,
    /// The deposit due at confirmation.
    pub deposit_amount: Money,
    /// The balance due before the trip.
    pub balance_amount: Money,
    /// The final customer-facing amount.
    pub total: Money,
}

impl PriceBreakdown {
    /// Creates a breakdown, deriving the deposit/balance split from the total.
    ///
    /// # Arguments
    ///
    /// * `base` - The matched rule's base price
    /// * `modifiers` - Named adjustments in application order
    /// * `subtotal` - The clamped linear amount before the multiplier
    /// * `total` - The final amount
    /// * `deposit_basis_points` - Deposit share of the total (2 500 = 25%)
    ///
    /// # Errors
    ///
    /// Returns an error if the split overflows the fixed-point range.
    pub fn new(
        base: Money,
        modifiers: Vec<PriceModifier>,
        subtotal: Money,
        total: Money,
        deposit_basis_points: u32,
    ) -> Result<Self, DomainError> {
        let (deposit_amount, balance_amount) = split_deposit(total, deposit_basis_points)?;
        Ok(Self {
            base,
            modifiers,
            subtotal,
            deposit_amount,
            balance_amount,
            total,
        })
    }
}
