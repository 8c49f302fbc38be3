//! Sign-up bonus calculation
//!
//! Pure functions over an exchange's tier table. Tiers are half-open
//! `[min, max)` ranges by default, so a deposit sitting exactly on a boundary
//! belongs to the upper tier.

use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

use crate::models::bonus::{ExchangeBonusProfile, RateTier};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BonusError {
    #[error("no bonus tier matches a deposit of {deposit}")]
    NoMatchingTier { deposit: Decimal },

    #[error("deposit must not be negative, got {deposit}")]
    NegativeDeposit { deposit: Decimal },

    #[error("malformed tier table for {exchange}: {reason}")]
    MalformedTiers { exchange: String, reason: String },
}

/// How a deposit equal to a tier's `max` is treated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TierBoundary {
    /// `min <= deposit < max`
    #[default]
    HalfOpen,
    /// `min <= deposit <= max`, first listed tier wins on shared boundaries
    Inclusive,
}

impl TierBoundary {
    fn contains(self, tier: &RateTier, deposit: Decimal) -> bool {
        if deposit < tier.min {
            return false;
        }
        match (self, tier.max) {
            (_, None) => true,
            (TierBoundary::HalfOpen, Some(max)) => deposit < max,
            (TierBoundary::Inclusive, Some(max)) => deposit <= max,
        }
    }
}

/// Result of a bonus computation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BonusQuote {
    pub tier: RateTier,
    pub raw_bonus: Decimal,
    pub bonus: Decimal,
}

impl BonusQuote {
    pub fn capped(&self) -> bool {
        self.bonus < self.raw_bonus
    }
}

pub fn find_tier(
    deposit: Decimal,
    profile: &ExchangeBonusProfile,
    boundary: TierBoundary,
) -> Option<&RateTier> {
    profile.tiers.iter().find(|tier| boundary.contains(tier, deposit))
}

/// Bonus for `deposit`, capped at the profile's `max_bonus`
pub fn compute_bonus(deposit: Decimal, profile: &ExchangeBonusProfile) -> Result<Decimal, BonusError> {
    quote_bonus(deposit, profile, TierBoundary::HalfOpen).map(|quote| quote.bonus)
}

pub fn quote_bonus(
    deposit: Decimal,
    profile: &ExchangeBonusProfile,
    boundary: TierBoundary,
) -> Result<BonusQuote, BonusError> {
    if deposit.is_sign_negative() && !deposit.is_zero() {
        return Err(BonusError::NegativeDeposit { deposit });
    }

    let tier = find_tier(deposit, profile, boundary).ok_or(BonusError::NoMatchingTier { deposit })?;

    // Products past Decimal::MAX are far above any cap
    let raw_bonus = deposit.checked_mul(tier.rate).unwrap_or(Decimal::MAX);
    let bonus = raw_bonus.min(profile.max_bonus);

    tracing::debug!(
        "{} bonus for {}: rate {} -> {} (raw {})",
        profile.exchange,
        deposit,
        tier.rate,
        bonus,
        raw_bonus
    );

    Ok(BonusQuote {
        tier: tier.clone(),
        raw_bonus,
        bonus,
    })
}

impl ExchangeBonusProfile {
    /// Check that tiers start at zero, are contiguous and end unbounded
    pub fn validate(&self) -> Result<(), BonusError> {
        let malformed = |reason: String| BonusError::MalformedTiers {
            exchange: self.exchange.clone(),
            reason,
        };

        let first = self.tiers.first().ok_or_else(|| malformed("no tiers".to_string()))?;
        if !first.min.is_zero() {
            return Err(malformed(format!("first tier starts at {} instead of 0", first.min)));
        }
        if self.max_bonus.is_sign_negative() && !self.max_bonus.is_zero() {
            return Err(malformed(format!("negative max bonus {}", self.max_bonus)));
        }

        for (i, tier) in self.tiers.iter().enumerate() {
            if tier.rate.is_sign_negative() && !tier.rate.is_zero() {
                return Err(malformed(format!("tier {} has negative rate {}", i, tier.rate)));
            }
            match (tier.max, self.tiers.get(i + 1)) {
                (Some(max), _) if max <= tier.min => {
                    return Err(malformed(format!("tier {} is empty: [{}, {})", i, tier.min, max)));
                }
                (Some(max), Some(next)) if next.min != max => {
                    return Err(malformed(format!(
                        "gap or overlap between tier {} (max {}) and tier {} (min {})",
                        i,
                        max,
                        i + 1,
                        next.min
                    )));
                }
                (Some(max), None) => {
                    return Err(malformed(format!("last tier ends at {} instead of unbounded", max)));
                }
                (None, Some(_)) => {
                    return Err(malformed(format!("unbounded tier {} is not last", i)));
                }
                _ => {}
            }
        }

        Ok(())
    }
}

/// Whole-dollar USD display string, e.g. `$1,235`
pub fn format_usd(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let digits = rounded.abs().trunc().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if negative {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}
