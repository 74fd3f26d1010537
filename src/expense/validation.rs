//! Split-policy validation for incoming expense claims
//!
//! Pure function over a raw draft and the caller's identity. Nothing
//! reaches the settlement engine or the ledger store without passing
//! through here.

use std::collections::HashSet;

use rust_decimal::Decimal;

use crate::core_types::{MinorUnits, UserId};
use crate::expense::models::{ExpenseDraft, NewExpense, Participant, SplitPolicy};
use crate::money::Amount;

/// Exact shares may differ from the amount by at most one minor unit.
pub const EXACT_TOLERANCE_MINOR: MinorUnits = 1;

/// Percentages may differ from 100 by at most 0.01.
pub fn percentage_tolerance() -> Decimal {
    Decimal::new(1, 2)
}

/// Validation errors for expense submissions
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ValidationError {
    #[error("invalid amount: {got} (must be a positive value with at most 2 decimal places)")]
    InvalidAmount { got: String },

    #[error("invalid participants: {reason}")]
    InvalidParticipants { reason: &'static str },

    #[error("invalid split type: '{got}' (expected equal, exact or percentage)")]
    InvalidSplitType { got: String },

    #[error("exact shares mismatch: {detail}")]
    ShareMismatch { detail: String },

    #[error("percentage mismatch: {detail}")]
    PercentageMismatch { detail: String },

    #[error("'{split}' split does not take a declared share (participant {user_id})")]
    UnexpectedShare { split: SplitPolicy, user_id: UserId },
}

/// Validate a raw draft into an expense ready to persist.
///
/// # Validation Rules
/// - amount must be positive and representable in minor units
/// - participants must be a non-empty sequence with unique identities
/// - split type must be one of the three known policies
/// - `exact`: every participant supplies a share; shares sum to the amount
///   within [`EXACT_TOLERANCE_MINOR`]
/// - `percentage`: every participant supplies a percentage; percentages sum
///   to 100 within [`percentage_tolerance`]
/// - `equal`: per-participant values are rejected, not silently ignored
///
/// # Errors
/// Returns the first violated rule as a typed [`ValidationError`].
pub fn validate_draft(draft: ExpenseDraft, created_by: UserId) -> Result<NewExpense, ValidationError> {
    let amount = Amount::from_decimal(draft.amount).map_err(|_| ValidationError::InvalidAmount {
        got: draft.amount.to_string(),
    })?;
    if !amount.is_positive() {
        return Err(ValidationError::InvalidAmount {
            got: draft.amount.to_string(),
        });
    }

    if draft.participants.is_empty() {
        return Err(ValidationError::InvalidParticipants {
            reason: "participant list is empty",
        });
    }
    let mut seen: HashSet<UserId> = HashSet::with_capacity(draft.participants.len());
    for p in &draft.participants {
        if !seen.insert(p.user_id) {
            return Err(ValidationError::InvalidParticipants {
                reason: "duplicate participant identity",
            });
        }
    }

    let split = SplitPolicy::parse(&draft.split_type).ok_or(ValidationError::InvalidSplitType {
        got: draft.split_type.clone(),
    })?;

    let participants = match split {
        SplitPolicy::Equal => validate_equal(&draft)?,
        SplitPolicy::Exact => validate_exact(&draft, amount)?,
        SplitPolicy::Percentage => validate_percentage(&draft)?,
    };

    Ok(NewExpense {
        description: draft.description,
        amount,
        split,
        participants,
        created_by,
    })
}

fn validate_equal(draft: &ExpenseDraft) -> Result<Vec<Participant>, ValidationError> {
    for p in &draft.participants {
        if p.share.is_some() || p.percentage.is_some() {
            return Err(ValidationError::UnexpectedShare {
                split: SplitPolicy::Equal,
                user_id: p.user_id,
            });
        }
    }
    Ok(draft
        .participants
        .iter()
        .map(|p| Participant {
            user_id: p.user_id,
            share: None,
            percentage: None,
        })
        .collect())
}

fn validate_exact(draft: &ExpenseDraft, amount: Amount) -> Result<Vec<Participant>, ValidationError> {
    let mut participants = Vec::with_capacity(draft.participants.len());
    let mut sum: MinorUnits = 0;

    for p in &draft.participants {
        if p.percentage.is_some() {
            return Err(ValidationError::UnexpectedShare {
                split: SplitPolicy::Exact,
                user_id: p.user_id,
            });
        }
        let declared = p.share.ok_or_else(|| ValidationError::ShareMismatch {
            detail: format!("participant {} supplies no share", p.user_id),
        })?;
        let share = Amount::from_decimal(declared).map_err(|_| ValidationError::InvalidAmount {
            got: declared.to_string(),
        })?;
        if share.minor() < 0 {
            return Err(ValidationError::InvalidAmount {
                got: declared.to_string(),
            });
        }
        sum = sum.saturating_add(share.minor());
        participants.push(Participant {
            user_id: p.user_id,
            share: Some(share),
            percentage: None,
        });
    }

    if (sum - amount.minor()).abs() > EXACT_TOLERANCE_MINOR {
        return Err(ValidationError::ShareMismatch {
            detail: format!(
                "shares sum to {}, amount is {}",
                Amount::from_minor(sum),
                amount
            ),
        });
    }

    Ok(participants)
}

fn validate_percentage(draft: &ExpenseDraft) -> Result<Vec<Participant>, ValidationError> {
    let mut participants = Vec::with_capacity(draft.participants.len());
    let mut sum = Decimal::ZERO;

    for p in &draft.participants {
        if p.share.is_some() {
            return Err(ValidationError::UnexpectedShare {
                split: SplitPolicy::Percentage,
                user_id: p.user_id,
            });
        }
        let pct = p.percentage.ok_or_else(|| ValidationError::PercentageMismatch {
            detail: format!("participant {} supplies no percentage", p.user_id),
        })?;
        if pct.is_sign_negative() {
            return Err(ValidationError::PercentageMismatch {
                detail: format!("participant {} has a negative percentage", p.user_id),
            });
        }
        sum += pct;
        participants.push(Participant {
            user_id: p.user_id,
            share: None,
            percentage: Some(pct),
        });
    }

    if (sum - Decimal::from(100)).abs() > percentage_tolerance() {
        return Err(ValidationError::PercentageMismatch {
            detail: format!("percentages sum to {sum}"),
        });
    }

    Ok(participants)
}
