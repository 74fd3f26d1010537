//! Settlement engine - derives who owes what from stored expenses
//!
//! Pure functions over validated expenses. Results are recomputed on
//! demand and never persisted, so they cannot go stale. Identical inputs
//! always yield identical outputs.

use rust_decimal::prelude::*;
use serde::Serialize;
use utoipa::ToSchema;

use crate::core_types::{MinorUnits, UserId};
use crate::expense::models::{Expense, SplitPolicy};
use crate::money::Amount;

/// One participant's owed portion of a single expense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct ParticipantShare {
    pub user_id: UserId,
    #[schema(value_type = String, example = "15.00")]
    pub owed: Amount,
}

/// Net position of one user across a set of expenses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct NetBalance {
    /// Sum of other participants' shares of expenses this user created.
    #[schema(value_type = String)]
    pub owed_to_user: Amount,
    /// Sum of this user's own shares of expenses created by others.
    #[schema(value_type = String)]
    pub owed_by_user: Amount,
}

impl NetBalance {
    /// Net balance in minor units: positive means the user is owed money.
    pub fn net(&self) -> MinorUnits {
        self.owed_to_user.minor() - self.owed_by_user.minor()
    }
}

/// Compute each participant's owed amount for one expense.
///
/// # Conservation
/// Shares always sum exactly to the expense amount for `equal` and
/// `percentage` splits: the integer remainder (or rounding drift) is
/// distributed one minor unit at a time in listed participant order, so no
/// currency is lost or invented. `exact` splits return the declared shares
/// verbatim.
pub fn compute_shares(expense: &Expense) -> Vec<ParticipantShare> {
    if expense.participants.is_empty() {
        return Vec::new();
    }
    match expense.split {
        SplitPolicy::Equal => equal_shares(expense),
        SplitPolicy::Exact => exact_shares(expense),
        SplitPolicy::Percentage => percentage_shares(expense),
    }
}

fn equal_shares(expense: &Expense) -> Vec<ParticipantShare> {
    let amount = expense.amount.minor();
    let n = expense.participants.len() as MinorUnits;
    let base = amount / n;
    let remainder = amount % n;

    expense
        .participants
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let extra = if (i as MinorUnits) < remainder { 1 } else { 0 };
            ParticipantShare {
                user_id: p.user_id,
                owed: Amount::from_minor(base + extra),
            }
        })
        .collect()
}

fn exact_shares(expense: &Expense) -> Vec<ParticipantShare> {
    expense
        .participants
        .iter()
        .map(|p| ParticipantShare {
            user_id: p.user_id,
            owed: p.share.unwrap_or(Amount::ZERO),
        })
        .collect()
}

fn percentage_shares(expense: &Expense) -> Vec<ParticipantShare> {
    let amount = expense.amount.minor();
    let amount_dec = Decimal::from(amount);
    let hundred = Decimal::from(100);

    let mut minors: Vec<MinorUnits> = expense
        .participants
        .iter()
        .map(|p| {
            let pct = p.percentage.unwrap_or(Decimal::ZERO);
            (amount_dec * pct / hundred)
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
                .to_i64()
                // each share is bounded by the amount itself
                .unwrap_or(0)
        })
        .collect();

    // Correct rounding drift so the shares sum exactly to the amount.
    let sum: MinorUnits = minors.iter().sum();
    let mut drift = amount - sum;
    let mut i = 0usize;
    while drift != 0 {
        let idx = i % minors.len();
        i += 1;
        let step = drift.signum();
        if step < 0 && minors[idx] == 0 {
            // never push a share negative
            continue;
        }
        minors[idx] += step;
        drift -= step;
    }

    expense
        .participants
        .iter()
        .zip(minors)
        .map(|(p, m)| ParticipantShare {
            user_id: p.user_id,
            owed: Amount::from_minor(m),
        })
        .collect()
}

/// Aggregate a user's net position across a set of expenses.
///
/// For each expense the user created, they are owed the other
/// participants' shares. For each expense where they participate without
/// being the creator, they owe their own share.
pub fn compute_balances(expenses: &[Expense], for_user: UserId) -> NetBalance {
    let mut owed_to: MinorUnits = 0;
    let mut owed_by: MinorUnits = 0;

    for expense in expenses {
        let shares = compute_shares(expense);
        if expense.created_by == for_user {
            for share in &shares {
                if share.user_id != for_user {
                    owed_to = owed_to.saturating_add(share.owed.minor());
                }
            }
        } else if let Some(own) = shares.iter().find(|s| s.user_id == for_user) {
            owed_by = owed_by.saturating_add(own.owed.minor());
        }
    }

    NetBalance {
        owed_to_user: Amount::from_minor(owed_to),
        owed_by_user: Amount::from_minor(owed_by),
    }
}
