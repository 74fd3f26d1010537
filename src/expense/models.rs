//! Data models for shared expenses

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::core_types::{ExpenseId, UserId};
use crate::money::Amount;

/// How an expense amount is divided among its participants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SplitPolicy {
    /// Amount divided evenly; remainder minor units go to earlier participants.
    Equal,
    /// Each participant declares an exact share; shares must sum to the amount.
    Exact,
    /// Each participant declares a percentage; percentages must sum to 100.
    Percentage,
}

impl SplitPolicy {
    /// Parse a wire value. Returns `None` for unknown policies so the
    /// validator can reject them with a typed error instead of a serde error.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "equal" => Some(SplitPolicy::Equal),
            "exact" => Some(SplitPolicy::Exact),
            "percentage" => Some(SplitPolicy::Percentage),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SplitPolicy::Equal => "equal",
            SplitPolicy::Exact => "exact",
            SplitPolicy::Percentage => "percentage",
        }
    }
}

impl fmt::Display for SplitPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Raw participant entry as submitted by a client.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ParticipantDraft {
    pub user_id: UserId,
    /// Exact share (required for `exact`, forbidden otherwise).
    #[schema(value_type = Option<String>, example = "15.00")]
    pub share: Option<Decimal>,
    /// Percentage of the amount (required for `percentage`, forbidden otherwise).
    #[schema(value_type = Option<String>, example = "60")]
    pub percentage: Option<Decimal>,
}

/// Raw expense submission. Nothing here is trusted until it has passed
/// through [`crate::expense::validation::validate_draft`].
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ExpenseDraft {
    #[schema(example = "Lunch")]
    pub description: String,
    #[schema(value_type = String, example = "30")]
    pub amount: Decimal,
    #[schema(example = "equal")]
    pub split_type: String,
    pub participants: Vec<ParticipantDraft>,
}

/// Validated participant entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Participant {
    pub user_id: UserId,
    #[schema(value_type = Option<String>)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub share: Option<Amount>,
    #[schema(value_type = Option<String>)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentage: Option<Decimal>,
}

/// A validated expense, ready to persist.
///
/// Constructed only by the expense validator; the private fields keep
/// unvalidated payloads out of the settlement engine and the ledger store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    pub(crate) description: String,
    pub(crate) amount: Amount,
    pub(crate) split: SplitPolicy,
    pub(crate) participants: Vec<Participant>,
    pub(crate) created_by: UserId,
}

impl NewExpense {
    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn split(&self) -> SplitPolicy {
        self.split
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn created_by(&self) -> UserId {
        self.created_by
    }
}

/// A persisted expense. Immutable once appended to the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Expense {
    pub expense_id: ExpenseId,
    pub description: String,
    #[schema(value_type = String, example = "30.00")]
    pub amount: Amount,
    pub split: SplitPolicy,
    pub participants: Vec<Participant>,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
}

impl Expense {
    /// Materialize a stored expense from a validated submission.
    /// Only the ledger store assigns ids and timestamps.
    pub(crate) fn from_new(new: NewExpense, expense_id: ExpenseId, created_at: DateTime<Utc>) -> Self {
        Self {
            expense_id,
            description: new.description,
            amount: new.amount,
            split: new.split,
            participants: new.participants,
            created_by: new.created_by,
            created_at,
        }
    }
}
