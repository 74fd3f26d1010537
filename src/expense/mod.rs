//! Expense domain: models, split-policy validation, settlement

pub mod models;
pub mod settlement;
pub mod validation;

pub use models::{Expense, ExpenseDraft, NewExpense, Participant, ParticipantDraft, SplitPolicy};
pub use settlement::{NetBalance, ParticipantShare, compute_balances, compute_shares};
pub use validation::{ValidationError, validate_draft};
