//! Core types used throughout the system
//!
//! These are fundamental type aliases used by all modules.
//! They provide semantic meaning and enable future type evolution.

/// User ID - globally unique, assigned by the user store on registration.
///
/// # Constraints:
/// - **Immutable**: Once assigned, NEVER changes
/// - **Opaque**: Callers treat it as an identity handle, not a number
///
/// # Usage:
/// - Primary key for user records
/// - Subject (`sub`) of session tokens
/// - Identity reference inside expense participant lists
pub type UserId = u64;

/// Expense ID - unique within the ledger, assigned on append.
///
/// Assigned sequentially, so it doubles as a stable creation-order key
/// for paginated scans.
pub type ExpenseId = u64;

/// Monetary value in minor currency units (e.g. cents).
///
/// All settlement arithmetic happens in this representation so that
/// share distribution can account for every single minor unit.
pub type MinorUnits = i64;
