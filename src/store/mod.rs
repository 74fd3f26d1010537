//! Persistence contracts for users and the expense ledger
//!
//! The core treats storage as an externally-synchronized document
//! capability: insert, equality lookup, windowed scan, filter-by-field
//! scan. Engines implement these traits; the services never see engine
//! internals.

pub mod memory;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::core_types::UserId;
use crate::expense::{Expense, NewExpense};

pub use memory::MemoryStore;

/// Storage failure. Surfaced to the boundary as a generic server fault;
/// the core never retries persistence (expense creation carries no
/// idempotency key, so a blind retry risks duplication).
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("duplicate value for unique field '{field}'")]
    Duplicate { field: &'static str },

    #[error("store i/o failure: {0}")]
    Io(String),
}

/// User registration data as handed to the store. The password is already
/// hashed; plaintext never crosses this boundary.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub password_hash: String,
}

/// Stored user record, including the password hash.
///
/// This shape stays inside the credential-store boundary: callers outside
/// auth see the hash-free [`crate::auth::User`] DTO instead.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub user_id: UserId,
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// User persistence contract.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a new user, assigning its id.
    ///
    /// # Errors
    /// `Duplicate { field: "email" }` if the email is already registered.
    async fn insert(&self, new: NewUser) -> Result<UserRecord, StoreError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError>;

    async fn find_by_id(&self, user_id: UserId) -> Result<Option<UserRecord>, StoreError>;
}

/// Expense ledger contract. Append-only: no update or delete exists.
#[async_trait]
pub trait ExpenseStore: Send + Sync {
    /// Persist a validated expense, assigning id and creation time.
    async fn append(&self, new: NewExpense) -> Result<Expense, StoreError>;

    /// One page of the ledger in creation order. Pages beyond the data
    /// return an empty vec, never an error.
    async fn list_page(&self, page: u64, limit: u64) -> Result<Vec<Expense>, StoreError>;

    /// All expenses created by one user, in creation order.
    async fn list_by_creator(&self, user_id: UserId) -> Result<Vec<Expense>, StoreError>;
}
