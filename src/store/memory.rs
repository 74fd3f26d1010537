//! In-memory store engine
//!
//! Backs both contracts with process-local structures: dashmap indexes
//! for users, an append-only log behind an RwLock for expenses, and
//! AtomicU64 id generators. Each read is a fresh snapshot; pagination is
//! not linearizable with concurrent appends, which the contract allows.

use std::sync::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crate::core_types::UserId;
use crate::expense::{Expense, NewExpense};
use crate::store::{ExpenseStore, NewUser, StoreError, UserRecord, UserStore};

pub struct MemoryStore {
    users: DashMap<UserId, UserRecord>,
    /// lowercased email -> user id; the entry API makes the uniqueness
    /// check and the reservation a single atomic step
    email_index: DashMap<String, UserId>,
    expenses: RwLock<Vec<Expense>>,
    next_user_id: AtomicU64,
    next_expense_id: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
            email_index: DashMap::new(),
            expenses: RwLock::new(Vec::new()),
            next_user_id: AtomicU64::new(1),
            next_expense_id: AtomicU64::new(1),
        }
    }

    fn lock_poisoned() -> StoreError {
        StoreError::Io("expense log lock poisoned".to_string())
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn insert(&self, new: NewUser) -> Result<UserRecord, StoreError> {
        let user_id = self.next_user_id.fetch_add(1, Ordering::SeqCst);
        match self.email_index.entry(new.email.clone()) {
            Entry::Occupied(_) => return Err(StoreError::Duplicate { field: "email" }),
            Entry::Vacant(slot) => {
                slot.insert(user_id);
            }
        }

        let record = UserRecord {
            user_id,
            name: new.name,
            email: new.email,
            mobile: new.mobile,
            password_hash: new.password_hash,
            created_at: Utc::now(),
        };
        self.users.insert(user_id, record.clone());
        Ok(record)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError> {
        let Some(user_id) = self.email_index.get(email).map(|id| *id) else {
            return Ok(None);
        };
        Ok(self.users.get(&user_id).map(|r| r.clone()))
    }

    async fn find_by_id(&self, user_id: UserId) -> Result<Option<UserRecord>, StoreError> {
        Ok(self.users.get(&user_id).map(|r| r.clone()))
    }
}

#[async_trait]
impl ExpenseStore for MemoryStore {
    async fn append(&self, new: NewExpense) -> Result<Expense, StoreError> {
        let expense_id = self.next_expense_id.fetch_add(1, Ordering::SeqCst);
        let expense = Expense::from_new(new, expense_id, Utc::now());
        let mut log = self.expenses.write().map_err(|_| Self::lock_poisoned())?;
        log.push(expense.clone());
        Ok(expense)
    }

    async fn list_page(&self, page: u64, limit: u64) -> Result<Vec<Expense>, StoreError> {
        let page = page.max(1);
        let limit = limit.max(1);
        let log = self.expenses.read().map_err(|_| Self::lock_poisoned())?;
        let skip = ((page - 1) * limit) as usize;
        Ok(log.iter().skip(skip).take(limit as usize).cloned().collect())
    }

    async fn list_by_creator(&self, user_id: UserId) -> Result<Vec<Expense>, StoreError> {
        let log = self.expenses.read().map_err(|_| Self::lock_poisoned())?;
        Ok(log
            .iter()
            .filter(|e| e.created_by == user_id)
            .cloned()
            .collect())
    }
}
