use std::sync::Arc;

use crate::auth::AuthService;
use crate::store::ExpenseStore;

/// Shared gateway state. Everything here is injected at startup; handlers
/// never reach for globals.
pub struct AppState {
    pub auth: AuthService,
    pub expenses: Arc<dyn ExpenseStore>,
}

impl AppState {
    pub fn new(auth: AuthService, expenses: Arc<dyn ExpenseStore>) -> Self {
        Self { auth, expenses }
    }
}
