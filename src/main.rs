//! splitledger - Shared-Expense Ledger & Settlement
//!
//! Entry point. Architecture:
//!
//! ```text
//! ┌──────────┐    ┌────────────┐    ┌────────────┐    ┌──────────┐
//! │  Config  │───▶│    Auth    │───▶│   Ledger   │───▶│  Export  │
//! │  (YAML)  │    │(argon2+JWT)│    │ (validate+ │    │  (CSV)   │
//! └──────────┘    └────────────┘    │  settle)   │    └──────────┘
//!                                   └────────────┘
//! ```
//!
//! Every ledger operation is gated by the auth middleware; the gateway
//! stays a thin wrapper around the core services.

use std::sync::Arc;

use splitledger::auth::{AuthService, TokenService};
use splitledger::config::AppConfig;
use splitledger::gateway::{self, state::AppState};
use splitledger::logging::init_logging;
use splitledger::store::MemoryStore;

fn get_env() -> String {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if (args[i] == "--env" || args[i] == "-e") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }
    "dev".to_string()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = get_env();
    let config = AppConfig::load(&env)?;
    let _guard = init_logging(&config);

    tracing::info!(version = env!("CARGO_PKG_VERSION"), env = %env, "starting splitledger");

    let store = Arc::new(MemoryStore::new());
    let tokens = TokenService::new(config.auth.jwt_secret.clone(), config.auth.token_ttl_secs);
    let auth = AuthService::new(store.clone(), tokens);
    let state = Arc::new(AppState::new(auth, store));

    gateway::serve(state, &config.gateway).await
}
