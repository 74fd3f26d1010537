//! End-to-end scenarios against the library surface:
//! register -> login -> record expense -> settle -> export.

use std::sync::Arc;

use rust_decimal::Decimal;
use splitledger::auth::{AuthService, LoginRequest, RegisterRequest, TokenService};
use splitledger::balance_sheet;
use splitledger::expense::{ExpenseDraft, ParticipantDraft, ValidationError};
use splitledger::store::{ExpenseStore, MemoryStore};
use splitledger::{UserId, compute_balances, compute_shares, validate_draft};

fn auth_for(store: &Arc<MemoryStore>) -> AuthService {
    AuthService::new(store.clone(), TokenService::new("test-secret", 3600))
}

fn register_request(name: &str, email: &str) -> RegisterRequest {
    RegisterRequest {
        name: name.to_string(),
        email: email.to_string(),
        mobile: "555-0100".to_string(),
        password: "pw1".to_string(),
    }
}

fn plain(user_id: UserId) -> ParticipantDraft {
    ParticipantDraft {
        user_id,
        share: None,
        percentage: None,
    }
}

#[tokio::test]
async fn equal_split_lunch_end_to_end() {
    let store = Arc::new(MemoryStore::new());
    let auth = auth_for(&store);

    // Alice registers and logs in.
    let alice = auth
        .register(register_request("Alice", "a@x.com"))
        .await
        .unwrap();
    let bob = auth
        .register(register_request("Bob", "b@x.com"))
        .await
        .unwrap();

    let session = auth
        .login(LoginRequest {
            email: "a@x.com".to_string(),
            password: "pw1".to_string(),
        })
        .await
        .unwrap();
    let claims = auth.verify_token(&session.token).unwrap();
    assert_eq!(claims.sub, alice.user_id);
    assert_eq!(claims.email, "a@x.com");

    // Alice records lunch, split equally with Bob.
    let draft = ExpenseDraft {
        description: "Lunch".to_string(),
        amount: Decimal::from(30),
        split_type: "equal".to_string(),
        participants: vec![plain(alice.user_id), plain(bob.user_id)],
    };
    let new = validate_draft(draft, claims.sub).unwrap();
    let expense = store.append(new).await.unwrap();

    // 30.00 splits into 15.00 each.
    let shares = compute_shares(&expense);
    assert_eq!(shares.len(), 2);
    assert_eq!(shares[0].user_id, alice.user_id);
    assert_eq!(shares[0].owed.minor(), 1500);
    assert_eq!(shares[1].user_id, bob.user_id);
    assert_eq!(shares[1].owed.minor(), 1500);

    // Alice is owed Bob's half; Bob owes his half.
    let mine = store.list_by_creator(alice.user_id).await.unwrap();
    let alice_balance = compute_balances(&mine, alice.user_id);
    assert_eq!(alice_balance.net(), 1500);
    let bob_balance = compute_balances(&mine, bob.user_id);
    assert_eq!(bob_balance.net(), -1500);

    // The balance sheet lists one row with amount and split type.
    let csv = String::from_utf8(balance_sheet::render(&mine).unwrap()).unwrap();
    let mut lines = csv.lines();
    assert_eq!(lines.next(), Some("description,amount,split_type,shares"));
    let row = lines.next().unwrap();
    assert!(row.starts_with("Lunch,30.00,equal,"));
    assert_eq!(lines.next(), None);
}

#[tokio::test]
async fn percentage_split_end_to_end() {
    let store = Arc::new(MemoryStore::new());

    // 100.00 split 60/40 between users 2 and 3, recorded by user 1.
    let draft = ExpenseDraft {
        description: "Hotel".to_string(),
        amount: Decimal::from(100),
        split_type: "percentage".to_string(),
        participants: vec![
            ParticipantDraft {
                user_id: 2,
                share: None,
                percentage: Some(Decimal::from(60)),
            },
            ParticipantDraft {
                user_id: 3,
                share: None,
                percentage: Some(Decimal::from(40)),
            },
        ],
    };
    let expense = store.append(validate_draft(draft, 1).unwrap()).await.unwrap();

    let shares = compute_shares(&expense);
    assert_eq!(shares[0].owed.minor(), 6000);
    assert_eq!(shares[1].owed.minor(), 4000);
    let total: i64 = shares.iter().map(|s| s.owed.minor()).sum();
    assert_eq!(total, 10000);
}

#[tokio::test]
async fn invalid_amount_never_reaches_the_ledger() {
    let store = Arc::new(MemoryStore::new());

    let draft = ExpenseDraft {
        description: "Refund?".to_string(),
        amount: Decimal::from(-5),
        split_type: "equal".to_string(),
        participants: vec![plain(1)],
    };
    let err = validate_draft(draft, 1).unwrap_err();
    assert!(matches!(err, ValidationError::InvalidAmount { .. }));

    // Nothing was persisted.
    assert!(store.list_page(1, 10).await.unwrap().is_empty());
}

#[tokio::test]
async fn pages_concatenate_without_gaps_or_duplicates() {
    let store = Arc::new(MemoryStore::new());

    for i in 0..5 {
        let draft = ExpenseDraft {
            description: format!("expense {i}"),
            amount: Decimal::from(10),
            split_type: "equal".to_string(),
            participants: vec![plain(1), plain(2)],
        };
        store.append(validate_draft(draft, 1).unwrap()).await.unwrap();
    }

    let first = store.list_page(1, 2).await.unwrap();
    let second = store.list_page(2, 2).await.unwrap();
    let third = store.list_page(3, 2).await.unwrap();
    let fourth = store.list_page(4, 2).await.unwrap();

    let ids: Vec<_> = first
        .iter()
        .chain(&second)
        .chain(&third)
        .map(|e| e.expense_id)
        .collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    assert!(fourth.is_empty());
}
