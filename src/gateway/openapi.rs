//! OpenAPI document for the gateway surface

use utoipa::OpenApi;

use crate::auth::{LoginRequest, LoginResponse, RegisterRequest, User};
use crate::expense::{Expense, ExpenseDraft, Participant, ParticipantDraft, SplitPolicy};
use crate::gateway::handlers;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::register,
        handlers::login,
        handlers::get_user,
        handlers::create_expense,
        handlers::list_expenses,
        handlers::balance_sheet,
    ),
    components(schemas(
        RegisterRequest,
        LoginRequest,
        LoginResponse,
        User,
        ExpenseDraft,
        ParticipantDraft,
        Expense,
        Participant,
        SplitPolicy,
    )),
    tags(
        (name = "Users", description = "Registration, login and profiles"),
        (name = "Expenses", description = "Ledger and balance sheets")
    )
)]
pub struct ApiDoc;
