use axum::{
    Json,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

use crate::auth::{AuthError, Claims, LoginRequest, LoginResponse, RegisterRequest, User};
use crate::balance_sheet;
use crate::core_types::UserId;
use crate::expense::{Expense, ExpenseDraft, validate_draft};
use crate::gateway::{
    state::AppState,
    types::{ApiResponse, error_codes, validation_code},
};

type HandlerError = (StatusCode, Json<ApiResponse<()>>);

fn internal_error(msg: &str) -> HandlerError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiResponse::<()>::error(error_codes::INTERNAL_ERROR, msg)),
    )
}

/// Register a new user
///
/// POST /users/register
#[utoipa::path(
    post,
    path = "/users/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered successfully", body = ApiResponse<User>),
        (status = 400, description = "Invalid payload"),
        (status = 409, description = "Email already registered")
    ),
    tag = "Users"
)]
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<User>>), HandlerError> {
    if let Err(e) = req.validate() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<()>::error(
                error_codes::INVALID_PARAMETER,
                e.to_string(),
            )),
        ));
    }

    match state.auth.register(req).await {
        Ok(user) => Ok((StatusCode::CREATED, Json(ApiResponse::success(user)))),
        Err(AuthError::DuplicateIdentity) => Err((
            StatusCode::CONFLICT,
            Json(ApiResponse::<()>::error(
                error_codes::DUPLICATE_IDENTITY,
                "Email already registered",
            )),
        )),
        Err(e) => {
            tracing::error!("registration failed: {e}");
            Err(internal_error("Registration failed"))
        }
    }
}

/// Login and receive a session token
///
/// POST /users/login
#[utoipa::path(
    post,
    path = "/users/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse<LoginResponse>),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "Users"
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<(StatusCode, Json<ApiResponse<LoginResponse>>), HandlerError> {
    match state.auth.login(req).await {
        Ok(resp) => Ok((StatusCode::OK, Json(ApiResponse::success(resp)))),
        Err(AuthError::NotFound | AuthError::InvalidCredentials) => {
            // One message for both cases; the boundary does not reveal
            // which emails are registered.
            Err((
                StatusCode::UNAUTHORIZED,
                Json(ApiResponse::<()>::error(
                    error_codes::AUTH_FAILED,
                    "Invalid email or password",
                )),
            ))
        }
        Err(e) => {
            tracing::error!("login failed: {e}");
            Err(internal_error("Login failed"))
        }
    }
}

/// Fetch a user profile
///
/// GET /users/{id}
#[utoipa::path(
    get,
    path = "/users/{id}",
    params(("id" = u64, Path, description = "User id")),
    responses(
        (status = 200, description = "User found", body = ApiResponse<User>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User not found")
    ),
    tag = "Users"
)]
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<UserId>,
) -> Result<(StatusCode, Json<ApiResponse<User>>), HandlerError> {
    match state.auth.get_user(id).await {
        Ok(user) => Ok((StatusCode::OK, Json(ApiResponse::success(user)))),
        Err(AuthError::NotFound) => Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<()>::error(
                error_codes::USER_NOT_FOUND,
                "User not found",
            )),
        )),
        Err(e) => {
            tracing::error!("user lookup failed: {e}");
            Err(internal_error("User lookup failed"))
        }
    }
}

/// Submit a shared expense
///
/// POST /expenses
#[utoipa::path(
    post,
    path = "/expenses",
    request_body = ExpenseDraft,
    responses(
        (status = 201, description = "Expense recorded", body = ApiResponse<Expense>),
        (status = 400, description = "Validation failed"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Expenses"
)]
pub async fn create_expense(
    State(state): State<Arc<AppState>>,
    axum::Extension(claims): axum::Extension<Claims>,
    Json(draft): Json<ExpenseDraft>,
) -> Result<(StatusCode, Json<ApiResponse<Expense>>), HandlerError> {
    let new = validate_draft(draft, claims.sub).map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<()>::error(validation_code(&e), e.to_string())),
        )
    })?;

    match state.expenses.append(new).await {
        Ok(expense) => Ok((StatusCode::CREATED, Json(ApiResponse::success(expense)))),
        Err(e) => {
            tracing::error!("expense append failed: {e}");
            Err(internal_error("Failed to record expense"))
        }
    }
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct ListParams {
    /// 1-based page number
    pub page: Option<u64>,
    /// Page size
    pub limit: Option<u64>,
}

/// List expenses, paginated in creation order
///
/// GET /expenses?page&limit
#[utoipa::path(
    get,
    path = "/expenses",
    params(ListParams),
    responses(
        (status = 200, description = "One page of expenses", body = ApiResponse<Vec<Expense>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Expenses"
)]
pub async fn list_expenses(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> Result<(StatusCode, Json<ApiResponse<Vec<Expense>>>), HandlerError> {
    let page = params.page.unwrap_or(1);
    let limit = params.limit.unwrap_or(10);

    match state.expenses.list_page(page, limit).await {
        Ok(expenses) => Ok((StatusCode::OK, Json(ApiResponse::success(expenses)))),
        Err(e) => {
            tracing::error!("expense scan failed: {e}");
            Err(internal_error("Failed to list expenses"))
        }
    }
}

/// Download the caller's balance sheet as CSV
///
/// GET /balance-sheet
#[utoipa::path(
    get,
    path = "/balance-sheet",
    responses(
        (status = 200, description = "CSV balance sheet", content_type = "text/csv"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Expenses"
)]
pub async fn balance_sheet(
    State(state): State<Arc<AppState>>,
    axum::Extension(claims): axum::Extension<Claims>,
) -> Result<Response, HandlerError> {
    let expenses = state.expenses.list_by_creator(claims.sub).await.map_err(|e| {
        tracing::error!("balance sheet scan failed: {e}");
        internal_error("Failed to build balance sheet")
    })?;

    let csv = balance_sheet::render(&expenses).map_err(|e| {
        tracing::error!("balance sheet render failed: {e}");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<()>::error(
                error_codes::EXPORT_FAILED,
                "Failed to render balance sheet",
            )),
        )
    })?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", balance_sheet::SUGGESTED_FILENAME),
            ),
        ],
        csv,
    )
        .into_response())
}

/// Catch-all for unknown routes
pub async fn route_not_found() -> (StatusCode, Json<ApiResponse<()>>) {
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::<()>::error(
            error_codes::ROUTE_NOT_FOUND,
            "Route not found",
        )),
    )
}
