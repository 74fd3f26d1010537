//! API Response types and error codes
//!
//! - `ApiResponse<T>`: Unified response wrapper
//! - `error_codes`: Standard error code constants

use serde::Serialize;
use utoipa::ToSchema;

use crate::expense::ValidationError;

// ============================================================================
// Unified API Response Format
// ============================================================================

/// Unified API response wrapper
///
/// All API responses follow this structure:
/// - code: 0 = success, non-zero = error code
/// - msg: short message description
/// - data: actual data (success) or null (error)
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response code: 0 for success, non-zero for errors
    #[schema(example = 0)]
    pub code: i32,
    /// Response message
    #[schema(example = "ok")]
    pub msg: String,
    /// Response data (only present when code == 0)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Create success response
    pub fn success(data: T) -> Self {
        Self {
            code: 0,
            msg: "ok".to_string(),
            data: Some(data),
        }
    }

    /// Create error response
    pub fn error(code: i32, msg: impl Into<String>) -> ApiResponse<()> {
        ApiResponse {
            code,
            msg: msg.into(),
            data: None,
        }
    }
}

// ============================================================================
// Error Codes
// ============================================================================

/// Standard API error codes
pub mod error_codes {
    // Success
    pub const SUCCESS: i32 = 0;

    // Validation errors (1xxx)
    pub const INVALID_PARAMETER: i32 = 1001;
    pub const INVALID_AMOUNT: i32 = 1002;
    pub const INVALID_PARTICIPANTS: i32 = 1003;
    pub const INVALID_SPLIT_TYPE: i32 = 1004;
    pub const SHARE_MISMATCH: i32 = 1005;
    pub const PERCENTAGE_MISMATCH: i32 = 1006;
    pub const UNEXPECTED_SHARE: i32 = 1007;

    // Auth errors (2xxx)
    pub const MISSING_AUTH: i32 = 2001;
    pub const AUTH_FAILED: i32 = 2002;
    pub const DUPLICATE_IDENTITY: i32 = 2003;

    // Resource errors (4xxx)
    pub const USER_NOT_FOUND: i32 = 4001;
    pub const ROUTE_NOT_FOUND: i32 = 4004;

    // Server errors (5xxx)
    pub const INTERNAL_ERROR: i32 = 5000;
    pub const EXPORT_FAILED: i32 = 5001;
}

/// Map a validation failure to its distinct boundary code, so clients can
/// tell the rejection classes apart.
pub fn validation_code(err: &ValidationError) -> i32 {
    match err {
        ValidationError::InvalidAmount { .. } => error_codes::INVALID_AMOUNT,
        ValidationError::InvalidParticipants { .. } => error_codes::INVALID_PARTICIPANTS,
        ValidationError::InvalidSplitType { .. } => error_codes::INVALID_SPLIT_TYPE,
        ValidationError::ShareMismatch { .. } => error_codes::SHARE_MISMATCH,
        ValidationError::PercentageMismatch { .. } => error_codes::PERCENTAGE_MISMATCH,
        ValidationError::UnexpectedShare { .. } => error_codes::UNEXPECTED_SHARE,
    }
}
