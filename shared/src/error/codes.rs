//! Unified error codes for the Atelier storefront
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Account / verification errors
//! - 4xxx: Order errors
//! - 5xxx: Catalog errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (email/password)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,
    /// Email exists but has not been verified
    EmailNotVerified = 1005,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Admin role required
    AdminRequired = 2002,
    /// Cannot remove an admin account
    CannotDeleteAdmin = 2003,

    // ==================== 3xxx: Account / verification ====================
    /// Email already registered
    EmailAlreadyRegistered = 3001,
    /// Verification code invalid
    VerificationCodeInvalid = 3002,
    /// Verification code expired
    VerificationCodeExpired = 3003,
    /// Current password incorrect
    PasswordIncorrect = 3004,
    /// Email service is not configured
    MailNotConfigured = 3005,
    /// OAuth provider is not configured
    OauthNotConfigured = 3006,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Order status does not allow this transition
    OrderStatusConflict = 4002,
    /// Order is not ready for feedback
    OrderNotReviewable = 4003,
    /// Requested quantity exceeds available stock
    QuantityExceedsStock = 4004,
    /// Requested quantity exceeds the per-item limit
    QuantityLimitExceeded = 4005,

    // ==================== 5xxx: Catalog ====================
    /// Product not found
    ProductNotFound = 5001,
    /// Cart not found
    CartNotFound = 5002,
    /// Review not found
    ReviewNotFound = 5003,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Mail relay error
    MailError = 9003,
}

impl ErrorCode {
    /// Get the numeric code value
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the default human-readable message for this code
    pub fn message(&self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::Unknown => "Unknown error",
            Self::ValidationFailed => "Invalid input",
            Self::NotFound => "Not found",
            Self::AlreadyExists => "Already exists",
            Self::InvalidRequest => "Invalid request",

            Self::NotAuthenticated => "Unauthorized",
            Self::InvalidCredentials => "Invalid credentials",
            Self::TokenExpired => "Token expired",
            Self::TokenInvalid => "Invalid token",
            Self::EmailNotVerified => "Email not verified",

            Self::PermissionDenied => "Forbidden",
            Self::AdminRequired => "Admin access required",
            Self::CannotDeleteAdmin => "Cannot remove admin account",

            Self::EmailAlreadyRegistered => "Email already registered",
            Self::VerificationCodeInvalid => "Invalid code",
            Self::VerificationCodeExpired => "Code expired",
            Self::PasswordIncorrect => "Current password is incorrect",
            Self::MailNotConfigured => "Email service not configured",
            Self::OauthNotConfigured => "OAuth not configured",

            Self::OrderNotFound => "Order not found",
            Self::OrderStatusConflict => "Order already processed",
            Self::OrderNotReviewable => "Order is not ready for feedback",
            Self::QuantityExceedsStock => "Quantity exceeds stock",
            Self::QuantityLimitExceeded => "Item quantity exceeds limit",

            Self::ProductNotFound => "Product not found",
            Self::CartNotFound => "Cart not found",
            Self::ReviewNotFound => "Review not found",

            Self::InternalError => "Internal server error",
            Self::DatabaseError => "Database error",
            Self::MailError => "Mail relay error",
        }
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> u16 {
        code as u16
    }
}

/// Error returned when converting an unknown u16 into an [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        let code = match value {
            0 => Self::Success,
            1 => Self::Unknown,
            2 => Self::ValidationFailed,
            3 => Self::NotFound,
            4 => Self::AlreadyExists,
            5 => Self::InvalidRequest,

            1001 => Self::NotAuthenticated,
            1002 => Self::InvalidCredentials,
            1003 => Self::TokenExpired,
            1004 => Self::TokenInvalid,
            1005 => Self::EmailNotVerified,

            2001 => Self::PermissionDenied,
            2002 => Self::AdminRequired,
            2003 => Self::CannotDeleteAdmin,

            3001 => Self::EmailAlreadyRegistered,
            3002 => Self::VerificationCodeInvalid,
            3003 => Self::VerificationCodeExpired,
            3004 => Self::PasswordIncorrect,
            3005 => Self::MailNotConfigured,
            3006 => Self::OauthNotConfigured,

            4001 => Self::OrderNotFound,
            4002 => Self::OrderStatusConflict,
            4003 => Self::OrderNotReviewable,
            4004 => Self::QuantityExceedsStock,
            4005 => Self::QuantityLimitExceeded,

            5001 => Self::ProductNotFound,
            5002 => Self::CartNotFound,
            5003 => Self::ReviewNotFound,

            9001 => Self::InternalError,
            9002 => Self::DatabaseError,
            9003 => Self::MailError,

            other => return Err(InvalidErrorCode(other)),
        };
        Ok(code)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
