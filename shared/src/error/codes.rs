//! Unified error codes for the queen-cell service
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Order errors
//! - 3xxx: Production errors
//! - 4xxx: Stock errors
//! - 5xxx: Report errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for compact serialization
/// and so API clients can switch on a stable number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Validation failed
    ValidationFailed = 2,

    // ==================== 1xxx: Auth ====================
    /// Principal is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (email/password)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,
    /// Email is already registered
    EmailAlreadyRegistered = 1101,
    /// Email is malformed
    InvalidEmail = 1102,

    // ==================== 2xxx: Order ====================
    /// Customer order not found
    OrderNotFound = 2001,

    // ==================== 3xxx: Production ====================
    /// Production batch not found
    ProductionNotFound = 3001,
    /// Referenced order does not belong to the caller
    ProductionOrderInvalid = 3002,

    // ==================== 4xxx: Stock ====================
    /// Stock package not found
    StockPackageNotFound = 4001,
    /// Requested more cells than the package holds
    InsufficientStock = 4002,
    /// Cell count must be positive
    InvalidCellCount = 4003,
    /// Referenced production batch does not belong to the caller
    StockBatchInvalid = 4004,

    // ==================== 5xxx: Report ====================
    /// Nothing matched the export filter
    ExportEmpty = 5001,
    /// Unknown report type
    InvalidReportType = 5002,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Operation timeout
    TimeoutError = 9004,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Default human-readable message
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::ValidationFailed => "Validation failed",

            // Auth
            ErrorCode::NotAuthenticated => "Not authenticated",
            ErrorCode::InvalidCredentials => "Invalid credentials",
            ErrorCode::TokenExpired => "Authentication token has expired",
            ErrorCode::TokenInvalid => "Could not validate credentials",
            ErrorCode::EmailAlreadyRegistered => "Email already registered",
            ErrorCode::InvalidEmail => "Invalid email address",

            // Order
            ErrorCode::OrderNotFound => "Order not found",

            // Production
            ErrorCode::ProductionNotFound => "Production record not found",
            ErrorCode::ProductionOrderInvalid => "Referenced order not found",

            // Stock
            ErrorCode::StockPackageNotFound => "Stock package not found",
            ErrorCode::InsufficientStock => "Insufficient cells in package",
            ErrorCode::InvalidCellCount => "Number of cells must be greater than 0",
            ErrorCode::StockBatchInvalid => "Production batch not found",

            // Report
            ErrorCode::ExportEmpty => "No data to export",
            ErrorCode::InvalidReportType => "Invalid report type",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::TimeoutError => "Operation timed out",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
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
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            2 => Ok(ErrorCode::ValidationFailed),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),
            1101 => Ok(ErrorCode::EmailAlreadyRegistered),
            1102 => Ok(ErrorCode::InvalidEmail),

            // Order
            2001 => Ok(ErrorCode::OrderNotFound),

            // Production
            3001 => Ok(ErrorCode::ProductionNotFound),
            3002 => Ok(ErrorCode::ProductionOrderInvalid),

            // Stock
            4001 => Ok(ErrorCode::StockPackageNotFound),
            4002 => Ok(ErrorCode::InsufficientStock),
            4003 => Ok(ErrorCode::InvalidCellCount),
            4004 => Ok(ErrorCode::StockBatchInvalid),

            // Report
            5001 => Ok(ErrorCode::ExportEmpty),
            5002 => Ok(ErrorCode::InvalidReportType),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9004 => Ok(ErrorCode::TimeoutError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
