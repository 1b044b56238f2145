//! Application-wide constants
//!
//! This module contains all constant values used throughout the application.
//! Constants are grouped by their purpose for better organization.

// =============================================================================
// SERVER DEFAULTS
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 5000;

// =============================================================================
// DATABASE DEFAULTS
// =============================================================================

/// Default maximum database connections in the pool
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 20;

/// Default timeout for acquiring a connection from the pool, in seconds
pub const DEFAULT_DATABASE_CONNECT_TIMEOUT_SECS: u64 = 10;

// =============================================================================
// AUTHENTICATION DEFAULTS
// =============================================================================

/// Default session token expiry in days
pub const DEFAULT_TOKEN_EXPIRY_DAYS: i64 = 30;

/// Minimum password length
pub const MIN_PASSWORD_LENGTH: u64 = 8;

/// Maximum password length
pub const MAX_PASSWORD_LENGTH: u64 = 128;

/// Username minimum length
pub const MIN_USERNAME_LENGTH: u64 = 3;

/// Username maximum length
pub const MAX_USERNAME_LENGTH: u64 = 32;

// =============================================================================
// OTP SETTINGS
// =============================================================================

/// OTP validity window in minutes
pub const OTP_TTL_MINUTES: i64 = 10;

/// Number of digits in a generated OTP code
pub const OTP_CODE_LENGTH: usize = 6;

/// Smallest 6-digit OTP value
pub const OTP_MIN_VALUE: u32 = 100_000;

/// Largest 6-digit OTP value
pub const OTP_MAX_VALUE: u32 = 999_999;

/// OTP record lifecycle states
pub mod otp_states {
    /// Created, not yet checked against any request
    pub const ISSUED: &str = "issued";
    /// Passed the reset-flow verification step, awaiting the password change
    pub const VERIFIED: &str = "verified";
    /// Spent; no further use in any flow
    pub const CONSUMED: &str = "consumed";
}

// =============================================================================
// RIDE SETTINGS
// =============================================================================

/// Maximum number of rides returned by the public listing
pub const ACTIVE_RIDES_LIMIT: i64 = 50;

/// Ride recurrence values
pub mod frequencies {
    pub const DAILY: &str = "daily";
    pub const WEEKLY: &str = "weekly";
    pub const MONTHLY: &str = "monthly";
    pub const ONE_TIME: &str = "one-time";

    /// All recurrence values
    pub const ALL: &[&str] = &[DAILY, WEEKLY, MONTHLY, ONE_TIME];
}

/// Trip type values
pub mod trip_types {
    pub const ONE_WAY: &str = "one-way";
    pub const ROUND_TRIP: &str = "round-trip";

    /// All trip types
    pub const ALL: &[&str] = &[ONE_WAY, ROUND_TRIP];
}

/// Vehicle type values
pub mod vehicle_types {
    pub const CAR: &str = "car";
    pub const BIKE: &str = "bike";

    /// All vehicle types
    pub const ALL: &[&str] = &[CAR, BIKE];
}

/// Preferred contact method values
pub mod contact_methods {
    pub const WHATSAPP: &str = "whatsapp";
    pub const CALL: &str = "call";
    pub const SMS: &str = "sms";
    pub const EMAIL: &str = "email";

    /// All contact methods
    pub const ALL: &[&str] = &[WHATSAPP, CALL, SMS, EMAIL];
}

/// Ride lifecycle statuses
pub mod ride_statuses {
    pub const ACTIVE: &str = "active";
    pub const COMPLETED: &str = "completed";
    pub const CANCELLED: &str = "cancelled";

    /// All ride statuses
    pub const ALL: &[&str] = &[ACTIVE, COMPLETED, CANCELLED];
}

/// Administrative review states, independent of the operational status
pub mod moderation_statuses {
    pub const PENDING: &str = "pending";
    pub const APPROVED: &str = "approved";
    pub const REJECTED: &str = "rejected";

    /// All moderation statuses
    pub const ALL: &[&str] = &[PENDING, APPROVED, REJECTED];
}

// =============================================================================
// API VERSIONING
// =============================================================================

/// API base path
pub const API_BASE_PATH: &str = "/api";

// =============================================================================
// VALIDATION
// =============================================================================

/// Maximum free-text field length (bio, additional info, admin notes)
pub const MAX_TEXT_FIELD_LENGTH: u64 = 2048;

/// Maximum contact-form message length
pub const MAX_CONTACT_MESSAGE_LENGTH: u64 = 8192;
