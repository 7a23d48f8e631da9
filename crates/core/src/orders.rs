//! Client and paella order rules: statuses, defaults and input validation.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Deposit applied when an order is created without one, and shown for
/// orders whose stored deposit is unset.
pub const DEFAULT_DEPOSIT: f64 = 10.0;

/// Rice type preselected on new orders.
pub const DEFAULT_RICE_TYPE: &str = "Mixta";

/// A paella is never cooked for fewer people than this.
pub const MIN_SERVINGS: i32 = 2;

/// Maximum length of a rice type label.
pub const MAX_RICE_TYPE_LENGTH: usize = 100;

pub const CLIENT_STATUS_PENDING: &str = "pending";
pub const CLIENT_STATUS_DELIVERED: &str = "delivered";
pub const CLIENT_STATUS_RETURNED: &str = "returned";

/// All valid client statuses.
pub const VALID_CLIENT_STATUSES: &[&str] = &[
    CLIENT_STATUS_PENDING,
    CLIENT_STATUS_DELIVERED,
    CLIENT_STATUS_RETURNED,
];

pub const PAELLA_STATUS_PENDING: &str = "pending";
pub const PAELLA_STATUS_COOKING: &str = "cooking";
pub const PAELLA_STATUS_READY: &str = "ready";
pub const PAELLA_STATUS_DELIVERED: &str = "delivered";
pub const PAELLA_STATUS_RETURNED: &str = "returned";

/// All valid paella statuses, in lifecycle order.
pub const VALID_PAELLA_STATUSES: &[&str] = &[
    PAELLA_STATUS_PENDING,
    PAELLA_STATUS_COOKING,
    PAELLA_STATUS_READY,
    PAELLA_STATUS_DELIVERED,
    PAELLA_STATUS_RETURNED,
];

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Coarse status of a client (all of their paellas taken as a whole).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientStatus {
    Pending,
    Delivered,
    Returned,
}

impl ClientStatus {
    /// Return the database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => CLIENT_STATUS_PENDING,
            Self::Delivered => CLIENT_STATUS_DELIVERED,
            Self::Returned => CLIENT_STATUS_RETURNED,
        }
    }

    /// Parse from a string, returning an error for unknown statuses.
    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            CLIENT_STATUS_PENDING => Ok(Self::Pending),
            CLIENT_STATUS_DELIVERED => Ok(Self::Delivered),
            CLIENT_STATUS_RETURNED => Ok(Self::Returned),
            other => Err(CoreError::Validation(format!(
                "Unknown client status: '{other}'. Valid statuses: {}",
                VALID_CLIENT_STATUSES.join(", ")
            ))),
        }
    }
}

/// Fine-grained status of a single paella order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaellaStatus {
    Pending,
    Cooking,
    Ready,
    Delivered,
    Returned,
}

impl PaellaStatus {
    /// Return the database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => PAELLA_STATUS_PENDING,
            Self::Cooking => PAELLA_STATUS_COOKING,
            Self::Ready => PAELLA_STATUS_READY,
            Self::Delivered => PAELLA_STATUS_DELIVERED,
            Self::Returned => PAELLA_STATUS_RETURNED,
        }
    }

    /// Parse from a string, returning an error for unknown statuses.
    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            PAELLA_STATUS_PENDING => Ok(Self::Pending),
            PAELLA_STATUS_COOKING => Ok(Self::Cooking),
            PAELLA_STATUS_READY => Ok(Self::Ready),
            PAELLA_STATUS_DELIVERED => Ok(Self::Delivered),
            PAELLA_STATUS_RETURNED => Ok(Self::Returned),
            other => Err(CoreError::Validation(format!(
                "Unknown paella status: '{other}'. Valid statuses: {}",
                VALID_PAELLA_STATUSES.join(", ")
            ))),
        }
    }

    /// Orders still in the kitchen (pending or cooking).
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Pending | Self::Cooking)
    }
}

// ---------------------------------------------------------------------------
// Validation functions
// ---------------------------------------------------------------------------

/// Validate the number of servings of a paella.
pub fn validate_servings(servings: i32) -> Result<(), CoreError> {
    if servings < MIN_SERVINGS {
        return Err(CoreError::Validation(format!(
            "A paella must serve at least {MIN_SERVINGS} people"
        )));
    }
    Ok(())
}

/// Validate a rice type label: non-blank and within the length limit.
pub fn validate_rice_type(rice_type: &str) -> Result<(), CoreError> {
    if rice_type.trim().is_empty() {
        return Err(CoreError::Validation("Rice type cannot be empty".to_string()));
    }
    if rice_type.len() > MAX_RICE_TYPE_LENGTH {
        return Err(CoreError::Validation(format!(
            "Rice type exceeds maximum length of {MAX_RICE_TYPE_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate a client name part (first or last name).
pub fn validate_client_name(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Treat blank optional text as absent, the way the forms submit it.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
