//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Response for GET /api/state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateResponse {
    pub last_reset: DateTime<Utc>,
    pub success: bool,
}

impl StateResponse {
    pub fn new(last_reset: DateTime<Utc>) -> Self {
        Self {
            last_reset,
            success: true,
        }
    }
}

/// Response for POST /api/reset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_reset: Option<DateTime<Utc>>,
    pub message: String,
    /// Present when the reset succeeded in memory but could not be
    /// persisted; the caller still gets a successful reset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl ResetResponse {
    pub fn ok(last_reset: DateTime<Utc>) -> Self {
        Self {
            success: true,
            last_reset: Some(last_reset),
            message: "Timer reset successfully".to_string(),
            warning: None,
        }
    }

    pub fn ok_not_durable(last_reset: DateTime<Utc>) -> Self {
        Self {
            warning: Some("reset not persisted; state will not survive a restart".to_string()),
            ..Self::ok(last_reset)
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
