//! The storefront API response envelope.
//!
//! Every service response is `{success, data, message}` (plus `errors` on
//! order validation failures). Responses are parsed into this type at the
//! boundary; a `success: false` or a missing `data` becomes a typed error
//! instead of a silently defaulted field.

use crate::StoreError;
use serde::{Deserialize, Serialize};

/// A `{success, data, message}` service response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Envelope<T> {
    /// Whether the request succeeded.
    pub success: bool,
    /// The payload, present on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Human-readable status message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Validation errors, present on order rejections.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

impl<T> Envelope<T> {
    /// Unwrap the payload, converting failure envelopes into typed errors.
    pub fn into_data(self) -> Result<T, StoreError> {
        self.ensure_success()?
            .data
            .ok_or_else(|| StoreError::Api("missing data in response".to_string()))
    }

    /// Check the success flag, keeping the envelope for payload-less calls.
    pub fn ensure_success(self) -> Result<Self, StoreError> {
        if self.success {
            return Ok(self);
        }
        if let Some(errors) = self.errors.filter(|e| !e.is_empty()) {
            return Err(StoreError::Validation(errors));
        }
        Err(StoreError::Api(
            self.message.unwrap_or_else(|| "request failed".to_string()),
        ))
    }
}
