//! Address types.

use crate::error::CommerceError;
use crate::ids::AddressId;
use serde::{Deserialize, Serialize};

/// A shipping address.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Address {
    /// Address ID (None for unsaved addresses).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<AddressId>,
    /// Recipient full name.
    pub full_name: String,
    /// Contact phone number.
    pub phone: String,
    /// Street address.
    pub line1: String,
    /// Apartment, floor, etc.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line2: Option<String>,
    /// City.
    pub city: String,
    /// District or province.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// Country code (e.g., "VN").
    pub country: String,
}

impl Address {
    /// Create an address with the required fields.
    pub fn new(
        full_name: impl Into<String>,
        phone: impl Into<String>,
        line1: impl Into<String>,
        city: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            full_name: full_name.into(),
            phone: phone.into(),
            line1: line1.into(),
            line2: None,
            city: city.into(),
            region: None,
            country: country.into(),
        }
    }

    /// Which required fields are empty.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.full_name.is_empty() {
            missing.push("full name");
        }
        if self.phone.is_empty() {
            missing.push("phone");
        }
        if self.line1.is_empty() {
            missing.push("street address");
        }
        if self.city.is_empty() {
            missing.push("city");
        }
        if self.country.is_empty() {
            missing.push("country");
        }
        missing
    }

    /// Check if every required field is present.
    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Error with the missing fields, or `Ok` when complete.
    pub fn validate(&self) -> Result<(), CommerceError> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(CommerceError::IncompleteAddress(missing.join(", ")))
        }
    }

    /// Format as a single line.
    pub fn one_line(&self) -> String {
        let mut parts = vec![self.line1.clone()];
        if let Some(ref line2) = self.line2 {
            parts.push(line2.clone());
        }
        parts.push(self.city.clone());
        if let Some(ref region) = self.region {
            parts.push(region.clone());
        }
        parts.push(self.country.clone());
        parts.join(", ")
    }
}
