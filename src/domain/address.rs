use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::errors::DomainError;

#[derive(Debug, Clone)]
pub struct Address {
    pub id: Uuid,
    pub user_id: Uuid,
    pub fields: AddressFields,
    pub created_at: DateTime<Utc>,
}

/// The user-editable part of an address. Orders keep a copy of these values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressFields {
    pub first_name: String,
    pub last_name: String,
    pub line1: String,
    pub line2: Option<String>,
    pub landmark: String,
    pub zip_code: i32,
    pub state: String,
    pub country: String,
    pub mobile: String,
}

/// Partial update; `None` leaves a field unchanged. `line2: Some(None)` clears it.
#[derive(Debug, Clone, Default)]
pub struct AddressPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub line1: Option<String>,
    pub line2: Option<Option<String>>,
    pub landmark: Option<String>,
    pub zip_code: Option<i32>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub mobile: Option<String>,
}

fn check_len(field: &str, value: &str, max: usize, required: bool) -> Result<(), DomainError> {
    if required && value.trim().is_empty() {
        return Err(DomainError::invalid(format!("{} may not be blank", field)));
    }
    if value.chars().count() > max {
        return Err(DomainError::invalid(format!(
            "{} must have at most {} characters",
            field, max
        )));
    }
    Ok(())
}

impl AddressFields {
    pub fn validate(&self) -> Result<(), DomainError> {
        check_len("first_name", &self.first_name, 50, true)?;
        check_len("last_name", &self.last_name, 50, true)?;
        check_len("line1", &self.line1, 255, true)?;
        if let Some(line2) = &self.line2 {
            check_len("line2", line2, 255, false)?;
        }
        check_len("landmark", &self.landmark, 255, true)?;
        check_len("state", &self.state, 50, true)?;
        check_len("country", &self.country, 50, true)?;
        if self.zip_code < 0 {
            return Err(DomainError::invalid("zip_code must be non-negative"));
        }
        if self.mobile.is_empty()
            || self.mobile.len() > 10
            || !self.mobile.chars().all(|c| c.is_ascii_digit())
        {
            return Err(DomainError::invalid("mobile must be 1 to 10 digits"));
        }
        Ok(())
    }

    pub fn apply(&mut self, patch: AddressPatch) {
        if let Some(v) = patch.first_name {
            self.first_name = v;
        }
        if let Some(v) = patch.last_name {
            self.last_name = v;
        }
        if let Some(v) = patch.line1 {
            self.line1 = v;
        }
        if let Some(v) = patch.line2 {
            self.line2 = v;
        }
        if let Some(v) = patch.landmark {
            self.landmark = v;
        }
        if let Some(v) = patch.zip_code {
            self.zip_code = v;
        }
        if let Some(v) = patch.state {
            self.state = v;
        }
        if let Some(v) = patch.country {
            self.country = v;
        }
        if let Some(v) = patch.mobile {
            self.mobile = v;
        }
    }
}
