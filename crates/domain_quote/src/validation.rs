//! Business information validation rules
//!
//! This module validates the user-editable business fields before a quote
//! is allowed to reach the backend, mirroring the server-side constraints
//! so that failures surface immediately in the form.
//!
//! # Validation Rules
//!
//! - Business name must be at least 2 characters after trimming
//! - Business type must be chosen
//! - Industry must be chosen
//! - State must be a 2-letter uppercase code

use crate::business::{BusinessInfoUpdate, BusinessInformation};

/// Result of validating business information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    /// Whether the data passed every rule
    pub is_valid: bool,
    /// Human-readable error messages, in field order
    pub errors: Vec<String>,
}

impl ValidationResult {
    /// Creates a successful validation result
    pub fn ok() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
        }
    }

    /// Creates a failed validation result with errors
    pub fn fail(errors: Vec<String>) -> Self {
        Self {
            is_valid: false,
            errors,
        }
    }

    /// Adds an error to the result
    pub fn add_error(&mut self, error: impl Into<String>) {
        self.errors.push(error.into());
        self.is_valid = false;
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::ok()
    }
}

/// The user-editable business fields, in the order they appear on the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BusinessField {
    Name,
    BusinessType,
    Industry,
    State,
}

impl BusinessField {
    /// Every field, in form order. Aggregate validation reports errors in
    /// this order.
    pub const ALL: [BusinessField; 4] = [
        BusinessField::Name,
        BusinessField::BusinessType,
        BusinessField::Industry,
        BusinessField::State,
    ];

    /// The wire name of the field, matching the backend's camelCase keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            BusinessField::Name => "name",
            BusinessField::BusinessType => "businessType",
            BusinessField::Industry => "industry",
            BusinessField::State => "state",
        }
    }
}

/// Validator for business information
///
/// # Examples
///
/// ```rust
/// use domain_quote::business::BusinessInfoUpdate;
/// use domain_quote::validation::BusinessInfoValidator;
///
/// let update = BusinessInfoUpdate {
///     name: "Test Business LLC".to_string(),
///     business_type: None,
///     industry: None,
///     state: "CA".to_string(),
/// };
/// let result = BusinessInfoValidator::validate(&update);
/// assert!(!result.is_valid);
/// assert_eq!(result.errors.len(), 2);
/// ```
pub struct BusinessInfoValidator;

impl BusinessInfoValidator {
    /// Validates every field, collecting errors in form order.
    pub fn validate(update: &BusinessInfoUpdate) -> ValidationResult {
        let mut result = ValidationResult::ok();
        for field in BusinessField::ALL {
            if let Some(message) = Self::field_error(field, update) {
                result.add_error(message);
            }
        }
        result
    }

    /// Validates a stored business section by projecting its editable
    /// fields.
    pub fn validate_info(info: &BusinessInformation) -> ValidationResult {
        Self::validate(&BusinessInfoUpdate::from_info(info))
    }

    /// Checks a single field, returning its error message when the rule
    /// fails. Used by the form to surface errors next to the field being
    /// edited.
    pub fn field_error(field: BusinessField, update: &BusinessInfoUpdate) -> Option<String> {
        match field {
            BusinessField::Name => {
                if update.name.trim().chars().count() < 2 {
                    Some("Business name must be at least 2 characters long".to_string())
                } else {
                    None
                }
            }
            BusinessField::BusinessType => {
                if update.business_type.is_none() {
                    Some("Business type is required".to_string())
                } else {
                    None
                }
            }
            BusinessField::Industry => {
                if update.industry.is_none() {
                    Some("Industry is required".to_string())
                } else {
                    None
                }
            }
            BusinessField::State => {
                let code = update.state.trim();
                if code.len() == 2 && code.chars().all(|c| c.is_ascii_uppercase()) {
                    None
                } else {
                    Some("State must be a 2-letter code".to_string())
                }
            }
        }
    }
}
