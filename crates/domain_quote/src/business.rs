//! Business information captured on a quote
//!
//! The business profile drives validation and (server-side) risk rating.
//! Wire names and enum values mirror the backend model exactly; the client
//! never invents its own variants.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use quote_kernel::BusinessInfoId;

/// The kind of business requesting coverage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BusinessType {
    Retail,
    Restaurant,
    Technology,
    Manufacturing,
    Healthcare,
    Professional,
}

impl BusinessType {
    /// All selectable values, in display order
    pub const ALL: [BusinessType; 6] = [
        BusinessType::Retail,
        BusinessType::Restaurant,
        BusinessType::Technology,
        BusinessType::Manufacturing,
        BusinessType::Healthcare,
        BusinessType::Professional,
    ];

    /// Human-readable label for selection lists
    pub fn label(&self) -> &'static str {
        match self {
            BusinessType::Retail => "Retail",
            BusinessType::Restaurant => "Restaurant",
            BusinessType::Technology => "Technology",
            BusinessType::Manufacturing => "Manufacturing",
            BusinessType::Healthcare => "Healthcare",
            BusinessType::Professional => "Professional Services",
        }
    }
}

/// The industry segment the business operates in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Industry {
    FoodService,
    RetailTrade,
    Software,
    HealthcareServices,
    Consulting,
    Manufacturing,
}

impl Industry {
    /// All selectable values, in display order
    pub const ALL: [Industry; 6] = [
        Industry::FoodService,
        Industry::RetailTrade,
        Industry::Software,
        Industry::HealthcareServices,
        Industry::Consulting,
        Industry::Manufacturing,
    ];

    /// Human-readable label for selection lists
    pub fn label(&self) -> &'static str {
        match self {
            Industry::FoodService => "Food Service",
            Industry::RetailTrade => "Retail Trade",
            Industry::Software => "Software",
            Industry::HealthcareServices => "Healthcare Services",
            Industry::Consulting => "Consulting",
            Industry::Manufacturing => "Manufacturing",
        }
    }
}

/// Business profile attached to a quote
///
/// `business_type` and `industry` are optional on the client side so a
/// fresh draft can exist before the user has made any selection; the
/// required-field validation rules observe the absence. The backend
/// requires both on save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessInformation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<BusinessInfoId>,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_type: Option<BusinessType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<Industry>,
    #[serde(default)]
    pub state: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDateTime>,
}

impl BusinessInformation {
    /// An empty profile for a fresh draft
    pub fn empty() -> Self {
        Self {
            id: None,
            name: String::new(),
            business_type: None,
            industry: None,
            state: String::new(),
            created_at: None,
            updated_at: None,
        }
    }

    /// Overwrites the editable fields from a form update, preserving the
    /// server-assigned id and timestamps
    pub fn apply_update(&mut self, update: BusinessInfoUpdate) {
        self.name = update.name;
        self.business_type = update.business_type;
        self.industry = update.industry;
        self.state = update.state;
    }
}

impl Default for BusinessInformation {
    fn default() -> Self {
        Self::empty()
    }
}

/// The editable subset of [`BusinessInformation`] pushed by the form layer
///
/// Carries every user-editable field; applying it replaces those fields
/// wholesale while leaving id and timestamps untouched.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BusinessInfoUpdate {
    pub name: String,
    pub business_type: Option<BusinessType>,
    pub industry: Option<Industry>,
    pub state: String,
}

impl BusinessInfoUpdate {
    /// Snapshot of the editable fields of an existing profile
    pub fn from_info(info: &BusinessInformation) -> Self {
        Self {
            name: info.name.clone(),
            business_type: info.business_type,
            industry: info.industry,
            state: info.state.clone(),
        }
    }

    /// Returns the update with the state code normalized
    pub fn normalized(mut self) -> Self {
        self.state = normalize_state(&self.state);
        self
    }
}

/// Normalizes a state code as typed: keeps at most the first two
/// characters and uppercases ASCII letters
pub fn normalize_state(raw: &str) -> String {
    raw.chars().take(2).map(|c| c.to_ascii_uppercase()).collect()
}
