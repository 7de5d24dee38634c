//! Coverage options and the standard catalog
//!
//! Every quote carries the full catalog of coverage options, selected or
//! not. Premiums are fixed per coverage type; selection only decides
//! whether an option counts toward the total.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use quote_kernel::CoverageOptionId;

/// The insurable categories offered to small businesses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CoverageType {
    GeneralLiability,
    Property,
    Additional,
}

impl CoverageType {
    /// Catalog order
    pub const ALL: [CoverageType; 3] = [
        CoverageType::GeneralLiability,
        CoverageType::Property,
        CoverageType::Additional,
    ];

    /// Fixed premium for this coverage type in the standard catalog
    pub fn standard_premium(&self) -> Decimal {
        match self {
            CoverageType::GeneralLiability => dec!(500),
            CoverageType::Property => dec!(750),
            CoverageType::Additional => dec!(300),
        }
    }

    /// Display name used in the catalog and selection panel
    pub fn display_name(&self) -> &'static str {
        match self {
            CoverageType::GeneralLiability => "General Liability",
            CoverageType::Property => "Property Insurance",
            CoverageType::Additional => "Additional Coverage Options",
        }
    }

    /// Descriptive text shown under the option
    pub fn description(&self) -> &'static str {
        match self {
            CoverageType::GeneralLiability => {
                "General liability insurance protects your business from claims of \
                 bodily injury, property damage, and personal injury."
            }
            CoverageType::Property => {
                "Property insurance covers your business property including buildings, \
                 equipment, inventory, and furniture against damage or theft."
            }
            CoverageType::Additional => {
                "Additional coverage options include cyber liability, employment \
                 practices liability, and other specialized coverages."
            }
        }
    }
}

/// One insurable category on a quote with its selection flag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageOption {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<CoverageOptionId>,
    pub name: String,
    pub coverage_type: CoverageType,
    /// Fixed amount this option adds to the total when selected.
    /// Records without a premium read as zero.
    #[serde(default, with = "rust_decimal::serde::float")]
    pub premium: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub is_active: bool,
    pub is_selected: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDateTime>,
}

impl CoverageOption {
    /// The standard (deselected) catalog entry for a coverage type
    pub fn standard(coverage_type: CoverageType) -> Self {
        Self {
            id: None,
            name: coverage_type.display_name().to_string(),
            coverage_type,
            premium: coverage_type.standard_premium(),
            description: Some(coverage_type.description().to_string()),
            is_active: true,
            is_selected: false,
            created_at: None,
            updated_at: None,
        }
    }
}

/// The default catalog every fresh draft starts with, in catalog order
pub fn default_catalog() -> Vec<CoverageOption> {
    CoverageType::ALL.iter().map(|t| CoverageOption::standard(*t)).collect()
}

/// Returns a new collection with the selection flag flipped on the option
/// matching `coverage_type`, leaving every other entry untouched
pub fn with_selection_toggled(
    options: &[CoverageOption],
    coverage_type: CoverageType,
) -> Vec<CoverageOption> {
    options
        .iter()
        .map(|option| {
            let mut next = option.clone();
            if next.coverage_type == coverage_type {
                next.is_selected = !next.is_selected;
            }
            next
        })
        .collect()
}
