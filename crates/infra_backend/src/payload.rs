//! Outbound request bodies for quote writes
//!
//! The backend owns ids, quote numbers, validity windows and timestamps;
//! echoing them back on create or update makes it treat nested rows as
//! detached entities. Write bodies therefore carry only the client-editable
//! fields, rebuilt here from the domain [`Quote`].

use rust_decimal::Decimal;
use serde::Serialize;

use domain_quote::{
    BusinessType, CoverageOption, CoverageType, Industry, Quote, QuoteStatus,
};

/// Body of a quote create or update request
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteDraft {
    pub business_information: BusinessInfoDraft,
    pub coverage_options: Vec<CoverageDraft>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_premium: Decimal,
    pub status: QuoteStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub underwriter_notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_rating: Option<String>,
}

/// Editable business fields of a write body
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessInfoDraft {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_type: Option<BusinessType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<Industry>,
    pub state: String,
}

/// Editable coverage fields of a write body
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageDraft {
    pub name: String,
    pub coverage_type: CoverageType,
    #[serde(with = "rust_decimal::serde::float")]
    pub premium: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub is_active: bool,
    pub is_selected: bool,
}

impl QuoteDraft {
    /// Builds the write body for a quote, dropping every backend-owned column
    pub fn from_quote(quote: &Quote) -> Self {
        Self {
            business_information: BusinessInfoDraft {
                name: quote.business_information.name.clone(),
                business_type: quote.business_information.business_type,
                industry: quote.business_information.industry,
                state: quote.business_information.state.clone(),
            },
            coverage_options: quote
                .coverage_options
                .iter()
                .map(CoverageDraft::from_option)
                .collect(),
            total_premium: quote.total_premium,
            status: quote.status,
            underwriter_notes: quote.underwriter_notes.clone(),
            risk_rating: quote.risk_rating.clone(),
        }
    }
}

impl CoverageDraft {
    fn from_option(option: &CoverageOption) -> Self {
        Self {
            name: option.name.clone(),
            coverage_type: option.coverage_type,
            premium: option.premium,
            description: option.description.clone(),
            is_active: option.is_active,
            is_selected: option.is_selected,
        }
    }
}
