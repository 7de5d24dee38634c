//! Test Data Builders
//!
//! Provides builder patterns for constructing test quotes with sensible
//! defaults. These builders allow tests to specify only the relevant fields
//! while using defaults for everything else.

use chrono::NaiveDateTime;
use domain_quote::{
    default_catalog, with_selection_toggled, BusinessInformation, BusinessType, CoverageType,
    Industry, Quote, QuoteStatus,
};
use quote_kernel::{BusinessInfoId, QuoteId};

use crate::fixtures::TemporalFixtures;

/// Builder for constructing test business information
pub struct TestBusinessInfoBuilder {
    id: Option<BusinessInfoId>,
    name: String,
    business_type: Option<BusinessType>,
    industry: Option<Industry>,
    state: String,
}

impl Default for TestBusinessInfoBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestBusinessInfoBuilder {
    /// Creates a new builder with a valid retail business
    pub fn new() -> Self {
        Self {
            id: None,
            name: "Test Business LLC".to_string(),
            business_type: Some(BusinessType::Retail),
            industry: Some(Industry::RetailTrade),
            state: "CA".to_string(),
        }
    }

    /// A completely blank profile, as a fresh draft starts with
    pub fn blank() -> Self {
        Self {
            id: None,
            name: String::new(),
            business_type: None,
            industry: None,
            state: String::new(),
        }
    }

    /// Sets the backend-assigned id
    pub fn with_id(mut self, id: BusinessInfoId) -> Self {
        self.id = Some(id);
        self
    }

    /// Sets the business name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the business type
    pub fn with_business_type(mut self, business_type: BusinessType) -> Self {
        self.business_type = Some(business_type);
        self
    }

    /// Clears the business type, violating the required-field rule
    pub fn without_business_type(mut self) -> Self {
        self.business_type = None;
        self
    }

    /// Sets the industry
    pub fn with_industry(mut self, industry: Industry) -> Self {
        self.industry = Some(industry);
        self
    }

    /// Clears the industry, violating the required-field rule
    pub fn without_industry(mut self) -> Self {
        self.industry = None;
        self
    }

    /// Sets the state code
    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = state.into();
        self
    }

    /// Builds the business information
    pub fn build(self) -> BusinessInformation {
        BusinessInformation {
            id: self.id,
            name: self.name,
            business_type: self.business_type,
            industry: self.industry,
            state: self.state,
            created_at: None,
            updated_at: None,
        }
    }
}

/// Builder for constructing test quotes
///
/// Starts from a fresh draft with a valid business section and nothing
/// selected; `selected` toggles catalog entries, `persisted` dresses the
/// quote with the backend-assigned fields a saved record carries.
pub struct TestQuoteBuilder {
    id: Option<QuoteId>,
    business_information: BusinessInformation,
    selected: Vec<CoverageType>,
    status: QuoteStatus,
    risk_rating: Option<String>,
    underwriter_notes: Option<String>,
    quote_number: Option<String>,
    valid_until: Option<NaiveDateTime>,
    created_at: Option<NaiveDateTime>,
    updated_at: Option<NaiveDateTime>,
}

impl Default for TestQuoteBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestQuoteBuilder {
    /// Creates a new builder for an unsaved draft with a valid business
    /// section and no coverage selected
    pub fn new() -> Self {
        Self {
            id: None,
            business_information: TestBusinessInfoBuilder::new().build(),
            selected: Vec::new(),
            status: QuoteStatus::Draft,
            risk_rating: None,
            underwriter_notes: None,
            quote_number: None,
            valid_until: None,
            created_at: None,
            updated_at: None,
        }
    }

    /// A saved quote as the backend would return it, with general
    /// liability selected
    pub fn persisted() -> Self {
        Self::new()
            .with_id(QuoteId::new(42))
            .with_quote_number("IQ-20240214103000-0042")
            .with_status(QuoteStatus::Saved)
            .selected(CoverageType::GeneralLiability)
            .with_timestamps(TemporalFixtures::saved_at())
    }

    /// A quote sitting in underwriting
    pub fn submitted() -> Self {
        Self::persisted().with_status(QuoteStatus::Submitted)
    }

    /// Sets the backend-assigned id
    pub fn with_id(mut self, id: QuoteId) -> Self {
        self.id = Some(id);
        self
    }

    /// Replaces the business section
    pub fn with_business_information(mut self, info: BusinessInformation) -> Self {
        self.business_information = info;
        self
    }

    /// Sets the business name, keeping the rest of the default profile
    pub fn with_business_name(mut self, name: impl Into<String>) -> Self {
        self.business_information.name = name.into();
        self
    }

    /// Sets the business state, keeping the rest of the default profile
    pub fn with_business_state(mut self, state: impl Into<String>) -> Self {
        self.business_information.state = state.into();
        self
    }

    /// Toggles the selection flag on one catalog entry
    pub fn selected(mut self, coverage_type: CoverageType) -> Self {
        self.selected.push(coverage_type);
        self
    }

    /// Sets the lifecycle status
    pub fn with_status(mut self, status: QuoteStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the risk rating
    pub fn with_risk_rating(mut self, rating: impl Into<String>) -> Self {
        self.risk_rating = Some(rating.into());
        self
    }

    /// Sets the underwriter notes
    pub fn with_underwriter_notes(mut self, notes: impl Into<String>) -> Self {
        self.underwriter_notes = Some(notes.into());
        self
    }

    /// Sets the quote number
    pub fn with_quote_number(mut self, number: impl Into<String>) -> Self {
        self.quote_number = Some(number.into());
        self
    }

    /// Sets created/updated to the given instant and the validity window
    /// to thirty days after it
    pub fn with_timestamps(mut self, at: NaiveDateTime) -> Self {
        self.created_at = Some(at);
        self.updated_at = Some(at);
        self.valid_until = Some(at + chrono::Duration::days(30));
        self
    }

    /// Builds the quote with the premium recalculated from the selections
    pub fn build(self) -> Quote {
        let mut options = default_catalog();
        for coverage_type in self.selected {
            options = with_selection_toggled(&options, coverage_type);
        }
        let mut quote = Quote {
            id: self.id,
            business_information: self.business_information,
            coverage_options: options,
            total_premium: rust_decimal::Decimal::ZERO,
            status: self.status,
            risk_rating: self.risk_rating,
            underwriter_notes: self.underwriter_notes,
            quote_number: self.quote_number,
            valid_until: self.valid_until,
            created_at: self.created_at,
            updated_at: self.updated_at,
        };
        quote.recalculate_premium();
        quote
    }
}
