//! Pre-built Test Fixtures
//!
//! Provides ready-to-use quote data for common test scenarios. These
//! fixtures are designed to be consistent and predictable for unit tests.

use chrono::{NaiveDate, NaiveDateTime};
use domain_quote::{BusinessType, CoverageType, Industry, Quote, QuoteStatus};
use quote_kernel::QuoteId;

use crate::builders::{TestBusinessInfoBuilder, TestQuoteBuilder};

/// Fixture for temporal test data
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// The instant every persisted fixture was saved (Feb 14, 2024 10:30)
    pub fn saved_at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 2, 14)
            .and_then(|date| date.and_hms_opt(10, 30, 0))
            .expect("valid fixture timestamp")
    }

    /// End of the standard thirty-day validity window
    pub fn valid_until() -> NaiveDateTime {
        Self::saved_at() + chrono::Duration::days(30)
    }
}

/// Fixture for quote test data
pub struct QuoteFixtures;

impl QuoteFixtures {
    /// An unsaved draft that passes every validation rule, with general
    /// liability selected (premium 500)
    pub fn draft_ready_to_save() -> Quote {
        TestQuoteBuilder::new()
            .selected(CoverageType::GeneralLiability)
            .build()
    }

    /// An unsaved draft whose business section fails validation
    pub fn draft_with_invalid_business() -> Quote {
        TestQuoteBuilder::new()
            .with_business_information(
                TestBusinessInfoBuilder::new()
                    .with_name("A")
                    .with_state("California")
                    .build(),
            )
            .build()
    }

    /// A quote the backend has persisted (id 42, status SAVED)
    pub fn saved_quote() -> Quote {
        TestQuoteBuilder::persisted().build()
    }

    /// A quote awaiting an underwriting decision
    pub fn submitted_quote() -> Quote {
        TestQuoteBuilder::submitted().build()
    }

    /// Four persisted quotes spanning the lifecycle, with distinct
    /// businesses, for listing and statistics tests
    pub fn mixed_statuses() -> Vec<Quote> {
        vec![
            TestQuoteBuilder::persisted()
                .with_id(QuoteId::new(1))
                .with_quote_number("IQ-20240214103000-0001")
                .with_business_name("Acme Hardware")
                .selected(CoverageType::Property)
                .build(),
            TestQuoteBuilder::persisted()
                .with_id(QuoteId::new(2))
                .with_quote_number("IQ-20240214103000-0002")
                .with_business_name("Bayside Bistro")
                .with_business_state("NY")
                .with_status(QuoteStatus::Submitted)
                .build(),
            TestQuoteBuilder::persisted()
                .with_id(QuoteId::new(3))
                .with_quote_number("IQ-20240214103000-0003")
                .with_business_name("Cedar Consulting")
                .with_status(QuoteStatus::Approved)
                .with_risk_rating("LOW")
                .build(),
            TestQuoteBuilder::persisted()
                .with_id(QuoteId::new(4))
                .with_quote_number("IQ-20240214103000-0004")
                .with_business_name("Delta Diner")
                .with_status(QuoteStatus::Rejected)
                .with_underwriter_notes("Rejection reason: incomplete records")
                .build(),
        ]
    }
}

/// Fixture for business profile variations
pub struct BusinessFixtures;

impl BusinessFixtures {
    /// A restaurant in New York
    pub fn restaurant() -> domain_quote::BusinessInformation {
        TestBusinessInfoBuilder::new()
            .with_name("Bayside Bistro")
            .with_business_type(BusinessType::Restaurant)
            .with_industry(Industry::FoodService)
            .with_state("NY")
            .build()
    }

    /// A software company in Washington
    pub fn tech_company() -> domain_quote::BusinessInformation {
        TestBusinessInfoBuilder::new()
            .with_name("Evergreen Software Inc")
            .with_business_type(BusinessType::Technology)
            .with_industry(Industry::Software)
            .with_state("WA")
            .build()
    }
}
