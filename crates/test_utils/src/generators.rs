//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating random quote data
//! that maintains domain invariants.

use domain_quote::{BusinessInformation, BusinessType, CoverageType, Industry, Quote, QuoteStatus};
use proptest::prelude::*;

use crate::builders::{TestBusinessInfoBuilder, TestQuoteBuilder};

/// Strategy for generating business types
pub fn business_type_strategy() -> impl Strategy<Value = BusinessType> {
    prop_oneof![
        Just(BusinessType::Retail),
        Just(BusinessType::Restaurant),
        Just(BusinessType::Technology),
        Just(BusinessType::Manufacturing),
        Just(BusinessType::Healthcare),
        Just(BusinessType::Professional),
    ]
}

/// Strategy for generating industries
pub fn industry_strategy() -> impl Strategy<Value = Industry> {
    prop_oneof![
        Just(Industry::FoodService),
        Just(Industry::RetailTrade),
        Just(Industry::Software),
        Just(Industry::HealthcareServices),
        Just(Industry::Consulting),
        Just(Industry::Manufacturing),
    ]
}

/// Strategy for generating quote statuses
pub fn quote_status_strategy() -> impl Strategy<Value = QuoteStatus> {
    prop_oneof![
        Just(QuoteStatus::Draft),
        Just(QuoteStatus::Saved),
        Just(QuoteStatus::Submitted),
        Just(QuoteStatus::Approved),
        Just(QuoteStatus::Rejected),
        Just(QuoteStatus::Expired),
    ]
}

/// Strategy for generating valid two-letter state codes
pub fn state_code_strategy() -> impl Strategy<Value = String> {
    "[A-Z]{2}"
}

/// Strategy for generating business names that satisfy the length rule
pub fn business_name_strategy() -> impl Strategy<Value = String> {
    "[A-Z][a-z]{1,12}( [A-Z][a-z]{1,12}){0,2}"
}

/// Strategy for generating business information that passes every
/// validation rule
pub fn valid_business_info_strategy() -> impl Strategy<Value = BusinessInformation> {
    (
        business_name_strategy(),
        business_type_strategy(),
        industry_strategy(),
        state_code_strategy(),
    )
        .prop_map(|(name, business_type, industry, state)| {
            TestBusinessInfoBuilder::new()
                .with_name(name)
                .with_business_type(business_type)
                .with_industry(industry)
                .with_state(state)
                .build()
        })
}

/// Strategy for generating coverage selections, any subset of the catalog
pub fn coverage_selection_strategy() -> impl Strategy<Value = Vec<CoverageType>> {
    proptest::sample::subsequence(CoverageType::ALL.to_vec(), 0..=CoverageType::ALL.len())
}

/// Strategy for generating valid unsaved drafts with random selections
pub fn draft_quote_strategy() -> impl Strategy<Value = Quote> {
    (valid_business_info_strategy(), coverage_selection_strategy()).prop_map(
        |(info, selections)| {
            let mut builder = TestQuoteBuilder::new().with_business_information(info);
            for coverage_type in selections {
                builder = builder.selected(coverage_type);
            }
            builder.build()
        },
    )
}
