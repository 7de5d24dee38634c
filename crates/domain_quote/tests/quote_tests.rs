//! Tests for the quote aggregate - lifecycle, premium derivation, and wire format

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use domain_quote::coverage::{with_selection_toggled, CoverageType};
use domain_quote::{Quote, QuoteError, QuoteStatus};

// ============= STATUS LIFECYCLE TESTS =============
mod lifecycle_tests {
    use super::*;

    #[test]
    fn test_full_approval_path() {
        let mut quote = Quote::draft();
        quote.set_coverage_options(with_selection_toggled(
            &quote.coverage_options,
            CoverageType::GeneralLiability,
        ));

        quote.transition_to(QuoteStatus::Saved).unwrap();
        quote.transition_to(QuoteStatus::Submitted).unwrap();
        quote.transition_to(QuoteStatus::Approved).unwrap();

        assert_eq!(quote.status, QuoteStatus::Approved);
        assert!(quote.status.is_terminal());
    }

    #[test]
    fn test_saved_quote_can_reopen_as_draft() {
        let mut quote = Quote::draft();
        quote.transition_to(QuoteStatus::Saved).unwrap();
        quote.transition_to(QuoteStatus::Draft).unwrap();
        assert_eq!(quote.status, QuoteStatus::Draft);
    }

    #[test]
    fn test_terminal_statuses_admit_nothing() {
        for terminal in [
            QuoteStatus::Approved,
            QuoteStatus::Rejected,
            QuoteStatus::Expired,
        ] {
            for next in [
                QuoteStatus::Draft,
                QuoteStatus::Saved,
                QuoteStatus::Submitted,
                QuoteStatus::Approved,
                QuoteStatus::Rejected,
                QuoteStatus::Expired,
            ] {
                assert!(
                    !terminal.can_transition_to(next),
                    "{terminal} must not move to {next}"
                );
            }
        }
    }

    #[test]
    fn test_transition_error_names_both_statuses() {
        let mut quote = Quote::draft();
        let err = quote.transition_to(QuoteStatus::Approved).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid status transition from DRAFT to APPROVED"
        );
    }

    #[test]
    fn test_submission_gate_reports_missing_selection() {
        let mut quote = Quote::draft();
        quote.transition_to(QuoteStatus::Saved).unwrap();

        assert_eq!(
            quote.ensure_submittable().unwrap_err(),
            QuoteError::NoSelectedCoverage
        );
    }
}

// ============= PREMIUM DERIVATION TESTS =============
mod premium_tests {
    use super::*;

    #[test]
    fn test_selection_walk_accumulates_standard_premiums() {
        let mut quote = Quote::draft();
        assert_eq!(quote.total_premium, Decimal::ZERO);

        quote.set_coverage_options(with_selection_toggled(
            &quote.coverage_options,
            CoverageType::GeneralLiability,
        ));
        assert_eq!(quote.total_premium, dec!(500));

        quote.set_coverage_options(with_selection_toggled(
            &quote.coverage_options,
            CoverageType::Property,
        ));
        assert_eq!(quote.total_premium, dec!(1250));

        quote.set_coverage_options(with_selection_toggled(
            &quote.coverage_options,
            CoverageType::Additional,
        ));
        assert_eq!(quote.total_premium, dec!(1550));

        quote.set_coverage_options(with_selection_toggled(
            &quote.coverage_options,
            CoverageType::Property,
        ));
        assert_eq!(quote.total_premium, dec!(800));
    }

    #[test]
    fn test_total_ignores_unselected_options() {
        let quote = Quote::draft();
        let sum: Decimal = quote
            .coverage_options
            .iter()
            .map(|option| option.premium)
            .sum();

        // Every option carries a premium but none is selected yet.
        assert_eq!(sum, dec!(1550));
        assert_eq!(quote.total_premium, Decimal::ZERO);
    }

    use proptest::prelude::*;

    proptest! {
        /// The stored total always equals the sum over selected options,
        /// whatever subset is selected.
        #[test]
        fn prop_total_matches_selected_sum(
            general in any::<bool>(),
            property in any::<bool>(),
            additional in any::<bool>(),
        ) {
            let mut quote = Quote::draft();
            let mut options = quote.coverage_options.clone();
            options[0].is_selected = general;
            options[1].is_selected = property;
            options[2].is_selected = additional;
            quote.set_coverage_options(options);

            let expected: Decimal = quote
                .coverage_options
                .iter()
                .filter(|option| option.is_selected)
                .map(|option| option.premium)
                .sum();
            prop_assert_eq!(quote.total_premium, expected);
        }
    }
}

// ============= WIRE FORMAT TESTS =============
mod wire_tests {
    use super::*;
    use quote_kernel::QuoteId;

    #[test]
    fn test_round_trip_preserves_a_populated_quote() {
        let mut quote = Quote::draft();
        quote.id = Some(QuoteId::new(7));
        quote.business_information.name = "Test Business LLC".to_string();
        quote.business_information.state = "CA".to_string();
        quote.quote_number = Some("IQ-20240115103000-0007".to_string());
        quote.underwriter_notes = Some("Review fire code".to_string());
        quote.set_coverage_options(with_selection_toggled(
            &quote.coverage_options,
            CoverageType::GeneralLiability,
        ));

        let json = serde_json::to_string(&quote).unwrap();
        let back: Quote = serde_json::from_str(&json).unwrap();
        assert_eq!(back, quote);
    }

    #[test]
    fn test_premium_crosses_the_wire_as_a_number() {
        let mut quote = Quote::draft();
        quote.set_coverage_options(with_selection_toggled(
            &quote.coverage_options,
            CoverageType::Property,
        ));

        let value = serde_json::to_value(&quote).unwrap();
        assert_eq!(value["totalPremium"], serde_json::json!(750.0));
        assert_eq!(
            value["coverageOptions"][1]["premium"],
            serde_json::json!(750.0)
        );
    }

    #[test]
    fn test_unpersisted_fields_stay_off_the_wire() {
        let quote = Quote::draft();
        let value = serde_json::to_value(&quote).unwrap();

        for absent in ["id", "quoteNumber", "validUntil", "createdAt", "updatedAt"] {
            assert!(value.get(absent).is_none(), "{absent} should be absent");
        }
    }

    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_status_serde_round_trips(index in 0usize..6) {
            let statuses = [
                QuoteStatus::Draft,
                QuoteStatus::Saved,
                QuoteStatus::Submitted,
                QuoteStatus::Approved,
                QuoteStatus::Rejected,
                QuoteStatus::Expired,
            ];
            let status = statuses[index];
            let json = serde_json::to_string(&status).unwrap();
            let back: QuoteStatus = serde_json::from_str(&json).unwrap();
            prop_assert_eq!(back, status);
            prop_assert_eq!(json, format!("\"{}\"", status.as_str()));
        }
    }
}
