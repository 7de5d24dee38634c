//! Tests for business information validation - message text, ordering, and field rules

use domain_quote::business::{BusinessInfoUpdate, BusinessType, Industry};
use domain_quote::validation::{BusinessField, BusinessInfoValidator};

fn complete_update() -> BusinessInfoUpdate {
    BusinessInfoUpdate {
        name: "Test Business LLC".to_string(),
        business_type: Some(BusinessType::Retail),
        industry: Some(Industry::RetailTrade),
        state: "CA".to_string(),
    }
}

// ============= MESSAGE TESTS =============
mod message_tests {
    use super::*;

    #[test]
    fn test_each_rule_has_one_fixed_message() {
        let empty = BusinessInfoUpdate {
            name: String::new(),
            business_type: None,
            industry: None,
            state: String::new(),
        };

        let expectations = [
            (
                BusinessField::Name,
                "Business name must be at least 2 characters long",
            ),
            (BusinessField::BusinessType, "Business type is required"),
            (BusinessField::Industry, "Industry is required"),
            (BusinessField::State, "State must be a 2-letter code"),
        ];

        for (field, message) in expectations {
            assert_eq!(
                BusinessInfoValidator::field_error(field, &empty).as_deref(),
                Some(message)
            );
        }
    }

    #[test]
    fn test_aggregate_reports_messages_in_form_order() {
        let mut update = complete_update();
        update.name = "X".to_string();
        update.state = "cal".to_string();

        let result = BusinessInfoValidator::validate(&update);
        assert!(!result.is_valid);
        assert_eq!(
            result.errors,
            vec![
                "Business name must be at least 2 characters long".to_string(),
                "State must be a 2-letter code".to_string(),
            ]
        );
    }

    #[test]
    fn test_valid_data_produces_no_messages() {
        let result = BusinessInfoValidator::validate(&complete_update());
        assert!(result.is_valid);
        assert!(result.errors.is_empty());
    }
}

// ============= FIELD RULE TESTS =============
mod field_rule_tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_two_character_name_is_the_boundary() {
        let mut update = complete_update();

        update.name = "AB".to_string();
        assert!(BusinessInfoValidator::field_error(BusinessField::Name, &update).is_none());

        update.name = "A".to_string();
        assert!(BusinessInfoValidator::field_error(BusinessField::Name, &update).is_some());
    }

    #[test]
    fn test_state_rule_accepts_every_plain_two_letter_code() {
        let mut update = complete_update();
        for code in ["CA", "NY", "TX", "WA"] {
            update.state = code.to_string();
            assert!(
                BusinessInfoValidator::field_error(BusinessField::State, &update).is_none(),
                "{code} should pass"
            );
        }
    }

    proptest! {
        #[test]
        fn prop_generated_two_letter_codes_pass(code in "[A-Z]{2}") {
            let mut update = complete_update();
            update.state = code;
            prop_assert!(
                BusinessInfoValidator::field_error(BusinessField::State, &update).is_none()
            );
        }

        #[test]
        fn prop_lowercase_or_long_codes_fail(code in "[a-z]{2}|[A-Z]{3,6}") {
            let mut update = complete_update();
            update.state = code;
            prop_assert!(
                BusinessInfoValidator::field_error(BusinessField::State, &update).is_some()
            );
        }

        #[test]
        fn prop_names_of_two_or_more_printable_chars_pass(name in "[a-zA-Z0-9 ]{2,40}") {
            prop_assume!(name.trim().chars().count() >= 2);
            let mut update = complete_update();
            update.name = name;
            prop_assert!(
                BusinessInfoValidator::field_error(BusinessField::Name, &update).is_none()
            );
        }
    }
}
