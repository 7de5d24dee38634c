//! Tests for the REST adapter against an in-process stub of the quoting service

use std::sync::Arc;

use domain_quote::{with_selection_toggled, CoverageType, QuoteBackend, QuoteStatus};
use infra_backend::{ClientConfig, QuoteClient, RestQuoteBackend, SaveOutcome};
use quote_kernel::{PageRequest, QuoteId};
use rust_decimal_macros::dec;
use test_utils::{init_tracing, QuoteFixtures, StubBackend, TestQuoteBuilder};

fn adapter_for(stub: &StubBackend) -> RestQuoteBackend {
    init_tracing();
    let config = ClientConfig {
        base_url: stub.base_url(),
        ..ClientConfig::default()
    };
    RestQuoteBackend::new(&config).unwrap()
}

// ============= WRITE PATH TESTS =============
mod write_tests {
    use super::*;

    #[tokio::test]
    async fn test_create_round_trips_the_stored_quote() {
        let stub = StubBackend::start().await;
        let adapter = adapter_for(&stub);

        let created = adapter
            .create(&QuoteFixtures::draft_ready_to_save())
            .await
            .unwrap();

        assert!(created.id.is_some());
        assert!(created.quote_number.is_some());
        assert_eq!(created.total_premium, dec!(500));
        assert_eq!(created.business_information.name, "Test Business LLC");

        let fetched = adapter.fetch(created.id.unwrap()).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_update_changes_selections_and_premium() {
        let stub = StubBackend::start().await;
        let adapter = adapter_for(&stub);
        let created = adapter
            .create(&QuoteFixtures::draft_ready_to_save())
            .await
            .unwrap();

        let mut edited = created.clone();
        edited.set_coverage_options(with_selection_toggled(
            &created.coverage_options,
            CoverageType::Property,
        ));
        let updated = adapter.update(created.id.unwrap(), &edited).await.unwrap();

        assert_eq!(updated.total_premium, dec!(1250));
        assert!(updated.updated_at.is_some());
    }

    #[tokio::test]
    async fn test_delete_removes_the_draft() {
        let stub = StubBackend::start().await;
        let adapter = adapter_for(&stub);
        let created = adapter
            .create(&QuoteFixtures::draft_ready_to_save())
            .await
            .unwrap();
        let id = created.id.unwrap();

        adapter.delete(id).await.unwrap();

        let err = adapter.fetch(id).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_server_side_rejection_carries_the_field_map() {
        let stub = StubBackend::start().await;
        let adapter = adapter_for(&stub);

        let err = adapter
            .create(&QuoteFixtures::draft_with_invalid_business())
            .await
            .unwrap_err();

        assert!(err.is_rejection());
        let messages = err.violation_messages();
        assert!(messages.contains(&"Business name must be at least 2 characters long".to_string()));
        assert!(messages.contains(&"State must be a 2-letter code".to_string()));
    }

    #[tokio::test]
    async fn test_garbled_write_confirmation_reads_as_ambiguous() {
        let stub = StubBackend::start_garbled().await;
        let adapter = adapter_for(&stub);

        let err = adapter
            .create(&QuoteFixtures::draft_ready_to_save())
            .await
            .unwrap_err();

        assert!(err.is_ambiguous());
        // The write itself went through, only the confirmation was lost.
        assert_eq!(stub.backend().create_calls().await, 1);
    }
}

// ============= READ PATH TESTS =============
mod read_tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_unknown_id_maps_404_to_not_found() {
        let stub = StubBackend::start().await;
        let adapter = adapter_for(&stub);

        let err = adapter.fetch(QuoteId::new(404)).await.unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().contains("not found"));
    }

    #[tokio::test]
    async fn test_list_reads_the_paged_body() {
        let stub = StubBackend::start_seeded(QuoteFixtures::mixed_statuses()).await;
        let adapter = adapter_for(&stub);

        let page = adapter.list(&PageRequest::default()).await.unwrap();
        assert_eq!(page.len(), 4);
        assert_eq!(page.total_elements, 4);

        let short = adapter.list(&PageRequest::new(0, 2)).await.unwrap();
        assert_eq!(short.len(), 2);
        assert_eq!(short.total_elements, 4);
    }

    #[tokio::test]
    async fn test_search_matches_name_fragments_case_insensitively() {
        let stub = StubBackend::start_seeded(QuoteFixtures::mixed_statuses()).await;
        let adapter = adapter_for(&stub);

        let hits = adapter.search_by_name("bistro").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(
            hits.content[0].business_information.name,
            "Bayside Bistro"
        );
    }

    #[tokio::test]
    async fn test_list_by_status_filters_on_the_path_segment() {
        let stub = StubBackend::start_seeded(QuoteFixtures::mixed_statuses()).await;
        let adapter = adapter_for(&stub);

        let submitted = adapter
            .list_by_status(QuoteStatus::Submitted)
            .await
            .unwrap();
        assert_eq!(submitted.len(), 1);
        assert_eq!(submitted[0].id, Some(QuoteId::new(2)));
    }

    #[tokio::test]
    async fn test_list_by_state_filters_on_the_business_state() {
        let stub = StubBackend::start_seeded(QuoteFixtures::mixed_statuses()).await;
        let adapter = adapter_for(&stub);

        let ny = adapter.list_by_state("NY").await.unwrap();
        assert_eq!(ny.len(), 1);

        let ca = adapter.list_by_state("CA").await.unwrap();
        assert_eq!(ca.len(), 3);
    }

    #[tokio::test]
    async fn test_fetch_by_number_uses_the_number_route() {
        let stub = StubBackend::start_seeded(QuoteFixtures::mixed_statuses()).await;
        let adapter = adapter_for(&stub);

        let quote = adapter.fetch_by_number("IQ-20240214103000-0004").await.unwrap();
        assert_eq!(quote.id, Some(QuoteId::new(4)));

        let err = adapter.fetch_by_number("IQ-00000000000000-0000").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_premium_endpoint_returns_a_plain_number() {
        let stub = StubBackend::start_seeded(vec![QuoteFixtures::saved_quote()]).await;
        let adapter = adapter_for(&stub);

        let premium = adapter.premium_of(QuoteId::new(42)).await.unwrap();
        assert_eq!(premium, dec!(500));
    }

    #[tokio::test]
    async fn test_statistics_aggregate_across_statuses() {
        let stub = StubBackend::start_seeded(QuoteFixtures::mixed_statuses()).await;
        let adapter = adapter_for(&stub);

        let stats = adapter.statistics().await.unwrap();
        assert_eq!(stats.total_quotes, 4);
        assert_eq!(stats.submitted_quotes, 1);
        assert_eq!(stats.approved_quotes, 1);
        assert_eq!(stats.rejected_quotes, 1);
        assert!(stats.total_premium_value > dec!(0));
    }
}

// ============= LIFECYCLE PATH TESTS =============
mod lifecycle_tests {
    use super::*;

    #[tokio::test]
    async fn test_submit_approve_walk_over_http() {
        let stub = StubBackend::start_seeded(vec![QuoteFixtures::saved_quote()]).await;
        let adapter = adapter_for(&stub);
        let id = QuoteId::new(42);

        let submitted = adapter.submit(id).await.unwrap();
        assert_eq!(submitted.status, QuoteStatus::Submitted);

        let approved = adapter.approve(id).await.unwrap();
        assert_eq!(approved.status, QuoteStatus::Approved);
    }

    #[tokio::test]
    async fn test_reject_sends_the_reason_as_a_query_parameter() {
        let stub = StubBackend::start_seeded(vec![QuoteFixtures::submitted_quote()]).await;
        let adapter = adapter_for(&stub);

        let rejected = adapter
            .reject(QuoteId::new(42), "missing financials")
            .await
            .unwrap();
        assert_eq!(rejected.status, QuoteStatus::Rejected);
        assert!(rejected
            .underwriter_notes
            .as_deref()
            .unwrap()
            .contains("missing financials"));
    }

    #[tokio::test]
    async fn test_lifecycle_conflict_maps_422_to_conflict() {
        let bare = TestQuoteBuilder::new()
            .with_id(QuoteId::new(7))
            .with_status(QuoteStatus::Saved)
            .build();
        let stub = StubBackend::start_seeded(vec![bare]).await;
        let adapter = adapter_for(&stub);

        let err = adapter.submit(QuoteId::new(7)).await.unwrap_err();
        assert!(matches!(
            err,
            quote_kernel::BackendError::Conflict { .. }
        ));
        assert!(err.to_string().contains("selected coverage option"));
    }
}

// ============= FULL STACK TESTS =============
mod full_stack_tests {
    use super::*;

    #[tokio::test]
    async fn test_client_saves_through_the_real_wire() {
        let stub = StubBackend::start().await;
        let adapter = adapter_for(&stub);
        let client = QuoteClient::new(Arc::new(adapter));

        client.open(QuoteFixtures::draft_ready_to_save());
        let outcome = client.save_current().await.unwrap();

        let SaveOutcome::Saved(saved) = outcome else {
            panic!("expected a saved outcome");
        };
        assert!(saved.id.is_some());
        assert_eq!(client.store().current().unwrap().id, saved.id);
        assert_eq!(stub.backend().create_calls().await, 1);
    }
}
