//! In-Process Backend Stub
//!
//! Serves the quoting service's REST surface on an ephemeral local port,
//! backed by the in-memory mock adapter, so the HTTP client stack can be
//! exercised over a real socket without a running backend.
//!
//! The mock already applies the service's validation and lifecycle rules;
//! the handlers here only translate between the wire protocol and the
//! port, including the service's error body shapes.

use std::net::SocketAddr;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use domain_quote::ports::mock::MockQuoteBackend;
use domain_quote::{Quote, QuoteBackend, QuoteStatus};
use quote_kernel::{BackendError, Page, PageRequest, QuoteId};

/// State shared across stub handlers
#[derive(Clone)]
struct StubState {
    backend: MockQuoteBackend,
    garbled_writes: bool,
}

/// A stub quoting service bound to an ephemeral local port.
///
/// Dropping the stub shuts the server down.
#[derive(Debug)]
pub struct StubBackend {
    addr: SocketAddr,
    backend: MockQuoteBackend,
    handle: JoinHandle<()>,
}

impl StubBackend {
    /// Boots a stub with an empty store
    pub async fn start() -> Self {
        Self::boot(MockQuoteBackend::new(), false).await
    }

    /// Boots a stub pre-populated with the given quotes
    pub async fn start_seeded(quotes: Vec<Quote>) -> Self {
        Self::boot(MockQuoteBackend::with_quotes(quotes).await, false).await
    }

    /// Boots a stub whose write confirmations come back unreadable,
    /// for exercising ambiguous-outcome handling
    pub async fn start_garbled() -> Self {
        Self::boot(MockQuoteBackend::new(), true).await
    }

    async fn boot(backend: MockQuoteBackend, garbled_writes: bool) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind stub listener");
        let addr = listener.local_addr().expect("stub listener address");
        let app = stub_router(StubState {
            backend: backend.clone(),
            garbled_writes,
        });
        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        Self {
            addr,
            backend,
            handle,
        }
    }

    /// Base URL clients should be pointed at, including the API prefix
    pub fn base_url(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    /// The mock behind the HTTP surface, for seeding and inspection
    pub fn backend(&self) -> &MockQuoteBackend {
        &self.backend
    }
}

impl Drop for StubBackend {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Builds the stub's route table, mirroring the quoting service's paths
fn stub_router(state: StubState) -> Router {
    Router::new()
        .route("/api/quotes", post(create_quote).get(list_quotes))
        .route("/api/quotes/search", get(search_quotes))
        .route("/api/quotes/statistics", get(statistics))
        .route("/api/quotes/number/:quote_number", get(fetch_by_number))
        .route("/api/quotes/status/:status", get(list_by_status))
        .route("/api/quotes/state/:state", get(list_by_state))
        .route(
            "/api/quotes/:id",
            get(fetch_quote).put(update_quote).delete(delete_quote),
        )
        .route("/api/quotes/:id/premium", get(premium_of))
        .route("/api/quotes/:id/submit", post(submit_quote))
        .route("/api/quotes/:id/approve", post(approve_quote))
        .route("/api/quotes/:id/reject", post(reject_quote))
        .with_state(state)
}

// ============================================================================
// Handlers
// ============================================================================

fn default_page_size() -> u32 {
    20
}

fn default_sort() -> String {
    "createdAt,desc".to_string()
}

#[derive(Deserialize)]
struct ListParams {
    #[serde(default)]
    page: u32,
    #[serde(default = "default_page_size")]
    size: u32,
    #[serde(default = "default_sort")]
    sort: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchParams {
    #[serde(default)]
    business_name: String,
    #[serde(default)]
    page: u32,
    #[serde(default = "default_page_size")]
    size: u32,
}

#[derive(Deserialize)]
struct RejectParams {
    #[serde(default)]
    reason: String,
}

async fn create_quote(State(state): State<StubState>, Json(draft): Json<Quote>) -> Response {
    match state.backend.create(&draft).await {
        Ok(stored) => write_confirmation(&state, stored),
        Err(error) => error_response(error),
    }
}

async fn update_quote(
    State(state): State<StubState>,
    Path(id): Path<i64>,
    Json(draft): Json<Quote>,
) -> Response {
    match state.backend.update(QuoteId::new(id), &draft).await {
        Ok(stored) => write_confirmation(&state, stored),
        Err(error) => error_response(error),
    }
}

async fn delete_quote(State(state): State<StubState>, Path(id): Path<i64>) -> Response {
    match state.backend.delete(QuoteId::new(id)).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error_response(error),
    }
}

async fn fetch_quote(State(state): State<StubState>, Path(id): Path<i64>) -> Response {
    match state.backend.fetch(QuoteId::new(id)).await {
        Ok(quote) => Json(quote).into_response(),
        Err(error) => error_response(error),
    }
}

async fn fetch_by_number(
    State(state): State<StubState>,
    Path(quote_number): Path<String>,
) -> Response {
    match state.backend.fetch_by_number(&quote_number).await {
        Ok(quote) => Json(quote).into_response(),
        Err(error) => error_response(error),
    }
}

async fn list_quotes(State(state): State<StubState>, Query(params): Query<ListParams>) -> Response {
    let request = PageRequest {
        page: params.page,
        size: params.size,
        sort: params.sort,
    };
    match state.backend.list(&request).await {
        Ok(page) => Json(page_body(page, request.page, request.size)).into_response(),
        Err(error) => error_response(error),
    }
}

async fn search_quotes(
    State(state): State<StubState>,
    Query(params): Query<SearchParams>,
) -> Response {
    match state.backend.search_by_name(&params.business_name).await {
        Ok(page) => Json(page_body(page, params.page, params.size)).into_response(),
        Err(error) => error_response(error),
    }
}

async fn list_by_status(
    State(state): State<StubState>,
    Path(status): Path<QuoteStatus>,
) -> Response {
    match state.backend.list_by_status(status).await {
        Ok(quotes) => Json(quotes).into_response(),
        Err(error) => error_response(error),
    }
}

async fn list_by_state(
    State(state): State<StubState>,
    Path(state_code): Path<String>,
) -> Response {
    match state.backend.list_by_state(&state_code).await {
        Ok(quotes) => Json(quotes).into_response(),
        Err(error) => error_response(error),
    }
}

async fn premium_of(State(state): State<StubState>, Path(id): Path<i64>) -> Response {
    match state.backend.premium_of(QuoteId::new(id)).await {
        Ok(total_premium) => Json(PremiumResponse { total_premium }).into_response(),
        Err(error) => error_response(error),
    }
}

async fn statistics(State(state): State<StubState>) -> Response {
    match state.backend.statistics().await {
        Ok(stats) => Json(stats).into_response(),
        Err(error) => error_response(error),
    }
}

async fn submit_quote(State(state): State<StubState>, Path(id): Path<i64>) -> Response {
    match state.backend.submit(QuoteId::new(id)).await {
        Ok(stored) => write_confirmation(&state, stored),
        Err(error) => error_response(error),
    }
}

async fn approve_quote(State(state): State<StubState>, Path(id): Path<i64>) -> Response {
    match state.backend.approve(QuoteId::new(id)).await {
        Ok(stored) => write_confirmation(&state, stored),
        Err(error) => error_response(error),
    }
}

async fn reject_quote(
    State(state): State<StubState>,
    Path(id): Path<i64>,
    Query(params): Query<RejectParams>,
) -> Response {
    match state.backend.reject(QuoteId::new(id), &params.reason).await {
        Ok(stored) => write_confirmation(&state, stored),
        Err(error) => error_response(error),
    }
}

// ============================================================================
// Wire Translation
// ============================================================================

/// Premium recalculation response body
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PremiumResponse {
    #[serde(with = "rust_decimal::serde::float")]
    total_premium: Decimal,
}

/// Paged response body in the service's shape, including the pagination
/// metadata the client ignores
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PageBody {
    content: Vec<Quote>,
    total_elements: u64,
    pageable: Pageable,
    last: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Pageable {
    page_number: u32,
    page_size: u32,
}

fn page_body(page: Page<Quote>, page_number: u32, page_size: u32) -> PageBody {
    let served = u64::from(page_number) * u64::from(page_size) + page.content.len() as u64;
    PageBody {
        last: served >= page.total_elements,
        total_elements: page.total_elements,
        content: page.content,
        pageable: Pageable {
            page_number,
            page_size,
        },
    }
}

/// A successful write confirmation, or an unreadable one when the stub
/// was started garbled
fn write_confirmation(state: &StubState, quote: Quote) -> Response {
    if state.garbled_writes {
        return "OK".into_response();
    }
    Json(quote).into_response()
}

/// Maps port errors onto the service's HTTP status codes and error bodies
fn error_response(error: BackendError) -> Response {
    match error {
        BackendError::NotFound { entity, id } => (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": format!("{entity} not found with id: {id}") })),
        )
            .into_response(),
        BackendError::Rejected { violations } => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "validationErrors": violations })),
        )
            .into_response(),
        BackendError::BadRequest { message } => {
            (StatusCode::BAD_REQUEST, Json(json!({ "message": message }))).into_response()
        }
        BackendError::Conflict { message } => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "message": message })),
        )
            .into_response(),
        other => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "message": other.to_string() })),
        )
            .into_response(),
    }
}
