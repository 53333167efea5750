// Expense Tracker - REST API with Axum
//
// Thin handling layer over the stores: parses payloads, maps each error kind
// to a status code and wraps results in the ApiResponse envelope.

use crate::config::CategoryConfig;
use crate::entities::{CatalogEntry, LedgerEntry, Record};
use crate::error::Error;
use crate::query::EntryFilter;
use crate::stats::Summarize;
use crate::store::Store;
use crate::validator::Validate;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

/// Record kinds served over HTTP
pub trait Resource: Record + Validate + Summarize + Serialize + Send + Sync + 'static {}

impl<T> Resource for T where T: Record + Validate + Summarize + Serialize + Send + Sync + 'static {}

/// One store shared by every request; the mutex serializes dispatch
pub type SharedStore<R> = Arc<Mutex<Store<R>>>;

fn lock<R: Resource>(store: &SharedStore<R>) -> MutexGuard<'_, Store<R>> {
    // Store operations never leave half-written state, so a poisoned lock is still usable
    store.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub ledger: SharedStore<LedgerEntry>,
    pub catalog: SharedStore<CatalogEntry>,
    pub categories: Arc<CategoryConfig>,
}

impl AppState {
    pub fn new(categories: CategoryConfig) -> Self {
        AppState {
            ledger: Arc::new(Mutex::new(Store::new(categories.clone()))),
            catalog: Arc::new(Mutex::new(Store::new(categories.clone()))),
            categories: Arc::new(categories),
        }
    }
}

// ============================================================================
// Response envelope
// ============================================================================

/// API Response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub kind: &'static str,
    pub message: String,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

/// Store error on its way out as an HTTP response
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        ApiError(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError(Error::invalid_argument("body", rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError(Error::invalid_argument("query", rejection.body_text()))
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError(Error::invalid_argument("id", rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        warn!(status = status.as_u16(), kind = self.0.kind_name(), "request rejected: {}", self.0);

        let body = ApiResponse::<()> {
            success: false,
            data: None,
            error: Some(ErrorBody {
                kind: self.0.kind_name(),
                message: self.0.to_string(),
            }),
        };
        (status, Json(body)).into_response()
    }
}

type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;

// ============================================================================
// API Handlers (generic over the record kind)
// ============================================================================

/// GET /api/{resource} - List records matching the query filters
async fn list_records<R: Resource>(
    State(store): State<SharedStore<R>>,
    filter: Result<Query<EntryFilter>, QueryRejection>,
) -> ApiResult<Vec<R>> {
    let Query(filter) = filter?;
    let records = lock(&store).search(&filter)?;
    debug!(count = records.len(), "listed records");
    Ok(Json(ApiResponse::ok(records)))
}

/// POST /api/{resource} - Create a record
async fn create_record<R: Resource>(
    State(store): State<SharedStore<R>>,
    payload: Result<Json<R::Draft>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<R>>), ApiError> {
    let Json(draft) = payload?;
    let record = lock(&store).create(draft)?;
    info!(id = record.id(), category = record.category(), "created record");
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(record))))
}

/// GET /api/{resource}/:id - Fetch one record
async fn get_record<R: Resource>(
    State(store): State<SharedStore<R>>,
    id: Result<Path<u64>, PathRejection>,
) -> ApiResult<R> {
    let Path(id) = id?;
    let record = lock(&store).get(id)?;
    Ok(Json(ApiResponse::ok(record)))
}

/// PUT /api/{resource}/:id - Replace every mutable field
async fn replace_record<R: Resource>(
    State(store): State<SharedStore<R>>,
    id: Result<Path<u64>, PathRejection>,
    payload: Result<Json<R::Draft>, JsonRejection>,
) -> ApiResult<R> {
    let Path(id) = id?;
    let Json(draft) = payload?;
    let record = lock(&store).update(id, draft.into())?;
    info!(id, "replaced record");
    Ok(Json(ApiResponse::ok(record)))
}

/// PATCH /api/{resource}/:id - Merge the supplied fields
async fn patch_record<R: Resource>(
    State(store): State<SharedStore<R>>,
    id: Result<Path<u64>, PathRejection>,
    payload: Result<Json<R::Patch>, JsonRejection>,
) -> ApiResult<R> {
    let Path(id) = id?;
    let Json(patch) = payload?;
    let record = lock(&store).update(id, patch)?;
    info!(id, "patched record");
    Ok(Json(ApiResponse::ok(record)))
}

/// DELETE /api/{resource}/:id - Remove a record, returning it
async fn delete_record<R: Resource>(
    State(store): State<SharedStore<R>>,
    id: Result<Path<u64>, PathRejection>,
) -> ApiResult<R> {
    let Path(id) = id?;
    let record = lock(&store).delete(id)?;
    info!(id, "deleted record");
    Ok(Json(ApiResponse::ok(record)))
}

/// GET /api/{resource}/summary - Derived statistics
async fn summary<R: Resource>(State(store): State<SharedStore<R>>) -> ApiResult<R::Summary> {
    let summary = lock(&store).summary();
    Ok(Json(ApiResponse::ok(summary)))
}

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// GET / - Service banner
async fn root() -> impl IntoResponse {
    Json(serde_json::json!({
        "message": "ExpenseTracker API",
        "version": crate::VERSION,
    }))
}

fn resource_routes<R: Resource>(store: SharedStore<R>) -> Router {
    Router::new()
        .route("/", get(list_records::<R>).post(create_record::<R>))
        .route("/summary", get(summary::<R>))
        .route(
            "/:id",
            get(get_record::<R>)
                .put(replace_record::<R>)
                .patch(patch_record::<R>)
                .delete(delete_record::<R>),
        )
        .with_state(store)
}

/// Build the full application router
pub fn router(state: AppState) -> Router {
    let categories = state.categories.clone();

    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route(
            "/categories",
            get(move || {
                let categories = categories.clone();
                async move { Json(ApiResponse::ok((*categories).clone())) }
            }),
        )
        .nest("/transactions", resource_routes(state.ledger.clone()))
        .nest("/products", resource_routes(state.catalog.clone()));

    Router::new()
        .route("/", get(root))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
