// Axum API Server Module
//
// Purpose: JSON API over the crop recommender, crop guide and regional defaults.
// Scoring is O(catalog) per request and runs inline; batches go to the blocking pool.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::catalog::{CropCatalog, CropCategory, CropProfile};
use crate::comparison::compare;
use crate::config::ServerConfig;
use crate::error::RecommendError;
use crate::jitter::JitterMode;
use crate::query::QueryInput;
use crate::recommender::{RankingEntry, RecommendationResult, Recommender};
use crate::regional::{self, REGIONAL_DEFAULTS};
use crate::soil::SoilType;

// ============================================================================
// Application State
// ============================================================================

#[derive(Clone)]
pub struct AppState {
    pub recommender: Arc<Recommender>,
    pub jitter: JitterMode,
}

impl AppState {
    pub fn new(config: &ServerConfig) -> anyhow::Result<Self> {
        tracing::info!("Loading crop catalog...");
        let catalog = config.load_catalog()?;
        match &config.catalog_path {
            Some(path) => tracing::info!("Loaded {} crops from {}", catalog.len(), path.display()),
            None => tracing::info!("Loaded {} built-in crops", catalog.len()),
        }
        if catalog.is_empty() {
            tracing::warn!("Crop catalog is empty; recommendations will fail");
        }

        Ok(Self::with_catalog(Arc::new(catalog), config.jitter))
    }

    /// State over an explicit catalog (alternate catalogs, tests)
    pub fn with_catalog(catalog: Arc<CropCatalog>, jitter: JitterMode) -> Self {
        Self {
            recommender: Arc::new(Recommender::new(catalog)),
            jitter,
        }
    }

    fn catalog(&self) -> &CropCatalog {
        self.recommender.catalog()
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))

        // Recommendation endpoints
        .route("/api/recommend", post(recommend))
        .route("/api/recommend/batch", post(recommend_batch))
        .route("/api/recommend/ranking", post(ranking))

        // Crop guide
        // compare is a static segment, so it is matched before :name
        .route("/api/crops", get(list_crops))
        .route("/api/crops/compare", post(compare_crops))
        .route("/api/crops/:name", get(get_crop))

        // Form support
        .route("/api/regions", get(list_regions))
        .route("/api/regions/:state", get(get_region))
        .route("/api/soil-types", get(list_soil_types))
        .route("/api/rainfall-estimate", get(rainfall_estimate))

        // Middleware (applied in reverse order)
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ============================================================================
// Endpoint Handlers
// ============================================================================

async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "crops": state.catalog().len(),
    }))
}

async fn recommend(
    State(state): State<AppState>,
    Json(input): Json<QueryInput>,
) -> Result<Json<RecommendationResult>, AppError> {
    let query = input.clamped().into_query();
    tracing::debug!(?query, "Scoring query");

    let mut jitter = state.jitter.source(0);
    let result = state.recommender.recommend(&query, jitter.as_mut())?;

    tracing::info!(
        "Recommended {} ({}%) for soil [{}]",
        result.crop_name,
        result.confidence,
        query.soils
    );
    Ok(Json(result))
}

async fn recommend_batch(
    State(state): State<AppState>,
    Json(payload): Json<BatchRecommendRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let queries: Vec<_> = payload
        .queries
        .into_iter()
        .map(|input| input.clamped().into_query())
        .collect();
    let mode = match (state.jitter, payload.seed) {
        (JitterMode::Disabled, _) => JitterMode::Disabled,
        (_, Some(seed)) => JitterMode::Seeded(seed),
        (mode, None) => mode,
    };

    tracing::info!("Scoring batch of {} queries", queries.len());

    let recommender = state.recommender.clone();
    let results = tokio::task::spawn_blocking(move || recommender.recommend_batch(&queries, mode))
        .await
        .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))?
        .into_iter()
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(serde_json::json!({
        "count": results.len(),
        "results": results,
    })))
}

async fn ranking(
    State(state): State<AppState>,
    Query(params): Query<RankingParams>,
    Json(input): Json<QueryInput>,
) -> Result<Json<Vec<RankingEntry>>, AppError> {
    let query = input.clamped().into_query();
    let mut jitter = state.jitter.source(0);
    let ranked = state.recommender.rank(&query, jitter.as_mut())?;

    let limit = params.limit.unwrap_or(ranked.len());
    Ok(Json(ranked.iter().take(limit).map(|c| c.to_entry()).collect()))
}

async fn list_crops(
    State(state): State<AppState>,
    Query(filters): Query<CropFilters>,
) -> Result<Json<serde_json::Value>, AppError> {
    let category = match filters.category.as_deref() {
        Some(key) => Some(
            CropCategory::from_key(key)
                .ok_or_else(|| AppError::BadRequest(format!("Unknown category '{}'", key)))?,
        ),
        None => None,
    };

    let data: Vec<&CropProfile> = state
        .catalog()
        .search(filters.q.as_deref().unwrap_or(""))
        .into_iter()
        .filter(|crop| category.map_or(true, |c| crop.category == c))
        .collect();

    Ok(Json(serde_json::json!({
        "rows": data.len(),
        "data": data,
    })))
}

async fn get_crop(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<CropProfile>, AppError> {
    tracing::debug!("Fetching crop {}", name);
    state
        .catalog()
        .get(&name)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Crop {} not found", name)))
}

async fn compare_crops(
    State(state): State<AppState>,
    Json(payload): Json<CompareRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let rows = compare(state.catalog(), &payload.names)?;
    Ok(Json(serde_json::json!({ "crops": rows })))
}

async fn list_regions() -> impl IntoResponse {
    Json(serde_json::json!({
        "rows": REGIONAL_DEFAULTS.len(),
        "data": REGIONAL_DEFAULTS,
    }))
}

async fn get_region(Path(state_name): Path<String>) -> Result<Json<serde_json::Value>, AppError> {
    let profile = regional::lookup(&state_name)
        .ok_or_else(|| AppError::NotFound(format!("No regional defaults for {}", state_name)))?;

    Ok(Json(serde_json::json!({
        "profile": profile,
        "query": QueryInput::from(&profile.to_query()),
    })))
}

async fn list_soil_types() -> impl IntoResponse {
    let choices: Vec<&str> = SoilType::form_choices().iter().map(|s| s.label()).collect();
    let all: Vec<&str> = SoilType::all().iter().map(|s| s.label()).collect();
    Json(serde_json::json!({
        "form_choices": choices,
        "all": all,
    }))
}

async fn rainfall_estimate(Query(params): Query<LocationParams>) -> impl IntoResponse {
    let rainfall_mm = regional::rainfall_for_location(params.state.as_deref(), params.lat, params.lng);
    Json(serde_json::json!({ "rainfall_mm": rainfall_mm }))
}

// ============================================================================
// Request Types
// ============================================================================

#[derive(serde::Deserialize, Debug)]
struct BatchRecommendRequest {
    queries: Vec<QueryInput>,
    seed: Option<u64>,
}

#[derive(serde::Deserialize, Debug)]
struct RankingParams {
    limit: Option<usize>,
}

#[derive(serde::Deserialize, Debug)]
struct CropFilters {
    q: Option<String>,
    category: Option<String>,
}

#[derive(serde::Deserialize, Debug)]
struct LocationParams {
    lat: f64,
    lng: f64,
    state: Option<String>,
}

#[derive(serde::Deserialize, Debug)]
struct CompareRequest {
    names: Vec<String>,
}

// ============================================================================
// Error Handling
// ============================================================================

#[derive(Debug)]
enum AppError {
    /// Deployment problem (e.g. empty catalog); reported as an operational alert
    Configuration(String),
    BadRequest(String),
    NotFound(String),
    Internal(String),
}

impl From<RecommendError> for AppError {
    fn from(err: RecommendError) -> Self {
        let message = err.to_string();
        match err {
            e if e.is_configuration() => AppError::Configuration(message),
            RecommendError::UnknownCrop(_) => AppError::NotFound(message),
            _ => AppError::BadRequest(message),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, body) = match self {
            AppError::Configuration(msg) => {
                tracing::error!("Configuration error: {}", msg);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    serde_json::json!({ "error": msg, "alert": "catalog_misconfigured" }),
                )
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, serde_json::json!({ "error": msg })),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, serde_json::json!({ "error": msg })),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, serde_json::json!({ "error": msg }))
            }
        };

        (status, Json(body)).into_response()
    }
}
