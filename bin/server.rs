// Rental Engine - Web Server
// REST API over the calculation engine with Axum

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use rental_engine::market::{analyze_favorite, FavoriteAnalysis};
use rental_engine::notifications::{indexation_calendar_reminder, tenant_indexation_notice};
use rental_engine::risk::assess_risk_with;
use rental_engine::{
    build_recibo_reminders, compare_with_regio_gemiddelde, init_tracing,
    plan_indexation, Contract, EngineConfig, Favorite, IndexationPlan, MarketComparison,
    PortfolioOverview, Property, ReciboReminder, RegionTable, RiskAssessment, RiskScores, Tenant,
};

/// Shared application state
#[derive(Clone)]
struct AppState {
    config: Arc<EngineConfig>,
    regions: Arc<RegionTable>,
}

/// API Response wrapper
#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

// ============================================================================
// Request / Response bodies
// ============================================================================

#[derive(Deserialize)]
struct IndexationRequest {
    contract: Contract,
    percentage: f64,
    today: NaiveDate,
    #[serde(default)]
    tenant_name: Option<String>,
    #[serde(default)]
    property_name: Option<String>,
}

#[derive(Serialize)]
struct IndexationResponse {
    plan: IndexationPlan,
    #[serde(skip_serializing_if = "Option::is_none")]
    notice: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    calendar_link: Option<String>,
}

#[derive(Deserialize)]
struct RecibosRequest {
    tenants: Vec<Tenant>,
    today: NaiveDate,
}

#[derive(Deserialize)]
struct RiskRequest {
    scores: RiskScores,
    #[serde(default)]
    reserve_pct: Option<f64>,
}

#[derive(Deserialize)]
struct CompareRequest {
    price_per_m2: f64,
    #[serde(default)]
    location: Option<String>,
}

#[derive(Deserialize)]
struct FavoritesRequest {
    favorites: Vec<Favorite>,
}

#[derive(Deserialize)]
struct PortfolioRequest {
    properties: Vec<Property>,
    tenants: Vec<Tenant>,
    contracts: Vec<Contract>,
    today: NaiveDate,
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok(rental_engine::VERSION))
}

/// POST /api/indexation - Validate and compute an indexation for one contract
async fn indexation(
    State(state): State<AppState>,
    Json(req): Json<IndexationRequest>,
) -> impl IntoResponse {
    if !req.percentage.is_finite() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<IndexationResponse>::err("percentage must be a number")),
        )
            .into_response();
    }

    let plan = plan_indexation(&req.contract, req.percentage, req.today, &state.config);

    let (notice, calendar_link) = match (plan.is_allowed(), plan.change_date) {
        (true, Some(change_date)) => {
            let tenant = req.tenant_name.as_deref().unwrap_or("tenant");
            let property = req.property_name.as_deref().unwrap_or(&req.contract.property_id);
            (
                Some(tenant_indexation_notice(tenant, plan.current_rent, plan.percentage, plan.new_rent, change_date)),
                Some(indexation_calendar_reminder(
                    property,
                    change_date,
                    plan.current_rent,
                    plan.new_rent,
                    plan.percentage,
                    state.config.notice_days,
                )),
            )
        }
        _ => (None, None),
    };

    (
        StatusCode::OK,
        Json(ApiResponse::ok(IndexationResponse { plan, notice, calendar_link })),
    )
        .into_response()
}

/// POST /api/recibos - Tenants that still owe a recibo
async fn recibos(
    State(state): State<AppState>,
    Json(req): Json<RecibosRequest>,
) -> Json<ApiResponse<Vec<ReciboReminder>>> {
    Json(ApiResponse::ok(build_recibo_reminders(&req.tenants, req.today, &state.config)))
}

/// POST /api/risk - Aggregate risk score
async fn risk(
    State(state): State<AppState>,
    Json(req): Json<RiskRequest>,
) -> Json<ApiResponse<RiskAssessment>> {
    Json(ApiResponse::ok(assess_risk_with(req.scores, req.reserve_pct, &state.config)))
}

/// POST /api/market/compare - Price per m² against the regional average
async fn market_compare(
    State(state): State<AppState>,
    Json(req): Json<CompareRequest>,
) -> Json<ApiResponse<MarketComparison>> {
    Json(ApiResponse::ok(compare_with_regio_gemiddelde(
        req.price_per_m2,
        req.location.as_deref(),
        &state.regions,
    )))
}

/// POST /api/market/favorites - Analyse every non-archived favorite
async fn market_favorites(
    State(state): State<AppState>,
    Json(req): Json<FavoritesRequest>,
) -> Json<ApiResponse<Vec<FavoriteAnalysis>>> {
    let analyses = rental_engine::entities::active_favorites(&req.favorites)
        .into_iter()
        .map(|f| analyze_favorite(f, &state.regions))
        .collect();

    Json(ApiResponse::ok(analyses))
}

/// POST /api/portfolio - Dashboard overview
async fn portfolio(
    State(state): State<AppState>,
    Json(req): Json<PortfolioRequest>,
) -> Json<ApiResponse<PortfolioOverview>> {
    Json(ApiResponse::ok(PortfolioOverview::build(
        &req.properties,
        &req.tenants,
        &req.contracts,
        req.today,
        &state.config,
    )))
}

// ============================================================================
// Main Server
// ============================================================================

fn load_state() -> anyhow::Result<AppState> {
    let config = match std::env::var("RENTAL_ENGINE_CONFIG") {
        Ok(path) => EngineConfig::from_file(Path::new(&path))?,
        Err(_) => EngineConfig::default(),
    };

    let regions = match std::env::var("RENTAL_ENGINE_REGIONS") {
        Ok(path) => RegionTable::from_file(Path::new(&path))?,
        Err(_) => RegionTable::default(),
    };

    Ok(AppState {
        config: Arc::new(config),
        regions: Arc::new(regions),
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    init_tracing();

    let state = load_state()?;
    tracing::info!(regions = state.regions.len(), "engine state loaded");

    // Build API routes
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/indexation", post(indexation))
        .route("/recibos", post(recibos))
        .route("/risk", post(risk))
        .route("/market/compare", post(market_compare))
        .route("/market/favorites", post(market_favorites))
        .route("/portfolio", post(portfolio))
        .with_state(state);

    // Build main router
    let app = Router::new().nest("/api", api_routes).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    );

    // Start server
    let addr = std::env::var("RENTAL_ENGINE_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!(%addr, "server running");
    axum::serve(listener, app).await?;

    Ok(())
}
