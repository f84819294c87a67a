//! Dashboard API backend.
//!
//! A thin JSON layer over the orchestrator for UI consumption: the
//! watch-list with its settings, a per-symbol signal endpoint and the
//! market-wide tide indicator. All analysis happens in the orchestrator;
//! these handlers only shape responses.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use signal_core::{Config, SymbolAnalysis};
use signal_orchestrator::SignalOrchestrator;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use unusual_whales_client::{MarketTide, UnusualWhalesClient};

#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<SignalOrchestrator>,
    pub flow_client: Arc<UnusualWhalesClient>,
    pub config: Arc<Config>,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

/// Wraps anyhow so handlers can use `?`; renders as a JSON 500.
#[derive(Debug)]
pub struct AppError(anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!("request failed: {:#}", self.0);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<()> {
                success: false,
                data: None,
                error: Some(self.0.to_string()),
            }),
        )
            .into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

async fn health() -> Json<ApiResponse<&'static str>> {
    Json(ApiResponse::success("ok"))
}

#[derive(Debug, Serialize)]
pub struct WatchlistResponse {
    pub symbols: Vec<String>,
    pub autopilot_enabled: bool,
    pub sentiment_threshold: f64,
}

async fn get_watchlist(State(state): State<AppState>) -> Json<ApiResponse<WatchlistResponse>> {
    Json(ApiResponse::success(WatchlistResponse {
        symbols: state.config.watchlist.clone(),
        autopilot_enabled: state.config.is_autopilot_enabled(),
        sentiment_threshold: state.config.sentiment_threshold,
    }))
}

async fn get_signal(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Json<ApiResponse<SymbolAnalysis>> {
    let symbol = symbol.to_uppercase();
    let analysis = state.orchestrator.analyze(&symbol).await;
    Json(ApiResponse::success(analysis))
}

async fn get_market_tide(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Option<MarketTide>>>, AppError> {
    let tide = state.flow_client.market_tide().await?;
    Ok(Json(ApiResponse::success(tide)))
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/watchlist", get(get_watchlist))
        .route("/api/signal/:symbol", get(get_signal))
        .route("/api/market/tide", get(get_market_tide))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_server() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api_server=info,signal_orchestrator=info".into()),
        )
        .init();

    let config = Arc::new(Config::from_env());
    let state = AppState {
        orchestrator: Arc::new(SignalOrchestrator::from_config(&config)),
        flow_client: Arc::new(UnusualWhalesClient::new(
            config.unusual_whales_api_key.clone(),
        )),
        config: config.clone(),
    };

    let bind = std::env::var("API_BIND").unwrap_or_else(|_| "0.0.0.0:3900".to_string());
    let listener = tokio::net::TcpListener::bind(&bind).await?;
    tracing::info!("dashboard API listening on {}", bind);
    axum::serve(listener, router(state)).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_state() -> AppState {
        let config = Arc::new(Config::default());
        AppState {
            orchestrator: Arc::new(SignalOrchestrator::from_config(&config)),
            flow_client: Arc::new(UnusualWhalesClient::new(None)),
            config,
        }
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let response = health().await;
        assert!(response.0.success);
        assert_eq!(response.0.data, Some("ok"));
    }

    #[tokio::test]
    async fn watchlist_reflects_config() {
        let response = get_watchlist(State(test_state())).await;
        let data = response.0.data.unwrap();
        assert_eq!(data.symbols, vec!["AAPL", "MSFT", "TSLA"]);
        assert!(!data.autopilot_enabled);
    }

    #[tokio::test]
    async fn market_tide_without_key_is_null() {
        let response = get_market_tide(State(test_state())).await.unwrap();
        assert!(response.0.success);
        assert!(response.0.data.unwrap().is_none());
    }

    #[test]
    fn error_envelope_serializes() {
        let body = serde_json::to_value(ApiResponse::<()> {
            success: false,
            data: None,
            error: Some("boom".into()),
        })
        .unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "boom");
    }
}
