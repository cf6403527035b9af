use crate::error::ApiError;
use crate::state::AppState;
use askama::Template;
use axum::{
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Form, Json, Router,
};
use market_rs::snapshot::{name_for_ticker, MarketSnapshot};
use serde::Deserialize;
use serde_json::{json, Value};
use shared::{
    AnalysisTemplate, Dashboard, IndexTemplate, MarketsTemplate, NewsTemplate, Rejection,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index).post(analyze))
        .route("/news/:topic", get(topic_news))
        .route("/markets", get(markets))
        .route("/markets/analysis/*ticker", get(analysis))
        .route("/api/markets", get(markets_json))
        .route("/health", get(health_check))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Helper to render templates into axum responses
fn render_template<T: Template>(template: &T) -> Result<Html<String>, ApiError> {
    Ok(Html(template.render()?))
}

/// Home page sections. Headlines and trends degrade to empty on failure.
async fn front_page(dashboard: &Dashboard) -> Result<IndexTemplate, ApiError> {
    let headlines = dashboard.breaking_news().await.unwrap_or_else(|e| {
        warn!("Breaking news unavailable: {:#}", e);
        Vec::new()
    });
    let trends = dashboard.trends().await.unwrap_or_else(|e| {
        warn!("Trends unavailable: {:#}", e);
        Vec::new()
    });
    let snapshot = dashboard.market_snapshot().await?;

    Ok(IndexTemplate::new(headlines, trends, &snapshot))
}

#[derive(Debug, Default, Deserialize)]
pub struct IndexQuery {
    pub notice: Option<String>,
}

/// GET / - breaking news, trends and markets
async fn index(
    State(state): State<AppState>,
    Query(query): Query<IndexQuery>,
) -> Result<Html<String>, ApiError> {
    let mut page = front_page(&state.dashboard).await?;
    if let Some(rejection) = query.notice.as_deref().and_then(Rejection::from_code) {
        page = page.with_notice(rejection.to_string());
    }
    render_template(&page)
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeForm {
    pub url: String,
}

/// POST / - analyze a submitted article URL
async fn analyze(
    State(state): State<AppState>,
    Form(form): Form<AnalyzeForm>,
) -> Result<Response, ApiError> {
    match state.dashboard.analyze(&form.url).await {
        Ok(report) => {
            let page = front_page(&state.dashboard).await?.with_report(&report);
            Ok(render_template(&page)?.into_response())
        }
        Err(rejection) => {
            info!("Rejected submitted URL '{}': {}", form.url, rejection);
            Ok(Redirect::to(&format!("/?notice={}", rejection.code())).into_response())
        }
    }
}

/// GET /news/:topic - latest articles for a topic
async fn topic_news(
    State(state): State<AppState>,
    Path(topic): Path<String>,
) -> Result<Html<String>, ApiError> {
    let articles = state.dashboard.topic_news(&topic).await?;
    render_template(&NewsTemplate::new(&topic, articles))
}

/// GET /markets - market snapshot table
async fn markets(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let snapshot = state.dashboard.market_snapshot().await?;
    render_template(&MarketsTemplate::new(&snapshot))
}

/// GET /markets/analysis/*ticker - price, volume and RSI chart
async fn analysis(
    State(state): State<AppState>,
    Path(ticker): Path<String>,
) -> Result<Html<String>, ApiError> {
    let ticker = ticker.trim_start_matches('/');
    let history = state.dashboard.analysis(ticker).await?;
    let config = state.dashboard.config();

    let page = AnalysisTemplate::new(
        name_for_ticker(ticker),
        ticker,
        &config.history_range,
        config.rsi_period,
        &history,
    )?;
    render_template(&page)
}

/// GET /api/markets - market snapshot as JSON
async fn markets_json(State(state): State<AppState>) -> Result<Json<MarketSnapshot>, ApiError> {
    Ok(Json(state.dashboard.market_snapshot().await?))
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "git_hash": env!("GIT_HASH"),
    }))
}
