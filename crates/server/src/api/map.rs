use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use fleetmap::prelude::*;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::error;

use crate::{dto::report::ReportDto, state::AppState};

#[derive(Debug, Default, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Html,
    Json,
}

#[derive(Debug, Default, Deserialize)]
pub struct RenderParams {
    #[serde(default)]
    pub format: Format,
}

pub async fn route_map(
    Query(params): Query<RenderParams>,
    State(state): State<Arc<AppState>>,
    Json(route): Json<SingleRoute>,
) -> Result<Response, StatusCode> {
    render(&state, params.format, move |renderer, notices| {
        Some(renderer.render_route(&route, notices))
    })
    .await
}

pub async fn fleet_map(
    Query(params): Query<RenderParams>,
    State(state): State<Arc<AppState>>,
    Json(fleet): Json<FleetRoutes>,
) -> Result<Response, StatusCode> {
    render(&state, params.format, move |renderer, notices| {
        Some(renderer.render_routes(&fleet, notices))
    })
    .await
}

/// A planner result carrying its own `waypoints` or geometry.
pub async fn planned_route_map(
    Query(params): Query<RenderParams>,
    State(state): State<Arc<AppState>>,
    Json(data): Json<Value>,
) -> Result<Response, StatusCode> {
    render(&state, params.format, move |renderer, notices| {
        renderer.render_route_data(&data, notices)
    })
    .await
}

/// Runs a render on the blocking pool; the routing client blocks on HTTP.
async fn render<F>(state: &AppState, format: Format, draw: F) -> Result<Response, StatusCode>
where
    F: FnOnce(&RouteRenderer<RouteGeometryFetcher>, &mut Vec<Notice>) -> Option<RenderReport>
        + Send
        + 'static,
{
    let config = state.routing.clone();
    let (report, notices) = tokio::task::spawn_blocking(move || {
        let fetcher = RouteGeometryFetcher::new(config)?;
        let renderer = RouteRenderer::new(fetcher);
        let mut notices = Vec::new();
        let report = draw(&renderer, &mut notices);
        Ok::<_, fleetmap::routing::Error>((report, notices))
    })
    .await
    .map_err(|err| {
        error!("Render task failed: {err}");
        StatusCode::INTERNAL_SERVER_ERROR
    })?
    .map_err(|err| {
        error!("Failed to build routing client: {err}");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    let mut log = LogNotifier;
    for notice in &notices {
        log.notify(notice.clone());
    }

    let Some(report) = report else {
        return Ok((StatusCode::UNPROCESSABLE_ENTITY, Json(notices)).into_response());
    };
    Ok(match format {
        Format::Html => Html(report.to_html()).into_response(),
        Format::Json => Json(ReportDto::from(&report, notices)).into_response(),
    })
}
