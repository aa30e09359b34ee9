use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use tracing::warn;

use super::domain::AdPosition;
use super::repository::AdRepository;
use super::service::{AdSlotError, AdSlotService, RenderedSlot};

/// Router builder exposing rendered ad slots.
pub fn ad_router<R>(service: Arc<AdSlotService<R>>) -> Router
where
    R: AdRepository + 'static,
{
    Router::new()
        .route("/api/v1/ads/:page_slug/:position", get(slot_handler::<R>))
        .route(
            "/api/v1/ads/:page_slug/:position/html",
            get(slot_html_handler::<R>),
        )
        .with_state(service)
}

pub(crate) async fn slot_handler<R>(
    State(service): State<Arc<AdSlotService<R>>>,
    Path((page_slug, position)): Path<(String, String)>,
) -> Response
where
    R: AdRepository + 'static,
{
    match render(&service, &page_slug, &position) {
        Ok(slot) => (StatusCode::OK, Json(slot)).into_response(),
        Err(response) => response,
    }
}

pub(crate) async fn slot_html_handler<R>(
    State(service): State<Arc<AdSlotService<R>>>,
    Path((page_slug, position)): Path<(String, String)>,
) -> Response
where
    R: AdRepository + 'static,
{
    match render(&service, &page_slug, &position) {
        Ok(slot) => (StatusCode::OK, Html(slot.to_html())).into_response(),
        Err(response) => response,
    }
}

fn render<R>(
    service: &AdSlotService<R>,
    page_slug: &str,
    position: &str,
) -> Result<RenderedSlot, Response>
where
    R: AdRepository + 'static,
{
    let position = position.parse::<AdPosition>().map_err(|err| {
        let payload = json!({
            "error": err.to_string(),
        });
        (StatusCode::BAD_REQUEST, Json(payload)).into_response()
    })?;

    service.render_slot(page_slug, position).map_err(|err: AdSlotError| {
        warn!(page_slug, position = %position, error = %err, "ad slot unavailable");
        let payload = json!({
            "error": err.to_string(),
        });
        (StatusCode::SERVICE_UNAVAILABLE, Json(payload)).into_response()
    })
}
