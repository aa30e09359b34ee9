use std::sync::Arc;

use axum::response::Response;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use crate::ads::domain::{AdCreative, AdPosition, CreativeId};
use crate::ads::repository::{AdRepository, InMemoryAdRepository, RepositoryError};
use crate::ads::sanitizer::AdContentSanitizer;
use crate::ads::service::AdSlotService;

pub(super) fn published_on(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, day, 9, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn creative(
    id: &str,
    page_slug: &str,
    position: AdPosition,
    markup: &str,
    day: u32,
) -> AdCreative {
    AdCreative {
        id: CreativeId(id.to_string()),
        page_slug: page_slug.to_string(),
        position,
        raw_markup: markup.to_string(),
        active: true,
        created_at: published_on(day),
    }
}

pub(super) fn inactive(mut creative: AdCreative) -> AdCreative {
    creative.active = false;
    creative
}

pub(super) fn build_service(
    creatives: Vec<AdCreative>,
) -> (
    AdSlotService<InMemoryAdRepository>,
    Arc<InMemoryAdRepository>,
) {
    let repository = Arc::new(InMemoryAdRepository::with_creatives(creatives));
    let service = AdSlotService::new(repository.clone(), AdContentSanitizer::default());
    (service, repository)
}

pub(super) fn home_page_creatives() -> Vec<AdCreative> {
    vec![
        creative(
            "c1",
            "home",
            AdPosition::Top,
            r#"<div class="banner" onclick="track()"><img src="https://cdn.example/a.png" alt="Anúncio"></div>"#,
            1,
        ),
        creative(
            "c2",
            "home",
            AdPosition::Top,
            r#"<script async src="https://ads.example/tag.js"></script>"#,
            5,
        ),
        inactive(creative(
            "c3",
            "home",
            AdPosition::Top,
            "<span>expired</span>",
            9,
        )),
        creative(
            "c4",
            "home",
            AdPosition::Footer,
            "<span>rodape</span>",
            3,
        ),
        creative(
            "c5",
            "bolsa-familia",
            AdPosition::Top,
            "<span>other page</span>",
            4,
        ),
    ]
}

pub(super) async fn read_body(response: Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    String::from_utf8(body.to_vec()).expect("utf-8 body")
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = read_body(response).await;
    serde_json::from_str(&body).expect("json payload")
}

pub(super) struct UnavailableRepository;

impl AdRepository for UnavailableRepository {
    fn insert(&self, _creative: AdCreative) -> Result<AdCreative, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _creative: AdCreative) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn remove(&self, _id: &CreativeId) -> Result<AdCreative, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &CreativeId) -> Result<Option<AdCreative>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn for_slot(
        &self,
        _page_slug: &str,
        _position: AdPosition,
    ) -> Result<Vec<AdCreative>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}
