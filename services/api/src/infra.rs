use auxilios::ads::{
    AdContentSanitizer, AdCreative, AdCreativeImporter, AdImportError, AdPosition, AdSlotService,
    CreativeId, InMemoryAdRepository,
};
use auxilios::benefits::{BenefitProgram, UnknownProgram};
use auxilios::config::AdsConfig;
use chrono::{DateTime, TimeZone, Utc};
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn parse_program(raw: &str) -> Result<BenefitProgram, String> {
    raw.parse::<BenefitProgram>()
        .map_err(|err: UnknownProgram| err.to_string())
}

/// Creatives from a CSV export, or none when no export is given.
pub(crate) fn load_creatives(path: Option<&Path>) -> Result<Vec<AdCreative>, AdImportError> {
    match path {
        Some(path) => AdCreativeImporter::from_path(path),
        None => Ok(Vec::new()),
    }
}

pub(crate) fn build_ad_service(
    config: &AdsConfig,
    creatives: Vec<AdCreative>,
) -> Arc<AdSlotService<InMemoryAdRepository>> {
    let repository = Arc::new(InMemoryAdRepository::with_creatives(creatives));
    let sanitizer = AdContentSanitizer::new(config.markup_policy());
    Arc::new(AdSlotService::new(repository, sanitizer))
}

/// Sample creatives for the CLI demo, including ones the sanitizer has to clean up.
pub(crate) fn demo_creatives() -> Vec<AdCreative> {
    vec![
        demo_creative(
            "demo-1",
            AdPosition::Top,
            r#"<div class="banner" onmouseover="track()"><a href="https://parceiro.example/oferta" target="_blank"><img src="https://cdn.example/banner.png" alt="Crédito consignado" width="728" height="90"></a></div>"#,
            1,
        ),
        demo_creative(
            "demo-2",
            AdPosition::Top,
            r#"<script async src="https://ads.example/tag.js" data-slot="home-top"></script>"#,
            2,
        ),
        demo_creative(
            "demo-3",
            AdPosition::Footer,
            r#"<object data="legacy.swf"></object><iframe src="https://ads.example/frame" width="300" height="250" frameborder="0" allowfullscreen></iframe>"#,
            3,
        ),
        demo_creative(
            "demo-4",
            AdPosition::Middle,
            r#"<embed src="legacy.swf">"#,
            4,
        ),
    ]
}

fn demo_creative(id: &str, position: AdPosition, markup: &str, day: u32) -> AdCreative {
    AdCreative {
        id: CreativeId(id.to_string()),
        page_slug: "home".to_string(),
        position,
        raw_markup: markup.to_string(),
        active: true,
        created_at: demo_timestamp(day),
    }
}

fn demo_timestamp(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, day, 12, 0, 0)
        .single()
        .unwrap_or_default()
}
