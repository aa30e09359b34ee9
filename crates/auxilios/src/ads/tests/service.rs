use super::common::*;
use crate::ads::domain::{AdPosition, CreativeId};
use crate::ads::repository::{AdRepository, RepositoryError};
use crate::ads::sanitizer::AdContentSanitizer;
use crate::ads::service::{AdSlotError, AdSlotService};
use std::sync::Arc;

#[test]
fn render_slot_keeps_active_creatives_newest_first() {
    let (service, _) = build_service(home_page_creatives());

    let slot = service
        .render_slot("home", AdPosition::Top)
        .expect("slot renders");

    let ids: Vec<&str> = slot.creatives.iter().map(|c| c.id.0.as_str()).collect();
    assert_eq!(ids, vec!["c2", "c1"]);
    assert_eq!(slot.page_slug, "home");
    assert_eq!(slot.position, AdPosition::Top);
}

#[test]
fn render_slot_sanitizes_each_creative() {
    let (service, _) = build_service(home_page_creatives());

    let slot = service
        .render_slot("home", AdPosition::Top)
        .expect("slot renders");

    let banner = &slot.creatives[1];
    assert!(!banner.markup.contains("onclick"), "{}", banner.markup);
    assert!(banner.markup.contains(r#"alt="Anúncio""#), "{}", banner.markup);
}

#[test]
fn unclosed_markup_does_not_leak_into_neighbours() {
    let (service, _) = build_service(vec![
        creative("a", "home", AdPosition::Middle, "<div><span>aberto", 2),
        creative("b", "home", AdPosition::Middle, "<span>b</span>", 1),
    ]);

    let slot = service
        .render_slot("home", AdPosition::Middle)
        .expect("slot renders");

    assert_eq!(slot.creatives[0].markup, "<div><span>aberto</span></div>");
    assert_eq!(slot.creatives[1].markup, "<span>b</span>");
}

#[test]
fn creatives_empty_after_sanitizing_are_skipped() {
    let (service, _) = build_service(vec![
        creative("flash", "home", AdPosition::Footer, "<object data=\"a.swf\"></object>", 2),
        creative("text", "home", AdPosition::Footer, "<span>ok</span>", 1),
    ]);

    let slot = service
        .render_slot("home", AdPosition::Footer)
        .expect("slot renders");

    assert_eq!(slot.creatives.len(), 1);
    assert_eq!(slot.creatives[0].id.0, "text");
}

#[test]
fn slot_without_active_creatives_renders_nothing() {
    let (service, _) = build_service(home_page_creatives());

    let slot = service
        .render_slot("home", AdPosition::Middle)
        .expect("slot renders");

    assert!(slot.is_empty());
    assert_eq!(slot.to_html(), "");
}

#[test]
fn to_html_wraps_each_creative() {
    let (service, _) = build_service(home_page_creatives());

    let html = service
        .render_slot("home", AdPosition::Footer)
        .expect("slot renders")
        .to_html();

    assert_eq!(
        html,
        concat!(
            r#"<div class="ad-slot" data-page="home" data-position="footer">"#,
            r#"<div class="ad-creative" data-creative-id="c4"><span>rodape</span></div>"#,
            "</div>"
        )
    );
}

#[test]
fn render_slot_propagates_repository_failures() {
    let service = AdSlotService::new(
        Arc::new(UnavailableRepository),
        AdContentSanitizer::default(),
    );

    match service.render_slot("home", AdPosition::Top) {
        Err(AdSlotError::Repository(RepositoryError::Unavailable(reason))) => {
            assert_eq!(reason, "database offline");
        }
        other => panic!("expected repository failure, got {other:?}"),
    }
}

#[test]
fn deactivated_creative_disappears_on_next_render() {
    let (service, repository) = build_service(home_page_creatives());

    let mut banner = repository
        .fetch(&CreativeId("c2".to_string()))
        .expect("fetch succeeds")
        .expect("creative present");
    banner.active = false;
    repository.update(banner).expect("update succeeds");

    let slot = service
        .render_slot("home", AdPosition::Top)
        .expect("slot renders");
    let ids: Vec<&str> = slot.creatives.iter().map(|c| c.id.0.as_str()).collect();
    assert_eq!(ids, vec!["c1"]);
}
