use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use super::domain::{AdPosition, CreativeId};
use super::repository::{AdRepository, RepositoryError};
use super::sanitizer::AdContentSanitizer;

/// Service composing the creative store and the markup sanitizer.
pub struct AdSlotService<R> {
    repository: Arc<R>,
    sanitizer: Arc<AdContentSanitizer>,
}

impl<R> AdSlotService<R>
where
    R: AdRepository + 'static,
{
    pub fn new(repository: Arc<R>, sanitizer: AdContentSanitizer) -> Self {
        Self {
            repository,
            sanitizer: Arc::new(sanitizer),
        }
    }

    /// Active creatives for a slot, sanitized independently, newest first.
    pub fn render_slot(
        &self,
        page_slug: &str,
        position: AdPosition,
    ) -> Result<RenderedSlot, AdSlotError> {
        let mut creatives = self.repository.for_slot(page_slug, position)?;
        creatives.retain(|creative| creative.active);
        creatives.sort_by(|left, right| {
            right
                .created_at
                .cmp(&left.created_at)
                .then_with(|| left.id.cmp(&right.id))
        });

        let mut rendered = Vec::with_capacity(creatives.len());
        for creative in creatives {
            let markup = self.sanitizer.sanitize(&creative.raw_markup);
            if markup.trim().is_empty() {
                debug!(
                    creative_id = %creative.id,
                    page_slug,
                    position = %position,
                    "creative empty after sanitizing; skipped"
                );
                continue;
            }
            rendered.push(RenderedCreative {
                id: creative.id,
                markup,
            });
        }

        debug!(
            page_slug,
            position = %position,
            creatives = rendered.len(),
            "ad slot rendered"
        );

        Ok(RenderedSlot {
            page_slug: page_slug.to_string(),
            position,
            creatives: rendered,
        })
    }
}

/// Sanitized contents of one slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedSlot {
    pub page_slug: String,
    pub position: AdPosition,
    pub creatives: Vec<RenderedCreative>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedCreative {
    pub id: CreativeId,
    pub markup: String,
}

impl RenderedSlot {
    pub fn is_empty(&self) -> bool {
        self.creatives.is_empty()
    }

    /// Slot wrapper markup ready to be embedded in a page. Empty slots render nothing.
    pub fn to_html(&self) -> String {
        if self.is_empty() {
            return String::new();
        }

        let mut html = format!(
            "<div class=\"ad-slot\" data-page=\"{}\" data-position=\"{}\">",
            ammonia::clean_text(&self.page_slug),
            self.position.as_str()
        );
        for creative in &self.creatives {
            html.push_str(&format!(
                "<div class=\"ad-creative\" data-creative-id=\"{}\">{}</div>",
                ammonia::clean_text(&creative.id.0),
                creative.markup
            ));
        }
        html.push_str("</div>");
        html
    }
}

/// Error raised by the slot service.
#[derive(Debug, thiserror::Error)]
pub enum AdSlotError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
