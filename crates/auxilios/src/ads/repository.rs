use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use super::domain::{AdCreative, AdPosition, CreativeId};

/// Storage abstraction so the slot service can be exercised in isolation.
pub trait AdRepository: Send + Sync {
    fn insert(&self, creative: AdCreative) -> Result<AdCreative, RepositoryError>;
    fn update(&self, creative: AdCreative) -> Result<(), RepositoryError>;
    fn remove(&self, id: &CreativeId) -> Result<AdCreative, RepositoryError>;
    fn fetch(&self, id: &CreativeId) -> Result<Option<AdCreative>, RepositoryError>;
    /// Every creative stored for the slot, active or not.
    fn for_slot(
        &self,
        page_slug: &str,
        position: AdPosition,
    ) -> Result<Vec<AdCreative>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("creative already exists")]
    Conflict,
    #[error("creative not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Process-local store used by the API binary and tests.
#[derive(Debug, Default)]
pub struct InMemoryAdRepository {
    creatives: Mutex<BTreeMap<CreativeId, AdCreative>>,
}

impl InMemoryAdRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store, replacing duplicates by id.
    pub fn with_creatives<I>(creatives: I) -> Self
    where
        I: IntoIterator<Item = AdCreative>,
    {
        let creatives = creatives
            .into_iter()
            .map(|creative| (creative.id.clone(), creative))
            .collect();
        Self {
            creatives: Mutex::new(creatives),
        }
    }

    pub fn len(&self) -> usize {
        self.lock().map(|guard| guard.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<MutexGuard<'_, BTreeMap<CreativeId, AdCreative>>, RepositoryError> {
        self.creatives
            .lock()
            .map_err(|_| RepositoryError::Unavailable("creative store lock poisoned".to_string()))
    }
}

impl AdRepository for InMemoryAdRepository {
    fn insert(&self, creative: AdCreative) -> Result<AdCreative, RepositoryError> {
        let mut guard = self.lock()?;
        if guard.contains_key(&creative.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(creative.id.clone(), creative.clone());
        Ok(creative)
    }

    fn update(&self, creative: AdCreative) -> Result<(), RepositoryError> {
        let mut guard = self.lock()?;
        match guard.get_mut(&creative.id) {
            Some(existing) => {
                *existing = creative;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn remove(&self, id: &CreativeId) -> Result<AdCreative, RepositoryError> {
        self.lock()?.remove(id).ok_or(RepositoryError::NotFound)
    }

    fn fetch(&self, id: &CreativeId) -> Result<Option<AdCreative>, RepositoryError> {
        Ok(self.lock()?.get(id).cloned())
    }

    fn for_slot(
        &self,
        page_slug: &str,
        position: AdPosition,
    ) -> Result<Vec<AdCreative>, RepositoryError> {
        Ok(self
            .lock()?
            .values()
            .filter(|creative| creative.belongs_to(page_slug, position))
            .cloned()
            .collect())
    }
}
