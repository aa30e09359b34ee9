use super::common::*;
use crate::ads::domain::{AdPosition, CreativeId};
use crate::ads::repository::{AdRepository, InMemoryAdRepository, RepositoryError};

#[test]
fn insert_rejects_duplicate_ids() {
    let repository = InMemoryAdRepository::new();
    assert!(repository.is_empty());
    repository
        .insert(creative("c1", "home", AdPosition::Top, "<span>a</span>", 1))
        .expect("first insert");

    let duplicate = repository.insert(creative("c1", "home", AdPosition::Footer, "", 2));

    assert!(matches!(duplicate, Err(RepositoryError::Conflict)));
    assert_eq!(repository.len(), 1);
}

#[test]
fn update_and_remove_require_existing_creatives() {
    let repository = InMemoryAdRepository::new();
    let missing = creative("ghost", "home", AdPosition::Top, "", 1);

    assert!(matches!(
        repository.update(missing.clone()),
        Err(RepositoryError::NotFound)
    ));
    assert!(matches!(
        repository.remove(&missing.id),
        Err(RepositoryError::NotFound)
    ));
}

#[test]
fn remove_returns_the_stored_creative() {
    let repository = InMemoryAdRepository::with_creatives(home_page_creatives());
    let id = CreativeId("c4".to_string());

    let removed = repository.remove(&id).expect("remove succeeds");

    assert_eq!(removed.position, AdPosition::Footer);
    assert_eq!(repository.fetch(&id).expect("fetch succeeds"), None);
}

#[test]
fn for_slot_includes_inactive_creatives() {
    let repository = InMemoryAdRepository::with_creatives(home_page_creatives());

    let stored = repository
        .for_slot("home", AdPosition::Top)
        .expect("query succeeds");

    assert_eq!(stored.len(), 3);
    assert!(stored.iter().any(|creative| !creative.active));
}
