//! Unit tests for the in-memory ingredient store

use chrono::{Duration, NaiveDate, TimeZone, Utc};
use dinner_decider_api::models::NewIngredient;
use dinner_decider_api::storage::{InMemoryIngredientStore, IngredientStore, StorageError};

fn new_ingredient(name: &str, minutes: i64) -> NewIngredient {
    let created_at = Utc.with_ymd_and_hms(2024, 1, 15, 18, 0, 0).unwrap() + Duration::minutes(minutes);
    NewIngredient {
        name: name.to_string(),
        quantity: "1".to_string(),
        purchase_date: None,
        created_at,
        updated_at: created_at,
    }
}

#[tokio::test]
async fn test_create_assigns_increasing_ids() {
    let store = InMemoryIngredientStore::new();
    assert!(store.is_empty().await);

    let first = store.create(new_ingredient("carrot", 0)).await.unwrap();
    let second = store.create(new_ingredient("egg", 1)).await.unwrap();

    assert!(first.id > 0);
    assert!(second.id > first.id);
    assert_eq!(first.name, "carrot");
    assert_eq!(store.len().await, 2);
    assert_eq!(store.backend_name(), "memory");
}

#[tokio::test]
async fn test_get_all_newest_first() {
    let store = InMemoryIngredientStore::new();
    store.create(new_ingredient("oldest", 0)).await.unwrap();
    store.create(new_ingredient("newest", 10)).await.unwrap();
    store.create(new_ingredient("middle", 5)).await.unwrap();

    let names: Vec<String> = store
        .get_all()
        .await
        .unwrap()
        .into_iter()
        .map(|i| i.name)
        .collect();
    assert_eq!(names, vec!["newest", "middle", "oldest"]);
}

#[tokio::test]
async fn test_equal_timestamps_order_by_id_descending() {
    let store = InMemoryIngredientStore::new();
    let a = store.create(new_ingredient("a", 0)).await.unwrap();
    let b = store.create(new_ingredient("b", 0)).await.unwrap();

    let ids: Vec<i64> = store.get_all().await.unwrap().iter().map(|i| i.id).collect();
    assert_eq!(ids, vec![b.id, a.id]);
}

#[tokio::test]
async fn test_get_all_empty() {
    let store = InMemoryIngredientStore::new();
    assert!(store.get_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_get_missing_is_not_found() {
    let store = InMemoryIngredientStore::new();
    let err = store.get_by_id(99999).await.unwrap_err();
    assert!(err.is_not_found());
    assert!(matches!(err, StorageError::NotFound { .. }));
}

#[tokio::test]
async fn test_update_overwrites_fields_but_not_created_at() {
    let store = InMemoryIngredientStore::new();
    let created = store.create(new_ingredient("carrot", 0)).await.unwrap();

    let mut changed = created.clone();
    changed.name = "carrots".to_string();
    changed.quantity = "3".to_string();
    changed.purchase_date = NaiveDate::from_ymd_opt(2024, 1, 20);
    changed.created_at = created.created_at + Duration::days(1);
    changed.updated_at = created.created_at + Duration::hours(2);
    store.update(&changed).await.unwrap();

    let stored = store.get_by_id(created.id).await.unwrap();
    assert_eq!(stored.name, "carrots");
    assert_eq!(stored.quantity, "3");
    assert_eq!(stored.purchase_date, NaiveDate::from_ymd_opt(2024, 1, 20));
    assert_eq!(stored.created_at, created.created_at);
    assert_eq!(stored.updated_at, changed.updated_at);
}

#[tokio::test]
async fn test_update_missing_is_not_found() {
    let store = InMemoryIngredientStore::new();
    let mut ghost = store.create(new_ingredient("ghost", 0)).await.unwrap();
    ghost.id = 42;

    assert!(store.update(&ghost).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_delete_removes_record() {
    let store = InMemoryIngredientStore::new();
    let created = store.create(new_ingredient("milk", 0)).await.unwrap();

    store.delete(created.id).await.unwrap();

    assert!(store.get_by_id(created.id).await.unwrap_err().is_not_found());
    assert!(store.delete(created.id).await.unwrap_err().is_not_found());
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_ids_are_not_reused_after_delete() {
    let store = InMemoryIngredientStore::new();
    let first = store.create(new_ingredient("a", 0)).await.unwrap();
    store.delete(first.id).await.unwrap();

    let second = store.create(new_ingredient("b", 1)).await.unwrap();
    assert!(second.id > first.id);
}
