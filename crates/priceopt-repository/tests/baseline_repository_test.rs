//! Integration tests for PgBaselineRepository.
//!
//! These tests run against a real PostgreSQL database using testcontainers.
//! Requires Docker; run with `cargo test -- --ignored`.

mod common;

use priceopt_core::{HealthCheck, PageRequest, PricingError, Sku, SkuBaseline};
use priceopt_repository::{BaselineRepository, PgBaselineRepository};
use common::TestDatabase;

fn sku(value: &str) -> Sku {
    Sku::parse(value).unwrap()
}

fn baseline(value: &str, base_price: f64, cost: f64) -> SkuBaseline {
    SkuBaseline::new(sku(value), base_price, cost)
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_upsert_and_find() {
    let db = TestDatabase::new().await;
    let repo = PgBaselineRepository::new(db.pool());

    let stored = repo
        .upsert(&SkuBaseline::demo())
        .await
        .expect("Failed to upsert baseline");
    assert_eq!(stored.sku.as_str(), "SKU123");

    let found = repo
        .find_by_sku(&sku("SKU123"))
        .await
        .expect("Query failed")
        .expect("Baseline not found");

    assert_eq!(found.base_price, 100.0);
    assert_eq!(found.cost, 70.0);
    assert_eq!(found.inventory, 800);
    assert_eq!(found.competitor_price, Some(110.0));
    assert_eq!(found.seasonality, 1.0);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_find_unknown_returns_none() {
    let db = TestDatabase::new().await;
    let repo = PgBaselineRepository::new(db.pool());

    let result = repo.find_by_sku(&sku("missing")).await.expect("Query failed");
    assert!(result.is_none());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_upsert_replaces_and_keeps_created_at() {
    let db = TestDatabase::new().await;
    let repo = PgBaselineRepository::new(db.pool());

    let first = repo.upsert(&baseline("A1", 10.0, 6.0)).await.unwrap();

    let mut replacement = baseline("A1", 12.0, 7.0).with_inventory(40);
    replacement.created_at = first.created_at + chrono::Duration::hours(1);
    let second = repo.upsert(&replacement).await.unwrap();

    assert_eq!(second.base_price, 12.0);
    assert_eq!(second.inventory, 40);
    assert_eq!(second.created_at, first.created_at);
    assert_eq!(repo.count().await.unwrap(), 1);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_check_constraint_rejects_negative_inventory() {
    let db = TestDatabase::new().await;
    let repo = PgBaselineRepository::new(db.pool());

    let err = repo
        .upsert(&baseline("NEG", 10.0, 5.0).with_inventory(-1))
        .await
        .unwrap_err();
    assert!(matches!(err, PricingError::Validation(_)));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_delete() {
    let db = TestDatabase::new().await;
    let repo = PgBaselineRepository::new(db.pool());

    repo.upsert(&baseline("D1", 5.0, 2.0)).await.unwrap();
    assert!(repo.delete(&sku("D1")).await.unwrap());
    assert!(!repo.delete(&sku("D1")).await.unwrap());
    assert!(repo.find_by_sku(&sku("D1")).await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_find_all_with_pagination() {
    let db = TestDatabase::new().await;
    let repo = PgBaselineRepository::new(db.pool());

    for value in ["C", "A", "B"] {
        repo.upsert(&baseline(value, 10.0, 5.0)).await.unwrap();
    }

    let page = repo.find_all(PageRequest::new(0, 2)).await.unwrap();
    let skus: Vec<_> = page.content.iter().map(|b| b.sku.to_string()).collect();
    assert_eq!(skus, vec!["A", "B"]);
    assert_eq!(page.total_elements, 3);
    assert_eq!(page.total_pages, 2);

    let page2 = repo.find_all(PageRequest::new(1, 2)).await.unwrap();
    assert_eq!(page2.content.len(), 1);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_pool_health_check() {
    let db = TestDatabase::new().await;
    let pool = db.pool();

    assert_eq!(pool.name(), "database");
    assert!(pool.check().await.is_healthy());
}
