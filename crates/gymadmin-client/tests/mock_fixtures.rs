//! `MockAdminClient` seeded from the bundled fixture files

#![allow(clippy::unwrap_used)]

use gymadmin_client::{AdminApi, MockAdminClient};
use gymadmin_core::config::ApiConfig;
use gymadmin_core::{Category, MembershipPlan, Order, Product, Subscription, User};
use pretty_assertions::assert_eq;
use std::path::PathBuf;
use tempfile::TempDir;

fn fixture_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../fixtures")
}

#[tokio::test]
async fn test_every_fixture_collection_parses() {
    let api = MockAdminClient::new()
        .with_delay(0)
        .load_dir(&fixture_dir())
        .unwrap();

    assert_eq!(api.list::<User>().await.unwrap().len(), 5);
    assert_eq!(api.list::<MembershipPlan>().await.unwrap().len(), 3);
    assert_eq!(api.list::<Subscription>().await.unwrap().len(), 3);
    assert_eq!(api.list::<Product>().await.unwrap().len(), 5);
    assert_eq!(api.list::<Order>().await.unwrap().len(), 4);
    assert_eq!(api.list::<Category>().await.unwrap().len(), 3);

    let tee: Product = api.get("prod-tee").await.unwrap();
    assert_eq!(tee.colors.len(), 2);
}

#[tokio::test]
async fn test_from_config_with_partial_dir() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("categories.json"),
        r#"[{"_id": "c1", "name": "Apparel"}]"#,
    )
    .unwrap();

    let config = ApiConfig {
        use_mock: true,
        mock_delay_ms: 0,
        mock_data_dir: Some(dir.path().to_path_buf()),
        ..ApiConfig::default()
    };
    let api = MockAdminClient::from_config(&config).unwrap();

    assert_eq!(api.list::<Category>().await.unwrap().len(), 1);
    assert!(api.list::<Order>().await.unwrap().is_empty());
}

#[test]
fn test_bad_fixture_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("orders.json"), "{ not an array").unwrap();

    assert!(MockAdminClient::new().load_dir(dir.path()).is_err());
}
