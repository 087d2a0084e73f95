//! Unit tests for in-memory repositories

use pv_core::domain::entities::{PrefixRecord, VerificationRecord};
use pv_core::repositories::{PrefixRepository, VerificationRepository};

use super::{InMemoryPrefixRepository, InMemoryVerificationRepository};

fn prefix(prefix: &str, network: &str) -> PrefixRecord {
    PrefixRecord {
        prefix: prefix.to_string(),
        min_length: 11,
        max_length: 11,
        country_name: "Cambodia".to_string(),
        network_name: network.to_string(),
        mcc: "456".to_string(),
        mnc: "01".to_string(),
        live_coverage: true,
    }
}

#[tokio::test]
async fn test_prefix_queries() {
    let repo = InMemoryPrefixRepository::new(vec![
        prefix("85592", "Cellcard"),
        prefix("85510", "Smart"),
        prefix("8551", "Other"),
    ]);

    let exact = repo.find_by_prefix("85592").await.unwrap();
    assert_eq!(exact.len(), 1);
    assert_eq!(exact[0].network_name, "Cellcard");

    let forward: Vec<String> = repo
        .find_starting_with("855")
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.prefix)
        .collect();
    assert_eq!(forward, vec!["8551", "85510", "85592"]);
}

#[tokio::test]
async fn test_insert_keeps_duplicates_in_order() {
    let repo = InMemoryPrefixRepository::new(vec![prefix("85592", "Cellcard")]);
    repo.insert(prefix("85512", "Cellcard")).await;
    repo.insert(prefix("85592", "Duplicate")).await;

    assert_eq!(repo.len().await, 3);
    assert_eq!(repo.find_by_prefix("85592").await.unwrap().len(), 2);
    assert_eq!(repo.find_starting_with("855").await.unwrap()[0].prefix, "85512");
}

#[tokio::test]
async fn test_verification_upsert_keeps_id() {
    let repo = InMemoryVerificationRepository::new();

    let first = repo.upsert(&VerificationRecord::new("85592313242")).await.unwrap();
    let mut refreshed = VerificationRecord::new("85592313242");
    refreshed.network = Some("Cellcard".to_string());
    let second = repo.upsert(&refreshed).await.unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(repo.len().await, 1);
    assert_eq!(
        repo.find_latest("85592313242").await.unwrap().unwrap().network.as_deref(),
        Some("Cellcard")
    );
}

#[tokio::test]
async fn test_verification_delete() {
    let repo = InMemoryVerificationRepository::new();
    repo.upsert(&VerificationRecord::new("85592313242")).await.unwrap();

    assert!(repo.exists("85592313242").await.unwrap());
    assert_eq!(repo.delete_by_number("85592313242").await.unwrap(), 1);
    assert_eq!(repo.delete_by_number("85592313242").await.unwrap(), 0);
    assert!(!repo.exists("85592313242").await.unwrap());
}
