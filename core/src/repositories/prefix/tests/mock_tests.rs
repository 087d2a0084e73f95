//! Unit tests for mock prefix repository implementation

use crate::repositories::prefix::{MockPrefixRepository, PrefixRepository};

#[tokio::test]
async fn test_find_by_prefix_exact_only() {
    let repo = MockPrefixRepository::cambodia();

    let found = repo.find_by_prefix("85592").await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].network_name, "Cellcard");

    assert!(repo.find_by_prefix("8559").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_find_starting_with_is_sorted() {
    let repo = MockPrefixRepository::cambodia();

    let found = repo.find_starting_with("855").await.unwrap();
    let prefixes: Vec<&str> = found.iter().map(|r| r.prefix.as_str()).collect();
    assert_eq!(prefixes, vec!["85510", "85512", "85592"]);
}

#[tokio::test]
async fn test_failure_toggle() {
    let repo = MockPrefixRepository::cambodia();
    repo.set_should_fail(true);

    assert!(repo.find_by_prefix("85592").await.is_err());
    assert_eq!(repo.query_count(), 1);
}
