//! Integration tests for identity pool resolution

mod common;

use common::{pool_user, FakeDirectory, FakePool, ListCall};
use crowsnest_export::anonymization::{MonikerGenerator, ScrubPolicy, Scrubber};
use crowsnest_export::core::export::ExportErrorType;
use crowsnest_export::core::pools::{PoolResolver, FALLBACK_USER_ATTRIBUTES, FULL_USER_ATTRIBUTES};
use crowsnest_export::domain::PoolId;
use std::time::{Duration, Instant};

fn scrubber() -> Scrubber {
    Scrubber::new(
        vec!["cleo.com".to_string(), "mailosaur.io".to_string()],
        ScrubPolicy::PerRun,
        Box::new(MonikerGenerator::with_seed(11)),
    )
}

fn ids(raw: &[&str]) -> Vec<PoolId> {
    raw.iter().map(|id| PoolId::new(*id).unwrap()).collect()
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[tokio::test]
async fn test_missing_pool_is_isolated() {
    let directory = FakeDirectory::new()
        .with_pool("poolA", FakePool::new("Alpha", vec![vec![pool_user("a@example.com", "A", "One")]]))
        .with_pool("poolC", FakePool::new("Gamma", vec![vec![pool_user("c@example.com", "C", "Three")]]));

    let resolver = PoolResolver::new(&directory, Duration::ZERO);
    let mut scrubber = scrubber();
    let resolution = resolver
        .resolve_pools(&ids(&["poolA", "poolB", "poolC"]), &mut scrubber)
        .await;

    let exported: Vec<&str> = resolution.pools.iter().map(|p| p.pool_id.as_str()).collect();
    assert_eq!(exported, vec!["poolA", "poolC"]);
    assert_eq!(resolution.missing_pools, ids(&["poolB"]));
    assert!(resolution.errors.is_empty());

    assert_eq!(resolution.pools[0].pool_name, "Alpha");
    assert_eq!(resolution.pools[1].pool_name, "Gamma");

    // The missing pool is never listed
    assert!(directory.list_calls().iter().all(|c| c.pool_id != "poolB"));
}

#[tokio::test]
async fn test_unknown_attribute_retries_whole_listing_with_email_only() {
    let pages = vec![
        vec![pool_user("a@example.com", "A", "One")],
        vec![pool_user("b@example.com", "B", "Two")],
    ];
    let directory = FakeDirectory::new().with_pool(
        "poolA",
        FakePool::new("Alpha", pages).with_schema(&["email", "given_name", "family_name"]),
    );

    let resolver = PoolResolver::new(&directory, Duration::ZERO);
    let users = resolver
        .fetch_pool_users(&PoolId::new("poolA").unwrap())
        .await
        .unwrap();

    assert_eq!(users.len(), 2);
    assert_eq!(
        directory.list_calls(),
        vec![
            ListCall {
                pool_id: "poolA".to_string(),
                attributes: strings(FULL_USER_ATTRIBUTES),
                cursor: None,
            },
            ListCall {
                pool_id: "poolA".to_string(),
                attributes: strings(FALLBACK_USER_ATTRIBUTES),
                cursor: None,
            },
            ListCall {
                pool_id: "poolA".to_string(),
                attributes: strings(FALLBACK_USER_ATTRIBUTES),
                cursor: Some("token-1".to_string()),
            },
        ]
    );
}

#[tokio::test]
async fn test_retry_happens_only_once() {
    let directory = FakeDirectory::new().with_pool(
        "poolA",
        FakePool::new("Alpha", vec![vec![]]).with_schema(&["sub"]),
    );

    let resolver = PoolResolver::new(&directory, Duration::ZERO);
    let mut scrubber = scrubber();
    let resolution = resolver
        .resolve_pools(&ids(&["poolA"]), &mut scrubber)
        .await;

    assert!(resolution.pools.is_empty());
    assert_eq!(resolution.errors.len(), 1);
    assert_eq!(resolution.errors[0].error_type, ExportErrorType::PoolUsers);
    assert_eq!(directory.list_calls().len(), 2);
}

#[tokio::test]
async fn test_describe_failure_skips_pool_and_continues() {
    let mut broken = FakePool::new("Broken", vec![vec![]]);
    broken.describe_error = Some("AccessDeniedException".to_string());

    let directory = FakeDirectory::new()
        .with_pool("poolA", broken)
        .with_pool("poolB", FakePool::new("Beta", vec![vec![pool_user("b@example.com", "B", "Two")]]));

    let resolver = PoolResolver::new(&directory, Duration::ZERO);
    let mut scrubber = scrubber();
    let resolution = resolver
        .resolve_pools(&ids(&["poolA", "poolB"]), &mut scrubber)
        .await;

    assert_eq!(resolution.pools.len(), 1);
    assert_eq!(resolution.pools[0].pool_id.as_str(), "poolB");
    assert!(resolution.missing_pools.is_empty());
    assert_eq!(resolution.errors.len(), 1);
    assert_eq!(resolution.errors[0].error_type, ExportErrorType::PoolDescribe);
    assert_eq!(resolution.errors[0].pool_id, Some(PoolId::new("poolA").unwrap()));
}

#[tokio::test]
async fn test_list_failure_is_pool_scoped() {
    let mut throttled = FakePool::new("Throttled", vec![vec![]]);
    throttled.list_error = Some("TooManyRequestsException".to_string());

    let directory = FakeDirectory::new()
        .with_pool("poolA", throttled)
        .with_pool("poolB", FakePool::new("Beta", vec![vec![]]));

    let resolver = PoolResolver::new(&directory, Duration::ZERO);
    let mut scrubber = scrubber();
    let resolution = resolver
        .resolve_pools(&ids(&["poolA", "poolB"]), &mut scrubber)
        .await;

    assert_eq!(resolution.pools.len(), 1);
    assert_eq!(resolution.errors.len(), 1);
    // Not an unknown-attribute failure, so no retry
    let calls_for_a = directory
        .list_calls()
        .into_iter()
        .filter(|c| c.pool_id == "poolA")
        .count();
    assert_eq!(calls_for_a, 1);
}

#[tokio::test]
async fn test_users_are_scrubbed() {
    let directory = FakeDirectory::new().with_pool(
        "poolA",
        FakePool::new(
            "Alpha",
            vec![vec![
                pool_user("alice@example.com", "Alice", "Smith"),
                pool_user("qa@mailosaur.io", "Q", "A"),
            ]],
        ),
    );

    let resolver = PoolResolver::new(&directory, Duration::ZERO);
    let mut scrubber = scrubber();
    let resolution = resolver
        .resolve_pools(&ids(&["poolA"]), &mut scrubber)
        .await;

    let users = &resolution.pools[0].users;
    assert_eq!(users.len(), 2);

    let alice = &users[0];
    assert_ne!(alice.email(), Some("alice@example.com"));
    assert!(alice.email().unwrap().ends_with("@example.com"));
    assert_eq!(alice.username, alice.email().unwrap());
    assert_ne!(alice.attribute("given_name"), Some("Alice"));
    assert_eq!(alice.attribute("custom:company"), Some("Acme"));

    assert_eq!(users[1], pool_user("qa@mailosaur.io", "Q", "A"));
}

#[tokio::test]
async fn test_delay_before_every_page() {
    let pages = vec![vec![], vec![], vec![]];
    let directory = FakeDirectory::new().with_pool("poolA", FakePool::new("Alpha", pages));

    let resolver = PoolResolver::new(&directory, Duration::from_millis(20));
    let started = Instant::now();
    resolver
        .fetch_pool_users(&PoolId::new("poolA").unwrap())
        .await
        .unwrap();

    assert_eq!(directory.list_calls().len(), 3);
    assert!(started.elapsed() >= Duration::from_millis(60));
}
