// ABOUTME: Configuration manager tests against the in-memory store
// ABOUTME: Covers error mapping, deduplication, deadlines, history limits and calculation wiring
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod helpers;

use futures_util::future::join_all;
use helpers::memory_store::MemoryStore;
use packman::errors::ErrorCode;
use packman::services::PackConfigurationManager;
use std::sync::Arc;
use std::time::Duration;

const DEADLINE: Duration = Duration::from_secs(5);

fn manager_over(store: &Arc<MemoryStore>) -> PackConfigurationManager {
    PackConfigurationManager::new(store.clone(), DEADLINE)
}

#[tokio::test]
async fn test_missing_row_maps_to_not_found() {
    let store = Arc::new(MemoryStore::empty());
    let manager = manager_over(&store);

    let sizes = manager.get_active_sizes().await.unwrap_err();
    assert_eq!(sizes.code, ErrorCode::NotFound);
    assert_eq!(sizes.message, "Pack configuration not found");

    let configuration = manager.get_active_configuration().await.unwrap_err();
    assert_eq!(configuration.code, ErrorCode::NotFound);

    let update = manager.update_sizes(&[250], Some("ops")).await.unwrap_err();
    assert_eq!(update.code, ErrorCode::NotFound);

    let calculation = manager.calculate(10).await.unwrap_err();
    assert_eq!(calculation.code, ErrorCode::NotFound);
}

#[tokio::test]
async fn test_update_deduplicates_preserving_first_occurrence() {
    let store = Arc::new(MemoryStore::seeded());
    let manager = manager_over(&store);

    let updated = manager
        .update_sizes(&[250, 500, 250, 1000, 500], Some("ops"))
        .await
        .unwrap();

    assert_eq!(updated.pack_sizes, vec![250, 500, 1000]);
    assert_eq!(updated.version, 2);
    assert_eq!(updated.updated_by.as_deref(), Some("ops"));
    assert_eq!(
        manager.get_active_sizes().await.unwrap(),
        vec![250, 500, 1000]
    );
}

#[tokio::test]
async fn test_update_rejects_empty_and_zero_sizes() {
    let store = Arc::new(MemoryStore::seeded());
    let manager = manager_over(&store);

    let empty = manager.update_sizes(&[], None).await.unwrap_err();
    assert_eq!(empty.code, ErrorCode::Validation);

    let zero = manager.update_sizes(&[0, 250], None).await.unwrap_err();
    assert_eq!(zero.code, ErrorCode::Validation);

    assert_eq!(store.current().await.unwrap().version, 1);
    assert_eq!(store.history_len().await, 0);
}

#[tokio::test]
async fn test_empty_actor_is_stored_as_absent() {
    let store = Arc::new(MemoryStore::seeded());
    let manager = manager_over(&store);

    let updated = manager.update_sizes(&[100], Some("")).await.unwrap();
    assert_eq!(updated.updated_by, None);
}

#[tokio::test]
async fn test_store_failure_maps_to_internal_without_side_effects() {
    let store = Arc::new(MemoryStore::seeded());
    store.fail_updates();
    let manager = manager_over(&store);

    let error = manager.update_sizes(&[100], Some("ops")).await.unwrap_err();
    assert_eq!(error.code, ErrorCode::Internal);
    assert_eq!(error.message, "Failed to update pack sizes");
    assert!(error
        .source_chain()
        .is_some_and(|chain| chain.contains("simulated write failure")));

    assert_eq!(store.current().await.unwrap().version, 1);
    assert_eq!(store.history_len().await, 0);
}

#[tokio::test]
async fn test_elapsed_deadline_abandons_update() {
    let store = Arc::new(MemoryStore::seeded().with_update_delay(Duration::from_millis(500)));
    let manager = PackConfigurationManager::new(store.clone(), Duration::from_millis(20));

    let error = manager.update_sizes(&[100], Some("ops")).await.unwrap_err();
    assert_eq!(error.code, ErrorCode::Internal);
    assert!(error
        .source_chain()
        .is_some_and(|chain| chain.contains("timed out")));

    let current = store.current().await.unwrap();
    assert_eq!(current.version, 1);
    assert_eq!(store.history_len().await, 0);
}

#[tokio::test]
async fn test_history_is_newest_first_and_limited() {
    let store = Arc::new(MemoryStore::seeded());
    let manager = manager_over(&store);

    for size in 1..=12 {
        manager.update_sizes(&[size * 10], None).await.unwrap();
    }

    let default_page = manager.get_history(None).await.unwrap();
    assert_eq!(default_page.len(), 10);
    let versions: Vec<i64> = default_page.iter().map(|entry| entry.version).collect();
    assert_eq!(versions, (3..=12).rev().collect::<Vec<_>>());

    let small_page = manager.get_history(Some(3)).await.unwrap();
    assert_eq!(
        small_page.iter().map(|entry| entry.version).collect::<Vec<_>>(),
        vec![12, 11, 10]
    );
    // Version 12 was archived holding the sizes written by the 11th update
    assert_eq!(small_page[0].pack_sizes, vec![110]);

    let all = manager.get_history(Some(1_000)).await.unwrap();
    assert_eq!(all.len(), 12);
    assert_eq!(all.last().unwrap().pack_sizes, vec![250, 500, 1000, 2000, 5000]);
    assert_eq!(all.last().unwrap().updated_by.as_deref(), Some("system"));

    assert_eq!(manager.get_history(Some(0)).await.unwrap().len(), 10);
    assert_eq!(manager.get_history(Some(-5)).await.unwrap().len(), 10);
}

#[tokio::test]
async fn test_calculate_uses_active_sizes() {
    let store = Arc::new(MemoryStore::with_sizes(&[23, 31, 53]));
    let manager = manager_over(&store);

    let calculation = manager.calculate(500_000).await.unwrap();
    assert_eq!(calculation.packs.get(&53), Some(&9433));
    assert_eq!(calculation.packs.get(&31), Some(&1));
    assert_eq!(calculation.packs.get(&23), Some(&1));

    manager.update_sizes(&[100], None).await.unwrap();
    let recalculated = manager.calculate(1001).await.unwrap();
    assert_eq!(recalculated.packs.get(&100), Some(&11));
}

#[tokio::test]
async fn test_concurrent_updates_each_produce_one_version() {
    let store = Arc::new(MemoryStore::seeded());
    let manager = manager_over(&store);

    let tasks: Vec<_> = (1..=16_u32)
        .map(|n| {
            let manager = manager.clone();
            tokio::spawn(async move { manager.update_sizes(&[n], Some("load")).await })
        })
        .collect();
    for outcome in join_all(tasks).await {
        outcome.unwrap().unwrap();
    }

    assert_eq!(store.current().await.unwrap().version, 17);
    assert_eq!(store.history_len().await, 16);
}
