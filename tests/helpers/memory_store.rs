// ABOUTME: In-memory pack configuration store for manager and route tests
// ABOUTME: Mimics the archive-then-update transaction and can simulate missing rows, delays and failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use chrono::Utc;
use packman::constants::configuration::{
    CONFIGURATION_ID, DEFAULT_PACK_SIZES, ENTITY_NAME, INITIAL_VERSION, SEED_ACTOR,
};
use packman::database_plugins::{PackConfigurationStore, StoreResult};
use packman::errors::DatabaseError;
use packman_core::models::{PackConfiguration, PackConfigurationHistory, PackSize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;

#[derive(Default)]
struct State {
    current: Option<PackConfiguration>,
    history: Vec<PackConfigurationHistory>,
}

/// Pack configuration store held in process memory
///
/// The whole update runs under one mutex, so it serializes exactly like the
/// database row lock. A configured delay is spent before any state changes,
/// so an update abandoned on its deadline leaves nothing behind.
pub struct MemoryStore {
    state: Mutex<State>,
    update_delay: Option<Duration>,
    fail_updates: AtomicBool,
}

impl MemoryStore {
    /// Store seeded with the default configuration at version 1
    pub fn seeded() -> Self {
        Self::with_sizes(&DEFAULT_PACK_SIZES)
    }

    /// Store seeded with `pack_sizes` at version 1
    pub fn with_sizes(pack_sizes: &[PackSize]) -> Self {
        let current = PackConfiguration {
            id: CONFIGURATION_ID,
            version: INITIAL_VERSION,
            pack_sizes: pack_sizes.to_vec(),
            updated_at: Utc::now(),
            updated_by: Some(SEED_ACTOR.to_owned()),
        };
        Self {
            state: Mutex::new(State {
                current: Some(current),
                history: Vec::new(),
            }),
            update_delay: None,
            fail_updates: AtomicBool::new(false),
        }
    }

    /// Store without a configuration row
    #[allow(dead_code)]
    pub fn empty() -> Self {
        Self {
            state: Mutex::new(State::default()),
            update_delay: None,
            fail_updates: AtomicBool::new(false),
        }
    }

    /// Delay every update by `delay` before it touches state
    #[allow(dead_code)]
    pub fn with_update_delay(mut self, delay: Duration) -> Self {
        self.update_delay = Some(delay);
        self
    }

    /// Make every subsequent update fail with a query error
    #[allow(dead_code)]
    pub fn fail_updates(&self) {
        self.fail_updates.store(true, Ordering::SeqCst);
    }

    /// Current configuration, if any
    #[allow(dead_code)]
    pub async fn current(&self) -> Option<PackConfiguration> {
        self.state.lock().await.current.clone()
    }

    /// Number of archived versions
    #[allow(dead_code)]
    pub async fn history_len(&self) -> usize {
        self.state.lock().await.history.len()
    }
}

#[async_trait]
impl PackConfigurationStore for MemoryStore {
    async fn get_pack_sizes(&self) -> StoreResult<Vec<PackSize>> {
        Ok(self.get_pack_configuration().await?.pack_sizes)
    }

    async fn get_pack_configuration(&self) -> StoreResult<PackConfiguration> {
        self.state
            .lock()
            .await
            .current
            .clone()
            .ok_or(DatabaseError::NotFound {
                entity: ENTITY_NAME,
            })
    }

    async fn update_pack_sizes(
        &self,
        pack_sizes: &[PackSize],
        updated_by: Option<&str>,
    ) -> StoreResult<PackConfiguration> {
        let mut state = self.state.lock().await;
        if let Some(delay) = self.update_delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_updates.load(Ordering::SeqCst) {
            return Err(DatabaseError::QueryError {
                context: "simulated write failure".to_owned(),
            });
        }

        let current = state.current.clone().ok_or(DatabaseError::NotFound {
            entity: ENTITY_NAME,
        })?;
        let now = Utc::now();
        let next_id = i64::try_from(state.history.len()).unwrap_or(i64::MAX) + 1;
        state.history.push(PackConfigurationHistory {
            id: next_id,
            version: current.version,
            pack_sizes: current.pack_sizes,
            created_by: current.updated_by,
            created_at: now,
        });

        let updated = PackConfiguration {
            id: CONFIGURATION_ID,
            version: current.version + 1,
            pack_sizes: pack_sizes.to_vec(),
            updated_at: now,
            updated_by: updated_by.map(ToOwned::to_owned),
        };
        state.current = Some(updated.clone());
        Ok(updated)
    }

    async fn get_pack_configuration_history(
        &self,
        limit: u32,
    ) -> StoreResult<Vec<PackConfigurationHistory>> {
        let state = self.state.lock().await;
        let mut history = state.history.clone();
        history.sort_by(|a, b| b.version.cmp(&a.version));
        history.truncate(limit as usize);
        Ok(history)
    }
}
