use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use tracing::{debug, info};

use super::{loader, validate_food, FoodRecord, FoodStore, ENTITY};
use crate::errors::ServiceError;
use crate::storage::memory_map_store::MemoryMapStore;

/// Process-memory store of `netid -> food`. Mutations are never written back
/// to the seed files.
#[derive(Clone, Default)]
pub struct InMemoryFoodStore {
    store: MemoryMapStore<String, String>,
}

impl InMemoryFoodStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = FoodRecord>,
    {
        let map: HashMap<String, String> = records.into_iter().map(|r| (r.netid, r.food)).collect();
        Self { store: MemoryMapStore::from_map(map) }
    }

    /// Seed the store from `<dir>/<netid>.<extension>` files.
    pub async fn load(dir: &Path, extension: &str) -> Result<Self, ServiceError> {
        let map = loader::load_seed_dir(dir, extension).await?;
        info!(seed_dir = %dir.display(), records = map.len(), "food store seeded");
        Ok(Self { store: MemoryMapStore::from_map(map) })
    }

    pub async fn len(&self) -> usize {
        self.store.len().await
    }
}

#[async_trait]
impl FoodStore for InMemoryFoodStore {
    async fn list(&self) -> Vec<FoodRecord> {
        let mut records: Vec<FoodRecord> = self
            .store
            .list()
            .await
            .into_iter()
            .map(|(netid, food)| FoodRecord { netid, food })
            .collect();
        records.sort();
        records
    }

    async fn contains(&self, netid: &str) -> bool {
        self.store.get(&netid.to_string()).await.is_some()
    }

    async fn get(&self, netid: &str) -> Result<FoodRecord, ServiceError> {
        self.store
            .get(&netid.to_string())
            .await
            .map(|food| FoodRecord::new(netid, food))
            .ok_or_else(|| ServiceError::not_found(ENTITY))
    }

    async fn create(&self, record: FoodRecord) -> Result<FoodRecord, ServiceError> {
        record.validate()?;
        self.store
            .insert_new(record.netid.clone(), record.food.clone())
            .await
            .map_err(|_| ServiceError::conflict(ENTITY))?;
        debug!(netid = %record.netid, "food record created");
        Ok(record)
    }

    async fn update(&self, netid: &str, food: String) -> Result<FoodRecord, ServiceError> {
        validate_food(&food)?;
        match self.store.replace(&netid.to_string(), food.clone()).await {
            Some(_) => {
                debug!(%netid, "food record updated");
                Ok(FoodRecord::new(netid, food))
            }
            None => Err(ServiceError::not_found(ENTITY)),
        }
    }

    async fn delete(&self, netid: &str) -> Result<FoodRecord, ServiceError> {
        let food = self
            .store
            .remove(&netid.to_string())
            .await
            .ok_or_else(|| ServiceError::not_found(ENTITY))?;
        debug!(%netid, "food record deleted");
        Ok(FoodRecord::new(netid, food))
    }
}
