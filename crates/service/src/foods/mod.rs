//! Favorite-food records keyed by netID.
//!
//! `FoodStore` is the seam the HTTP layer depends on; `InMemoryFoodStore` is the
//! only implementation and is seeded from a directory of text files by `loader`.

pub mod loader;
pub mod memory;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::ServiceError;

pub use memory::InMemoryFoodStore;

/// Entity name used in not-found / conflict messages.
pub const ENTITY: &str = "NetID";

/// One person's favorite food.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub struct FoodRecord {
    pub netid: String,
    pub food: String,
}

impl FoodRecord {
    pub fn new(netid: impl Into<String>, food: impl Into<String>) -> Self {
        Self { netid: netid.into(), food: food.into() }
    }

    /// An empty food is indistinguishable from "no record", so it is never stored.
    pub fn validate(&self) -> Result<(), ServiceError> {
        validate_food(&self.food)
    }
}

pub fn validate_food(food: &str) -> Result<(), ServiceError> {
    if food.is_empty() {
        return Err(ServiceError::Validation("food must not be empty".into()));
    }
    Ok(())
}

/// Trait abstraction for favorite-food storage.
/// Implementations must make `create` and `update` atomic with respect to
/// their existence check.
#[async_trait]
pub trait FoodStore: Send + Sync {
    async fn list(&self) -> Vec<FoodRecord>;
    async fn contains(&self, netid: &str) -> bool;
    async fn get(&self, netid: &str) -> Result<FoodRecord, ServiceError>;
    async fn create(&self, record: FoodRecord) -> Result<FoodRecord, ServiceError>;
    async fn update(&self, netid: &str, food: String) -> Result<FoodRecord, ServiceError>;
    async fn delete(&self, netid: &str) -> Result<FoodRecord, ServiceError>;
}
