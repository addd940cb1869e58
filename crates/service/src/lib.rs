//! Service layer for the favorite-foods record service.
//! - `storage`: generic in-memory map store.
//! - `foods`: the record model, the `FoodStore` seam and the seed loader.

pub mod errors;
pub mod storage;
pub mod foods;
