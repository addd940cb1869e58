//! Storage abstractions for service layer
//!
//! Contains reusable in-memory stores shared by the record services.

pub mod memory_map_store;
