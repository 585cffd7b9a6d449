// src/core/mod.rs — Core domain model

pub mod store;
pub mod types;
