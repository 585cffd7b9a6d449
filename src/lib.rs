// src/lib.rs — Library root for testgen

pub mod cli;
pub mod client;
pub mod core;
pub mod evaluator;
pub mod export;
pub mod infra;
