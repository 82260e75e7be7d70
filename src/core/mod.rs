//! Core aggregation engine module

pub mod config;
pub mod errors;
pub mod models;
pub mod orchestrator;
pub mod scoring;
