//! Data models for stores, monthly plans, revenues and configuration.

pub mod config;
pub mod plan;
pub mod revenue;
pub mod store;
