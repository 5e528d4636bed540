//! Data models for extracted records and pipeline configuration.

pub mod config;
pub mod record;
