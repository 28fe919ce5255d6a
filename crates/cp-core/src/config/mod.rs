//! # Configuration DTOs
//!
//! `AppConfig` mirrors the operator TOML file one-to-one; every key is
//! optional. `EngineConfig` is the resolved view the history engine and the
//! runtime consume.

mod app_config;
mod engine_config;

pub use app_config::{AppConfig, HistorySection, ImagesSection, PollerSection, StorageSection};
pub use engine_config::EngineConfig;
