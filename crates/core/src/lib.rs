//! Core types for the lawabbr evaluation harness
//!
//! This crate provides the foundations shared by the other crates:
//!
//! - **Models**: dataset items, abbreviation pairs and result records
//! - **Dataset**: loading of the annotated input file
//! - **Configuration**: layered configuration and output path derivation
//! - **Error handling**: unified error types

#![deny(warnings)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

pub mod config;
pub mod dataset;
pub mod error;
pub mod models;

// Re-export main types for convenience
pub use config::{Config, ExtractionConfig, FewShotType, LlmConfig, ModelName, PathsConfig};
pub use dataset::load_dataset;
pub use error::{Error, Result, ResultExt};
pub use models::{record_id, AbbrPair, DatasetItem, ResultRecord};
