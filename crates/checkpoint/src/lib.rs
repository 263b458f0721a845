//! Resumable checkpoint of extraction results
//!
//! Results are kept as a single pretty-printed JSON array that is rewritten
//! after every successful extraction, so an interrupted run can be resumed
//! from the same file.

#![deny(warnings)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

mod lock;
mod store;

pub use store::{load, CheckpointStore};
