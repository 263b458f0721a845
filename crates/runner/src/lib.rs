//! Batch extraction and scoring
//!
//! [`BatchDriver`] walks the dataset once, reusing checkpointed results and
//! extracting the rest; [`Scorer`] turns the comparison with the ground truth
//! into an [`AccuracyReport`].

#![deny(warnings)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

mod driver;
mod scorer;

pub use driver::{rescore, BatchDriver, RunSummary};
pub use scorer::{score_item, AccuracyReport, ItemScore, Scorer};
