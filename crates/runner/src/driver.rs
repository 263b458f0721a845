//! Resumable batch extraction over the dataset

use crate::scorer::{AccuracyReport, Scorer};
use indicatif::{ProgressBar, ProgressStyle};
use lawabbr_checkpoint::CheckpointStore;
use lawabbr_core::{DatasetItem, Result, ResultRecord};
use lawabbr_extraction::ExtractionClient;
use tracing::{debug, error, info, warn};

/// What happened to the items of one pass
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub report: AccuracyReport,
    /// Items extracted in this pass and saved
    pub extracted: usize,
    /// Items whose result was taken from the checkpoint
    pub reused: usize,
    /// Ids of items whose extraction failed; they stay unrecorded
    pub failed: Vec<String>,
    /// Items with no recorded result (rescoring only)
    pub missing: usize,
}

/// Drives one sequential pass over the dataset
///
/// Items already in the checkpoint are scored from their stored record and
/// never sent to the model again. Other items are extracted, saved, then
/// scored. A failed extraction is logged and skipped so that the next run
/// against the same checkpoint retries it.
pub struct BatchDriver<'a> {
    client: &'a ExtractionClient,
    store: &'a mut CheckpointStore,
    show_progress: bool,
}

impl<'a> BatchDriver<'a> {
    pub fn new(client: &'a ExtractionClient, store: &'a mut CheckpointStore) -> Self {
        Self {
            client,
            store,
            show_progress: false,
        }
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Process every item in dataset order
    ///
    /// Returns an error only when the checkpoint cannot be written.
    pub async fn run(&mut self, items: &[DatasetItem]) -> Result<RunSummary> {
        let total = items.len();
        let pb = create_progress_bar(total, self.show_progress);

        let mut scorer = Scorer::new();
        let mut extracted = 0;
        let mut reused = 0;
        let mut failed = Vec::new();

        for item in items {
            let id = item.id();
            let position = item.index + 1;

            if let Some(record) = self.store.get(&id) {
                info!("Skip: {id}");
                debug!("Extracted: {:?}", record.extracted_pairs);
                let score = scorer.record_item(&item.ground_truth, &record.extracted_pairs);
                debug!("{id}: {score:?}");
                reused += 1;
                pb.inc(1);
                continue;
            }

            match self.client.extract(&item.text).await {
                Ok(pairs) => {
                    let count = pairs.len();
                    self.store
                        .append(ResultRecord::new(item, pairs.clone()))
                        .map_err(|e| {
                            error!("Failed to save result for {id}: {e}");
                            e
                        })?;
                    info!(
                        "[{position}/{total}] file={} => extracted {count} pairs (saved)",
                        item.file
                    );

                    let score = scorer.record_item(&item.ground_truth, &pairs);
                    debug!("{id}: {score:?}");
                    extracted += 1;
                }
                Err(e) => {
                    warn!(
                        "[{position}/{total}] file={} ({id}) => extraction failed (skipped): {e}",
                        item.file
                    );
                    failed.push(id);
                }
            }
            pb.inc(1);
        }

        pb.finish_and_clear();
        let report = scorer.report();
        if report.abbr_accuracy().is_none() {
            warn!("No ground-truth abbreviations in the scored items");
        }
        info!(
            "Done: {extracted} extracted, {reused} reused, {} failed (results in {})",
            failed.len(),
            self.store.path().display()
        );

        Ok(RunSummary {
            report,
            extracted,
            reused,
            failed,
            missing: 0,
        })
    }
}

/// Score the dataset against recorded results only, without extracting
pub fn rescore(items: &[DatasetItem], store: &CheckpointStore) -> RunSummary {
    let mut scorer = Scorer::new();
    let mut reused = 0;
    let mut missing = 0;

    for item in items {
        let id = item.id();
        match store.get(&id) {
            Some(record) => {
                scorer.record_item(&item.ground_truth, &record.extracted_pairs);
                reused += 1;
            }
            None => {
                debug!("No recorded result for {id}");
                missing += 1;
            }
        }
    }

    if missing > 0 {
        warn!("{missing} of {} items have no recorded result and were not scored", items.len());
    }

    RunSummary {
        report: scorer.report(),
        extracted: 0,
        reused,
        failed: Vec::new(),
        missing,
    }
}

/// Create a progress bar for the extraction pass
fn create_progress_bar(total: usize, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("Processing [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
            .map_err(|e| error!("Failed to set progress bar style: {}", e))
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("##-"),
    );
    pb
}
