//! Dataset generation pipeline
//!
//! 1. Pending sayings are discovered under the datasets directory (see [crate::walker]).
//! 1. They are split in fixed-size batches, processed one after the other.
//! 1. Each batch report is folded into a [RunSummary] returned at the end of the run.
//!
//! A gateway or filesystem error stops the run: remaining batches are not processed.
//! The returned [Error::Aborted] keeps the summary of the batches done so far.
use std::path::PathBuf;

use itertools::Itertools;
use log::{error, info};

use crate::error::Error;
use crate::gateway::Gateway;
use crate::pipelines::pipeline::Pipeline;
use crate::processing::{process_batch, RunSummary, BATCH_SIZE};
use crate::walker::Discovery;

pub struct Generate<G: Gateway> {
    root: PathBuf,
    discovery: Discovery,
    batch_size: usize,
    gateway: G,
}

impl<G: Gateway> Generate<G> {
    pub fn new(root: PathBuf, discovery: Discovery, gateway: G) -> Self {
        Self {
            root,
            discovery,
            batch_size: BATCH_SIZE,
            gateway,
        }
    }

    /// Set the number of sayings per gateway call. Must not be 0.
    pub fn with_batch_size(mut self, batch_size: usize) -> Result<Self, Error> {
        if batch_size == 0 {
            return Err(Error::Config("batch size must be at least 1".to_string()));
        }
        self.batch_size = batch_size;
        Ok(self)
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }
}

impl<G: Gateway> Pipeline<RunSummary> for Generate<G> {
    fn run(&self) -> Result<RunSummary, Error> {
        let mut summary = RunSummary::default();

        if !self.root.is_dir() {
            error!("Directory not found: {}", self.root.display());
            return Ok(summary);
        }

        let files = self.discovery.discover(&self.root)?;
        if files.is_empty() {
            info!("No new files to process.");
            return Ok(summary);
        }

        info!("Processing {} files...", files.len());
        for batch in &files.into_iter().chunks(self.batch_size) {
            let batch: Vec<PathBuf> = batch.collect();
            match process_batch(&self.gateway, &batch) {
                Ok(report) => summary.absorb(report),
                Err(e) => {
                    error!("Failed to process batch: {}", e);
                    if !summary.is_clean() {
                        error!("{}", summary);
                    }
                    return Err(Error::Aborted {
                        summary,
                        cause: Box::new(e),
                    });
                }
            }
        }

        Ok(summary)
    }
}
