/*! Batch processing and artifact persistence.

A batch goes through a first gateway call, validation, and a single corrective call
for the sayings that failed. Successes and terminal failures are then written next to their sayings.
!*/
pub mod artifacts;
pub mod batch;
pub mod summary;

pub use batch::{process_batch, run_batch, BatchResult, Failure, Success, BATCH_SIZE};
pub use summary::{BatchReport, FailureNote, RunSummary};
