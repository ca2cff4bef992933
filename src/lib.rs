//! # sayings-dataset
//!
//! Batch generation of a bilingual Luxembourgish sayings dataset.
//!
//! Each saying lives in its own `.txt` file. Sayings are sent in batches to a language model
//! backend that splits them in two parts, translates them and scores them. Records are checked
//! against the original text before being written as sibling `.json` files, failures get a
//! sibling `-error.json` file for manual review.
pub mod error;
pub mod filtering;
pub mod gateway;
pub mod normalize;
pub mod pipelines;
pub mod processing;
pub mod record;
pub mod stats;
pub mod validation;
pub mod walker;
