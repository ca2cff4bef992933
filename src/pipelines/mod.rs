//! Pipelines.
//!
//! The module provides a light [pipeline::Pipeline] trait, implemented by the
//! [generate::Generate] dataset generation pipeline.
pub mod generate;
#[allow(clippy::module_inception)]
pub mod pipeline;

pub use generate::Generate;
pub use pipeline::Pipeline;
