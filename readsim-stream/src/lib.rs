//! # readsim-stream
//!
//! Fetches one region of the reference FASTA and turns it into simulated
//! reads, chunk by chunk.
//!
//! - [`fetch`] - byte-range access to the reference (HTTP or local file)
//! - [`chunks`] - fixed-size chunking and sequence cleaning
//! - [`simulator`] - the read simulator interface and the `wgsim` runner
//! - [`pipeline`] - ties the stages together and writes to an output sink

pub mod chunks;
pub mod errors;
pub mod fetch;
pub mod pipeline;
pub mod simulator;

pub use errors::StreamError;
#[cfg(feature = "http")]
pub use fetch::HttpRangeFetcher;
pub use fetch::{ByteStream, LocalRangeSource, RangeSource};
pub use pipeline::{OutputSink, PipelineSummary, SimulationPipeline, SinkClosed};
pub use simulator::{ReadSimulator, WgsimSimulator};
