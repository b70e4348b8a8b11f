//! The chunked simulation pipeline.
//!
//! ```text
//! RangeSource -> ChunkReader -> CleanChunks -> ReadSimulator -> OutputSink
//! ```
//!
//! Chunks are processed strictly one after another: the next chunk is pulled
//! from the reference store only once the current one has been simulated and
//! written. Reads are not corrected across chunk boundaries; a read window
//! that straddles two chunks is simply not generated.
//!
//! The sink is checked before every upstream read, so a consumer that went
//! away stops the run even while unknown-only chunks are being skipped.

use std::io::Read;

use log::{debug, info};
use readsim_core::SimulationParams;

use crate::chunks::{ChunkReader, CleanChunks, DEFAULT_CHUNK_SIZE, is_degenerate};
use crate::errors::{Result, StreamError};
use crate::simulator::ReadSimulator;

///
/// Where simulated output goes. A closed sink means the consumer went away.
///
pub trait OutputSink {
    fn write_chunk(&mut self, bytes: Vec<u8>) -> std::result::Result<(), SinkClosed>;

    /// True once nothing written would be read anymore.
    fn is_closed(&self) -> bool {
        false
    }
}

/// Returned by [`OutputSink::write_chunk`] once nobody is reading anymore.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkClosed;

impl OutputSink for Vec<u8> {
    fn write_chunk(&mut self, bytes: Vec<u8>) -> std::result::Result<(), SinkClosed> {
        self.extend_from_slice(&bytes);
        Ok(())
    }
}

///
/// What happened while streaming one region.
///
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PipelineSummary {
    /// Chunks handed to the simulator
    pub chunks_simulated: usize,
    /// Chunks dropped because they held only unknown bases
    pub chunks_skipped: usize,
    /// Bases handed to the simulator across all chunks
    pub bases: usize,
    /// Bytes written to the sink
    pub bytes_emitted: usize,
    /// True when the sink closed before the region was finished
    pub cancelled: bool,
}

/// In-band message sent when a region contains nothing but unknown bases.
pub fn unknown_region_message(region_label: &str) -> String {
    format!("Error: only found N's in region {}", region_label)
}

pub struct SimulationPipeline<'a> {
    simulator: &'a dyn ReadSimulator,
    params: &'a SimulationParams,
    region_label: String,
    chunk_size: usize,
}

impl<'a> SimulationPipeline<'a> {
    pub fn new(
        simulator: &'a dyn ReadSimulator,
        params: &'a SimulationParams,
        region_label: &str,
    ) -> Self {
        SimulationPipeline {
            simulator,
            params,
            region_label: region_label.to_string(),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    ///
    /// Stream `upstream` through the simulator into `sink`.
    ///
    /// Upstream read failures and simulator failures end the run with an
    /// error; whatever was already written stays written. A closed sink ends
    /// the run early without error and drops `upstream`.
    ///
    pub fn run<R: Read, S: OutputSink>(&self, upstream: R, sink: &mut S) -> Result<PipelineSummary> {
        let mut summary = PipelineSummary::default();
        let mut chunks = CleanChunks::new(ChunkReader::new(upstream, self.chunk_size));

        loop {
            if sink.is_closed() {
                summary.cancelled = true;
                break;
            }
            let Some(chunk) = chunks.next() else {
                break;
            };
            let chunk = chunk.map_err(StreamError::UpstreamRead)?;
            if is_degenerate(&chunk) {
                summary.chunks_skipped += 1;
                continue;
            }
            summary.bases += chunk.bases.len();

            let reads = self
                .simulator
                .simulate(&chunk.bases, self.params, &self.region_label)?;
            summary.chunks_simulated += 1;
            debug!(
                "{}: chunk {} ({} bases) -> {} bytes",
                self.region_label,
                summary.chunks_simulated,
                chunk.bases.len(),
                reads.len()
            );

            let emitted = reads.len();
            if sink.write_chunk(reads).is_err() {
                summary.cancelled = true;
                break;
            }
            summary.bytes_emitted += emitted;
        }

        if summary.cancelled {
            info!("{}: client went away, stopping", self.region_label);
            return Ok(summary);
        }

        if summary.bases == 0 {
            let message = unknown_region_message(&self.region_label).into_bytes();
            let emitted = message.len();
            match sink.write_chunk(message) {
                Ok(()) => summary.bytes_emitted += emitted,
                Err(SinkClosed) => summary.cancelled = true,
            }
        }

        Ok(summary)
    }
}
