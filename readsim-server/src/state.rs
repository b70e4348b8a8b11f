use std::sync::Arc;

use anyhow::Result;

use readsim_core::ReferenceIndex;
use readsim_stream::{RangeSource, ReadSimulator, WgsimSimulator};

use crate::config::ServerConfig;

///
/// Shared, read-only state handed to every request.
///
#[derive(Clone)]
pub struct AppState {
    pub index: Arc<ReferenceIndex>,
    pub source: Arc<dyn RangeSource>,
    pub simulator: Arc<dyn ReadSimulator>,
    pub chunk_size: usize,
}

impl AppState {
    pub fn new(
        index: ReferenceIndex,
        source: Arc<dyn RangeSource>,
        simulator: Arc<dyn ReadSimulator>,
        chunk_size: usize,
    ) -> Self {
        AppState {
            index: Arc::new(index),
            source,
            simulator,
            chunk_size,
        }
    }

    pub fn from_config(config: &ServerConfig) -> Result<Self> {
        Ok(AppState::new(
            config.load_index()?,
            config.range_source(),
            Arc::new(WgsimSimulator::new(&config.simulator)),
            config.chunk_size,
        ))
    }
}
