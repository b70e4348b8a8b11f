//! # readsim-core
//!
//! Reference index, region resolution and request validation for the readsim
//! sequence API.
//!
//! - [`reference`] - the in-memory FASTA index (built-in hg38, `.fai` files, local FASTA scans)
//! - [`models`] - chromosome records, regions, byte ranges and simulator parameters
//! - [`rng`] - the seeded generator behind random region selection
//! - [`request`] - query parsing, region selection and validation

pub mod consts;
pub mod errors;
pub mod models;
pub mod reference;
pub mod request;
pub mod rng;
pub mod utils;

pub use errors::{IndexError, ValidationError};
pub use models::{ByteRange, ChromosomeRecord, Region, SimulationParams};
pub use reference::{GenomeDescriptor, ReferenceIndex};
pub use request::{SequenceQuery, SequenceRequest};
pub use rng::SeededRng;
