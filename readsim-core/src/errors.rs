use thiserror::Error;

/// Reasons a sequence request is rejected before any data is fetched.
///
/// The `Display` text of each variant is returned verbatim to the caller,
/// so the wording is part of the public API.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Chromosome '{chrom}' does not exist in {genome}")]
    UnknownChromosome { chrom: String, genome: String },

    #[error("Coordinates should be positive integers.")]
    InvalidCoordinates,

    #[error("Start coordinate cannot be larger than stop coordinate")]
    StartAfterStop,

    #[error("{chrom} has a size of {size} but asking for region outside that range")]
    OutOfBounds { chrom: String, size: u64 },

    #[error("Parameters n, length and stdev must be integers.")]
    InvalidIntegerParameter,

    #[error("Mutation parameters must be numbers.")]
    InvalidRateParameter,

    #[error("Seed must be an integer below 2147483648.")]
    InvalidSeed,
}

impl ValidationError {
    /// HTTP status code used when reporting this error.
    pub fn code(&self) -> u16 {
        400
    }
}

#[derive(Error, Debug)]
pub enum IndexError {
    #[error("Malformed FAI record on line {line}: {reason}")]
    MalformedFai { line: usize, reason: String },

    #[error("FASTA sequence '{0}' has no sequence lines")]
    EmptySequence(String),

    #[error("Sequence data found before any FASTA header")]
    MissingHeader,

    #[error("Corrupted index. 0 sequences found in: {0}")]
    EmptyIndex(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
