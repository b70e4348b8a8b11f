pub const DEFAULT_ERROR_RATE: &str = "0.02";
pub const DEFAULT_STDEV: &str = "50";
pub const DEFAULT_READ_COUNT: &str = "10";
pub const DEFAULT_READ_LENGTH: &str = "70";
pub const DEFAULT_MUTATION_RATE: &str = "0.001";
pub const DEFAULT_INDEL_FRACTION: &str = "0.15";
pub const DEFAULT_INDEL_EXTENSION: &str = "0.3";
pub const DEFAULT_AMBIGUOUS_MAX: &str = "0.05";

///
/// Read-generation knobs shared by every simulator invocation of one request.
///
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationParams {
    /// Base error rate
    pub error_rate: f64,
    /// Standard deviation of the fragment size
    pub stdev: u32,
    /// Number of read pairs to generate per chunk
    pub read_count: u64,
    /// Length of the first read
    pub read_length: u32,
    /// Rate of mutations
    pub mutation_rate: f64,
    /// Fraction of mutations that are indels
    pub indel_fraction: f64,
    /// Probability an indel is extended
    pub indel_extension: f64,
    /// Discard a read if the fraction of ambiguous bases is higher than this
    pub ambiguous_max: f64,
    /// Simulator seed; always concrete so the request can be replayed
    pub seed: u32,
    /// Haplotype mode
    pub haplotype: bool,
}

impl Default for SimulationParams {
    fn default() -> Self {
        SimulationParams {
            error_rate: 0.02,
            stdev: 50,
            read_count: 10,
            read_length: 70,
            mutation_rate: 0.001,
            indel_fraction: 0.15,
            indel_extension: 0.3,
            ambiguous_max: 0.05,
            seed: 1,
            haplotype: false,
        }
    }
}
