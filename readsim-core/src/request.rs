//! Turning raw query parameters into a validated region and simulator settings.
//!
//! Checks run in a fixed order and the first failure is reported:
//! chromosome, coordinate format, coordinate order, coordinate bounds,
//! integer parameters, rate parameters, seed.

use serde::Deserialize;

use crate::consts::{DEFAULT_CHROM, DEFAULT_REGION_SPAN};
use crate::errors::ValidationError;
use crate::models::params::*;
use crate::models::{ChromosomeRecord, Region, SimulationParams};
use crate::reference::ReferenceIndex;
use crate::rng::{LCG_MODULUS, SeededRng};
use crate::utils::parse_flag;

///
/// Query parameters of `/api/v1/sequences`, exactly as received.
///
#[derive(Deserialize, Debug, Clone, Default)]
pub struct SequenceQuery {
    pub chrom: Option<String>,
    pub start: Option<String>,
    pub stop: Option<String>,
    pub length: Option<String>,
    pub n: Option<String>,
    pub error: Option<String>,
    pub stdev: Option<String>,
    pub mutation_rate: Option<String>,
    pub indel_frac: Option<String>,
    pub indel_extend: Option<String>,
    pub ambiguous_max: Option<String>,
    pub seed: Option<String>,
    pub random: Option<String>,
    pub haplotype: Option<String>,
}

///
/// A request that passed validation.
///
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceRequest {
    pub region: Region,
    pub params: SimulationParams,
    /// True when no usable seed was supplied and one was drawn for the caller.
    pub seed_generated: bool,
}

/// Empty strings count as absent, like a bare `start=` in the query string.
fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn or_default<'a>(value: &'a Option<String>, default: &'a str) -> &'a str {
    non_empty(value).unwrap_or(default)
}

///
/// Parse the seed parameter. Values `<= 0` (wgsim's "random" convention) and
/// absent seeds resolve to `None`.
///
fn parse_seed(value: &Option<String>) -> Result<Option<u32>, ValidationError> {
    match non_empty(value) {
        None => Ok(None),
        Some(raw) => {
            let seed = raw.parse::<i64>().map_err(|_| ValidationError::InvalidSeed)?;
            if seed <= 0 {
                Ok(None)
            } else if seed as u64 >= LCG_MODULUS {
                Err(ValidationError::InvalidSeed)
            } else {
                Ok(Some(seed as u32))
            }
        }
    }
}

fn parse_coordinate(raw: &str) -> Result<u64, ValidationError> {
    raw.parse::<u64>()
        .map_err(|_| ValidationError::InvalidCoordinates)
}

fn random_start(chrom: &ChromosomeRecord, rng: &mut SeededRng) -> u64 {
    rng.next_below(chrom.size / 2)
}

fn default_stop(chrom: &ChromosomeRecord, start: u64) -> u64 {
    (start + DEFAULT_REGION_SPAN).min(chrom.size)
}

impl SequenceQuery {
    pub fn is_random(&self) -> bool {
        parse_flag(self.random.as_deref())
    }

    ///
    /// Resolve the region and simulator settings for this query.
    ///
    /// Random draws come from a generator seeded with the request seed, so a
    /// replayed request resolves to the same region.
    ///
    pub fn resolve(&self, index: &ReferenceIndex) -> Result<SequenceRequest, ValidationError> {
        let seed = parse_seed(&self.seed);
        let mut rng = SeededRng::new(seed.as_ref().ok().copied().flatten());

        let region = self.select_region(index, &mut rng)?;
        let params = self.simulation_params(rng.seed())?;
        let seed_generated = seed?.is_none();

        Ok(SequenceRequest {
            region,
            params,
            seed_generated,
        })
    }

    fn select_region(
        &self,
        index: &ReferenceIndex,
        rng: &mut SeededRng,
    ) -> Result<Region, ValidationError> {
        if self.is_random() && !index.is_empty() {
            let idx = rng.next_below(index.len() as u64) as usize;
            let chrom = index.chromosomes()[idx].clone();
            let start = random_start(&chrom, rng);
            let stop = default_stop(&chrom, start);
            return check_region(chrom, start, stop);
        }

        let name = or_default(&self.chrom, DEFAULT_CHROM);
        let chrom = index
            .get(name)
            .ok_or_else(|| ValidationError::UnknownChromosome {
                chrom: name.to_string(),
                genome: index.genome().to_string(),
            })?
            .clone();

        let start = non_empty(&self.start).map(parse_coordinate);
        let stop = non_empty(&self.stop).map(parse_coordinate);

        let start = match start {
            Some(start) => start?,
            None => random_start(&chrom, rng),
        };
        let stop = match stop {
            Some(stop) => stop?,
            None => default_stop(&chrom, start),
        };

        check_region(chrom, start, stop)
    }

    fn simulation_params(&self, seed: u32) -> Result<SimulationParams, ValidationError> {
        let integer = |value: &Option<String>, default: &str| {
            or_default(value, default)
                .parse::<u64>()
                .map_err(|_| ValidationError::InvalidIntegerParameter)
        };
        let stdev = integer(&self.stdev, DEFAULT_STDEV)?;
        let read_count = integer(&self.n, DEFAULT_READ_COUNT)?;
        let read_length = integer(&self.length, DEFAULT_READ_LENGTH)?;
        let (Ok(stdev), Ok(read_length)) = (u32::try_from(stdev), u32::try_from(read_length))
        else {
            return Err(ValidationError::InvalidIntegerParameter);
        };

        let rate = |value: &Option<String>, default: &str| {
            or_default(value, default)
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or(ValidationError::InvalidRateParameter)
        };

        Ok(SimulationParams {
            error_rate: rate(&self.error, DEFAULT_ERROR_RATE)?,
            stdev,
            read_count,
            read_length,
            mutation_rate: rate(&self.mutation_rate, DEFAULT_MUTATION_RATE)?,
            indel_fraction: rate(&self.indel_frac, DEFAULT_INDEL_FRACTION)?,
            indel_extension: rate(&self.indel_extend, DEFAULT_INDEL_EXTENSION)?,
            ambiguous_max: rate(&self.ambiguous_max, DEFAULT_AMBIGUOUS_MAX)?,
            seed,
            haplotype: parse_flag(self.haplotype.as_deref()),
        })
    }
}

fn check_region(chrom: ChromosomeRecord, start: u64, stop: u64) -> Result<Region, ValidationError> {
    if start >= stop {
        return Err(ValidationError::StartAfterStop);
    }
    if start >= chrom.size || stop > chrom.size {
        return Err(ValidationError::OutOfBounds {
            chrom: chrom.name.clone(),
            size: chrom.size,
        });
    }
    Ok(Region { chrom, start, stop })
}
