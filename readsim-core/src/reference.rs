//! In-memory FASTA index of the reference served by the API.
//!
//! The index is built once at startup and never mutated afterwards. The
//! default is the built-in hg38 table describing the 1000 Genomes GRCh38
//! analysis set; custom references can be indexed from a `.fai` file or by
//! scanning a local FASTA file.

use std::io::BufRead;
use std::path::Path;

use serde::Serialize;

use crate::consts::{HG38_CHROMOSOMES, HG38_DESCRIPTION, HG38_GENOME, HG38_SOURCE};
use crate::errors::IndexError;
use crate::models::ChromosomeRecord;
use crate::utils::get_dynamic_reader;

///
/// Descriptive metadata reported by the references endpoint.
///
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GenomeDescriptor {
    pub genome: String,
    pub genome_description: String,
    pub genome_source: String,
}

impl GenomeDescriptor {
    pub fn new(genome: &str, description: &str, source: &str) -> Self {
        GenomeDescriptor {
            genome: genome.to_string(),
            genome_description: description.to_string(),
            genome_source: source.to_string(),
        }
    }
}

///
/// Ordered, read-only set of chromosome records.
///
#[derive(Debug, Clone)]
pub struct ReferenceIndex {
    descriptor: GenomeDescriptor,
    chromosomes: Vec<ChromosomeRecord>,
}

/// JSON shape of one entry returned by `/api/v1/references`.
#[derive(Serialize, Debug)]
pub struct ReferenceSummary<'a> {
    #[serde(flatten)]
    pub descriptor: &'a GenomeDescriptor,
    pub chromosomes: &'a [ChromosomeRecord],
}

impl ReferenceIndex {
    pub fn new(descriptor: GenomeDescriptor, chromosomes: Vec<ChromosomeRecord>) -> Self {
        ReferenceIndex {
            descriptor,
            chromosomes,
        }
    }

    ///
    /// The built-in hg38 index.
    ///
    pub fn hg38() -> Self {
        let chromosomes = HG38_CHROMOSOMES
            .iter()
            .map(|&(name, size, offset)| ChromosomeRecord::new(name, size, offset, 70, 71))
            .collect();

        ReferenceIndex::new(
            GenomeDescriptor::new(HG38_GENOME, HG38_DESCRIPTION, HG38_SOURCE),
            chromosomes,
        )
    }

    ///
    /// Read samtools-style FAI records: `name length offset line_bases line_bytes`.
    ///
    pub fn from_fai_reader<R: BufRead>(
        descriptor: GenomeDescriptor,
        reader: R,
    ) -> Result<Self, IndexError> {
        let mut chromosomes = Vec::new();

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let line_num = idx + 1;
            let malformed = |reason: &str| IndexError::MalformedFai {
                line: line_num,
                reason: reason.to_string(),
            };

            let fields: Vec<&str> = line.split('\t').collect();
            if fields.len() < 5 {
                return Err(malformed("expected 5 tab-separated fields"));
            }
            let number = |i: usize, what: &str| {
                fields[i]
                    .trim()
                    .parse::<u64>()
                    .map_err(|_| malformed(&format!("invalid {}: '{}'", what, fields[i])))
            };

            let record = ChromosomeRecord::new(
                fields[0],
                number(1, "length")?,
                number(2, "offset")?,
                number(3, "line bases")?,
                number(4, "line bytes")?,
            );
            if record.line_bases == 0 || record.line_bytes < record.line_bases {
                return Err(malformed("line bytes must be at least line bases"));
            }
            chromosomes.push(record);
        }

        if chromosomes.is_empty() {
            return Err(IndexError::EmptyIndex(descriptor.genome.clone()));
        }

        Ok(ReferenceIndex::new(descriptor, chromosomes))
    }

    ///
    /// Load a `.fai` (or `.fai.gz`) file from disk.
    ///
    pub fn from_fai_path<P: AsRef<Path>>(
        descriptor: GenomeDescriptor,
        path: P,
    ) -> Result<Self, IndexError> {
        let reader = get_dynamic_reader(path.as_ref())?;
        ReferenceIndex::from_fai_reader(descriptor, reader)
    }

    ///
    /// Compute FAI records by scanning an uncompressed FASTA file.
    ///
    /// The line width of each sequence is taken from its first line; the
    /// remaining lines are only counted.
    ///
    pub fn from_fasta<P: AsRef<Path>>(
        descriptor: GenomeDescriptor,
        path: P,
    ) -> Result<Self, IndexError> {
        let file = std::fs::File::open(path.as_ref())?;
        let mut reader = std::io::BufReader::new(file);

        let mut chromosomes = Vec::new();
        let mut current: Option<ChromosomeRecord> = None;
        let mut position: u64 = 0;
        let mut line = Vec::new();

        loop {
            line.clear();
            let bytes_read = reader.read_until(b'\n', &mut line)? as u64;
            if bytes_read == 0 {
                break;
            }

            if line.first() == Some(&b'>') {
                if let Some(done) = current.take() {
                    chromosomes.push(finish_record(done)?);
                }
                let header = String::from_utf8_lossy(&line[1..]);
                let name = header.split_whitespace().next().unwrap_or_default();
                current = Some(ChromosomeRecord::new(name, 0, 0, 0, 0));
            } else {
                let bases = line
                    .iter()
                    .filter(|&&b| b != b'\n' && b != b'\r')
                    .count() as u64;
                match current.as_mut() {
                    Some(rec) => {
                        if rec.line_bases == 0 && bases > 0 {
                            rec.offset = position;
                            rec.line_bases = bases;
                            rec.line_bytes = bytes_read;
                        }
                        rec.size += bases;
                    }
                    None if bases > 0 => return Err(IndexError::MissingHeader),
                    None => {}
                }
            }

            position += bytes_read;
        }

        if let Some(done) = current.take() {
            chromosomes.push(finish_record(done)?);
        }

        if chromosomes.is_empty() {
            return Err(IndexError::EmptyIndex(
                path.as_ref().display().to_string(),
            ));
        }

        Ok(ReferenceIndex::new(descriptor, chromosomes))
    }

    pub fn genome(&self) -> &str {
        &self.descriptor.genome
    }

    ///
    /// Look up a chromosome by name.
    ///
    pub fn get(&self, name: &str) -> Option<&ChromosomeRecord> {
        self.chromosomes.iter().find(|c| c.name == name)
    }

    /// Chromosome at a position in the index order.
    pub fn nth(&self, idx: usize) -> Option<&ChromosomeRecord> {
        self.chromosomes.get(idx)
    }

    pub fn chromosomes(&self) -> &[ChromosomeRecord] {
        &self.chromosomes
    }

    pub fn len(&self) -> usize {
        self.chromosomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chromosomes.is_empty()
    }

    pub fn summary(&self) -> ReferenceSummary<'_> {
        ReferenceSummary {
            descriptor: &self.descriptor,
            chromosomes: &self.chromosomes,
        }
    }
}

fn finish_record(record: ChromosomeRecord) -> Result<ChromosomeRecord, IndexError> {
    if record.line_bases == 0 {
        return Err(IndexError::EmptySequence(record.name));
    }
    Ok(record)
}
