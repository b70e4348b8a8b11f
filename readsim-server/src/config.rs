use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::ArgMatches;
use log::{LevelFilter, info};

use readsim_core::consts::HG38_GENOME;
use readsim_core::utils::is_remote;
use readsim_core::{GenomeDescriptor, ReferenceIndex};
use readsim_stream::{HttpRangeFetcher, LocalRangeSource, RangeSource};

use crate::consts::*;

///
/// Everything the server needs to start, resolved from the command line
/// and environment.
///
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub reference: String,
    pub fai: Option<PathBuf>,
    pub genome: String,
    pub simulator: PathBuf,
    pub chunk_size: usize,
    pub fetch_retries: u32,
    pub connect_timeout: Duration,
    pub verbose: u8,
}

impl ServerConfig {
    pub fn from_matches(matches: &ArgMatches) -> Result<Self> {
        let string = |id: &str| -> Result<String> {
            matches
                .get_one::<String>(id)
                .cloned()
                .with_context(|| format!("Missing value for --{}", id))
        };
        let number = |id: &str| -> Result<u64> {
            matches
                .get_one::<u64>(id)
                .copied()
                .with_context(|| format!("Missing value for --{}", id))
        };

        let chunk_size = matches
            .get_one::<usize>(ARG_CHUNK_SIZE)
            .copied()
            .unwrap_or(readsim_stream::chunks::DEFAULT_CHUNK_SIZE);
        if chunk_size == 0 {
            anyhow::bail!("--{} must be greater than zero", ARG_CHUNK_SIZE);
        }

        Ok(ServerConfig {
            host: string(ARG_HOST)?,
            port: matches
                .get_one::<u16>(ARG_PORT)
                .copied()
                .with_context(|| format!("Missing value for --{}", ARG_PORT))?,
            reference: string(ARG_REFERENCE)?,
            fai: matches.get_one::<String>(ARG_FAI).map(PathBuf::from),
            genome: string(ARG_GENOME)?,
            simulator: PathBuf::from(string(ARG_SIMULATOR)?),
            chunk_size,
            fetch_retries: matches.get_one::<u32>(ARG_FETCH_RETRIES).copied().unwrap_or(0),
            connect_timeout: Duration::from_secs(number(ARG_CONNECT_TIMEOUT)?),
            verbose: matches.get_count(ARG_VERBOSE),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    fn descriptor(&self) -> GenomeDescriptor {
        GenomeDescriptor::new(&self.genome, &self.genome, &self.reference)
    }

    ///
    /// Build the chromosome index: an explicit `.fai` first, then a scan of a
    /// local reference, then the built-in hg38 table.
    ///
    pub fn load_index(&self) -> Result<ReferenceIndex> {
        if let Some(fai) = &self.fai {
            info!("Loading index from {}", fai.display());
            return ReferenceIndex::from_fai_path(self.descriptor(), fai)
                .with_context(|| format!("Failed to load index {}", fai.display()));
        }

        if !is_remote(&self.reference) {
            info!("Indexing local reference {}", self.reference);
            return ReferenceIndex::from_fasta(self.descriptor(), &self.reference)
                .with_context(|| format!("Failed to index {}", self.reference));
        }

        if self.genome != HG38_GENOME {
            anyhow::bail!(
                "No index for genome '{}': pass --{} for a remote reference other than {}",
                self.genome,
                ARG_FAI,
                HG38_GENOME
            );
        }
        Ok(ReferenceIndex::hg38())
    }

    pub fn range_source(&self) -> Arc<dyn RangeSource> {
        if is_remote(&self.reference) {
            Arc::new(
                HttpRangeFetcher::new(&self.reference, self.connect_timeout).with_retries(
                    self.fetch_retries,
                    Duration::from_millis(FETCH_BACKOFF_MS),
                ),
            )
        } else {
            Arc::new(LocalRangeSource::new(&self.reference))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;
    use std::io::Write;

    use crate::cli::create_cli;

    fn parse(args: &[&str]) -> Result<ServerConfig> {
        let mut argv = vec![BIN_NAME];
        argv.extend_from_slice(args);
        let matches = create_cli().try_get_matches_from(argv)?;
        ServerConfig::from_matches(&matches)
    }

    #[rstest]
    fn test_defaults() {
        let config = parse(&[]).unwrap();
        assert_eq!(config.port, 8787);
        assert_eq!(config.chunk_size, 65536);
        assert_eq!(config.fetch_retries, 0);
        assert_eq!(config.connect_timeout, Duration::from_secs(30));
        assert_eq!(config.simulator, PathBuf::from("wgsim"));
        assert_eq!(config.log_level(), LevelFilter::Info);
        assert!(is_remote(&config.reference));
    }

    #[rstest]
    fn test_overrides() {
        let config = parse(&[
            "--host",
            "0.0.0.0",
            "-p",
            "9000",
            "--chunk-size",
            "1024",
            "--fetch-retries",
            "3",
            "-vv",
        ])
        .unwrap();
        assert_eq!(config.bind_addr(), "0.0.0.0:9000");
        assert_eq!(config.chunk_size, 1024);
        assert_eq!(config.fetch_retries, 3);
        assert_eq!(config.log_level(), LevelFilter::Trace);
    }

    #[rstest]
    fn test_zero_chunk_size_rejected() {
        assert!(parse(&["--chunk-size", "0"]).is_err());
    }

    #[rstest]
    fn test_remote_reference_uses_builtin_index() {
        let index = parse(&[]).unwrap().load_index().unwrap();
        assert_eq!(index.genome(), "hg38");
        assert_eq!(index.len(), 24);
    }

    #[rstest]
    fn test_remote_reference_other_genome_needs_fai() {
        let config = parse(&["--genome", "mm10"]).unwrap();
        assert!(config.load_index().is_err());
    }

    #[rstest]
    fn test_local_reference_is_scanned() {
        let mut fasta = tempfile::NamedTempFile::new().unwrap();
        write!(fasta, ">contig1\nACGTACGT\nACGT\n>contig2\nGGGG\n").unwrap();
        let path = fasta.path().to_str().unwrap().to_string();

        let index = parse(&["--reference", &path, "--genome", "toy"])
            .unwrap()
            .load_index()
            .unwrap();
        assert_eq!(index.genome(), "toy");
        assert_eq!(index.get("contig1").unwrap().size, 12);
        assert_eq!(index.get("contig2").unwrap().size, 4);
    }

    #[rstest]
    fn test_fai_takes_precedence() {
        let mut fai = tempfile::NamedTempFile::new().unwrap();
        writeln!(fai, "seqA\t100\t6\t60\t61").unwrap();
        let fai_path = fai.path().to_str().unwrap().to_string();

        let index = parse(&["--fai", &fai_path, "--genome", "toy"])
            .unwrap()
            .load_index()
            .unwrap();
        assert_eq!(index.len(), 1);
        assert_eq!(index.get("seqA").unwrap().offset, 6);
    }
}
