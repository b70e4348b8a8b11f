//! The read simulator behind a narrow interface.
//!
//! [`WgsimSimulator`] starts a new `wgsim` process for every call, inside its
//! own temporary directory, so no state carries over between chunks.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use log::debug;
use readsim_core::SimulationParams;

use crate::errors::{Result, StreamError};

const INPUT_FASTA: &str = "tmp.fa";
const OUTPUT_READ1: &str = "r1.fq";
const OUTPUT_READ2: &str = "r2.fq";

///
/// Turns one chunk of reference sequence into read records.
///
pub trait ReadSimulator: Send + Sync {
    fn simulate(
        &self,
        sequence: &str,
        params: &SimulationParams,
        region_label: &str,
    ) -> Result<Vec<u8>>;
}

///
/// Build the wgsim argument vector for `params`, without the file arguments.
/// Reads are single ended, so the second read length is pinned to 1.
///
pub fn wgsim_args(params: &SimulationParams) -> Vec<String> {
    let mut args = vec![
        "-e".to_string(),
        params.error_rate.to_string(),
        "-s".to_string(),
        params.stdev.to_string(),
        "-N".to_string(),
        params.read_count.to_string(),
        "-1".to_string(),
        params.read_length.to_string(),
        "-2".to_string(),
        "1".to_string(),
        "-r".to_string(),
        params.mutation_rate.to_string(),
        "-R".to_string(),
        params.indel_fraction.to_string(),
        "-X".to_string(),
        params.indel_extension.to_string(),
        "-A".to_string(),
        params.ambiguous_max.to_string(),
        "-S".to_string(),
        params.seed.to_string(),
    ];
    if params.haplotype {
        args.push("-h".to_string());
    }
    args
}

///
/// Runs an external `wgsim` executable.
///
#[derive(Debug, Clone)]
pub struct WgsimSimulator {
    program: PathBuf,
}

impl WgsimSimulator {
    pub fn new<P: AsRef<Path>>(program: P) -> Self {
        WgsimSimulator {
            program: program.as_ref().to_path_buf(),
        }
    }
}

impl Default for WgsimSimulator {
    fn default() -> Self {
        WgsimSimulator::new("wgsim")
    }
}

impl ReadSimulator for WgsimSimulator {
    fn simulate(
        &self,
        sequence: &str,
        params: &SimulationParams,
        region_label: &str,
    ) -> Result<Vec<u8>> {
        let failed = |message: String| StreamError::Simulator {
            region: region_label.to_string(),
            message,
        };

        let workdir = tempfile::tempdir()?;
        let input = workdir.path().join(INPUT_FASTA);
        let read1 = workdir.path().join(OUTPUT_READ1);
        let read2 = workdir.path().join(OUTPUT_READ2);
        fs::write(&input, format!(">{}\n{}\n", region_label, sequence))?;

        debug!(
            "Running {} on {} bases of {}",
            self.program.display(),
            sequence.len(),
            region_label
        );
        let output = Command::new(&self.program)
            .args(wgsim_args(params))
            .arg(&input)
            .arg(&read1)
            .arg(&read2)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| failed(format!("can't start {}: {}", self.program.display(), e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(failed(format!("{} ({})", output.status, stderr.trim())));
        }

        fs::read(&read1).map_err(|e| failed(format!("no output in {}: {}", OUTPUT_READ1, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    fn test_wgsim_args_defaults() {
        let params = SimulationParams {
            seed: 42,
            ..SimulationParams::default()
        };
        assert_eq!(
            wgsim_args(&params).join(" "),
            "-e 0.02 -s 50 -N 10 -1 70 -2 1 -r 0.001 -R 0.15 -X 0.3 -A 0.05 -S 42"
        );
    }

    #[rstest]
    fn test_wgsim_args_haplotype() {
        let params = SimulationParams {
            haplotype: true,
            ..SimulationParams::default()
        };
        assert_eq!(wgsim_args(&params).last().unwrap(), "-h");
    }

    #[rstest]
    fn test_missing_program_is_a_simulator_error() {
        let simulator = WgsimSimulator::new("/nonexistent/wgsim");
        let err = simulator
            .simulate("ACGT", &SimulationParams::default(), "chr1:0-4")
            .unwrap_err();
        match err {
            StreamError::Simulator { region, .. } => assert_eq!(region, "chr1:0-4"),
            other => panic!("unexpected error {}", other),
        }
    }

    #[cfg(unix)]
    #[rstest]
    fn test_non_zero_exit_is_a_simulator_error() {
        let simulator = WgsimSimulator::new("false");
        let err = simulator
            .simulate("ACGT", &SimulationParams::default(), "chr1:0-4")
            .unwrap_err();
        assert!(matches!(err, StreamError::Simulator { .. }));
    }

    #[rstest]
    #[ignore = "Needs a wgsim binary on PATH"]
    fn test_wgsim_is_reproducible() {
        let simulator = WgsimSimulator::default();
        let params = SimulationParams {
            seed: 11,
            read_count: 5,
            ..SimulationParams::default()
        };
        let sequence = "ACGTTGCAAGCTTAGCCGATCGATCGGCTAGCTAGGCTAGCATCGACTGACTGATCGATGCATGCATCGACTGACTAGCTAGCATCGATCGAC"
            .repeat(10);

        let a = simulator.simulate(&sequence, &params, "chr1:0-950").unwrap();
        let b = simulator.simulate(&sequence, &params, "chr1:0-950").unwrap();
        assert!(!a.is_empty());
        assert_eq!(a, b);
    }
}
