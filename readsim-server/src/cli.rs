use clap::{Arg, ArgAction, Command, value_parser};

use readsim_core::consts::{HG38_FASTA_URL, HG38_GENOME};

use crate::consts::*;

pub fn create_cli() -> Command {
    Command::new(BIN_NAME)
        .bin_name(BIN_NAME)
        .version(VERSION)
        .about("Serve simulated sequencing reads for regions of a remote reference genome.")
        .arg(
            Arg::new(ARG_HOST)
                .long(ARG_HOST)
                .env("READSIM_HOST")
                .default_value(DEFAULT_HOST)
                .help("Address to listen on"),
        )
        .arg(
            Arg::new(ARG_PORT)
                .long(ARG_PORT)
                .short('p')
                .env("READSIM_PORT")
                .default_value(DEFAULT_PORT)
                .value_parser(value_parser!(u16))
                .help("Port to listen on"),
        )
        .arg(
            Arg::new(ARG_REFERENCE)
                .long(ARG_REFERENCE)
                .env("READSIM_REFERENCE")
                .default_value(HG38_FASTA_URL)
                .help("Reference FASTA: an http(s) URL supporting range requests, or a local uncompressed file"),
        )
        .arg(
            Arg::new(ARG_FAI)
                .long(ARG_FAI)
                .env("READSIM_FAI")
                .help("samtools .fai index for the reference (optionally gzipped)"),
        )
        .arg(
            Arg::new(ARG_GENOME)
                .long(ARG_GENOME)
                .default_value(HG38_GENOME)
                .help("Genome name reported for a custom reference"),
        )
        .arg(
            Arg::new(ARG_SIMULATOR)
                .long(ARG_SIMULATOR)
                .env("READSIM_SIMULATOR")
                .default_value(DEFAULT_SIMULATOR)
                .help("Path to the wgsim executable"),
        )
        .arg(
            Arg::new(ARG_CHUNK_SIZE)
                .long(ARG_CHUNK_SIZE)
                .default_value(DEFAULT_CHUNK_SIZE)
                .value_parser(value_parser!(usize))
                .help("Bytes of reference handed to the simulator at a time"),
        )
        .arg(
            Arg::new(ARG_FETCH_RETRIES)
                .long(ARG_FETCH_RETRIES)
                .default_value(DEFAULT_FETCH_RETRIES)
                .value_parser(value_parser!(u32))
                .help("Retries for failed range fetches (transport errors and 5xx only)"),
        )
        .arg(
            Arg::new(ARG_CONNECT_TIMEOUT)
                .long(ARG_CONNECT_TIMEOUT)
                .default_value(DEFAULT_CONNECT_TIMEOUT)
                .value_parser(value_parser!(u64))
                .help("Connect timeout for the reference store, in seconds"),
        )
        .arg(
            Arg::new(ARG_VERBOSE)
                .long(ARG_VERBOSE)
                .short('v')
                .action(ArgAction::Count)
                .help("More logging (-v debug, -vv trace)"),
        )
}
