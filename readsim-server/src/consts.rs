pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = "readsim";
pub const BIN_NAME: &str = "readsim";

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: &str = "8787";
pub const DEFAULT_SIMULATOR: &str = "wgsim";
pub const DEFAULT_CHUNK_SIZE: &str = "65536";
pub const DEFAULT_FETCH_RETRIES: &str = "0";
pub const DEFAULT_CONNECT_TIMEOUT: &str = "30";

// argument ids
pub const ARG_HOST: &str = "host";
pub const ARG_PORT: &str = "port";
pub const ARG_REFERENCE: &str = "reference";
pub const ARG_FAI: &str = "fai";
pub const ARG_GENOME: &str = "genome";
pub const ARG_SIMULATOR: &str = "simulator";
pub const ARG_CHUNK_SIZE: &str = "chunk-size";
pub const ARG_FETCH_RETRIES: &str = "fetch-retries";
pub const ARG_CONNECT_TIMEOUT: &str = "connect-timeout";
pub const ARG_VERBOSE: &str = "verbose";

/// Pending response chunks buffered between the pipeline and the client.
pub const OUTBOUND_CAPACITY: usize = 4;

/// Delay before the first retry of a failed range fetch; doubles each attempt.
pub const FETCH_BACKOFF_MS: u64 = 250;

pub const SEED_HEADER: &str = "x-seed";
pub const REGION_HEADER: &str = "x-region";
