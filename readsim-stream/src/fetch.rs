//! Byte-range access to the reference FASTA.
//!
//! A [`RangeSource`] hands back the bytes of one inclusive range as a reader
//! that is consumed incrementally; nothing is buffered in full.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
#[cfg(feature = "http")]
use std::time::Duration;

#[cfg(feature = "http")]
use log::{debug, warn};
use readsim_core::ByteRange;

use crate::errors::{Result, StreamError};

/// Incrementally readable body of a range fetch.
pub type ByteStream = Box<dyn Read + Send>;

///
/// Anything that can serve inclusive byte ranges of the reference file.
///
pub trait RangeSource: Send + Sync {
    /// Start reading `range`. Failures to reach the store are reported here,
    /// before any data is handed out.
    fn fetch(&self, range: ByteRange) -> Result<ByteStream>;

    /// Human readable location of the reference, for logs and errors.
    fn location(&self) -> &str;
}

///
/// Range fetcher for a reference file served over HTTP.
///
#[cfg(feature = "http")]
pub struct HttpRangeFetcher {
    url: String,
    agent: ureq::Agent,
    retries: u32,
    backoff: Duration,
}

#[cfg(feature = "http")]
impl HttpRangeFetcher {
    pub fn new(url: &str, connect_timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(connect_timeout)
            .build();

        HttpRangeFetcher {
            url: url.to_string(),
            agent,
            retries: 0,
            backoff: Duration::from_millis(250),
        }
    }

    ///
    /// Retry transport failures and 5xx answers up to `retries` times,
    /// doubling `backoff` after each attempt. Zero disables retrying.
    ///
    pub fn with_retries(mut self, retries: u32, backoff: Duration) -> Self {
        self.retries = retries;
        self.backoff = backoff;
        self
    }

    fn accept(&self, range: ByteRange, response: ureq::Response) -> Result<ByteStream> {
        let status = response.status();
        // a plain 200 only carries the right bytes when the range starts at zero
        if status != 206 && !(status == 200 && range.start == 0) {
            return Err(StreamError::UpstreamStatus {
                status,
                location: self.url.clone(),
            });
        }
        debug!("Fetched {} from {} (status {})", range.header_value(), self.url, status);
        Ok(Box::new(response.into_reader().take(range.len())))
    }
}

#[cfg(feature = "http")]
impl RangeSource for HttpRangeFetcher {
    fn fetch(&self, range: ByteRange) -> Result<ByteStream> {
        let header = range.header_value();
        let mut attempt: u32 = 0;

        loop {
            match self.agent.get(&self.url).set("Range", &header).call() {
                Ok(response) => return self.accept(range, response),
                Err(ureq::Error::Status(status, _)) if status < 500 || attempt >= self.retries => {
                    return Err(StreamError::UpstreamStatus {
                        status,
                        location: self.url.clone(),
                    });
                }
                Err(ureq::Error::Transport(transport)) if attempt >= self.retries => {
                    return Err(StreamError::UpstreamConnection {
                        location: self.url.clone(),
                        message: transport.to_string(),
                    });
                }
                Err(e) => {
                    let delay = self.backoff * 2u32.saturating_pow(attempt);
                    attempt += 1;
                    warn!(
                        "Fetching {} failed ({}), retry {}/{} in {:?}",
                        header, e, attempt, self.retries, delay
                    );
                    std::thread::sleep(delay);
                }
            }
        }
    }

    fn location(&self) -> &str {
        &self.url
    }
}

///
/// Range reader for an uncompressed FASTA file on local disk.
///
pub struct LocalRangeSource {
    path: PathBuf,
    location: String,
}

impl LocalRangeSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        LocalRangeSource {
            path: path.as_ref().to_path_buf(),
            location: path.as_ref().display().to_string(),
        }
    }
}

impl RangeSource for LocalRangeSource {
    fn fetch(&self, range: ByteRange) -> Result<ByteStream> {
        let mut file = File::open(&self.path).map_err(|e| StreamError::UpstreamConnection {
            location: self.location.clone(),
            message: e.to_string(),
        })?;
        file.seek(SeekFrom::Start(range.start))?;
        Ok(Box::new(file.take(range.len())))
    }

    fn location(&self) -> &str {
        &self.location
    }
}
