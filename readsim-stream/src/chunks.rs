//! The first two pipeline stages: fixed-size chunks of the fetched bytes,
//! then cleaned base strings ready for the simulator.
//!
//! Both stages are pull-based iterators, so nothing is read from the
//! reference store until the previous chunk has been fully handled.
//! Dropping chunks that hold only unknown bases is left to the consumer,
//! which keeps every upstream read visible to it.

use std::io::{self, ErrorKind, Read};

use readsim_core::consts::UNKNOWN_BASE;

/// Default size of one network chunk.
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

///
/// Splits a byte stream into chunks of exactly `chunk_size` bytes (the last
/// one may be shorter). Each chunk is filled completely before it is handed
/// out, so chunk boundaries depend only on the data, not on network timing.
///
pub struct ChunkReader<R: Read> {
    reader: R,
    chunk_size: usize,
    done: bool,
}

impl<R: Read> ChunkReader<R> {
    pub fn new(reader: R, chunk_size: usize) -> Self {
        ChunkReader {
            reader,
            chunk_size: chunk_size.max(1),
            done: false,
        }
    }
}

impl<R: Read> Iterator for ChunkReader<R> {
    type Item = io::Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let mut buf = vec![0u8; self.chunk_size];
        let mut filled = 0;
        while filled < buf.len() {
            match self.reader.read(&mut buf[filled..]) {
                Ok(0) => {
                    self.done = true;
                    break;
                }
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }

        if filled == 0 {
            return None;
        }
        buf.truncate(filled);
        Some(Ok(buf))
    }
}

///
/// A chunk of reference sequence with line terminators removed.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanChunk {
    pub bases: String,
}

///
/// Decode a raw chunk and strip every `\r` and `\n`.
///
pub fn clean_chunk(raw: &[u8]) -> CleanChunk {
    let text = String::from_utf8_lossy(raw);
    CleanChunk {
        bases: text.chars().filter(|c| *c != '\n' && *c != '\r').collect(),
    }
}

///
/// True when the chunk holds nothing but unknown bases (or nothing at all).
///
pub fn is_degenerate(chunk: &CleanChunk) -> bool {
    chunk.bases.chars().all(|c| c == UNKNOWN_BASE)
}

///
/// Second stage: turns each raw chunk into a [`CleanChunk`].
///
pub struct CleanChunks<I> {
    inner: I,
}

impl<I> CleanChunks<I>
where
    I: Iterator<Item = io::Result<Vec<u8>>>,
{
    pub fn new(inner: I) -> Self {
        CleanChunks { inner }
    }
}

impl<I> Iterator for CleanChunks<I>
where
    I: Iterator<Item = io::Result<Vec<u8>>>,
{
    type Item = io::Result<CleanChunk>;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.inner.next()?.map(|raw| clean_chunk(&raw)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;
    use std::io::Cursor;

    /// Reader handing out at most `step` bytes per call.
    struct Trickle {
        data: Vec<u8>,
        pos: usize,
        step: usize,
    }

    impl Read for Trickle {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let n = self.step.min(buf.len()).min(self.data.len() - self.pos);
            buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
            self.pos += n;
            Ok(n)
        }
    }

    struct Failing;

    impl Read for Failing {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(ErrorKind::ConnectionReset, "reset"))
        }
    }

    #[rstest]
    fn test_chunk_reader_fixed_sizes() {
        let chunks: Vec<Vec<u8>> = ChunkReader::new(Cursor::new(b"ACGTACGTAC".to_vec()), 4)
            .map(|c| c.unwrap())
            .collect();
        assert_eq!(chunks, vec![b"ACGT".to_vec(), b"ACGT".to_vec(), b"AC".to_vec()]);
    }

    #[rstest]
    fn test_chunk_reader_boundaries_ignore_read_sizes() {
        let data = b"ACGTNNNNACGTNNNNAC".to_vec();
        let slow = Trickle {
            data: data.clone(),
            pos: 0,
            step: 3,
        };
        let a: Vec<Vec<u8>> = ChunkReader::new(slow, 8).map(|c| c.unwrap()).collect();
        let b: Vec<Vec<u8>> = ChunkReader::new(Cursor::new(data), 8).map(|c| c.unwrap()).collect();
        assert_eq!(a, b);
    }

    #[rstest]
    fn test_chunk_reader_empty_input() {
        assert_eq!(ChunkReader::new(Cursor::new(Vec::new()), 4).count(), 0);
    }

    #[rstest]
    fn test_chunk_reader_error_ends_stream() {
        let mut reader = ChunkReader::new(Failing, 4);
        assert!(reader.next().unwrap().is_err());
        assert!(reader.next().is_none());
    }

    #[rstest]
    #[case(b"ACGT\nACGT\n", "ACGTACGT")]
    #[case(b"\nAC\r\nGT\r\n", "ACGT")]
    #[case(b"\n", "")]
    fn test_clean_chunk(#[case] raw: &[u8], #[case] expected: &str) {
        assert_eq!(clean_chunk(raw).bases, expected);
    }

    #[rstest]
    #[case("NNNN", true)]
    #[case("", true)]
    #[case("NNAN", false)]
    #[case("nnnn", false)]
    fn test_is_degenerate(#[case] bases: &str, #[case] expected: bool) {
        let chunk = CleanChunk {
            bases: bases.to_string(),
        };
        assert_eq!(is_degenerate(&chunk), expected);
    }

    #[rstest]
    fn test_clean_chunks_keeps_one_item_per_raw_chunk() {
        let raw = vec![
            Ok(b"NNNN\nNN".to_vec()),
            Ok(b"\nACGT".to_vec()),
            Ok(b"\n".to_vec()),
            Ok(b"NNGA\n".to_vec()),
        ];
        let cleaned: Vec<String> = CleanChunks::new(raw.into_iter())
            .map(|c| c.unwrap().bases)
            .collect();
        assert_eq!(cleaned, vec!["NNNNNN", "ACGT", "", "NNGA"]);
    }

    #[rstest]
    fn test_clean_chunks_passes_errors_through() {
        let raw = vec![
            Ok(b"ACGT\n".to_vec()),
            Err(io::Error::new(ErrorKind::ConnectionReset, "reset")),
        ];
        let mut stage = CleanChunks::new(raw.into_iter());
        assert_eq!(stage.next().unwrap().unwrap().bases, "ACGT");
        assert!(stage.next().unwrap().is_err());
        assert!(stage.next().is_none());
    }
}
