use std::fmt::{self, Display};

use super::chromosome::ChromosomeRecord;

///
/// Inclusive byte range inside the reference file, as used by an HTTP `Range` header.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    pub start: u64,
    pub stop: u64,
}

impl ByteRange {
    /// Number of bytes covered by the range.
    pub fn len(&self) -> u64 {
        self.stop.saturating_sub(self.start) + 1
    }

    pub fn is_empty(&self) -> bool {
        self.stop < self.start
    }

    /// Value for an HTTP `Range` request header.
    pub fn header_value(&self) -> String {
        format!("bytes={}-{}", self.start, self.stop)
    }
}

impl Display for ByteRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.stop)
    }
}

///
/// A resolved request region: `0 <= start < stop <= chrom.size`.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub chrom: ChromosomeRecord,
    pub start: u64,
    pub stop: u64,
}

impl Region {
    ///
    /// Label handed to the simulator as the FASTA record name, e.g. `chr1:100-1099`.
    ///
    pub fn label(&self) -> String {
        format!("{}:{}-{}", self.chrom.name, self.start, self.stop)
    }

    ///
    /// Bytes of the reference file holding this region.
    ///
    pub fn byte_range(&self) -> ByteRange {
        ByteRange {
            start: self.chrom.offset_of(self.start),
            stop: self.chrom.offset_of(self.stop),
        }
    }
}

impl Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[fixture]
    fn region() -> Region {
        Region {
            chrom: ChromosomeRecord::new("chr2", 242193529, 252513167, 70, 71),
            start: 1000,
            stop: 1999,
        }
    }

    #[rstest]
    fn test_label(region: Region) {
        assert_eq!(region.label(), "chr2:1000-1999");
        assert_eq!(region.to_string(), "chr2:1000-1999");
    }

    #[rstest]
    fn test_byte_range(region: Region) {
        let range = region.byte_range();
        // 1000 = 14 * 70 + 20, 1999 = 28 * 70 + 39
        assert_eq!(range.start, 252513167 + 14 * 71 + 20 - 1);
        assert_eq!(range.stop, 252513167 + 28 * 71 + 39 - 1);
        assert_eq!(range.header_value(), format!("bytes={}-{}", range.start, range.stop));
    }

    #[rstest]
    fn test_byte_range_len() {
        let range = ByteRange { start: 10, stop: 19 };
        assert_eq!(range.len(), 10);
        assert!(!range.is_empty());
    }
}
