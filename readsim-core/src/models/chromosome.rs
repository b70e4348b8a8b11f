use serde::Serialize;

///
/// FAI-equivalent layout of one chromosome inside a line-wrapped FASTA file.
///
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ChromosomeRecord {
    pub name: String,
    /// Sequence length in bases.
    #[serde(rename = "size")]
    pub size: u64,
    /// Byte offset of the first base of the sequence.
    #[serde(rename = "offset")]
    pub offset: u64,
    /// Number of bases per full line.
    #[serde(rename = "lengthBp")]
    pub line_bases: u64,
    /// Number of bytes per full line, including the line terminator.
    #[serde(rename = "lengthBytes")]
    pub line_bytes: u64,
}

impl ChromosomeRecord {
    pub fn new(name: &str, size: u64, offset: u64, line_bases: u64, line_bytes: u64) -> Self {
        ChromosomeRecord {
            name: name.to_string(),
            size,
            offset,
            line_bases,
            line_bytes,
        }
    }

    ///
    /// Absolute byte offset of `position` in the reference file.
    ///
    /// Full lines before the position are skipped using `line_bytes`, the
    /// remainder is added within the current line, and the result is shifted
    /// by one to turn the 1-based base coordinate into a 0-based byte offset.
    /// Callers are expected to keep `position` within `0..=size`.
    ///
    pub fn offset_of(&self, position: u64) -> u64 {
        (self.offset
            + (position / self.line_bases) * self.line_bytes
            + position % self.line_bases)
            .saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[fixture]
    fn chr1() -> ChromosomeRecord {
        ChromosomeRecord::new("chr1", 248956422, 112, 70, 71)
    }

    #[rstest]
    #[case(1, 112)]
    #[case(69, 180)]
    #[case(70, 182)]
    #[case(71, 183)]
    #[case(140, 253)]
    fn test_offset_of_known_positions(chr1: ChromosomeRecord, #[case] pos: u64, #[case] expected: u64) {
        assert_eq!(chr1.offset_of(pos), expected);
    }

    #[rstest]
    fn test_offset_of_position_zero_is_one_before_offset(chr1: ChromosomeRecord) {
        assert_eq!(chr1.offset_of(0), 111);
    }

    #[rstest]
    fn test_offset_of_saturates_at_file_start() {
        let rec = ChromosomeRecord::new("seq", 10, 0, 60, 61);
        assert_eq!(rec.offset_of(0), 0);
    }

    #[rstest]
    #[case(ChromosomeRecord::new("a", 1000, 6, 60, 61))]
    #[case(ChromosomeRecord::new("b", 1000, 9, 50, 52))]
    #[case(ChromosomeRecord::new("c", 1000, 112, 70, 71))]
    fn test_offset_of_steps(#[case] rec: ChromosomeRecord) {
        let boundary_step = rec.line_bytes - rec.line_bases + 1;
        for pos in 0..rec.size {
            let step = rec.offset_of(pos + 1) - rec.offset_of(pos);
            if (pos + 1) % rec.line_bases == 0 {
                assert_eq!(step, boundary_step, "line boundary at {}", pos + 1);
            } else {
                assert!(step == 0 || step == 1, "step {} at {}", step, pos);
            }
        }
    }

    #[rstest]
    fn test_serializes_with_fai_field_names(chr1: ChromosomeRecord) {
        let json = serde_json::to_value(&chr1).unwrap();
        assert_eq!(json["name"], "chr1");
        assert_eq!(json["size"], 248956422u64);
        assert_eq!(json["offset"], 112);
        assert_eq!(json["lengthBp"], 70);
        assert_eq!(json["lengthBytes"], 71);
    }
}
