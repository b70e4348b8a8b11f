use std::ffi::OsStr;
use std::fs::File;
use std::io::{BufReader, Read, Result};
use std::path::Path;

use flate2::read::MultiGzDecoder;

///
/// Get a reader for either a gzip'd or non-gzip'd file.
///
/// # Arguments
///
/// - path: path to the file to read
///
pub fn get_dynamic_reader(path: &Path) -> Result<BufReader<Box<dyn Read>>> {
    let is_gzipped = path.extension() == Some(OsStr::new("gz"));
    let file = File::open(path)?;
    let file: Box<dyn Read> = match is_gzipped {
        true => Box::new(MultiGzDecoder::new(file)),
        false => Box::new(file),
    };

    Ok(BufReader::new(file))
}

///
/// True when `location` should be fetched over HTTP rather than opened locally.
///
pub fn is_remote(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

///
/// Interpret a query-string flag. A present flag is on unless it spells out "off".
///
pub fn parse_flag(value: Option<&str>) -> bool {
    match value {
        None => false,
        Some(v) => !matches!(
            v.trim().to_ascii_lowercase().as_str(),
            "0" | "false" | "no" | "off"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    #[case(None, false)]
    #[case(Some(""), true)]
    #[case(Some("true"), true)]
    #[case(Some("1"), true)]
    #[case(Some("False"), false)]
    #[case(Some("0"), false)]
    #[case(Some("off"), false)]
    fn test_parse_flag(#[case] value: Option<&str>, #[case] expected: bool) {
        assert_eq!(parse_flag(value), expected);
    }

    #[rstest]
    #[case("http://s3.amazonaws.com/ref.fa", true)]
    #[case("https://example.org/ref.fa", true)]
    #[case("/data/ref.fa", false)]
    #[case("ref.fa", false)]
    fn test_is_remote(#[case] location: &str, #[case] expected: bool) {
        assert_eq!(is_remote(location), expected);
    }
}
