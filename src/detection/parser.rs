// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/glowbarn-rs

//! Line parser for the seismometer wire format
//!
//! ```text
//! ...Earthquake...                         -> EarthquakeAlert
//! ...Tremor...                             -> TremorAlert
//! Normal,X:<int>,Y:<int>,Z:<int>,MAG:<int> -> Reading
//! anything else                            -> ParseError
//! ```
//!
//! Matching is case-sensitive substring containment, checked in the order above.

use std::num::ParseIntError;
use thiserror::Error;

use super::{Field, ParsedEvent};

const EARTHQUAKE_MARKER: &str = "Earthquake";
const TREMOR_MARKER: &str = "Tremor";
const NORMAL_MARKER: &str = "Normal";

/// Why a line could not be turned into an event
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Nothing but whitespace
    #[error("empty line")]
    Empty,

    /// No known marker in the line
    #[error("unrecognized line")]
    Unrecognized,

    /// Wrong number of comma-separated fields
    #[error("expected 4 value fields (optionally preceded by a status label), found {found} fields")]
    FieldCount {
        /// Fields present in the line
        found: usize,
    },

    /// No value after the field label
    #[error("missing value for {field}")]
    MissingValue {
        /// Field with the empty value
        field: Field,
    },

    /// Value is not a base-10 integer
    #[error("invalid integer {token:?} for {field}: {source}")]
    InvalidInteger {
        /// Offending field
        field: Field,
        /// Text that failed to parse
        token: String,
        /// Underlying integer error
        #[source]
        source: ParseIntError,
    },
}

/// Classify one raw line. Never panics; malformed input becomes `ParsedEvent::ParseError`.
pub fn parse_line(line: &str) -> ParsedEvent {
    let line = line.trim();

    if line.is_empty() {
        return ParsedEvent::ParseError(ParseError::Empty);
    }

    if line.contains(EARTHQUAKE_MARKER) {
        ParsedEvent::EarthquakeAlert
    } else if line.contains(TREMOR_MARKER) {
        ParsedEvent::TremorAlert
    } else if line.contains(NORMAL_MARKER) {
        match parse_reading(line) {
            Ok([x, y, z, magnitude]) => ParsedEvent::Reading { x, y, z, magnitude },
            Err(e) => ParsedEvent::ParseError(e),
        }
    } else {
        ParsedEvent::ParseError(ParseError::Unrecognized)
    }
}

/// Extract x, y, z, magnitude from a normal reading line.
///
/// Five comma fields means a leading status label (`Normal,X:1,...`); four means the
/// label shares the first value field (`Normal X:1,...`).
fn parse_reading(line: &str) -> Result<[i32; 4], ParseError> {
    let fields: Vec<&str> = line.split(',').collect();

    let values = match fields.len() {
        5 => &fields[1..],
        4 => &fields[..],
        found => return Err(ParseError::FieldCount { found }),
    };

    let mut out = [0i32; 4];
    for ((slot, raw), field) in out.iter_mut().zip(values).zip(Field::ORDER) {
        *slot = parse_value(raw, field)?;
    }
    Ok(out)
}

/// The value is whatever follows the last ':' in the field; the label is ignored.
fn parse_value(raw: &str, field: Field) -> Result<i32, ParseError> {
    let token = raw.rsplit(':').next().unwrap_or(raw).trim();

    if token.is_empty() {
        return Err(ParseError::MissingValue { field });
    }

    token.parse::<i32>().map_err(|source| ParseError::InvalidInteger {
        field,
        token: token.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(x: i32, y: i32, z: i32, magnitude: i32) -> ParsedEvent {
        ParsedEvent::Reading { x, y, z, magnitude }
    }

    #[test]
    fn test_parse_normal_reading() {
        assert_eq!(parse_line("Normal,X:3,Y:-5,Z:12,MAG:9"), reading(3, -5, 12, 9));
    }

    #[test]
    fn test_parse_label_embedded_in_first_field() {
        assert_eq!(parse_line("Normal X:1,Y:2,Z:3,MAG:4"), reading(1, 2, 3, 4));
    }

    #[test]
    fn test_parse_zero_values_are_valid() {
        assert_eq!(parse_line("Normal,X:0,Y:0,Z:0,MAG:0"), reading(0, 0, 0, 0));
    }

    #[test]
    fn test_parse_tolerates_whitespace() {
        assert_eq!(
            parse_line("  Normal, X: 7 ,Y:  -2,Z:1 , MAG: 8 \r\n"),
            reading(7, -2, 1, 8)
        );
    }

    #[test]
    fn test_parse_uses_last_colon_token() {
        assert_eq!(parse_line("Normal,a:b:3,Y:4,Z:5,MAG:6"), reading(3, 4, 5, 6));
        assert_eq!(parse_line("Normal,3,4,5,6"), reading(3, 4, 5, 6));
    }

    #[test]
    fn test_earthquake_has_priority() {
        assert_eq!(parse_line("Earthquake"), ParsedEvent::EarthquakeAlert);
        assert_eq!(parse_line("Tremor then Earthquake"), ParsedEvent::EarthquakeAlert);
        assert_eq!(
            parse_line("Normal,X:1,Y:2,Z:3,MAG:4 Earthquake"),
            ParsedEvent::EarthquakeAlert
        );
    }

    #[test]
    fn test_tremor_precedes_normal() {
        assert_eq!(parse_line("Tremor detected"), ParsedEvent::TremorAlert);
        assert_eq!(parse_line("Normal,Tremor,X:1"), ParsedEvent::TremorAlert);
    }

    #[test]
    fn test_markers_are_case_sensitive() {
        assert!(parse_line("earthquake").is_error());
        assert!(parse_line("TREMOR").is_error());
        assert!(parse_line("normal,X:1,Y:2,Z:3,MAG:4").is_error());
    }

    #[test]
    fn test_invalid_integer() {
        match parse_line("Normal,X:abc,Y:1,Z:2,MAG:1") {
            ParsedEvent::ParseError(ParseError::InvalidInteger { field, token, .. }) => {
                assert_eq!(field, Field::X);
                assert_eq!(token, "abc");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_wrong_field_count() {
        assert_eq!(
            parse_line("Normal,X:1"),
            ParsedEvent::ParseError(ParseError::FieldCount { found: 2 })
        );
        assert_eq!(
            parse_line("Normal,X:1,Y:2,Z:3,MAG:4,EXTRA:5"),
            ParsedEvent::ParseError(ParseError::FieldCount { found: 6 })
        );
    }

    #[test]
    fn test_missing_value() {
        assert_eq!(
            parse_line("Normal,X:1,Y:,Z:3,MAG:4"),
            ParsedEvent::ParseError(ParseError::MissingValue { field: Field::Y })
        );
        assert_eq!(
            parse_line("Normal,X:1,Y:2,Z:3,"),
            ParsedEvent::ParseError(ParseError::MissingValue { field: Field::Magnitude })
        );
    }

    #[test]
    fn test_unrecognized_and_empty() {
        assert_eq!(parse_line(""), ParsedEvent::ParseError(ParseError::Empty));
        assert_eq!(parse_line("   \r\n"), ParsedEvent::ParseError(ParseError::Empty));
        assert_eq!(
            parse_line("X:1,Y:2,Z:3,MAG:4"),
            ParsedEvent::ParseError(ParseError::Unrecognized)
        );
    }

    #[test]
    fn test_normal_inside_unrelated_word() {
        assert!(parse_line("AbNormality detected").is_error());
    }

    #[test]
    fn test_overflow_is_an_error() {
        assert!(parse_line("Normal,X:99999999999,Y:1,Z:2,MAG:3").is_error());
    }
}
