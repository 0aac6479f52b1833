/// Delimited data table parser.
///
/// The first record is a header and is skipped. Every following record is
/// `latitude, longitude, field1, field2, field3`; missing trailing fields are
/// fine and anything after the fifth column is ignored.
use std::fs;
use std::path::{Path, PathBuf};

use nom::{
    branch::alt,
    bytes::complete::{is_not, tag, take_while},
    character::complete::{char, line_ending},
    combinator::{eof, map, value},
    multi::{many0, separated_list1},
    sequence::{delimited, pair, terminated},
    IResult,
};

use crate::geo::GeoPoint;

/// Number of display fields kept per point
pub const MAX_FIELDS: usize = 3;

#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed record on line {line}")]
    Syntax { line: usize },
    #[error("line {line}: missing {column} column")]
    MissingColumn { line: usize, column: &'static str },
    #[error("line {line}: {column} {value:?} is not a number")]
    InvalidNumber {
        line: usize,
        column: &'static str,
        value: String,
    },
}

/// Read and parse a table file
pub fn load_table<P: AsRef<Path>>(path: P) -> Result<Vec<GeoPoint>, TableError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| TableError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let points = parse_table(&text)?;
    log::debug!("parsed {} points from {}", points.len(), path.display());
    Ok(points)
}

/// Parse table text into points, skipping the header and blank lines
pub fn parse_table(input: &str) -> Result<Vec<GeoPoint>, TableError> {
    let mut points = Vec::new();
    let mut rest = input;
    let mut line = 1;
    let mut header_skipped = false;

    while !rest.is_empty() {
        let (next, fields) = record(rest).map_err(|_| TableError::Syntax { line })?;
        let record_line = line;
        // Quoted fields may span lines.
        line += rest[..rest.len() - next.len()].matches('\n').count();
        rest = next;

        if is_blank(&fields) {
            continue;
        }
        if !header_skipped {
            header_skipped = true;
            continue;
        }
        points.push(geo_point(fields, record_line)?);
    }

    Ok(points)
}

fn geo_point(fields: Vec<String>, line: usize) -> Result<GeoPoint, TableError> {
    let latitude = number(&fields, 0, "latitude", line)?;
    let longitude = number(&fields, 1, "longitude", line)?;
    let fields = fields.into_iter().skip(2).take(MAX_FIELDS).collect();
    Ok(GeoPoint::new(latitude, longitude, fields))
}

fn number(
    fields: &[String],
    index: usize,
    column: &'static str,
    line: usize,
) -> Result<f64, TableError> {
    let raw = fields
        .get(index)
        .ok_or(TableError::MissingColumn { line, column })?;
    raw.trim().parse().map_err(|_| TableError::InvalidNumber {
        line,
        column,
        value: raw.clone(),
    })
}

fn is_blank(fields: &[String]) -> bool {
    matches!(fields, [only] if only.trim().is_empty())
}

fn record(input: &str) -> IResult<&str, Vec<String>> {
    terminated(
        separated_list1(char(','), field),
        alt((line_ending, tag("\r"), eof)),
    )(input)
}

/// A field, quoted or not. Text after a closing quote is kept and appended,
/// so `"Paris" ,x` reads as `Paris ` followed by `x`.
fn field(input: &str) -> IResult<&str, String> {
    alt((
        map(pair(quoted_field, unquoted), |(quoted, trailing)| {
            quoted + trailing
        }),
        map(unquoted, str::to_string),
    ))(input)
}

fn unquoted(input: &str) -> IResult<&str, &str> {
    take_while(|c: char| c != ',' && c != '\n' && c != '\r')(input)
}

fn quoted_field(input: &str) -> IResult<&str, String> {
    delimited(
        char('"'),
        map(
            many0(alt((is_not("\""), value("\"", tag("\"\""))))),
            |parts: Vec<&str>| parts.concat(),
        ),
        char('"'),
    )(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_is_skipped() {
        let table = "lat,lon,name,kind,note\n51.5,-0.12,London,city,big\n-33.9,151.2,Sydney,city\n";
        let points = parse_table(table).unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].latitude, 51.5);
        assert_eq!(points[0].longitude, -0.12);
        assert_eq!(points[0].fields, vec!["London", "city", "big"]);
        assert_eq!(points[1].fields, vec!["Sydney", "city"]);
    }

    #[test]
    fn test_extra_fields_are_ignored() {
        let points = parse_table("h\n1,2,a,b,c,d,e\n3,4").unwrap();
        assert_eq!(points[0].fields, vec!["a", "b", "c"]);
        assert!(points[1].fields.is_empty());
    }

    #[test]
    fn test_quoted_fields() {
        let table = "h\r\n10, 20 ,\"Paris, France\",\"say \"\"hi\"\"\"\r\n";
        let points = parse_table(table).unwrap();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].longitude, 20.0);
        assert_eq!(points[0].fields, vec!["Paris, France", "say \"hi\""]);
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let points = parse_table("\nh\n\n1,2,x\n\n").unwrap();
        assert_eq!(points.len(), 1);
    }

    #[test]
    fn test_invalid_number_reports_line() {
        let err = parse_table("h\n1,2\nabc,2\n").unwrap_err();
        match err {
            TableError::InvalidNumber { line, column, value } => {
                assert_eq!(line, 3);
                assert_eq!(column, "latitude");
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_missing_longitude() {
        let err = parse_table("h\n12.5\n").unwrap_err();
        assert!(matches!(
            err,
            TableError::MissingColumn {
                line: 2,
                column: "longitude"
            }
        ));
    }

    #[test]
    fn test_text_after_closing_quote_is_appended() {
        let points = parse_table("h\n1,2,\"Paris\" ,x\n").unwrap();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].fields, vec!["Paris ", "x"]);
    }

    #[test]
    fn test_odd_header_is_still_skipped() {
        let points = parse_table("name,\"weird\"x\n1,2,a\n").unwrap();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].fields, vec!["a"]);
    }

    #[test]
    fn test_bare_carriage_return_ends_record() {
        let points = parse_table("h\r1,2,a\r3,4,b").unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[1].fields, vec!["b"]);
    }

    #[test]
    fn test_missing_file() {
        let err = load_table("/definitely/not/here.csv").unwrap_err();
        assert!(matches!(err, TableError::Io { .. }));
    }
}
