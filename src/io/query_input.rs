//! Query point input - parses "x,y" text typed at a terminal
//!
//! All validation of raw coordinate text happens here so the ranking core only
//! ever sees a well-typed `QueryPoint`.

use crate::domain::types::{GridPoint, QueryPoint};
use std::io::{BufRead, Write};
use std::str::FromStr;
use thiserror::Error;

pub const PROMPT: &str = "Please Input Coordinates:";

#[derive(Debug, Error)]
pub enum QueryParseError {
    #[error("no coordinates entered")]
    Empty,
    #[error("expected coordinates as \"x,y\" but no comma was found in {0:?}")]
    MissingComma(String),
    #[error("expected exactly two coordinates in {0:?}")]
    TooManyParts(String),
    #[error("coordinate {token:?} is not a whole number")]
    InvalidCoordinate { token: String },
    #[error("failed to read coordinates: {0}")]
    Io(#[from] std::io::Error),
}

/// Parse "x,y" (whitespace around either number is ignored)
pub fn parse_query_point(text: &str) -> Result<QueryPoint, QueryParseError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(QueryParseError::Empty);
    }

    let Some((x, y)) = text.split_once(',') else {
        return Err(QueryParseError::MissingComma(text.to_string()));
    };
    if y.contains(',') {
        return Err(QueryParseError::TooManyParts(text.to_string()));
    }

    Ok(GridPoint::new(parse_coordinate(x)?, parse_coordinate(y)?))
}

fn parse_coordinate(token: &str) -> Result<i32, QueryParseError> {
    let token = token.trim();
    token
        .parse::<i32>()
        .map_err(|_| QueryParseError::InvalidCoordinate { token: token.to_string() })
}

impl FromStr for GridPoint {
    type Err = QueryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_query_point(s)
    }
}

/// Prompt on `output` and read one line of coordinates from `input`
pub fn read_query_point<R: BufRead, W: Write>(
    mut input: R,
    mut output: W,
) -> Result<QueryPoint, QueryParseError> {
    writeln!(output, "{}", PROMPT)?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(QueryParseError::Empty);
    }
    parse_query_point(&line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_query_point() {
        assert_eq!(parse_query_point("5,4").unwrap(), GridPoint::new(5, 4));
        assert_eq!(parse_query_point(" -3 , 10 \n").unwrap(), GridPoint::new(-3, 10));
        assert_eq!("0,-7".parse::<QueryPoint>().unwrap(), GridPoint::new(0, -7));
    }

    #[test]
    fn test_parse_query_point_empty() {
        assert!(matches!(parse_query_point(""), Err(QueryParseError::Empty)));
        assert!(matches!(parse_query_point("   \n"), Err(QueryParseError::Empty)));
    }

    #[test]
    fn test_parse_query_point_missing_comma() {
        assert!(matches!(parse_query_point("5 4"), Err(QueryParseError::MissingComma(_))));
    }

    #[test]
    fn test_parse_query_point_too_many_parts() {
        assert!(matches!(parse_query_point("1,2,3"), Err(QueryParseError::TooManyParts(_))));
    }

    #[test]
    fn test_parse_query_point_invalid_token() {
        match parse_query_point("five,4") {
            Err(QueryParseError::InvalidCoordinate { token }) => assert_eq!(token, "five"),
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(matches!(
            parse_query_point("1,"),
            Err(QueryParseError::InvalidCoordinate { .. })
        ));
        assert!(matches!(
            parse_query_point("1.5,2"),
            Err(QueryParseError::InvalidCoordinate { .. })
        ));
        assert!(matches!(
            parse_query_point("99999999999,2"),
            Err(QueryParseError::InvalidCoordinate { .. })
        ));
    }

    #[test]
    fn test_read_query_point_prompts_and_parses() {
        let mut output = Vec::new();
        let point = read_query_point("2,-6\n".as_bytes(), &mut output).unwrap();
        assert_eq!(point, GridPoint::new(2, -6));
        assert_eq!(String::from_utf8(output).unwrap(), "Please Input Coordinates:\n");
    }

    #[test]
    fn test_read_query_point_eof() {
        let result = read_query_point("".as_bytes(), Vec::new());
        assert!(matches!(result, Err(QueryParseError::Empty)));
    }
}
