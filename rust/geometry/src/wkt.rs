// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Well-known-text subset used by the CSV interchange formats
//!
//! Supported forms (case-insensitive keywords, free whitespace):
//! - `POINT(x y)` / `POINT Z(x y z)`
//! - `LINESTRING(x y,...)` / `LINESTRING Z(x y z,...)`
//! - `POLYGON((x y,...),(...))` / `POLYGON Z((x y z,...),(...))`
//!
//! Coordinates are written with `f64` `Display` (shortest representation
//! that round-trips) and read back with `fast_float`, so writing and parsing
//! are exact inverses.

use nom::{
    bytes::complete::{tag_no_case, take_while1},
    character::complete::{char, multispace0, multispace1},
    combinator::map_res,
    multi::separated_list1,
    sequence::{delimited, pair, preceded},
    IResult,
};
use std::fmt;

use crate::error::{Error, Result};

/// Geometry keyword of a tagged WKT string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    Point,
    LineString,
    Polygon,
}

impl Keyword {
    pub fn name(self) -> &'static str {
        match self {
            Keyword::Point => "POINT",
            Keyword::LineString => "LINESTRING",
            Keyword::Polygon => "POLYGON",
        }
    }
}

/// Parse a single number token: 1.5, -2e-7, NaN, inf
fn number(input: &str) -> IResult<&str, f64> {
    map_res(
        take_while1(|c: char| !c.is_whitespace() && !matches!(c, ',' | '(' | ')')),
        fast_float::parse::<f64, _>,
    )(input)
}

/// Parse `N` whitespace separated numbers
fn coords<const N: usize>(input: &str) -> IResult<&str, [f64; N]> {
    let mut out = [0.0; N];
    let mut rest = input;
    for (i, slot) in out.iter_mut().enumerate() {
        let (r, v) = if i == 0 {
            preceded(multispace0, number)(rest)?
        } else {
            preceded(multispace1, number)(rest)?
        };
        *slot = v;
        rest = r;
    }
    Ok((rest, out))
}

/// Parse `(c,c,...)`
fn ring<const N: usize>(input: &str) -> IResult<&str, Vec<[f64; N]>> {
    delimited(
        pair(multispace0, char('(')),
        separated_list1(pair(multispace0, char(',')), coords::<N>),
        pair(multispace0, char(')')),
    )(input)
}

/// Parse `((c,...),(c,...))`
fn rings<const N: usize>(input: &str) -> IResult<&str, Vec<Vec<[f64; N]>>> {
    delimited(
        pair(multispace0, char('(')),
        separated_list1(pair(multispace0, char(',')), ring::<N>),
        pair(multispace0, char(')')),
    )(input)
}

/// Parse the keyword, followed by ` Z` for three dimensional geometry
fn keyword(input: &str, kw: Keyword, with_z: bool) -> IResult<&str, ()> {
    let (rest, _) = preceded(multispace0, tag_no_case(kw.name()))(input)?;
    if with_z {
        let (rest, _) = preceded(multispace1, tag_no_case("Z"))(rest)?;
        Ok((rest, ()))
    } else {
        Ok((rest, ()))
    }
}

/// Require the whole input to be consumed (up to trailing whitespace)
fn finish<T>(input: &str, result: IResult<&str, T>) -> Result<T> {
    match result {
        Ok((rest, value)) if rest.trim().is_empty() => Ok(value),
        Ok((rest, _)) => Err(Error::Wkt(format!(
            "unexpected trailing input '{}' in '{}'",
            rest.trim(),
            input
        ))),
        Err(e) => Err(Error::Wkt(format!("cannot parse '{}': {}", input, e))),
    }
}

/// Parse a single number field, allowing surrounding whitespace.
pub fn parse_number(input: &str) -> Result<f64> {
    fast_float::parse::<f64, _>(input.trim())
        .map_err(|_| Error::InvalidNumber(input.to_string()))
}

/// Parse bare coordinates `x y` or `x y z`.
pub fn parse_coords<const N: usize>(input: &str) -> Result<[f64; N]> {
    finish(input, coords::<N>(input))
}

/// Parse `POINT(x y)` (N = 2) or `POINT Z(x y z)` (N = 3).
pub fn parse_point<const N: usize>(input: &str) -> Result<[f64; N]> {
    finish(
        input,
        preceded(
            |i| keyword(i, Keyword::Point, N == 3),
            delimited(
                pair(multispace0, char('(')),
                coords::<N>,
                pair(multispace0, char(')')),
            ),
        )(input),
    )
}

/// Parse a bare ring `(x y,x y,...)`.
pub fn parse_ring<const N: usize>(input: &str) -> Result<Vec<[f64; N]>> {
    finish(input, ring::<N>(input))
}

/// Parse `LINESTRING(...)` / `LINESTRING Z(...)`.
pub fn parse_line_string<const N: usize>(input: &str) -> Result<Vec<[f64; N]>> {
    finish(
        input,
        preceded(|i| keyword(i, Keyword::LineString, N == 3), ring::<N>)(input),
    )
}

/// Parse bare rings `((...),(...))`.
pub fn parse_rings<const N: usize>(input: &str) -> Result<Vec<Vec<[f64; N]>>> {
    finish(input, rings::<N>(input))
}

/// Parse `POLYGON((...),(...))` / `POLYGON Z((...),(...))`.
pub fn parse_polygon<const N: usize>(input: &str) -> Result<Vec<Vec<[f64; N]>>> {
    finish(
        input,
        preceded(|i| keyword(i, Keyword::Polygon, N == 3), rings::<N>)(input),
    )
}

/// Write `(a,b,c)` using each item's `Display`
pub(crate) fn fmt_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    f.write_str("(")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(",")?;
        }
        write!(f, "{}", item)?;
    }
    f.write_str(")")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coords() {
        assert_eq!(parse_coords::<2>("1.5 -2").unwrap(), [1.5, -2.0]);
        assert_eq!(parse_coords::<3>("  1 2e3 -0.25 ").unwrap(), [1.0, 2000.0, -0.25]);
        assert!(parse_coords::<2>("1").is_err());
        assert!(parse_coords::<2>("1 2 3").is_err());
        assert!(parse_coords::<2>("1,2").is_err());
    }

    #[test]
    fn test_special_values() {
        let [x, y] = parse_coords::<2>("NaN inf").unwrap();
        assert!(x.is_nan());
        assert_eq!(y, f64::INFINITY);
    }

    #[test]
    fn test_point_keywords() {
        assert_eq!(parse_point::<2>("POINT(1 2)").unwrap(), [1.0, 2.0]);
        assert_eq!(parse_point::<2>("point ( 1 2 )").unwrap(), [1.0, 2.0]);
        assert_eq!(parse_point::<3>("POINT Z(1 2 3)").unwrap(), [1.0, 2.0, 3.0]);
        assert!(parse_point::<2>("POINT Z(1 2 3)").is_err());
        assert!(parse_point::<3>("POINT(1 2 3)").is_err());
    }

    #[test]
    fn test_line_string() {
        let ls = parse_line_string::<2>("LINESTRING(0 0, 1 0,1 1)").unwrap();
        assert_eq!(ls, vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0]]);
        assert!(parse_line_string::<2>("LINESTRING(0 0,1 0").is_err());
    }

    #[test]
    fn test_polygon() {
        let rings = parse_polygon::<2>("POLYGON((0 0,4 0,4 4,0 0),(1 1,2 1,1 2,1 1))").unwrap();
        assert_eq!(rings.len(), 2);
        assert_eq!(rings[1][2], [1.0, 2.0]);
        let rings = parse_polygon::<3>("POLYGON Z((0 0 1,4 0 1,4 4 1,0 0 1))").unwrap();
        assert_eq!(rings[0][3], [0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_trailing_garbage() {
        assert!(parse_point::<2>("POINT(1 2) x").is_err());
        assert!(parse_number("1.5x").is_err());
        assert_eq!(parse_number(" 1.5 ").unwrap(), 1.5);
    }
}
