//! Restricted literal grammar for StructMetadata values.
//!
//! Values on the right-hand side of `KEY=VALUE` lines are never evaluated.
//! The accepted forms are:
//!
//! - integers (`1200`, `-1`)
//! - floating-point numbers (`6371007.181000`, `-1.5e3`)
//! - quoted strings (`"MODIS_Grid_1km_2D"`, single quotes are also accepted)
//! - parenthesized tuples of numbers and quoted strings (`(-1111950.519667,5559752.598333)`,
//!   `("YDim","XDim")`)
//! - bare identifiers (`GCTP_SNSOID`, `HDFE_GD_UL`), kept verbatim as words
//!
//! Anything else is reported as an error and left to the caller's
//! [`LiteralPolicy`](crate::LiteralPolicy).

use nom::{
    branch::alt,
    bytes::complete::take_while,
    character::complete::{char, multispace0, satisfy},
    combinator::{all_consuming, map, map_res, opt, recognize},
    multi::separated_list0,
    number::complete::recognize_float,
    sequence::{delimited, pair, preceded, terminated},
    IResult,
};

/// A leaf value parsed from a `KEY=VALUE` line.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// Integer literal without fraction or exponent.
    Integer(i64),
    /// Floating-point literal.
    Float(f64),
    /// Quoted string, quotes removed.
    Text(String),
    /// Bare identifier such as an enumerated HDF-EOS code.
    Word(String),
    /// Parenthesized tuple of numbers and quoted strings.
    Tuple(Vec<Scalar>),
}

impl Scalar {
    /// Numeric value as `f64` (integers are widened).
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Integer(v) => Some(*v as f64),
            Scalar::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Integer value; floats are not truncated.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Scalar::Integer(v) => Some(*v),
            _ => None,
        }
    }

    /// String content of a quoted string or bare word.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::Text(s) | Scalar::Word(s) => Some(s),
            _ => None,
        }
    }

    /// Tuple members.
    pub fn as_tuple(&self) -> Option<&[Scalar]> {
        match self {
            Scalar::Tuple(items) => Some(items),
            _ => None,
        }
    }

    /// Tuple members as `f64`, or `None` if this is not a tuple of numbers.
    pub fn as_f64_tuple(&self) -> Option<Vec<f64>> {
        self.as_tuple()?.iter().map(Scalar::as_f64).collect()
    }
}

/// Parse a single value using the restricted literal grammar.
///
/// Returns a human-readable reason when the value is not a recognized literal.
pub fn parse_literal(value: &str) -> Result<Scalar, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err("empty value".to_string());
    }

    match all_consuming(alt((tuple_literal, quoted, number, word)))(trimmed) {
        Ok((_, scalar)) => Ok(scalar),
        Err(_) => Err(format!("unrecognized literal '{}'", trimmed)),
    }
}

fn ws<'a, O, F>(inner: F) -> impl FnMut(&'a str) -> IResult<&'a str, O>
where
    F: FnMut(&'a str) -> IResult<&'a str, O>,
{
    delimited(multispace0, inner, multispace0)
}

fn number(input: &str) -> IResult<&str, Scalar> {
    map_res(recognize_float, classify_number)(input)
}

fn classify_number(text: &str) -> Result<Scalar, std::num::ParseFloatError> {
    if text.contains(|c: char| matches!(c, '.' | 'e' | 'E')) {
        text.parse::<f64>().map(Scalar::Float)
    } else {
        // Integers too wide for i64 degrade to floats.
        text.parse::<i64>()
            .map(Scalar::Integer)
            .or_else(|_| text.parse::<f64>().map(Scalar::Float))
    }
}

fn quoted(input: &str) -> IResult<&str, Scalar> {
    map(
        alt((
            delimited(char('"'), take_while(|c: char| c != '"'), char('"')),
            delimited(char('\''), take_while(|c: char| c != '\''), char('\'')),
        )),
        |s: &str| Scalar::Text(s.to_string()),
    )(input)
}

fn word(input: &str) -> IResult<&str, Scalar> {
    map(
        recognize(pair(
            satisfy(|c: char| c.is_ascii_alphabetic() || c == '_'),
            take_while(|c: char| c.is_ascii_alphanumeric() || c == '_'),
        )),
        |s: &str| Scalar::Word(s.to_string()),
    )(input)
}

fn tuple_literal(input: &str) -> IResult<&str, Scalar> {
    map(
        delimited(
            terminated(char('('), multispace0),
            terminated(
                separated_list0(ws(char(',')), alt((number, quoted))),
                opt(ws(char(','))),
            ),
            preceded(multispace0, char(')')),
        ),
        Scalar::Tuple,
    )(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_and_float() {
        assert_eq!(parse_literal("1200"), Ok(Scalar::Integer(1200)));
        assert_eq!(parse_literal("-1"), Ok(Scalar::Integer(-1)));
        assert_eq!(parse_literal("6371007.181000"), Ok(Scalar::Float(6371007.181)));
        assert_eq!(parse_literal("-1.5e3"), Ok(Scalar::Float(-1500.0)));
    }

    #[test]
    fn test_oversized_integer_becomes_float() {
        let value = parse_literal("123456789012345678901234567890").unwrap();
        assert!(matches!(value, Scalar::Float(_)));
    }

    #[test]
    fn test_quoted_strings() {
        assert_eq!(
            parse_literal("\"MODIS_Grid_1km_2D\""),
            Ok(Scalar::Text("MODIS_Grid_1km_2D".to_string()))
        );
        assert_eq!(parse_literal("'a b'"), Ok(Scalar::Text("a b".to_string())));
        assert_eq!(parse_literal("\"\""), Ok(Scalar::Text(String::new())));
    }

    #[test]
    fn test_bare_word() {
        assert_eq!(
            parse_literal("GCTP_SNSOID"),
            Ok(Scalar::Word("GCTP_SNSOID".to_string()))
        );
    }

    #[test]
    fn test_numeric_tuple() {
        let value = parse_literal("(-1111950.519667,5559752.598333)").unwrap();
        assert_eq!(value.as_f64_tuple(), Some(vec![-1111950.519667, 5559752.598333]));

        let params = parse_literal("(6371007.181000,0,0,0,0,0,0,0,0,0,0,0,0)").unwrap();
        let params = params.as_f64_tuple().unwrap();
        assert_eq!(params.len(), 13);
        assert_eq!(params[0], 6371007.181);
    }

    #[test]
    fn test_tuple_whitespace_and_trailing_comma() {
        let value = parse_literal("( 1 , 2.5 ,)").unwrap();
        assert_eq!(value.as_f64_tuple(), Some(vec![1.0, 2.5]));
        assert_eq!(parse_literal("()"), Ok(Scalar::Tuple(vec![])));
    }

    #[test]
    fn test_string_tuple() {
        let value = parse_literal("(\"YDim\",\"XDim\")").unwrap();
        let items = value.as_tuple().unwrap();
        assert_eq!(items[0].as_str(), Some("YDim"));
        assert_eq!(items[1].as_str(), Some("XDim"));
        assert_eq!(value.as_f64_tuple(), None);
    }

    #[test]
    fn test_rejects_expressions() {
        assert!(parse_literal("__import__('os').system('ls')").is_err());
        assert!(parse_literal("1+1").is_err());
        assert!(parse_literal("1abc").is_err());
        assert!(parse_literal("foo bar").is_err());
    }

    #[test]
    fn test_rejects_malformed_forms() {
        assert!(parse_literal("(1,2").is_err());
        assert!(parse_literal("\"unterminated").is_err());
        assert!(parse_literal("(1,GCTP_GEO)").is_err());
        assert!(parse_literal("").is_err());
    }
}
