//! Node payloads: the closed set of scalar values a tree can hold.

use std::convert::Infallible;
use std::str::FromStr;

use crate::domain::error::{TreeError, TreeResult};

/// Scalar payload stored in a tree node.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Integer(i64),
    /// Rendered with two decimals, trailing zeros stripped.
    Real(f64),
    /// Rendered as a complex number `a+bi` / `a-bi`.
    Pair(f64, f64),
}

impl Value {
    /// Canonical string form of the value.
    ///
    /// Fails with [`TreeError::UnsupportedValue`] for non-finite reals, which
    /// have no canonical form.
    pub fn canonical(&self) -> TreeResult<String> {
        match self {
            Value::Text(text) => Ok(text.clone()),
            Value::Integer(n) => Ok(n.to_string()),
            Value::Real(x) => format_real(*x),
            Value::Pair(re, im) => {
                let sign = if *im >= 0.0 { '+' } else { '-' };
                Ok(format!("{}{}{}i", format_real(*re)?, sign, format_real(im.abs())?))
            }
        }
    }

    /// Ordering key: sum of the code points of the canonical string.
    pub fn key(&self) -> TreeResult<u64> {
        self.canonical().map(|s| key_of(&s))
    }
}

/// Sum of the Unicode scalar values of `s`.
pub fn key_of(s: &str) -> u64 {
    s.chars().map(|c| u64::from(u32::from(c))).sum()
}

fn format_real(x: f64) -> TreeResult<String> {
    if !x.is_finite() {
        return Err(TreeError::UnsupportedValue(format!("non-finite real: {x}")));
    }
    // `{:.2}` always emits a decimal point, so trimming never eats integer digits
    let fixed = format!("{x:.2}");
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    Ok(match trimmed {
        "-0" => "0".to_string(),
        other => other.to_string(),
    })
}

/// Parses a literal: integer, then finite real, then `a+bi` / `a-bi` pair,
/// falling back to text.
impl FromStr for Value {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(n) = s.parse::<i64>() {
            return Ok(Value::Integer(n));
        }
        if let Some(x) = parse_finite(s) {
            return Ok(Value::Real(x));
        }
        if let Some((re, im)) = parse_pair(s) {
            return Ok(Value::Pair(re, im));
        }
        Ok(Value::Text(s.to_string()))
    }
}

fn parse_finite(s: &str) -> Option<f64> {
    s.parse::<f64>().ok().filter(|x| x.is_finite())
}

fn parse_pair(s: &str) -> Option<(f64, f64)> {
    let body = s.strip_suffix('i')?;
    // split at the last sign that is neither leading nor part of an exponent
    let split = body
        .char_indices()
        .filter(|&(i, c)| (c == '+' || c == '-') && i > 0)
        .filter(|&(i, _)| !matches!(body.as_bytes()[i - 1], b'e' | b'E'))
        .map(|(i, _)| i)
        .last()?;
    let re = parse_finite(&body[..split])?;
    let im = parse_finite(&body[split..])?;
    Some((re, im))
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::Text(text.to_string())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::Text(text)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Integer(i64::from(n))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Real(x)
    }
}

impl From<(f64, f64)> for Value {
    fn from((re, im): (f64, f64)) -> Self {
        Value::Pair(re, im)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Value::Real(12.50), "12.5")]
    #[case(Value::Real(6.00), "6")]
    #[case(Value::Real(12.35), "12.35")]
    #[case(Value::Real(0.25), "0.25")]
    #[case(Value::Real(100.0), "100")]
    #[case(Value::Real(-0.001), "0")]
    #[case(Value::Integer(-42), "-42")]
    #[case(Value::Text("n2".into()), "n2")]
    #[case(Value::Pair(7.0, -4.5), "7-4.5i")]
    #[case(Value::Pair(4.5, 7.0), "4.5+7i")]
    #[case(Value::Pair(3.0, -1.2), "3-1.2i")]
    #[case(Value::Pair(-3.0, 1.1), "-3+1.1i")]
    #[case(Value::Pair(0.0, 0.0), "0+0i")]
    fn test_canonical(#[case] value: Value, #[case] expected: &str) {
        assert_eq!(value.canonical().unwrap(), expected);
    }

    #[test]
    fn test_key_sums_code_points() {
        let expected = ['1', '-', '2', 'i'].iter().map(|&c| c as u64).sum::<u64>();
        assert_eq!(Value::Pair(1.0, -2.0).key().unwrap(), expected);
        assert_eq!(key_of(""), 0);
        assert_eq!(key_of("ä"), 0xE4);
    }

    #[rstest]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    #[case(f64::NEG_INFINITY)]
    fn test_non_finite_is_unsupported(#[case] x: f64) {
        assert!(matches!(Value::Real(x).canonical(), Err(TreeError::UnsupportedValue(_))));
        assert!(matches!(Value::Pair(1.0, x).key(), Err(TreeError::UnsupportedValue(_))));
    }

    #[rstest]
    #[case("1", Value::Integer(1))]
    #[case("-17", Value::Integer(-17))]
    #[case("12.35", Value::Real(12.35))]
    #[case("7-4.5i", Value::Pair(7.0, -4.5))]
    #[case("4.5+7i", Value::Pair(4.5, 7.0))]
    #[case("-3+1.1i", Value::Pair(-3.0, 1.1))]
    #[case("1e-3+2i", Value::Pair(0.001, 2.0))]
    #[case("root", Value::Text("root".into()))]
    #[case("pi", Value::Text("pi".into()))]
    #[case("inf", Value::Text("inf".into()))]
    fn test_parse_literal(#[case] literal: &str, #[case] expected: Value) {
        assert_eq!(literal.parse::<Value>().unwrap(), expected);
    }
}
