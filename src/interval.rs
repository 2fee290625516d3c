//! Domain restrictions for plotted functions.
//!
//! An interval is written either as a named set (`R`, `Z`, `N`, `W`) or as a
//! bracketed range such as `(0; 5]` or `[-1, inf)`. Parsing is case and
//! whitespace insensitive. Input that does not parse contains nothing.

use std::str::FromStr;

use thiserror::Error;

/// One endpoint of a bracketed range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bound {
    /// Endpoint value.
    pub value: f64,
    /// Whether the endpoint itself belongs to the range.
    pub inclusive: bool,
}

/// A parsed domain restriction.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum Interval {
    /// All real numbers (`R`).
    #[default]
    Reals,
    /// Mathematical integers (`Z`).
    Integers,
    /// Strictly positive numbers (`N`).
    Positive,
    /// Non-negative numbers (`W`).
    NonNegative,
    /// A bracketed range.
    Range {
        /// Lower endpoint.
        start: Bound,
        /// Upper endpoint.
        end: Bound,
    },
}

/// Reasons an interval string fails to parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntervalError {
    /// Nothing but whitespace.
    #[error("interval is empty")]
    Empty,
    /// The input is not wrapped in `(`/`[` and `)`/`]`.
    #[error("interval must be wrapped in brackets: {0}")]
    MissingBrackets(String),
    /// The range does not split into exactly two endpoints.
    #[error("interval needs exactly one `;` or `,` separator, found {0}")]
    Separator(usize),
    /// An endpoint is not a number.
    #[error("invalid interval endpoint: {0:?}")]
    Endpoint(String),
}

impl Interval {
    /// Parse an interval string.
    pub fn parse(input: &str) -> Result<Self, IntervalError> {
        let normalized: String = input
            .chars()
            .filter(|c| !c.is_whitespace())
            .flat_map(char::to_lowercase)
            .collect();

        match normalized.as_str() {
            "" => Err(IntervalError::Empty),
            "r" => Ok(Self::Reals),
            "z" => Ok(Self::Integers),
            "n" => Ok(Self::Positive),
            "w" => Ok(Self::NonNegative),
            range => parse_range(range),
        }
    }

    /// Check whether `x` belongs to the interval.
    pub fn contains(&self, x: f64) -> bool {
        match *self {
            Self::Reals => true,
            Self::Integers => x.is_finite() && x.fract() == 0.0,
            Self::Positive => x > 0.0,
            Self::NonNegative => x >= 0.0,
            Self::Range { start, end } => {
                if !start.inclusive && x == start.value {
                    return false;
                }
                if !end.inclusive && x == end.value {
                    return false;
                }
                start.value <= x && x <= end.value
            }
        }
    }
}

impl FromStr for Interval {
    type Err = IntervalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn parse_range(range: &str) -> Result<Interval, IntervalError> {
    let mut chars = range.chars();
    let (Some(first), Some(last)) = (chars.next(), chars.next_back()) else {
        return Err(IntervalError::MissingBrackets(range.to_string()));
    };
    let start_inclusive = match first {
        '[' => true,
        '(' => false,
        _ => return Err(IntervalError::MissingBrackets(range.to_string())),
    };
    let end_inclusive = match last {
        ']' => true,
        ')' => false,
        _ => return Err(IntervalError::MissingBrackets(range.to_string())),
    };

    let inside = chars.as_str();
    let parts: Vec<&str> = inside.split([';', ',']).collect();
    if parts.len() != 2 {
        return Err(IntervalError::Separator(parts.len().saturating_sub(1)));
    }

    Ok(Interval::Range {
        start: Bound {
            value: parse_endpoint(parts[0])?,
            inclusive: start_inclusive,
        },
        end: Bound {
            value: parse_endpoint(parts[1])?,
            inclusive: end_inclusive,
        },
    })
}

fn parse_endpoint(text: &str) -> Result<f64, IntervalError> {
    match text.parse::<f64>() {
        Ok(value) if !value.is_nan() => Ok(value),
        _ => Err(IntervalError::Endpoint(text.to_string())),
    }
}

/// Membership test straight from an interval string.
///
/// Malformed strings contain no values.
pub fn is_in_interval(x: f64, input: &str) -> bool {
    Interval::parse(input).is_ok_and(|interval| interval.contains(x))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_sets() {
        assert!(is_in_interval(2.0, "R"));
        assert!(is_in_interval(-1e300, " r "));
        assert!(!is_in_interval(2.5, "Z"));
        assert!(is_in_interval(-3.0, "z"));
        assert!(!is_in_interval(-1.0, "N"));
        assert!(!is_in_interval(0.0, "N"));
        assert!(is_in_interval(0.0, "W"));
    }

    #[test]
    fn bracketed_ranges() {
        assert!(!is_in_interval(2.0, "(2;5)"));
        assert!(is_in_interval(2.0, "[2;5]"));
        assert!(!is_in_interval(5.0, "(0;5)"));
        assert!(is_in_interval(5.0, "(0, 5]"));
        assert!(is_in_interval(3.0, "( 0 ; 5 )"));
        assert!(!is_in_interval(6.0, "[0;5]"));
        assert!(is_in_interval(1e9, "(0; Infinity)"));
        assert!(is_in_interval(-7.0, "(-inf;0)"));
    }

    #[test]
    fn malformed_intervals_fail_closed() {
        for input in ["", "q", "[1;2", "1;2]", "[1;2;3]", "[a;2]", "[1]", "{1;2}", "[nan;1]"] {
            assert!(!is_in_interval(1.5, input), "{input:?} should be empty");
        }
        assert_eq!(Interval::parse("   "), Err(IntervalError::Empty));
        assert_eq!(Interval::parse("[1;2;3]"), Err(IntervalError::Separator(2)));
        assert!(matches!(
            Interval::parse("[x;2]"),
            Err(IntervalError::Endpoint(_))
        ));
    }

    #[test]
    fn parses_typed_range() {
        let interval: Interval = "[-1; 2)".parse().expect("valid range");
        assert_eq!(
            interval,
            Interval::Range {
                start: Bound {
                    value: -1.0,
                    inclusive: true
                },
                end: Bound {
                    value: 2.0,
                    inclusive: false
                },
            }
        );
    }
}
