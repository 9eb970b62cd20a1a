//! Input parser for the short resource tokens typed at the table.
//!
//! Two grammars exist, both case-insensitive:
//!
//! ```text
//! lp:               [b|e|k]? DIGITS
//! focus, splinters: (k? DIGITS)? (v DIGITS)?      at least one group
//! ```
//!
//! For life points the marker picks the category (`b`/`e` exhausted,
//! `k` channeled, none consumed). For focus and splinters the first group is
//! the total (channeled with `k`, otherwise exhausted) and the `v` group the
//! consumed part of it; `v4` is shorthand for `4v4`.

use crate::error::{ErrorSeverity, TrackerError};
use crate::ledger::{Category, Pool};

/// Malformed resource token.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("invalid input: {token:?}")]
    Invalid { token: String },

    #[error("consumed cannot exceed the total ({consumed} > {total})")]
    ConsumedExceedsTotal { total: u32, consumed: u32 },
}

impl TrackerError for ParseError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Invalid { .. } => "INVALID_INPUT",
            Self::ConsumedExceedsTotal { .. } => "CONSUMED_EXCEEDS_TOTAL",
        }
    }
}

/// Unsigned per-category amounts parsed from one token.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PoolAmounts {
    amounts: [u32; 3],
}

impl PoolAmounts {
    pub fn get(&self, category: Category) -> u32 {
        self.amounts[category.index()]
    }

    fn with(mut self, category: Category, amount: u32) -> Self {
        self.amounts[category.index()] = amount;
        self
    }

    /// Sum over all categories: the number of points the token moves.
    pub fn total(&self) -> u64 {
        self.amounts.iter().map(|&v| u64::from(v)).sum()
    }

    pub fn consumed(&self) -> u32 {
        self.get(Category::Consumed)
    }

    /// Non-zero categories in ledger order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, u32)> + '_ {
        Category::ALL
            .into_iter()
            .map(|category| (category, self.get(category)))
            .filter(|(_, amount)| *amount > 0)
    }
}

/// Parse `token` with the grammar of `pool`.
pub fn parse_amount(pool: Pool, token: &str) -> Result<PoolAmounts, ParseError> {
    let lowered = token.trim().to_ascii_lowercase();
    let parsed = match pool {
        Pool::Lp => parse_lp(&lowered),
        Pool::Focus | Pool::Splinters => parse_split(&lowered),
    };
    parsed.and_then(|amounts| amounts.ok_or_else(|| invalid(token)))
}

/// Parse a plain non-negative integer, as used by the convert action.
pub fn parse_count(token: &str) -> Result<u32, ParseError> {
    let trimmed = token.trim();
    let mut scanner = Scanner::new(trimmed);
    match scanner.digits() {
        Some(value) if scanner.is_done() => Ok(value),
        _ => Err(invalid(token)),
    }
}

fn invalid(token: &str) -> ParseError {
    ParseError::Invalid {
        token: token.to_owned(),
    }
}

fn parse_lp(token: &str) -> Result<Option<PoolAmounts>, ParseError> {
    let mut scanner = Scanner::new(token);
    let category = if scanner.eat('b') || scanner.eat('e') {
        Category::Exhausted
    } else if scanner.eat('k') {
        Category::Channeled
    } else {
        Category::Consumed
    };
    let Some(amount) = scanner.digits() else {
        return Ok(None);
    };
    if !scanner.is_done() {
        return Ok(None);
    }
    Ok(Some(PoolAmounts::default().with(category, amount)))
}

fn parse_split(token: &str) -> Result<Option<PoolAmounts>, ParseError> {
    let mut scanner = Scanner::new(token);
    let channeled = scanner.eat('k');
    let first = scanner.digits();
    if channeled && first.is_none() {
        return Ok(None);
    }
    let consumed = if scanner.eat('v') {
        match scanner.digits() {
            Some(value) => Some(value),
            None => return Ok(None),
        }
    } else {
        None
    };
    if !scanner.is_done() || (first.is_none() && consumed.is_none()) {
        return Ok(None);
    }

    let consumed = consumed.unwrap_or(0);
    let total = match first {
        Some(total) if total < consumed => {
            return Err(ParseError::ConsumedExceedsTotal { total, consumed });
        }
        None => consumed,
        Some(total) => total,
    };
    let rest = if channeled {
        Category::Channeled
    } else {
        Category::Exhausted
    };
    Ok(Some(
        PoolAmounts::default()
            .with(rest, total - consumed)
            .with(Category::Consumed, consumed),
    ))
}

/// Byte cursor over an ASCII token.
struct Scanner<'a> {
    rest: &'a str,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str) -> Self {
        Self { rest: input }
    }

    fn eat(&mut self, marker: char) -> bool {
        match self.rest.strip_prefix(marker) {
            Some(rest) => {
                self.rest = rest;
                true
            }
            None => false,
        }
    }

    /// One or more ASCII digits; `None` when absent or out of range.
    fn digits(&mut self) -> Option<u32> {
        let end = self
            .rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(self.rest.len());
        if end == 0 {
            return None;
        }
        let (number, rest) = self.rest.split_at(end);
        let value = number.parse().ok()?;
        self.rest = rest;
        Some(value)
    }

    fn is_done(&self) -> bool {
        self.rest.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn amounts(pool: Pool, token: &str) -> [u32; 3] {
        let parsed = parse_amount(pool, token).unwrap();
        Category::ALL.map(|category| parsed.get(category))
    }

    #[test]
    fn lp_markers_pick_category() {
        assert_eq!(amounts(Pool::Lp, "5"), [5, 0, 0]);
        assert_eq!(amounts(Pool::Lp, "b3"), [0, 3, 0]);
        assert_eq!(amounts(Pool::Lp, "E3"), [0, 3, 0]);
        assert_eq!(amounts(Pool::Lp, "k2"), [0, 0, 2]);
    }

    #[test]
    fn lp_rejects_other_shapes() {
        for token in ["", "b", "x3", "3b", "k2v1", "-1", "99999999999"] {
            assert!(
                matches!(parse_amount(Pool::Lp, token), Err(ParseError::Invalid { .. })),
                "{token:?} should be rejected"
            );
        }
    }

    #[test]
    fn focus_groups() {
        // [consumed, exhausted, channeled]
        assert_eq!(amounts(Pool::Focus, "3"), [0, 3, 0]);
        assert_eq!(amounts(Pool::Focus, "k2v1"), [1, 0, 1]);
        assert_eq!(amounts(Pool::Focus, "5v2"), [2, 3, 0]);
        assert_eq!(amounts(Pool::Splinters, "K1"), [0, 0, 1]);
    }

    #[test]
    fn v_shorthand_means_all_consumed() {
        let parsed = parse_amount(Pool::Focus, "v4").unwrap();
        assert_eq!(parsed.total(), 4);
        assert_eq!(parsed.consumed(), 4);
        assert_eq!(parsed.get(Category::Exhausted), 0);
        assert!(parse_amount(Pool::Focus, "0v4").is_err());
    }

    #[test]
    fn consumed_exceeding_total_is_rejected() {
        let err = parse_amount(Pool::Focus, "k2v4").unwrap_err();
        assert_eq!(
            err,
            ParseError::ConsumedExceedsTotal {
                total: 2,
                consumed: 4
            }
        );
        assert_eq!(err.severity(), ErrorSeverity::Validation);
    }

    #[test]
    fn focus_rejects_malformed() {
        for token in ["", "k", "v", "kv3", "b2", "2v", "3x"] {
            assert!(
                matches!(parse_amount(Pool::Focus, token), Err(ParseError::Invalid { .. })),
                "{token:?} should be rejected"
            );
        }
    }

    #[test]
    fn iter_skips_zero_categories() {
        let parsed = parse_amount(Pool::Focus, "4v4").unwrap();
        assert_eq!(parsed.iter().collect::<Vec<_>>(), [(Category::Consumed, 4)]);
    }

    #[test]
    fn count_is_plain_integer() {
        assert_eq!(parse_count(" 3 "), Ok(3));
        assert!(parse_count("k3").is_err());
        assert!(parse_count("").is_err());
    }
}
