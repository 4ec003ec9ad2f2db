//! Numeric and boolean parameter resolution
//!
//! Every function here takes the raw string a client sent (or `None`) and
//! returns a fresh, validated value. Nothing is mutated in place.

use super::{param, RawParams};
use serde::{Deserialize, Serialize};

/// Accepted range and fallback for a numeric parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub min: i64,
    pub max: i64,

    /// Value used when the parameter is absent or not a number
    pub default: Option<i64>,

    /// Replace a clamped zero with `default`
    pub zero_means_default: bool,
}

impl Bounds {
    pub const fn new(min: i64, max: i64, default: Option<i64>, zero_means_default: bool) -> Self {
        Self {
            min,
            max,
            default,
            zero_means_default,
        }
    }
}

/// Results per page: `[0, 50]`, zero or garbage means 20
pub const LIMIT_BOUNDS: Bounds = Bounds::new(0, 50, Some(20), true);

/// Pagination offset: `[0, 1000]`, default 0
pub const SKIP_BOUNDS: Bounds = Bounds::new(0, 1_000, Some(0), false);

/// Phrase slop: `[0, 1000]`, default 0
pub const SLOP_BOUNDS: Bounds = Bounds::new(0, 1_000, Some(0), false);

/// Quote length bounds have no default; a malformed bound is simply absent
pub const LENGTH_BOUNDS: Bounds = Bounds::new(0, u32::MAX as i64, None, false);

/// Page window requested by the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub limit: u64,
    pub skip: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self { limit: 20, skip: 0 }
    }
}

/// Parse a client-supplied number. Decimals and exponents are accepted and
/// truncated toward zero; anything non-finite or non-numeric is `None`.
pub fn parse_number(raw: Option<&str>) -> Option<i64> {
    let value: f64 = raw?.trim().parse().ok()?;
    if !value.is_finite() {
        return None;
    }
    // `as` saturates at the i64 range
    Some(value.trunc() as i64)
}

/// Parse, clamp and default a numeric parameter
pub fn clamp_param(raw: Option<&str>, bounds: Bounds) -> Option<i64> {
    let value = match parse_number(raw) {
        Some(value) => value.clamp(bounds.min, bounds.max),
        None => return bounds.default,
    };

    if value == 0 && bounds.zero_means_default {
        bounds.default.or(Some(value))
    } else {
        Some(value)
    }
}

/// Boolean-ish flag: a non-zero integer is true, `0` is false, otherwise
/// only a case-insensitive `"true"` is true. Absent means `default`.
pub fn parse_bool(raw: Option<&str>, default: bool) -> bool {
    let Some(raw) = raw else {
        return default;
    };
    let raw = raw.trim();

    match raw.parse::<i64>() {
        Ok(number) => number != 0,
        Err(_) => raw.eq_ignore_ascii_case("true"),
    }
}

/// Resolve `limit` and `skip`
pub fn resolve_pagination(params: &RawParams) -> Pagination {
    // Both bounds carry a default, so the fallbacks below are never taken.
    let limit = clamp_param(param(params, "limit"), LIMIT_BOUNDS).unwrap_or(20);
    let skip = clamp_param(param(params, "skip"), SKIP_BOUNDS).unwrap_or(0);

    Pagination {
        limit: limit as u64,
        skip: skip as u64,
    }
}

/// Resolve `slop` for exact phrase searches
pub fn resolve_slop(params: &RawParams) -> u32 {
    clamp_param(param(params, "slop"), SLOP_BOUNDS).unwrap_or(0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> RawParams {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number(Some("42")), Some(42));
        assert_eq!(parse_number(Some(" 7 ")), Some(7));
        assert_eq!(parse_number(Some("2.9")), Some(2));
        assert_eq!(parse_number(Some("-3.5")), Some(-3));
        assert_eq!(parse_number(Some("1e3")), Some(1000));
        assert_eq!(parse_number(Some("abc")), None);
        assert_eq!(parse_number(Some("")), None);
        assert_eq!(parse_number(Some("NaN")), None);
        assert_eq!(parse_number(Some("inf")), None);
        assert_eq!(parse_number(None), None);
    }

    #[test]
    fn test_limit_bounds() {
        assert_eq!(clamp_param(None, LIMIT_BOUNDS), Some(20));
        assert_eq!(clamp_param(Some("10"), LIMIT_BOUNDS), Some(10));
        assert_eq!(clamp_param(Some("500"), LIMIT_BOUNDS), Some(50));
        assert_eq!(clamp_param(Some("0"), LIMIT_BOUNDS), Some(20));
        assert_eq!(clamp_param(Some("-5"), LIMIT_BOUNDS), Some(20));
        assert_eq!(clamp_param(Some("ten"), LIMIT_BOUNDS), Some(20));
    }

    #[test]
    fn test_skip_keeps_zero() {
        assert_eq!(clamp_param(None, SKIP_BOUNDS), Some(0));
        assert_eq!(clamp_param(Some("0"), SKIP_BOUNDS), Some(0));
        assert_eq!(clamp_param(Some("-1"), SKIP_BOUNDS), Some(0));
        assert_eq!(clamp_param(Some("40"), SKIP_BOUNDS), Some(40));
        assert_eq!(clamp_param(Some("99999"), SKIP_BOUNDS), Some(1000));
        assert_eq!(clamp_param(Some("x"), SKIP_BOUNDS), Some(0));
    }

    #[test]
    fn test_length_bounds_have_no_default() {
        assert_eq!(clamp_param(None, LENGTH_BOUNDS), None);
        assert_eq!(clamp_param(Some("short"), LENGTH_BOUNDS), None);
        assert_eq!(clamp_param(Some("0"), LENGTH_BOUNDS), Some(0));
        assert_eq!(clamp_param(Some("-10"), LENGTH_BOUNDS), Some(0));
        assert_eq!(clamp_param(Some("120"), LENGTH_BOUNDS), Some(120));
    }

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool(None, true));
        assert!(!parse_bool(None, false));
        assert!(parse_bool(Some("true"), false));
        assert!(parse_bool(Some("TRUE"), false));
        assert!(parse_bool(Some("1"), false));
        assert!(parse_bool(Some("2"), false));
        assert!(!parse_bool(Some("false"), true));
        assert!(!parse_bool(Some("0"), true));
        assert!(!parse_bool(Some("yes"), true));
        assert!(!parse_bool(Some(""), true));
    }

    #[test]
    fn test_resolve_pagination() {
        assert_eq!(resolve_pagination(&params(&[])), Pagination { limit: 20, skip: 0 });
        assert_eq!(
            resolve_pagination(&params(&[("limit", "5"), ("skip", "15")])),
            Pagination { limit: 5, skip: 15 }
        );
        assert_eq!(
            resolve_pagination(&params(&[("limit", "0"), ("skip", "5000")])),
            Pagination { limit: 20, skip: 1000 }
        );
    }

    #[test]
    fn test_resolve_slop() {
        assert_eq!(resolve_slop(&params(&[])), 0);
        assert_eq!(resolve_slop(&params(&[("slop", "3")])), 3);
        assert_eq!(resolve_slop(&params(&[("slop", "-3")])), 0);
        assert_eq!(resolve_slop(&params(&[("slop", "2000")])), 1000);
    }
}
