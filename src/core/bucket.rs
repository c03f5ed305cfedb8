use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::fmt;

static PERCENTAGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([+-]?\d+)").expect("valid percentage regex"));

/// Severity label of a progress bar, from least to most severe.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ColorBucket {
    #[default]
    Green,
    Yellow,
    Orange,
    DarkOrange,
    Red,
}

impl ColorBucket {
    /// Buckets are `[0,20]`, `(20,40]`, `(40,60]`, `(60,80]`, `(80,100]`.
    /// Anything else, including a malformed value, lands in `Green`.
    pub fn for_percentage(percentage: Option<i64>) -> Self {
        match percentage {
            Some(0..=20) => Self::Green,
            Some(21..=40) => Self::Yellow,
            Some(41..=60) => Self::Orange,
            Some(61..=80) => Self::DarkOrange,
            Some(81..=100) => Self::Red,
            _ => Self::Green,
        }
    }

    pub fn class_name(self) -> &'static str {
        match self {
            Self::Green => "progress-green",
            Self::Yellow => "progress-yellow",
            Self::Orange => "progress-orange",
            Self::DarkOrange => "progress-dark-orange",
            Self::Red => "progress-red",
        }
    }

    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            Self::Green => (46, 204, 113),
            Self::Yellow => (241, 196, 15),
            Self::Orange => (230, 126, 34),
            Self::DarkOrange => (211, 84, 0),
            Self::Red => (231, 76, 60),
        }
    }
}

impl fmt::Display for ColorBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.class_name())
    }
}

/// Reads the leading integer of `raw`, ignoring whatever trails it
/// (`"55%"` is 55). Returns `None` when there is no leading integer.
pub fn parse_percentage(raw: &str) -> Option<i64> {
    let captures = PERCENTAGE_RE.captures(raw)?;
    captures.get(1)?.as_str().parse::<i64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_bucket_includes_zero_and_twenty() {
        for p in 0..=20 {
            assert_eq!(ColorBucket::for_percentage(Some(p)), ColorBucket::Green);
        }
    }

    #[test]
    fn upper_bounds_are_inclusive() {
        assert_eq!(ColorBucket::for_percentage(Some(21)), ColorBucket::Yellow);
        assert_eq!(ColorBucket::for_percentage(Some(40)), ColorBucket::Yellow);
        assert_eq!(ColorBucket::for_percentage(Some(41)), ColorBucket::Orange);
        assert_eq!(ColorBucket::for_percentage(Some(60)), ColorBucket::Orange);
        assert_eq!(ColorBucket::for_percentage(Some(61)), ColorBucket::DarkOrange);
        assert_eq!(ColorBucket::for_percentage(Some(80)), ColorBucket::DarkOrange);
        assert_eq!(ColorBucket::for_percentage(Some(81)), ColorBucket::Red);
        assert_eq!(ColorBucket::for_percentage(Some(100)), ColorBucket::Red);
    }

    #[test]
    fn out_of_range_and_malformed_fall_back_to_green() {
        assert_eq!(ColorBucket::for_percentage(Some(-1)), ColorBucket::Green);
        assert_eq!(ColorBucket::for_percentage(Some(101)), ColorBucket::Green);
        assert_eq!(ColorBucket::for_percentage(None), ColorBucket::Green);
        assert_eq!(ColorBucket::for_percentage(parse_percentage("abc")), ColorBucket::Green);
        assert_eq!(ColorBucket::for_percentage(parse_percentage("")), ColorBucket::Green);
    }

    #[test]
    fn fifty_five_is_orange() {
        assert_eq!(ColorBucket::for_percentage(parse_percentage("55")), ColorBucket::Orange);
        assert_eq!(ColorBucket::Orange.class_name(), "progress-orange");
    }

    #[test]
    fn parses_leading_integer_like_the_markup_attribute() {
        assert_eq!(parse_percentage("55%"), Some(55));
        assert_eq!(parse_percentage("  72 "), Some(72));
        assert_eq!(parse_percentage("-5"), Some(-5));
        assert_eq!(parse_percentage("+12.9"), Some(12));
        assert_eq!(parse_percentage("n/a"), None);
        assert_eq!(parse_percentage("%55"), None);
    }
}
