//! Genealogical date value object.
//!
//! A [`GenDate`] carries a qualifier (`ABT`, `BEF`, `BET … AND …`, …), any
//! subset of year/month/day, an optional secondary date for ranges, and the
//! raw source string. Parsing is total: text that does not match any known
//! shape becomes a raw-only date, so the original string always survives a
//! round-trip through the GEDCOM codec.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Qualifier of a genealogical date, aligned with GEDCOM date tokens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateQualifier {
    #[default]
    Exact,
    About,
    Calculated,
    Estimated,
    Before,
    After,
    Between,
    From,
}

impl DateQualifier {
    /// GEDCOM token for this qualifier; empty for exact dates.
    pub fn token(&self) -> &'static str {
        match self {
            Self::Exact => "",
            Self::About => "ABT",
            Self::Calculated => "CAL",
            Self::Estimated => "EST",
            Self::Before => "BEF",
            Self::After => "AFT",
            Self::Between => "BET",
            Self::From => "FROM",
        }
    }

    /// Exact sorts before any approximation at the same calendar point.
    fn rank(&self) -> u8 {
        match self {
            Self::Exact => 0,
            Self::Calculated => 1,
            Self::Estimated => 2,
            Self::About => 3,
            Self::Before => 4,
            Self::After => 5,
            Self::Between => 6,
            Self::From => 7,
        }
    }
}

/// Year/month/day triple used for the secondary date of a range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateParts {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
}

impl DateParts {
    fn is_empty(&self) -> bool {
        self.year.is_none() && self.month.is_none() && self.day.is_none()
    }

    fn format(&self) -> String {
        format_parts(self.day, self.month, self.year)
    }
}

/// A genealogical date.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenDate {
    #[serde(default)]
    pub qualifier: DateQualifier,
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
    /// Secondary date for `BET … AND …` and `FROM … TO …` ranges.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub second: Option<DateParts>,
    /// The source string as it appeared in the input.
    pub raw: String,
}

const MONTHS: [&str; 12] = [
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
];

fn month_number(s: &str) -> Option<u32> {
    let upper = s.to_uppercase();
    MONTHS
        .iter()
        .position(|m| *m == upper)
        .map(|i| i as u32 + 1)
}

fn month_token(m: u32) -> Option<&'static str> {
    MONTHS.get((m as usize).checked_sub(1)?).copied()
}

/// Parse `DD MMM YYYY`, `MMM YYYY`, or `YYYY` into parts.
fn parse_parts(s: &str) -> Option<DateParts> {
    let tokens: Vec<&str> = s.split_whitespace().collect();
    match tokens.as_slice() {
        [day, month, year] => {
            let day: u32 = day.parse().ok()?;
            let month = month_number(month)?;
            let year: i32 = year.parse().ok()?;
            (1..=31).contains(&day).then_some(DateParts {
                year: Some(year),
                month: Some(month),
                day: Some(day),
            })
        }
        [month, year] => {
            let month = month_number(month)?;
            let year: i32 = year.parse().ok()?;
            Some(DateParts {
                year: Some(year),
                month: Some(month),
                day: None,
            })
        }
        [year] => {
            let year: i32 = year.parse().ok()?;
            Some(DateParts {
                year: Some(year),
                month: None,
                day: None,
            })
        }
        _ => None,
    }
}

fn format_parts(day: Option<u32>, month: Option<u32>, year: Option<i32>) -> String {
    let mut out = String::new();
    if let Some(d) = day {
        out.push_str(&d.to_string());
    }
    if let Some(m) = month
        && let Some(tok) = month_token(m)
    {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(tok);
    }
    if let Some(y) = year {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(&y.to_string());
    }
    out
}

impl GenDate {
    /// Parse a GEDCOM date phrase. Never fails: input that matches no known
    /// shape is preserved as a raw-only date with zero components.
    pub fn parse(input: &str) -> Self {
        let raw = input.trim().to_string();
        if raw.is_empty() {
            return Self::default();
        }

        let upper = raw.to_uppercase();

        // Ranges first: BET x AND y, FROM x TO y.
        if let Some(rest) = upper.strip_prefix("BET ")
            && let Some((a, b)) = rest.split_once(" AND ")
            && let (Some(first), Some(second)) = (parse_parts(a), parse_parts(b))
        {
            return Self {
                qualifier: DateQualifier::Between,
                year: first.year,
                month: first.month,
                day: first.day,
                second: Some(second),
                raw,
            };
        }
        if let Some(rest) = upper.strip_prefix("FROM ") {
            if let Some((a, b)) = rest.split_once(" TO ")
                && let (Some(first), Some(second)) = (parse_parts(a), parse_parts(b))
            {
                return Self {
                    qualifier: DateQualifier::From,
                    year: first.year,
                    month: first.month,
                    day: first.day,
                    second: Some(second),
                    raw,
                };
            }
            if let Some(first) = parse_parts(rest) {
                return Self {
                    qualifier: DateQualifier::From,
                    year: first.year,
                    month: first.month,
                    day: first.day,
                    second: None,
                    raw,
                };
            }
        }

        let (qualifier, rest) = if let Some(r) = upper.strip_prefix("ABT ") {
            (DateQualifier::About, r)
        } else if let Some(r) = upper.strip_prefix("CAL ") {
            (DateQualifier::Calculated, r)
        } else if let Some(r) = upper.strip_prefix("EST ") {
            (DateQualifier::Estimated, r)
        } else if let Some(r) = upper.strip_prefix("BEF ") {
            (DateQualifier::Before, r)
        } else if let Some(r) = upper.strip_prefix("AFT ") {
            (DateQualifier::After, r)
        } else {
            (DateQualifier::Exact, upper.as_str())
        };

        match parse_parts(rest) {
            Some(parts) => Self {
                qualifier,
                year: parts.year,
                month: parts.month,
                day: parts.day,
                second: None,
                raw,
            },
            // Unknown shape: keep only the raw string.
            None => Self {
                qualifier: DateQualifier::Exact,
                year: None,
                month: None,
                day: None,
                second: None,
                raw,
            },
        }
    }

    /// Render the date as a GEDCOM phrase. Prefers the preserved raw string;
    /// reconstructs from components only when no raw text exists.
    pub fn to_gedcom(&self) -> String {
        if !self.raw.is_empty() {
            return self.raw.clone();
        }
        let body = format_parts(self.day, self.month, self.year);
        match (self.qualifier, &self.second) {
            (DateQualifier::Between, Some(second)) => {
                format!("BET {body} AND {}", second.format())
            }
            (DateQualifier::From, Some(second)) => {
                format!("FROM {body} TO {}", second.format())
            }
            (DateQualifier::Exact, _) => body,
            (q, _) => format!("{} {body}", q.token()),
        }
    }

    /// True when the date carries neither components nor raw text.
    pub fn is_empty(&self) -> bool {
        self.year.is_none()
            && self.month.is_none()
            && self.day.is_none()
            && self.second.as_ref().is_none_or(DateParts::is_empty)
            && self.raw.is_empty()
    }

    /// True when at least a year was recognized.
    pub fn has_components(&self) -> bool {
        self.year.is_some()
    }

    /// Precision of the recognized components: 0 none, 1 year, 2 month, 3 day.
    pub fn precision(&self) -> u8 {
        match (self.year, self.month, self.day) {
            (Some(_), Some(_), Some(_)) => 3,
            (Some(_), Some(_), None) => 2,
            (Some(_), None, _) => 1,
            (None, ..) => 0,
        }
    }

    /// Coarse sortable time: missing month/day fall back to January 1st.
    /// `None` when no year was recognized.
    pub fn sort_date(&self) -> Option<NaiveDate> {
        let year = self.year?;
        NaiveDate::from_ymd_opt(year, self.month.unwrap_or(1), self.day.unwrap_or(1))
    }
}

/// Partial order: dates without a recognized year are not comparable.
/// Ranges compare by their start; at the same calendar point an exact date
/// sorts before an approximate one.
impl PartialOrd for GenDate {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        let a = self.sort_date()?;
        let b = other.sort_date()?;
        Some(
            a.cmp(&b)
                .then(self.qualifier.rank().cmp(&other.qualifier.rank())),
        )
    }
}

impl std::fmt::Display for GenDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_gedcom())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_exact_full() {
        let d = GenDate::parse("15 JAN 1850");
        assert_eq!(d.qualifier, DateQualifier::Exact);
        assert_eq!(d.year, Some(1850));
        assert_eq!(d.month, Some(1));
        assert_eq!(d.day, Some(15));
        assert_eq!(d.raw, "15 JAN 1850");
    }

    #[test]
    fn test_parse_month_year() {
        let d = GenDate::parse("MAR 1901");
        assert_eq!(d.year, Some(1901));
        assert_eq!(d.month, Some(3));
        assert_eq!(d.day, None);
        assert_eq!(d.precision(), 2);
    }

    #[test]
    fn test_parse_year_only() {
        let d = GenDate::parse("1842");
        assert_eq!(d.year, Some(1842));
        assert_eq!(d.precision(), 1);
    }

    #[test]
    fn test_parse_qualifiers() {
        assert_eq!(GenDate::parse("ABT 1842").qualifier, DateQualifier::About);
        assert_eq!(GenDate::parse("BEF 1842").qualifier, DateQualifier::Before);
        assert_eq!(GenDate::parse("AFT 1842").qualifier, DateQualifier::After);
        assert_eq!(GenDate::parse("CAL 1842").qualifier, DateQualifier::Calculated);
        assert_eq!(GenDate::parse("EST 1842").qualifier, DateQualifier::Estimated);
    }

    #[test]
    fn test_parse_between_range() {
        let d = GenDate::parse("BET 1800 AND 1810");
        assert_eq!(d.qualifier, DateQualifier::Between);
        assert_eq!(d.year, Some(1800));
        let second = d.second.unwrap();
        assert_eq!(second.year, Some(1810));
    }

    #[test]
    fn test_parse_from_to_range() {
        let d = GenDate::parse("FROM JAN 1900 TO MAR 1900");
        assert_eq!(d.qualifier, DateQualifier::From);
        assert_eq!(d.month, Some(1));
        assert_eq!(d.second.unwrap().month, Some(3));
    }

    #[test]
    fn test_parse_unknown_preserves_raw() {
        let d = GenDate::parse("the winter of 1850/51");
        assert_eq!(d.year, None);
        assert_eq!(d.precision(), 0);
        assert_eq!(d.raw, "the winter of 1850/51");
        assert_eq!(d.to_gedcom(), "the winter of 1850/51");
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        let d = GenDate::parse("abt 12 jan 1850");
        assert_eq!(d.qualifier, DateQualifier::About);
        assert_eq!(d.day, Some(12));
        // Raw keeps the original casing.
        assert_eq!(d.raw, "abt 12 jan 1850");
    }

    #[test]
    fn test_invalid_day_preserves_raw_only() {
        let d = GenDate::parse("42 JAN 1850");
        assert_eq!(d.year, None);
        assert_eq!(d.raw, "42 JAN 1850");
    }

    #[test]
    fn test_to_gedcom_from_components() {
        let d = GenDate {
            qualifier: DateQualifier::About,
            year: Some(1842),
            month: Some(5),
            day: None,
            second: None,
            raw: String::new(),
        };
        assert_eq!(d.to_gedcom(), "ABT MAY 1842");
    }

    #[test]
    fn test_ordering_exact_before_approximate() {
        let exact = GenDate::parse("15 JAN 1850");
        let about = GenDate::parse("ABT 15 JAN 1850");
        assert!(exact < about);
    }

    #[test]
    fn test_ordering_by_start_of_range() {
        let range = GenDate::parse("BET 1800 AND 1810");
        let later = GenDate::parse("1805");
        assert!(range < later);
    }

    #[test]
    fn test_non_comparable_without_year() {
        let raw_only = GenDate::parse("sometime in spring");
        let dated = GenDate::parse("1850");
        assert_eq!(raw_only.partial_cmp(&dated), None);
    }

    #[test]
    fn test_sort_date_fallbacks() {
        let d = GenDate::parse("1850");
        assert_eq!(d.sort_date(), NaiveDate::from_ymd_opt(1850, 1, 1));
    }
}
