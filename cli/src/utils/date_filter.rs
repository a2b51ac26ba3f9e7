use std::{fmt, str::FromStr};

use chrono::{Local, NaiveDate};

/// Calendar day used to narrow the monitor list
#[derive(Debug, Clone, PartialEq)]
pub enum DateFilter {
    Today,
    Yesterday,
    Specific(NaiveDate),
}

impl DateFilter {
    pub fn to_day(&self) -> NaiveDate {
        let today = Local::now().date_naive();

        match self {
            DateFilter::Today => today,
            DateFilter::Yesterday => today.pred_opt().unwrap_or(today),
            DateFilter::Specific(date) => *date,
        }
    }
}

impl FromStr for DateFilter {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "today" => Ok(Self::Today),
            "yesterday" => Ok(Self::Yesterday),
            other => NaiveDate::parse_from_str(other, "%Y-%m-%d")
                .or_else(|_| NaiveDate::parse_from_str(other, "%d/%m/%Y"))
                .map(Self::Specific)
                .map_err(|e| anyhow::anyhow!("Invalid date filter: {}", e)),
        }
    }
}

impl fmt::Display for DateFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateFilter::Today => f.write_str("today"),
            DateFilter::Yesterday => f.write_str("yesterday"),
            DateFilter::Specific(dt) => write!(f, "{}", dt),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]

    use chrono::Datelike;

    use super::*;

    #[test]
    fn test_date_filter_parsing() {
        assert_eq!("today".parse::<DateFilter>().unwrap(), DateFilter::Today);
        assert_eq!(
            "yesterday".parse::<DateFilter>().unwrap(),
            DateFilter::Yesterday
        );
    }

    #[test]
    fn test_specific_date_parsing() {
        let iso = DateFilter::from_str("2024-03-16").unwrap();
        let br = DateFilter::from_str("16/03/2024").unwrap();
        assert_eq!(iso, br);

        match iso {
            DateFilter::Specific(dt) => {
                assert_eq!(dt.year(), 2024);
                assert_eq!(dt.month(), 3);
                assert_eq!(dt.day(), 16);
            }
            _ => panic!("Expected Specific date"),
        }
    }

    #[test]
    fn test_invalid_date_filter() {
        let err = DateFilter::from_str("last week").err();
        match err {
            Some(e) => assert!(e.to_string().starts_with("Invalid date filter")),
            None => panic!("Expected error"),
        }
    }

    #[test]
    fn test_yesterday_is_before_today() {
        assert!(DateFilter::Yesterday.to_day() < DateFilter::Today.to_day());
        let day = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        assert_eq!(DateFilter::Specific(day).to_string(), "2024-01-02");
    }
}
