use std::{fmt, str::FromStr};

use chrono::NaiveDate;

use crate::clients::errors::{Error, Result};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A chart week in strict `YYYY-MM-DD` form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartDate {
    raw: String,
}

impl ChartDate {
    pub fn parse(input: &str) -> Result<Self> {
        let raw = input.trim();
        // chrono accepts years of any width, the chart URL does not
        let shape_ok = raw.len() == 10
            && raw
                .char_indices()
                .all(|(i, c)| if i == 4 || i == 7 { c == '-' } else { c.is_ascii_digit() });
        if !shape_ok {
            return Err(Error::InputError(raw.to_string()));
        }
        NaiveDate::parse_from_str(raw, DATE_FORMAT)
            .map_err(|_| Error::InputError(raw.to_string()))?;
        Ok(ChartDate {
            raw: raw.to_string(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Four digit release year used as a search hint
    pub fn year(&self) -> &str {
        &self.raw[..4]
    }
}

impl FromStr for ChartDate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        ChartDate::parse(s)
    }
}

impl fmt::Display for ChartDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
