//! Date substitution into blank `년 월 일` expressions

use chrono::{Datelike, NaiveDate};
use regex::{Captures, Regex};

use crate::error::RenderError;

/// Anchor expression followed by a blank `년 월 일` date
///
/// Every occurrence is replaced, since period clauses repeat the same
/// wording ("…일부터 … 일까지"). The anchor text is kept and the date is
/// written after it with month and day unpadded.
#[derive(Debug, Clone)]
pub struct DatePattern {
    anchor: String,
    regex: Regex,
}

impl DatePattern {
    pub fn new(anchor: &str) -> Result<Self, RenderError> {
        let regex = Regex::new(&format!(r"(?s)(?P<anchor>{})\s*년\s*월\s*일", anchor)).map_err(
            |e| RenderError::InvalidPattern {
                pattern: anchor.to_string(),
                message: e.to_string(),
            },
        )?;
        Ok(Self {
            anchor: anchor.to_string(),
            regex,
        })
    }

    pub fn anchor(&self) -> &str {
        &self.anchor
    }

    /// Replace every blank date after the anchor with `date`
    pub fn apply(&self, page: String, field: &str, date: NaiveDate) -> String {
        let formatted = format_date(date);
        let mut count = 0;
        let updated = self
            .regex
            .replace_all(&page, |caps: &Captures<'_>| {
                count += 1;
                format!("{} {}", &caps["anchor"], formatted)
            })
            .into_owned();

        if count == 0 {
            tracing::debug!(field, anchor = %self.anchor, "No blank date after anchor, field skipped");
        } else {
            tracing::debug!(field, count, "Date field rendered");
        }
        updated
    }
}

/// `2024년 3월 1일`: month and day are not zero-padded
pub fn format_date(date: NaiveDate) -> String {
    format!("{}년 {}월 {}일", date.year(), date.month(), date.day())
}
