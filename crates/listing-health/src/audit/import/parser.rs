use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer};
use std::io::Read;

use crate::audit::signals::NormalizedReview;

use super::ReviewImportError;

pub(crate) fn parse_reviews<R: Read>(
    reader: R,
) -> Result<Vec<NormalizedReview>, ReviewImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut reviews = Vec::new();

    for (index, record) in csv_reader.deserialize::<ReviewRow>().enumerate() {
        // Line 1 is the header row.
        let line = index + 2;
        let row = record?;
        reviews.push(row.into_review(line)?);
    }

    Ok(reviews)
}

#[derive(Debug, Deserialize)]
struct ReviewRow {
    #[serde(rename = "Review ID")]
    review_id: String,
    #[serde(rename = "Reviewer")]
    reviewer: String,
    #[serde(rename = "Rating")]
    rating: u8,
    #[serde(rename = "Comment", default, deserialize_with = "empty_string_as_none")]
    comment: Option<String>,
    #[serde(rename = "Created At")]
    created_at: String,
    #[serde(
        rename = "Replied At",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    replied_at: Option<String>,
}

impl ReviewRow {
    fn into_review(self, line: usize) -> Result<NormalizedReview, ReviewImportError> {
        if self.review_id.is_empty() {
            return Err(ReviewImportError::InvalidRow {
                line,
                detail: "review id is empty".to_string(),
            });
        }
        if !(1..=5).contains(&self.rating) {
            return Err(ReviewImportError::InvalidRow {
                line,
                detail: format!("rating {} outside 1..=5", self.rating),
            });
        }

        let created_at =
            parse_timestamp(&self.created_at).ok_or_else(|| ReviewImportError::InvalidRow {
                line,
                detail: format!("unparseable created timestamp {:?}", self.created_at),
            })?;
        let replied_at = match self.replied_at.as_deref() {
            Some(raw) => {
                Some(
                    parse_timestamp(raw).ok_or_else(|| ReviewImportError::InvalidRow {
                        line,
                        detail: format!("unparseable reply timestamp {raw:?}"),
                    })?,
                )
            }
            None => None,
        };

        Ok(NormalizedReview {
            review_id: self.review_id,
            reviewer: self.reviewer,
            rating: self.rating,
            comment: self.comment.unwrap_or_default(),
            created_at,
            replied_at,
        })
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }

    None
}

#[cfg(test)]
pub(crate) fn parse_timestamp_for_tests(value: &str) -> Option<DateTime<Utc>> {
    parse_timestamp(value)
}
