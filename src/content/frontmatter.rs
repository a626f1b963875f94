//! Front-matter parsing

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::BuildError;

/// Front-matter data from a post document
///
/// All fields are optional at the parsing layer; the loader decides which
/// ones a post is required to carry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub date: Option<String>,
    pub slug: Option<String>,

    /// Additional custom fields, in document order
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_yaml::Value>,
}

impl FrontMatter {
    /// Parse front-matter from a document string.
    /// Returns (front_matter, body).
    pub fn parse(content: &str) -> Result<(Self, &str), BuildError> {
        let content = content.trim_start();

        // YAML front-matter (---)
        if content.starts_with("---") {
            return Self::parse_yaml(content);
        }

        // JSON front-matter (;;;)
        if content.starts_with(";;;") {
            return Self::parse_json(content);
        }

        // No front-matter found
        Ok((FrontMatter::default(), content))
    }

    fn parse_yaml(content: &str) -> Result<(Self, &str), BuildError> {
        let rest = &content[3..]; // Skip opening ---
        let rest = rest.trim_start_matches(['\n', '\r']);

        let Some(end_pos) = rest.find("\n---") else {
            // No closing ---, treat as no front-matter
            return Ok((FrontMatter::default(), content));
        };

        let yaml_content = &rest[..end_pos];
        let remaining = &rest[end_pos + 4..]; // Skip \n---
        let remaining = remaining.trim_start_matches(['\n', '\r']);

        if yaml_content.trim().is_empty() {
            return Ok((FrontMatter::default(), remaining));
        }

        let fm: FrontMatter = serde_yaml::from_str(yaml_content)?;
        Ok((fm, remaining))
    }

    fn parse_json(content: &str) -> Result<(Self, &str), BuildError> {
        let rest = &content[3..]; // Skip opening ;;;

        let Some(end_pos) = rest.find(";;;") else {
            return Ok((FrontMatter::default(), content));
        };

        let json_content = &rest[..end_pos];
        let remaining = &rest[end_pos + 3..];
        let remaining = remaining.trim_start_matches(['\n', '\r']);

        let fm: FrontMatter = serde_json::from_str(json_content)?;
        Ok((fm, remaining))
    }

    /// Parse the date string into a NaiveDateTime
    pub fn parse_date(&self) -> Option<NaiveDateTime> {
        self.date.as_deref().and_then(parse_date_string)
    }
}

/// Parse a date string in the common front-matter formats
fn parse_date_string(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();

    let formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d",
        "%Y/%m/%d",
    ];

    for fmt in formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
        // Date-only formats parse to midnight
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }

    // RFC 3339 / ISO 8601
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }

    None
}
