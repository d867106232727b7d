//! Front-matter parsing

use anyhow::{anyhow, Result};
use chrono::{DateTime, Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Front-matter data from a post file.
///
/// `title` and `published` are required; a file without them is a content
/// defect and fails to parse. Everything else passes through in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrontMatter {
    pub title: String,
    pub published: String,

    /// Additional custom fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    pub fn parse(content: &str) -> Result<(Self, &str)> {
        let content = content.trim_start();

        let Some(rest) = content.strip_prefix("---") else {
            return Err(anyhow!("missing front-matter block"));
        };
        let rest = rest.trim_start_matches(['\n', '\r']);

        let Some(end_pos) = rest.find("\n---") else {
            return Err(anyhow!("unterminated front-matter block"));
        };

        let yaml_content = &rest[..end_pos];
        let remaining = &rest[end_pos + 4..];
        let remaining = remaining.trim_start_matches(['\n', '\r']);

        let fm: FrontMatter = serde_yaml::from_str(yaml_content)
            .map_err(|e| anyhow!("invalid front-matter: {}", e))?;

        Ok((fm, remaining))
    }

    /// Parse the published string into a DateTime
    pub fn published_date(&self) -> Option<DateTime<Local>> {
        parse_date_string(&self.published)
    }
}

/// Parse a date string in various formats
fn parse_date_string(s: &str) -> Option<DateTime<Local>> {
    let s = s.trim();

    let formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%d",
        "%Y/%m/%d",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];

    for fmt in formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(DateTime::from_naive_utc_and_offset(
                dt,
                *Local::now().offset(),
            ));
        }
        if let Ok(d) = chrono::NaiveDate::parse_from_str(s, fmt) {
            let dt = d.and_hms_opt(0, 0, 0)?;
            return Some(DateTime::from_naive_utc_and_offset(
                dt,
                *Local::now().offset(),
            ));
        }
    }

    // Try RFC 3339 / ISO 8601
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Local));
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_frontmatter() {
        let content = r#"---
title: "Hello World"
published: "2024-01-01"
---

# Hi
"#;

        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title, "Hello World");
        assert_eq!(fm.published, "2024-01-01");
        assert!(remaining.contains("# Hi"));
    }

    #[test]
    fn test_extra_fields_pass_through() {
        let content = r#"---
title: Tagged Post
published: 2024-03-10
cover: /images/cover.png
---
Body.
"#;

        let (fm, _) = FrontMatter::parse(content).unwrap();
        assert_eq!(
            fm.extra.get("cover"),
            Some(&serde_yaml::Value::String("/images/cover.png".into()))
        );
    }

    #[test]
    fn test_missing_block_is_error() {
        let content = "# Just markdown\n\nNo front-matter here.\n";
        assert!(FrontMatter::parse(content).is_err());
    }

    #[test]
    fn test_unterminated_block_is_error() {
        let content = "---\ntitle: Oops\npublished: 2024-01-01\n";
        assert!(FrontMatter::parse(content).is_err());
    }

    #[test]
    fn test_missing_required_field_is_error() {
        let content = "---\ntitle: No Date\n---\nBody.\n";
        assert!(FrontMatter::parse(content).is_err());
    }

    #[test]
    fn test_published_date() {
        let fm = FrontMatter {
            title: "t".to_string(),
            published: "2024-01-15 10:30:00".to_string(),
            extra: HashMap::new(),
        };

        let dt = fm.published_date().unwrap();
        assert_eq!(dt.format("%Y-%m-%d").to_string(), "2024-01-15");
    }

    #[test]
    fn test_published_date_only() {
        let fm = FrontMatter {
            title: "t".to_string(),
            published: "2024-01-01".to_string(),
            extra: HashMap::new(),
        };

        let dt = fm.published_date().unwrap();
        assert_eq!(dt.format("%Y-%m-%d %H:%M").to_string(), "2024-01-01 00:00");
    }

    #[test]
    fn test_unparsable_date() {
        let fm = FrontMatter {
            title: "t".to_string(),
            published: "next tuesday".to_string(),
            extra: HashMap::new(),
        };

        assert!(fm.published_date().is_none());
    }
}
