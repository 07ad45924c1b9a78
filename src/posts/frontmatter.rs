//! Frontmatter serialization for stored posts.
//!
//! A document is a YAML header between `---` delimiters followed by the raw
//! body. The header schema mirrors the site's content collection config, so
//! field names like `sourceLink` are part of the on-disk contract. Keys the
//! schema doesn't know about (a generator may add its own) are carried
//! through reads and writes untouched.

use std::collections::BTreeMap;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrontMatter {
    pub title: String,
    #[serde(with = "lenient_date", default = "today")]
    pub published: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    pub first_level_category: String,
    pub second_level_category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub draft: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,
    #[serde(rename = "sourceLink", default, skip_serializing_if = "Option::is_none")]
    pub source_link: Option<String>,
    #[serde(rename = "licenseName", default, skip_serializing_if = "Option::is_none")]
    pub license_name: Option<String>,
    #[serde(rename = "licenseUrl", default, skip_serializing_if = "Option::is_none")]
    pub license_url: Option<String>,
    /// Header keys outside the schema, preserved as-is.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

pub(crate) fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// `published` accepts a `YYYY-MM-DD` scalar; any other value is coerced
/// to today. The deployed corpus contains hand-edited headers, so a
/// listing must survive them.
mod lenient_date {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::{DATE_FORMAT, NaiveDate, today};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.format(DATE_FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let value = serde_yaml::Value::deserialize(deserializer)?;
        Ok(coerce(&value))
    }

    fn coerce(value: &serde_yaml::Value) -> NaiveDate {
        match value {
            serde_yaml::Value::String(s) => {
                NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap_or_else(|_| {
                    tracing::warn!("unparseable published date '{s}', substituting today");
                    today()
                })
            }
            other => {
                tracing::warn!("published is not a date string ({other:?}), substituting today");
                today()
            }
        }
    }
}

/// Serializes a header + body into the stored document format.
pub fn serialize(front: &FrontMatter, body: &str) -> Result<String> {
    let yaml = serde_yaml::to_string(front)?;
    Ok(format!("---\n{yaml}---\n\n{body}"))
}

/// Parses a stored document into its header and body.
pub fn parse(document: &str) -> Result<(FrontMatter, String)> {
    let (yaml, body) = split(document)?;
    let front: FrontMatter = serde_yaml::from_str(yaml)?;
    Ok((front, body.to_string()))
}

/// Parses only the metadata header; the body is never materialized.
pub fn parse_header(document: &str) -> Result<FrontMatter> {
    let (yaml, _body) = split(document)?;
    Ok(serde_yaml::from_str(yaml)?)
}

fn split(document: &str) -> Result<(&str, &str)> {
    let rest = document
        .strip_prefix("---\n")
        .ok_or_else(|| Error::MalformedDocument("missing frontmatter delimiter".into()))?;

    let end = rest
        .find("\n---")
        .ok_or_else(|| Error::MalformedDocument("unterminated frontmatter header".into()))?;

    let yaml = &rest[..end];
    let body = rest[end + 4..].trim_start_matches('\n');

    Ok((yaml, body))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FrontMatter {
        FrontMatter {
            title: "Hello World".to_string(),
            published: NaiveDate::from_ymd_opt(2024, 11, 1).unwrap(),
            description: Some("A first post".to_string()),
            tags: Some(vec!["rust".to_string(), "blog".to_string()]),
            first_level_category: "Tech".to_string(),
            second_level_category: "Rust".to_string(),
            author: Some("admin".to_string()),
            draft: Some(false),
            cover: None,
            source_link: None,
            license_name: Some("CC BY-SA 4.0".to_string()),
            license_url: Some("https://creativecommons.org/licenses/by-sa/4.0/".to_string()),
            extra: BTreeMap::new(),
        }
    }

    fn minimal() -> FrontMatter {
        FrontMatter {
            title: "Bare".to_string(),
            published: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            description: None,
            tags: None,
            first_level_category: "Notes".to_string(),
            second_level_category: "Misc".to_string(),
            author: None,
            draft: None,
            cover: None,
            source_link: None,
            license_name: None,
            license_url: None,
            extra: BTreeMap::new(),
        }
    }

    #[test]
    fn test_round_trip_full_header() {
        let front = sample();
        let body = "Body text\n\nwith paragraphs.";
        let document = serialize(&front, body).unwrap();
        let (parsed, parsed_body) = parse(&document).unwrap();

        assert_eq!(parsed, front);
        assert_eq!(parsed_body, body);
    }

    #[test]
    fn test_round_trip_minimal_header() {
        let front = minimal();
        let document = serialize(&front, "x").unwrap();
        let (parsed, parsed_body) = parse(&document).unwrap();

        assert_eq!(parsed, front);
        assert_eq!(parsed_body, "x");
    }

    #[test]
    fn test_absent_optionals_not_serialized() {
        let document = serialize(&minimal(), "x").unwrap();
        assert!(!document.contains("description"));
        assert!(!document.contains("tags"));
        assert!(!document.contains("sourceLink"));
    }

    #[test]
    fn test_camel_case_field_names_on_disk() {
        let document = serialize(&sample(), "x").unwrap();
        assert!(document.contains("licenseName: CC BY-SA 4.0"));
        assert!(!document.contains("license_name"));
    }

    #[test]
    fn test_empty_tags_round_trip() {
        let mut front = minimal();
        front.tags = Some(Vec::new());
        let document = serialize(&front, "x").unwrap();
        let (parsed, _) = parse(&document).unwrap();
        assert_eq!(parsed.tags, Some(Vec::new()));
    }

    #[test]
    fn test_body_never_leaks_into_header() {
        let body = "definitely: not yaml\ntags: [oops]";
        let document = serialize(&minimal(), body).unwrap();
        let parsed = parse_header(&document).unwrap();
        assert_eq!(parsed.tags, None);

        let (_, parsed_body) = parse(&document).unwrap();
        assert_eq!(parsed_body, body);
    }

    #[test]
    fn test_unparseable_published_becomes_today() {
        let document = "---\ntitle: T\npublished: soonish\nfirst_level_category: A\nsecond_level_category: B\n---\n\nbody";
        let front = parse_header(document).unwrap();
        assert_eq!(front.published, today());
    }

    #[test]
    fn test_non_string_published_becomes_today() {
        let document = "---\ntitle: T\npublished: [2024]\nfirst_level_category: A\nsecond_level_category: B\n---\n\nbody";
        let front = parse_header(document).unwrap();
        assert_eq!(front.published, today());
    }

    #[test]
    fn test_missing_published_becomes_today() {
        let document =
            "---\ntitle: T\nfirst_level_category: A\nsecond_level_category: B\n---\n\nbody";
        let front = parse_header(document).unwrap();
        assert_eq!(front.published, today());
    }

    #[test]
    fn test_unknown_keys_survive_round_trip() {
        let document = "---\ntitle: T\npublished: 2024-06-01\nfirst_level_category: A\nsecond_level_category: B\nreadingMetadata:\n  wordCount: 1200\n---\n\nbody";
        let (front, body) = parse(document).unwrap();
        assert!(front.extra.contains_key("readingMetadata"));

        let rewritten = serialize(&front, &body).unwrap();
        let (again, _) = parse(&rewritten).unwrap();
        assert_eq!(again.extra, front.extra);
    }

    #[test]
    fn test_document_without_header_is_rejected() {
        assert!(parse("just some markdown").is_err());
        assert!(parse("---\ntitle: T\nno closing delimiter").is_err());
    }
}
