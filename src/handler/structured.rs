//! Handlers built from serialized redirect records.
//!
//! # Responsibilities
//! - Decode a YAML sequence or JSON array of `{path, url}` records
//! - Fold records into a `PathMap` (later records overwrite earlier ones)
//! - Wrap the result in a `MapHandler` with the caller's fallback
//!
//! Accepted input:
//! ```yaml
//! - path: /some-path
//!   url: https://www.some-url.com/demo
//! ```
//! ```json
//! [{"path": "/some-path", "url": "https://www.some-url.com/demo"}]
//! ```

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{Handler, MapHandler, PathMap};

/// One `{path, url}` entry. Missing fields decode as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RedirectRecord {
    pub path: String,
    pub url: String,
}

/// Serialization format of a redirect source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataFormat {
    #[default]
    Yaml,
    Json,
}

impl DataFormat {
    /// Pick a format from a file extension. Anything but `.json` is YAML.
    pub fn from_path(path: &std::path::Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => DataFormat::Json,
            _ => DataFormat::Yaml,
        }
    }
}

impl fmt::Display for DataFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataFormat::Yaml => write!(f, "yaml"),
            DataFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for DataFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Ok(DataFormat::Yaml),
            "json" => Ok(DataFormat::Json),
            other => Err(format!("unknown mapping format '{}', expected yaml or json", other)),
        }
    }
}

/// Redirect data could not be decoded into a list of records.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid YAML redirect data: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid JSON redirect data: {0}")]
    Json(#[from] serde_json::Error),
}

/// Decode redirect records in the given format.
///
/// A blank YAML document or an explicit `null` decodes as an empty list.
pub fn parse_records(format: DataFormat, data: &[u8]) -> Result<Vec<RedirectRecord>, ParseError> {
    let parsed = match format {
        DataFormat::Yaml => parse_yaml(data),
        DataFormat::Json => serde_json::from_slice::<Option<Vec<RedirectRecord>>>(data)
            .map(Option::unwrap_or_default)
            .map_err(ParseError::from),
    };

    if let Err(e) = &parsed {
        tracing::error!(
            format = %format,
            error = %e,
            data = %String::from_utf8_lossy(data),
            "Failed to parse redirect data"
        );
    }

    parsed
}

fn parse_yaml(data: &[u8]) -> Result<Vec<RedirectRecord>, ParseError> {
    if data.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }
    let records: Option<Vec<RedirectRecord>> = serde_yaml::from_slice(data)?;
    Ok(records.unwrap_or_default())
}

/// Fold records into a path table. Duplicate paths keep the last URL seen.
pub fn build_path_map(records: impl IntoIterator<Item = RedirectRecord>) -> PathMap {
    let mut paths = PathMap::new();
    for record in records {
        paths.insert(record.path, record.url);
    }
    paths
}

/// Build a `MapHandler` from serialized records.
pub fn structured_handler(
    format: DataFormat,
    data: &[u8],
    fallback: Arc<dyn Handler>,
) -> Result<MapHandler, ParseError> {
    let records = parse_records(format, data)?;
    let record_count = records.len();
    let paths = build_path_map(records);

    tracing::debug!(
        format = %format,
        records = record_count,
        paths = paths.len(),
        "Redirect table built"
    );

    Ok(MapHandler::new(paths, fallback))
}

/// Build a `MapHandler` from a YAML sequence of records.
pub fn yaml_handler(data: &[u8], fallback: Arc<dyn Handler>) -> Result<MapHandler, ParseError> {
    structured_handler(DataFormat::Yaml, data, fallback)
}

/// Build a `MapHandler` from a JSON array of records.
pub fn json_handler(data: &[u8], fallback: Arc<dyn Handler>) -> Result<MapHandler, ParseError> {
    structured_handler(DataFormat::Json, data, fallback)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::{DefaultHandler, Resolution};
    use std::path::Path;

    fn default() -> Arc<dyn Handler> {
        Arc::new(DefaultHandler::default())
    }

    #[test]
    fn test_parse_yaml_records() {
        let yaml = b"- path: /urlshort\n  url: https://github.com/gophercises/urlshort\n- path: /urlshort-final\n  url: https://github.com/gophercises/urlshort/tree/solution\n";
        let records = parse_records(DataFormat::Yaml, yaml).unwrap();
        assert_eq!(
            records,
            vec![
                RedirectRecord {
                    path: "/urlshort".into(),
                    url: "https://github.com/gophercises/urlshort".into(),
                },
                RedirectRecord {
                    path: "/urlshort-final".into(),
                    url: "https://github.com/gophercises/urlshort/tree/solution".into(),
                },
            ]
        );
    }

    #[test]
    fn test_duplicate_paths_last_wins() {
        let json = br#"[{"path":"/a","url":"https://x"},{"path":"/a","url":"https://y"}]"#;
        let handler = json_handler(json, default()).unwrap();
        assert_eq!(handler.len(), 1);
        assert_eq!(handler.resolve("/a"), Resolution::Redirect("https://y"));
    }

    #[test]
    fn test_malformed_yaml_is_rejected() {
        let err = yaml_handler(b"not: [valid, - yaml", default()).unwrap_err();
        assert!(matches!(err, ParseError::Yaml(_)));
    }

    #[test]
    fn test_wrong_shape_is_rejected() {
        // Well-formed, but a mapping instead of a sequence
        let err = parse_records(DataFormat::Yaml, b"path: /a\nurl: https://x\n").unwrap_err();
        assert!(matches!(err, ParseError::Yaml(_)));

        let err = parse_records(DataFormat::Json, br#"{"path":"/a","url":"https://x"}"#).unwrap_err();
        assert!(matches!(err, ParseError::Json(_)));
    }

    #[test]
    fn test_scalar_values_in_yaml_read_as_strings() {
        let records = parse_records(DataFormat::Yaml, b"- path: /a\n  url: 5\n").unwrap();
        assert_eq!(
            records,
            vec![RedirectRecord {
                path: "/a".into(),
                url: "5".into(),
            }]
        );

        // JSON keeps its types
        let err = parse_records(DataFormat::Json, br#"[{"path":"/a","url":5}]"#).unwrap_err();
        assert!(matches!(err, ParseError::Json(_)));
    }

    #[test]
    fn test_malformed_json_is_rejected() {
        let err = json_handler(br#"[{"path":"/a","#, default()).unwrap_err();
        assert!(matches!(err, ParseError::Json(_)));
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let yaml = b"- path: /no-url\n- url: https://no-path.example\n- path: /extra\n  url: https://x\n  note: ignored\n";
        let paths = build_path_map(parse_records(DataFormat::Yaml, yaml).unwrap());

        assert_eq!(paths.get("/no-url").map(String::as_str), Some(""));
        assert_eq!(paths.get("").map(String::as_str), Some("https://no-path.example"));
        assert_eq!(paths.get("/extra").map(String::as_str), Some("https://x"));
    }

    #[test]
    fn test_empty_documents() {
        assert!(parse_records(DataFormat::Yaml, b"").unwrap().is_empty());
        assert!(parse_records(DataFormat::Yaml, b"  \n").unwrap().is_empty());
        assert!(parse_records(DataFormat::Yaml, b"[]").unwrap().is_empty());
        assert!(parse_records(DataFormat::Json, b"[]").unwrap().is_empty());
        assert!(parse_records(DataFormat::Json, b"null").unwrap().is_empty());
        assert!(parse_records(DataFormat::Json, b"").is_err());
    }

    #[test]
    fn test_yaml_accepts_json_flow_syntax() {
        let records =
            parse_records(DataFormat::Yaml, br#"[{"path": "/a", "url": "https://x"}]"#).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].url, "https://x");
    }

    #[test]
    fn test_format_selection() {
        assert_eq!(DataFormat::from_path(Path::new("url.yml")), DataFormat::Yaml);
        assert_eq!(DataFormat::from_path(Path::new("urls.JSON")), DataFormat::Json);
        assert_eq!(DataFormat::from_path(Path::new("urls")), DataFormat::Yaml);
        assert_eq!("json".parse::<DataFormat>(), Ok(DataFormat::Json));
        assert_eq!("YML".parse::<DataFormat>(), Ok(DataFormat::Yaml));
        assert!("toml".parse::<DataFormat>().is_err());
    }
}
