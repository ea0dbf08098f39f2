//! Error types for the geodata parser.
//!
//! Only three conditions stop a parse: malformed markup, an unacceptable
//! document root and tags left open at the end of input. Everything else
//! (unknown tags, tags in the wrong context, unparseable values) is absorbed
//! by the dispatch loop or the individual handler.

use thiserror::Error;

/// Main error type for the geoparser library.
#[derive(Debug, Error)]
pub enum GeoParseError {
    /// The token source reported malformed markup.
    #[error("Error parsing file at line {line} and column {column}: {message}")]
    Syntax {
        message: String,
        line: u64,
        column: u64,
    },

    /// The outermost element is not an accepted root for the active format.
    #[error("File format unrecognized: <{name}> in namespace '{namespace}' is not a valid {format} document root (line {line})")]
    InvalidRoot {
        format: &'static str,
        name: String,
        namespace: String,
        line: u64,
    },

    /// Input ended while elements were still open.
    #[error("Parsing failed. Still {count} unclosed tag(s) after document end, innermost <{innermost}> (line {line})")]
    UnclosedTags {
        count: usize,
        innermost: String,
        line: u64,
    },

    /// The data format could not be determined or is not supported.
    #[error("Unsupported data format: '{0}'. Expected one of kml, gpx, dgml")]
    UnknownFormat(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization error.
    #[error("YAML serialization failed: {0}")]
    YamlSerialization(#[from] serde_yaml_ng::Error),

    /// JSON serialization error.
    #[error("JSON serialization failed: {0}")]
    JsonSerialization(#[from] serde_json::Error),
}

impl GeoParseError {
    /// Line number the error originated from, for parse failures.
    #[must_use]
    pub fn line(&self) -> Option<u64> {
        match self {
            Self::Syntax { line, .. }
            | Self::InvalidRoot { line, .. }
            | Self::UnclosedTags { line, .. } => Some(*line),
            _ => None,
        }
    }

    /// Whether this error stopped a parse (as opposed to IO or output errors).
    #[must_use]
    pub fn is_parse_failure(&self) -> bool {
        matches!(
            self,
            Self::Syntax { .. } | Self::InvalidRoot { .. } | Self::UnclosedTags { .. }
        )
    }
}

/// Result type alias for geoparser operations.
pub type Result<T> = std::result::Result<T, GeoParseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unclosed_tags_display() {
        let err = GeoParseError::UnclosedTags {
            count: 2,
            innermost: "Placemark".to_string(),
            line: 7,
        };
        assert_eq!(
            err.to_string(),
            "Parsing failed. Still 2 unclosed tag(s) after document end, innermost <Placemark> (line 7)"
        );
        assert_eq!(err.line(), Some(7));
    }

    #[test]
    fn test_invalid_root_display() {
        let err = GeoParseError::InvalidRoot {
            format: "KML",
            name: "html".to_string(),
            namespace: String::new(),
            line: 1,
        };
        assert!(err.to_string().contains("<html>"));
        assert!(err.to_string().contains("KML"));
        assert!(err.is_parse_failure());
    }

    #[test]
    fn test_io_error_has_no_line() {
        let err = GeoParseError::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert_eq!(err.line(), None);
        assert!(!err.is_parse_failure());
    }
}
