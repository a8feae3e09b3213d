//! `.config` file parsing.
//!
//! The toolchain settings live in a dotenv-style file in the project
//! directory. This module parses that format into a map of variables.

use crate::error::{BobError, Result};
use std::collections::HashMap;
use std::path::Path;

/// Parses dotenv-style files into a map of variables.
///
/// # Supported Formats
///
/// - Simple: `KEY=value`
/// - Exported: `export KEY=value`
/// - Quoted: `KEY="value with spaces"` or `KEY='single quoted'`
/// - Empty: `KEY=`
/// - Comments: `# This is a comment`
/// - Whitespace around equals: `KEY = value`
/// - Values with equals signs: `URL=https://example.com?foo=bar`
///
/// # Example
///
/// ```
/// use bob::config::EnvFileParser;
///
/// let content = r#"
/// # Toolchain
/// REQUIRED_NODE_VERSION=18.17.0
/// REQUIRED_RUBY_VERSION="3.2.2"
/// "#;
///
/// let vars = EnvFileParser::parse(content);
/// assert_eq!(vars.get("REQUIRED_NODE_VERSION"), Some(&"18.17.0".to_string()));
/// assert_eq!(vars.get("REQUIRED_RUBY_VERSION"), Some(&"3.2.2".to_string()));
/// ```
pub struct EnvFileParser;

impl EnvFileParser {
    /// Parse file content into a map of variables.
    ///
    /// Lines without an `=` are ignored.
    pub fn parse(content: &str) -> HashMap<String, String> {
        let mut vars = HashMap::new();

        for line in content.lines() {
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some((key, value)) = Self::parse_line(line) {
                vars.insert(key, value);
            }
        }

        vars
    }

    fn parse_line(line: &str) -> Option<(String, String)> {
        let line = line.strip_prefix("export ").unwrap_or(line);
        let (key, value) = line.split_once('=')?;
        let key = key.trim();
        if key.is_empty() {
            return None;
        }

        Some((key.to_string(), Self::unquote(value.trim())))
    }

    /// Remove surrounding quotes from a value.
    fn unquote(value: &str) -> String {
        let quoted = value.len() >= 2
            && ((value.starts_with('"') && value.ends_with('"'))
                || (value.starts_with('\'') && value.ends_with('\'')));
        if quoted {
            value[1..value.len() - 1].to_string()
        } else {
            value.to_string()
        }
    }

    /// Load and parse a file.
    ///
    /// # Errors
    ///
    /// Returns [`BobError::ConfigNotFound`] if the file doesn't exist and
    /// [`BobError::ConfigParseError`] if it can't be read as text.
    pub fn load(path: &Path) -> Result<HashMap<String, String>> {
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => BobError::ConfigNotFound {
                path: path.to_path_buf(),
            },
            _ => BobError::ConfigParseError {
                path: path.to_path_buf(),
                message: e.to_string(),
            },
        })?;
        Ok(Self::parse(&content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn parses_simple_file() {
        let content = r#"
REQUIRED_NODE_VERSION=18.17.0
REQUIRED_JDK_VERSION=17
"#;

        let vars = EnvFileParser::parse(content);

        assert_eq!(
            vars.get("REQUIRED_NODE_VERSION"),
            Some(&"18.17.0".to_string())
        );
        assert_eq!(vars.get("REQUIRED_JDK_VERSION"), Some(&"17".to_string()));
    }

    #[test]
    fn skips_comments_and_blank_lines() {
        let content = r#"
# Node

REQUIRED_NODE_VERSION=20

# Ruby
"#;

        let vars = EnvFileParser::parse(content);

        assert_eq!(vars.len(), 1);
    }

    #[test]
    fn handles_quoted_values() {
        let content = r#"
DOUBLE="3.2.2"
SINGLE='17'
UNQUOTED=no quotes
"#;

        let vars = EnvFileParser::parse(content);

        assert_eq!(vars.get("DOUBLE"), Some(&"3.2.2".to_string()));
        assert_eq!(vars.get("SINGLE"), Some(&"17".to_string()));
        assert_eq!(vars.get("UNQUOTED"), Some(&"no quotes".to_string()));
    }

    #[test]
    fn lone_quote_is_kept() {
        let vars = EnvFileParser::parse("KEY=\"");
        assert_eq!(vars.get("KEY"), Some(&"\"".to_string()));
    }

    #[test]
    fn handles_export_prefix() {
        let vars = EnvFileParser::parse("export REQUIRED_RUBY_VERSION=3.1.4");
        assert_eq!(
            vars.get("REQUIRED_RUBY_VERSION"),
            Some(&"3.1.4".to_string())
        );
    }

    #[test]
    fn handles_values_with_equals() {
        let vars = EnvFileParser::parse("URL=https://example.com?foo=bar");
        assert_eq!(
            vars.get("URL"),
            Some(&"https://example.com?foo=bar".to_string())
        );
    }

    #[test]
    fn ignores_lines_without_equals_or_key() {
        let content = r#"
KEY1=value1
not a pair
=orphan
KEY2=value2
"#;

        let vars = EnvFileParser::parse(content);

        assert_eq!(vars.len(), 2);
    }

    #[test]
    fn load_missing_file_is_config_not_found() {
        let temp = TempDir::new().unwrap();
        let err = EnvFileParser::load(&temp.path().join(".config")).unwrap_err();
        assert!(matches!(err, BobError::ConfigNotFound { .. }));
    }

    #[test]
    fn load_unreadable_file_is_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(".config");
        std::fs::create_dir(&path).unwrap();

        let err = EnvFileParser::load(&path).unwrap_err();

        assert!(matches!(err, BobError::ConfigParseError { .. }));
        assert!(err.to_string().contains(".config"));
    }

    #[test]
    fn load_reads_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(".config");
        std::fs::write(&path, "REQUIRED_JDK_VERSION=17\n").unwrap();

        let vars = EnvFileParser::load(&path).unwrap();
        assert_eq!(vars.get("REQUIRED_JDK_VERSION"), Some(&"17".to_string()));
    }
}
