//! Optional project configuration (`gqldocs.toml`).
//!
//! Everything the CLI accepts as a flag can also live in a checked-in config
//! file, which is the natural home for things you don't want to retype —
//! the endpoint URL and its auth headers in particular:
//!
//! ```toml
//! [endpoint]
//! url = "https://api.example.com/graphql"
//!
//! [endpoint.headers]
//! Authorization = "Bearer ${TOKEN}"
//!
//! [output]
//! dir = "./docs"
//!
//! [templates]
//! dir = "./templates"
//! partials_dir = "./partials"
//! type_template = "Type.html"
//! ```
//!
//! Precedence is flag > file > built-in default; merging happens in the CLI
//! layer, this module only loads and parses.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::core::GqldocsError;

/// Default config file name, looked up in the current directory.
pub const DEFAULT_CONFIG_FILE: &str = "gqldocs.toml";

/// Parsed `gqldocs.toml`. All fields optional; an absent file parses as
/// all-defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub endpoint: EndpointConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub templates: TemplatesConfig,
}

/// `[endpoint]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EndpointConfig {
    /// GraphQL endpoint URL.
    pub url: Option<String>,
    /// Extra headers sent with the introspection request.
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}

/// `[output]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    /// Output directory for generated pages.
    pub dir: Option<PathBuf>,
}

/// `[templates]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TemplatesConfig {
    /// Directory of page templates.
    pub dir: Option<PathBuf>,
    /// Directory of partials.
    pub partials_dir: Option<PathBuf>,
    /// File name of the per-type template.
    pub type_template: Option<String>,
}

impl Config {
    /// Load configuration.
    ///
    /// With an explicit `path` the file must exist and parse. Without one,
    /// `gqldocs.toml` in the current directory is used when present,
    /// otherwise defaults are returned.
    ///
    /// # Errors
    ///
    /// [`GqldocsError::IoError`] when an explicit path cannot be read,
    /// [`GqldocsError::ConfigParseError`] when the file is invalid TOML or
    /// has the wrong shape.
    pub fn load(path: Option<&Path>) -> Result<Self, GqldocsError> {
        let (path, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };

        if !path.exists() {
            if required {
                return Err(GqldocsError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("config file not found: {}", path.display()),
                )));
            }
            debug!("no {} found, using defaults", path.display());
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(&path)?;
        let config = toml::from_str(&raw).map_err(|e| GqldocsError::ConfigParseError {
            file: path.display().to_string(),
            reason: e.to_string(),
        })?;
        debug!("loaded config from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_full_config_parses() {
        let toml = r#"
            [endpoint]
            url = "https://api.example.com/graphql"

            [endpoint.headers]
            Authorization = "Bearer abc"

            [output]
            dir = "./site"

            [templates]
            dir = "./tpl"
            partials_dir = "./tpl/partials"
            type_template = "TypePage.html"
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(
            config.endpoint.url.as_deref(),
            Some("https://api.example.com/graphql")
        );
        assert_eq!(
            config.endpoint.headers.get("Authorization").map(String::as_str),
            Some("Bearer abc")
        );
        assert_eq!(config.output.dir, Some(PathBuf::from("./site")));
        assert_eq!(
            config.templates.type_template.as_deref(),
            Some("TypePage.html")
        );
    }

    #[test]
    fn test_empty_config_is_all_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.endpoint.url.is_none());
        assert!(config.endpoint.headers.is_empty());
        assert!(config.templates.dir.is_none());
    }

    #[test]
    fn test_explicit_missing_path_is_error() {
        let err = Config::load(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(matches!(err, GqldocsError::IoError(_)));
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"[endpoint\nurl = ").unwrap();

        let err = Config::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, GqldocsError::ConfigParseError { .. }));
    }
}
