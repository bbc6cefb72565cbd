//! Error handling for gqldocs.
//!
//! Two layers, following the same split used everywhere else in the tool:
//! 1. **Strongly-typed errors** ([`GqldocsError`]) for precise handling in
//!    code, with automatic conversions from the underlying library errors.
//! 2. **User-friendly reporting** ([`ErrorContext`] via
//!    [`user_friendly_error`]) that the CLI prints with colors, details, and
//!    an actionable suggestion.
//!
//! The lexical core has its own small error type
//! ([`DirectiveError`](crate::directives::DirectiveError)); it surfaces here
//! wrapped in [`GqldocsError::DirectiveSyntax`] together with the schema
//! element whose description failed to parse.
//!
//! # Examples
//!
//! ```rust,no_run
//! use gqldocs::core::{GqldocsError, user_friendly_error};
//!
//! fn fetch() -> anyhow::Result<()> {
//!     Err(GqldocsError::EndpointNotConfigured.into())
//! }
//!
//! if let Err(e) = fetch() {
//!     user_friendly_error(e).display();
//! }
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

use crate::directives::DirectiveError;

/// The main error type for gqldocs operations.
#[derive(Error, Debug)]
pub enum GqldocsError {
    /// No introspection endpoint given on the CLI or in `gqldocs.toml`.
    #[error("no GraphQL endpoint configured")]
    EndpointNotConfigured,

    /// The introspection request never produced a response.
    #[error("introspection request to {url} failed: {reason}")]
    IntrospectionRequestFailed {
        /// Endpoint URL.
        url: String,
        /// Transport-level failure description.
        reason: String,
    },

    /// The endpoint answered with a non-success HTTP status.
    #[error("introspection request to {url} returned HTTP {status}")]
    IntrospectionHttpStatus {
        /// Endpoint URL.
        url: String,
        /// Status line from the response.
        status: String,
    },

    /// The endpoint answered 200 but the GraphQL response carried errors.
    #[error("GraphQL endpoint {url} rejected the introspection query: {messages}")]
    IntrospectionErrors {
        /// Endpoint URL.
        url: String,
        /// Concatenated error messages from the response.
        messages: String,
    },

    /// An introspection payload (from the wire or a saved file) did not
    /// deserialize into the schema model.
    #[error("invalid introspection payload from {origin}: {reason}")]
    SchemaPayloadInvalid {
        /// Where the payload came from (URL or file path).
        origin: String,
        /// Deserialization failure description.
        reason: String,
    },

    /// A description's embedded directive annotations could not be split.
    #[error("invalid directive annotation in description of {element}")]
    DirectiveSyntax {
        /// The schema element whose description failed (e.g. `User.email`).
        element: String,
        /// The underlying lexical failure.
        #[source]
        source: DirectiveError,
    },

    /// A required template or partials directory does not exist.
    #[error("template directory not found: {path}")]
    TemplateDirNotFound {
        /// The missing directory.
        path: String,
    },

    /// Tera failed to compile or render a template.
    #[error("failed to render template '{template}': {reason}")]
    TemplateRenderFailed {
        /// Template name as registered with the renderer.
        template: String,
        /// Rendering failure description, including Tera's cause chain.
        reason: String,
    },

    /// `gqldocs.toml` exists but is not valid.
    #[error("invalid configuration in {file}: {reason}")]
    ConfigParseError {
        /// Path of the config file.
        file: String,
        /// Parse failure description.
        reason: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("template engine error: {0}")]
    TemplateError(#[from] tera::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("{message}")]
    Other {
        /// Free-form message.
        message: String,
    },
}

// Wrapped library errors are not Clone; cloning flattens them to `Other`,
// which is all the reporting path needs.
impl Clone for GqldocsError {
    fn clone(&self) -> Self {
        match self {
            Self::EndpointNotConfigured => Self::EndpointNotConfigured,
            Self::IntrospectionRequestFailed { url, reason } => Self::IntrospectionRequestFailed {
                url: url.clone(),
                reason: reason.clone(),
            },
            Self::IntrospectionHttpStatus { url, status } => Self::IntrospectionHttpStatus {
                url: url.clone(),
                status: status.clone(),
            },
            Self::IntrospectionErrors { url, messages } => Self::IntrospectionErrors {
                url: url.clone(),
                messages: messages.clone(),
            },
            Self::SchemaPayloadInvalid { origin, reason } => Self::SchemaPayloadInvalid {
                origin: origin.clone(),
                reason: reason.clone(),
            },
            Self::DirectiveSyntax { element, source } => Self::DirectiveSyntax {
                element: element.clone(),
                source: source.clone(),
            },
            Self::TemplateDirNotFound { path } => Self::TemplateDirNotFound { path: path.clone() },
            Self::TemplateRenderFailed { template, reason } => Self::TemplateRenderFailed {
                template: template.clone(),
                reason: reason.clone(),
            },
            Self::ConfigParseError { file, reason } => Self::ConfigParseError {
                file: file.clone(),
                reason: reason.clone(),
            },
            Self::IoError(e) => Self::Other {
                message: format!("IO error: {e}"),
            },
            Self::TomlError(e) => Self::Other {
                message: format!("TOML parsing error: {e}"),
            },
            Self::HttpError(e) => Self::Other {
                message: format!("HTTP error: {e}"),
            },
            Self::TemplateError(e) => Self::Other {
                message: format!("template engine error: {e}"),
            },
            Self::JsonError(e) => Self::Other {
                message: format!("JSON error: {e}"),
            },
            Self::Other { message } => Self::Other {
                message: message.clone(),
            },
        }
    }
}

/// A [`GqldocsError`] wrapped with user-facing details and a suggestion.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error.
    pub error: GqldocsError,
    /// An actionable next step for the user.
    pub suggestion: Option<String>,
    /// Background on why this happened.
    pub details: Option<String>,
}

impl ErrorContext {
    /// Wrap an error with no suggestion or details.
    #[must_use]
    pub const fn new(error: GqldocsError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Attach an actionable suggestion.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Attach background details.
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error to stderr with colors.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error into an [`ErrorContext`] suitable for CLI display.
///
/// Typed [`GqldocsError`]s get tailored suggestions; recognizable library
/// errors (IO, TOML, Tera) get generic but still useful guidance; everything
/// else falls back to the anyhow cause chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(typed) = error.downcast_ref::<GqldocsError>() {
        return create_error_context(typed.clone());
    }

    if let Some(directive_error) = error.downcast_ref::<DirectiveError>() {
        return create_error_context(GqldocsError::DirectiveSyntax {
            element: "unknown element".to_string(),
            source: directive_error.clone(),
        });
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        match io_error.kind() {
            std::io::ErrorKind::PermissionDenied => {
                return ErrorContext::new(GqldocsError::Other {
                    message: format!("permission denied: {io_error}"),
                })
                .with_suggestion(
                    "Check file ownership, or run with permissions that can write the output directory",
                );
            }
            std::io::ErrorKind::NotFound => {
                return ErrorContext::new(GqldocsError::Other {
                    message: format!("file not found: {io_error}"),
                })
                .with_suggestion("Check that the path exists and is spelled correctly");
            }
            _ => {}
        }
    }

    if let Some(toml_error) = error.downcast_ref::<toml::de::Error>() {
        return ErrorContext::new(GqldocsError::ConfigParseError {
            file: "gqldocs.toml".to_string(),
            reason: toml_error.to_string(),
        })
        .with_suggestion("Check the TOML syntax: quotes, brackets, and table headers");
    }

    let message_lower = error.to_string().to_lowercase();
    if message_lower.contains("template") || message_lower.contains("tera") {
        return ErrorContext::new(GqldocsError::Other {
            message: with_cause_chain(&error),
        })
        .with_suggestion(
            "Check template syntax: variables use {{ var }}, control flow uses {% %}. \
             Site templates see the schema context (query_type, types, ...); the type \
             template sees one parsed type at a time",
        );
    }

    ErrorContext::new(GqldocsError::Other {
        message: with_cause_chain(&error),
    })
}

/// Render an anyhow error with its full cause chain.
fn with_cause_chain(error: &anyhow::Error) -> String {
    let mut message = error.to_string();
    let chain: Vec<String> = error.chain().skip(1).map(|c| c.to_string()).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    message
}

/// Pair a typed error with its canned suggestion and details.
fn create_error_context(error: GqldocsError) -> ErrorContext {
    match &error {
        GqldocsError::EndpointNotConfigured => ErrorContext::new(error.clone())
            .with_suggestion(
                "Pass --endpoint <URL>, or set `url` under [endpoint] in gqldocs.toml. \
                 For offline generation, pass --schema-file with a saved introspection JSON",
            )
            .with_details(
                "gqldocs needs a GraphQL endpoint (or a saved schema file) to read the schema from",
            ),

        GqldocsError::IntrospectionRequestFailed { url, .. } => ErrorContext::new(error.clone())
            .with_suggestion(format!(
                "Check that {url} is reachable and accepts POST requests with a JSON body"
            ))
            .with_details("The HTTP request failed before any GraphQL processing happened"),

        GqldocsError::IntrospectionHttpStatus { .. } => {
            ErrorContext::new(error.clone()).with_suggestion(
                "Verify the endpoint path (often /graphql) and any required auth headers \
                 ([endpoint.headers] in gqldocs.toml)",
            )
        }

        GqldocsError::IntrospectionErrors { .. } => ErrorContext::new(error.clone())
            .with_suggestion(
                "The server rejected the introspection query. Some APIs disable introspection \
                 in production; run `gqldocs fetch` against a development endpoint and generate \
                 from the saved file",
            ),

        GqldocsError::SchemaPayloadInvalid { .. } => ErrorContext::new(error.clone())
            .with_suggestion(
                "Expected a standard introspection result: either {\"data\": {\"__schema\": ...}} \
                 or a bare {\"__schema\": ...} object",
            ),

        GqldocsError::DirectiveSyntax { element, .. } => ErrorContext::new(error.clone())
            .with_suggestion(format!(
                "Fix the description of {element}: an @directive(...) annotation has an \
                 unbalanced parenthesis"
            ))
            .with_details(
                "Descriptions may embed @name(args) annotations; the argument list must have \
                 balanced parentheses",
            ),

        GqldocsError::TemplateDirNotFound { path } => {
            ErrorContext::new(error.clone()).with_suggestion(format!(
                "Create {path} or point --templates/--partials at your template directories"
            ))
        }

        GqldocsError::TemplateRenderFailed { .. } => {
            ErrorContext::new(error.clone()).with_suggestion(
                "Check template syntax: variables use {{ var }}, control flow uses {% %}. \
                 Partials are registered under their file stem and included with \
                 {% include \"Name\" %}",
            )
        }

        GqldocsError::ConfigParseError { file, .. } => ErrorContext::new(error.clone())
            .with_suggestion(format!("Check the TOML syntax in {file}")),

        _ => ErrorContext::new(error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_error_gets_suggestion() {
        let ctx = user_friendly_error(GqldocsError::EndpointNotConfigured.into());
        assert!(ctx.suggestion.is_some());
        assert!(ctx.to_string().contains("no GraphQL endpoint"));
    }

    #[test]
    fn test_directive_error_names_element() {
        let err = GqldocsError::DirectiveSyntax {
            element: "User.email".to_string(),
            source: DirectiveError::MismatchedBrackets {
                open: "(".to_string(),
                start: 12,
            },
        };
        let ctx = user_friendly_error(err.into());
        assert!(ctx.error.to_string().contains("User.email"));
        assert!(ctx.suggestion.as_deref().unwrap().contains("User.email"));
    }

    #[test]
    fn test_clone_flattens_io_error() {
        let err = GqldocsError::IoError(std::io::Error::other("boom"));
        let cloned = err.clone();
        assert!(matches!(cloned, GqldocsError::Other { .. }));
        assert!(cloned.to_string().contains("boom"));
    }

    #[test]
    fn test_unknown_error_keeps_cause_chain() {
        let err = anyhow::anyhow!("root cause").context("outer context");
        let ctx = user_friendly_error(err);
        let message = ctx.error.to_string();
        assert!(message.contains("outer context"));
        assert!(message.contains("root cause"));
    }
}
