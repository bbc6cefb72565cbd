//! Embedded-directive extraction from schema description text.
//!
//! GraphQL descriptions are free-form text, and several schema ecosystems
//! embed directive-like annotations straight into them, mixed with ordinary
//! prose:
//!
//! ```text
//! The user's login name. @deprecated(reason: "use handle instead") @internal
//! ```
//!
//! This module separates the two: [`split_directives`] scans a description,
//! strips every `@name` / `@name(...)` marker out of the prose, and returns
//! the cleaned text together with the ordered list of extracted annotations.
//! Argument lists are carved out with [`find_balanced_region`], so arguments
//! containing nested parentheses survive intact.
//!
//! Extraction is lexical only. No attempt is made to validate that a name or
//! its argument text conforms to any directive grammar — that is the
//! consumer's business.
//!
//! # Examples
//!
//! ```
//! use gqldocs::directives::split_directives;
//!
//! let result = split_directives("Legacy id. @deprecated(reason: \"use uuid\")").unwrap();
//! assert_eq!(result.description, "Legacy id. ");
//! assert_eq!(result.annotations[0].name, "deprecated");
//! assert_eq!(
//!     result.annotations[0].argument_text.as_deref(),
//!     Some("reason: \"use uuid\"")
//! );
//! ```

mod brackets;

pub use brackets::{BracketSpan, find_balanced_region};

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;
use thiserror::Error;

/// Marker pattern: `@` followed by a name, optionally trailed by a single
/// `(` or a single space. Punctuation-only or empty names after `@` never
/// match and stay in the prose.
static MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@(\w+)([ (])?").expect("marker pattern is valid"));

/// Errors from directive extraction.
///
/// Absence of a marker or of an open symbol is never an error — those are
/// ordinary outcomes (`None` / text passed through unchanged).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DirectiveError {
    /// Identical open/close symbols were passed to the region finder.
    /// A programming-contract violation, not a runtime condition.
    #[error("open and close symbols must differ, got {symbol:?} for both")]
    InvalidSymbols {
        /// The symbol supplied for both sides.
        symbol: String,
    },

    /// A region opened but never balanced within the remaining text,
    /// typically an unterminated argument list in an annotation.
    #[error("unbalanced {open:?} opened at byte {start} is never closed")]
    MismatchedBrackets {
        /// The open symbol of the unbalanced region.
        open: String,
        /// Byte index where the region opened.
        start: usize,
    },
}

/// One directive annotation extracted from a description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Annotation {
    /// The identifier after `@` (word characters only).
    pub name: String,
    /// Verbatim text between the argument list's outer parentheses, left
    /// unparsed. `None` when the marker carried no `(...)` list.
    pub argument_text: Option<String>,
}

/// Output of one extraction pass over a description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SplitResult {
    /// The input with all recognized markers (and their argument lists)
    /// removed; all other text preserved verbatim in original order.
    pub description: String,
    /// Extracted annotations in left-to-right order of appearance.
    pub annotations: Vec<Annotation>,
}

/// Split a description into cleaned prose and its embedded annotations.
///
/// The scan walks a single forward cursor over the input: prose up to the
/// next marker is appended to the output buffer verbatim, the marker (plus
/// its balanced argument list, when it has one) is consumed into an
/// [`Annotation`], and the search restarts on the remainder. Each iteration
/// strictly advances the cursor, so the loop terminates on any input.
///
/// Whitespace *between* adjacent markers is prose and stays in the cleaned
/// description, which can leave marker-adjacent spacing looking doubled
/// (`"a @x b"` → `"a  b"`). That is deliberate lexical behavior: only the
/// markers themselves are excised.
///
/// # Errors
///
/// Propagates [`DirectiveError::MismatchedBrackets`] when an annotation's
/// argument list never closes. The function has no failure modes of its own.
pub fn split_directives(description: &str) -> Result<SplitResult, DirectiveError> {
    let mut cleaned = String::with_capacity(description.len());
    let mut annotations = Vec::new();
    let mut cursor = 0;

    while let Some(caps) = MARKER.captures(&description[cursor..]) {
        let marker = caps.get(0).expect("group 0 always present");
        let name = caps[1].to_string();

        // Prose before the marker passes through untouched.
        cleaned.push_str(&description[cursor..cursor + marker.start()]);

        let opens_arguments = caps.get(2).is_some_and(|t| t.as_str() == "(");
        if opens_arguments {
            let paren = cursor + marker.end() - 1;
            match find_balanced_region(description, "(", ")", paren)? {
                Some(span) => {
                    annotations.push(Annotation {
                        name,
                        argument_text: Some(description[span.start + 1..span.end].to_string()),
                    });
                    cursor = span.end + 1;
                }
                None => {
                    // Unreachable: the marker guarantees a '(' at `paren`.
                    // Degrade to an argumentless annotation.
                    annotations.push(Annotation {
                        name,
                        argument_text: None,
                    });
                    cursor += marker.end();
                }
            }
        } else {
            // Marker ended with a space or ran to the end of the text.
            annotations.push(Annotation {
                name,
                argument_text: None,
            });
            cursor += marker.end();
        }
    }

    cleaned.push_str(&description[cursor..]);
    Ok(SplitResult {
        description: cleaned,
        annotations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str) -> Annotation {
        Annotation {
            name: name.to_string(),
            argument_text: None,
        }
    }

    fn with_args(name: &str, args: &str) -> Annotation {
        Annotation {
            name: name.to_string(),
            argument_text: Some(args.to_string()),
        }
    }

    #[test]
    fn test_plain_text_passes_through() {
        let result = split_directives("Just an ordinary description.").unwrap();
        assert_eq!(result.description, "Just an ordinary description.");
        assert!(result.annotations.is_empty());
    }

    #[test]
    fn test_empty_input() {
        let result = split_directives("").unwrap();
        assert_eq!(result.description, "");
        assert!(result.annotations.is_empty());
    }

    #[test]
    fn test_directive_with_arguments() {
        let result =
            split_directives("Deprecated. @deprecated(reason: \"old\") Use new field.").unwrap();
        assert_eq!(result.description, "Deprecated.  Use new field.");
        assert_eq!(
            result.annotations,
            vec![with_args("deprecated", "reason: \"old\"")]
        );
    }

    #[test]
    fn test_argumentless_directive_with_trailing_space() {
        let result = split_directives("@internal some text").unwrap();
        assert_eq!(result.description, "some text");
        assert_eq!(result.annotations, vec![named("internal")]);
    }

    #[test]
    fn test_directive_at_end_of_text() {
        let result = split_directives("Hidden field. @internal").unwrap();
        assert_eq!(result.description, "Hidden field. ");
        assert_eq!(result.annotations, vec![named("internal")]);
    }

    #[test]
    fn test_nested_parentheses_preserved_in_arguments() {
        let result = split_directives("@constraint(pattern: regex(\"a(b)c\"))").unwrap();
        assert_eq!(result.description, "");
        assert_eq!(
            result.annotations,
            vec![with_args("constraint", "pattern: regex(\"a(b)c\")")]
        );
    }

    #[test]
    fn test_multiple_directives_in_order() {
        let result = split_directives("a @one b @two(x) c @three").unwrap();
        assert_eq!(result.description, "a b  c ");
        assert_eq!(
            result.annotations,
            vec![named("one"), with_args("two", "x"), named("three")]
        );
    }

    #[test]
    fn test_adjacent_directives_whitespace_collapses_into_prose() {
        let result = split_directives("@a @b(1) @c").unwrap();
        // The space after @a is consumed by its marker; the space between
        // the groups is prose and stays.
        assert_eq!(result.description, " ");
        assert_eq!(
            result.annotations,
            vec![named("a"), with_args("b", "1"), named("c")]
        );
    }

    #[test]
    fn test_unterminated_argument_list_fails() {
        let err = split_directives("unterminated @foo(bar").unwrap_err();
        assert!(matches!(err, DirectiveError::MismatchedBrackets { .. }));
    }

    #[test]
    fn test_bare_at_sign_is_prose() {
        let result = split_directives("mail me @ the office, or @!!").unwrap();
        assert_eq!(result.description, "mail me @ the office, or @!!");
        assert!(result.annotations.is_empty());
    }

    #[test]
    fn test_later_parentheses_unrelated_to_marker() {
        // Sibling parenthetical groups after the argument list must not
        // extend the carved region.
        let result = split_directives("@tag(a) then (prose parens)").unwrap();
        assert_eq!(result.description, " then (prose parens)");
        assert_eq!(result.annotations, vec![with_args("tag", "a")]);
    }

    #[test]
    fn test_empty_argument_list() {
        let result = split_directives("@flag() rest").unwrap();
        assert_eq!(result.description, " rest");
        assert_eq!(result.annotations, vec![with_args("flag", "")]);
    }

    #[test]
    fn test_idempotent_on_cleaned_output() {
        let first = split_directives("start @a(1) middle @b end").unwrap();
        let second = split_directives(&first.description).unwrap();
        assert_eq!(second.description, first.description);
        assert!(second.annotations.is_empty());
    }

    #[test]
    fn test_prose_order_preserved_around_many_markers() {
        let result = split_directives("one @x two @y(q(r)) three").unwrap();
        assert_eq!(result.description, "one two  three");
        assert_eq!(result.annotations, vec![named("x"), with_args("y", "q(r)")]);
    }

    #[test]
    fn test_unicode_prose_survives() {
        let result = split_directives("héllo @läuft(größe: 1) wörld").unwrap();
        assert_eq!(result.description, "héllo  wörld");
        assert_eq!(result.annotations, vec![with_args("läuft", "größe: 1")]);
    }
}
