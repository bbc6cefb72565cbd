//! Balanced-region search over free-form text.
//!
//! [`find_balanced_region`] locates the first balanced run of open/close
//! symbols at or after a starting offset, accounting for arbitrarily deep
//! nesting of the same symbol pair. The directive splitter uses it to carve
//! an argument list out of a description without being confused by
//! parentheses inside the arguments themselves.

use super::DirectiveError;

/// The span of one balanced region of open/close symbols.
///
/// `start` is the byte index of the opening symbol, `end` the byte index of
/// the close symbol that balances it. The substring `text[start..=end]` has
/// zero net depth at `end` and positive depth everywhere strictly between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BracketSpan {
    /// Byte index of the first open symbol at/after the search offset.
    pub start: usize,
    /// Byte index of the close symbol balancing it.
    pub end: usize,
}

/// Find the first balanced region of `open`/`close` symbols in `text`,
/// searching from `from_offset`.
///
/// Returns `Ok(None)` when no open symbol occurs at or after `from_offset`
/// (including an out-of-range offset) — absence of a region is a normal
/// outcome, not a failure.
///
/// # Errors
///
/// - [`DirectiveError::InvalidSymbols`] if `open == close`. Matching is
///   undecidable for identical symbols; this is a caller bug, not input data.
/// - [`DirectiveError::MismatchedBrackets`] if a region opens but never
///   balances before the end of `text`, or if a close token overlaps the
///   open it would have to balance.
///
/// # Examples
///
/// ```
/// use gqldocs::directives::find_balanced_region;
///
/// let span = find_balanced_region("(a(b)c)", "(", ")", 0).unwrap().unwrap();
/// assert_eq!((span.start, span.end), (0, 6));
///
/// // Sibling groups: the first complete region wins.
/// let span = find_balanced_region("()()", "(", ")", 0).unwrap().unwrap();
/// assert_eq!((span.start, span.end), (0, 1));
/// ```
pub fn find_balanced_region(
    text: &str,
    open: &str,
    close: &str,
    from_offset: usize,
) -> Result<Option<BracketSpan>, DirectiveError> {
    if open == close {
        return Err(DirectiveError::InvalidSymbols {
            symbol: open.to_string(),
        });
    }

    // Two lookahead indices driven forward independently; whichever comes
    // first decides the next transition. A naive "next close after next open"
    // scan would break on sibling groups later in the same string.
    let mut next_open = find_from(text, open, from_offset);
    let Some(start) = next_open else {
        return Ok(None);
    };
    let mut next_close = find_from(text, close, start);
    let mut depth: usize = 0;

    loop {
        match (next_open, next_close) {
            (Some(o), Some(c)) if o < c => {
                depth += 1;
                next_open = find_from(text, open, o + open.len());
            }
            (_, Some(c)) => {
                // Distinct multi-char tokens can still overlap (close sharing
                // the open's first byte), landing both scans on the same
                // index with nothing opened yet. Nothing balances there.
                depth = depth.checked_sub(1).ok_or_else(|| {
                    DirectiveError::MismatchedBrackets {
                        open: open.to_string(),
                        start,
                    }
                })?;
                if depth == 0 {
                    return Ok(Some(BracketSpan { start, end: c }));
                }
                next_close = find_from(text, close, c + close.len());
            }
            (_, None) => {
                // Opens are outstanding but no close remains ahead. Covers
                // both the ordinary unterminated case and the inconsistent
                // accounting one; either way, fail instead of spinning.
                return Err(DirectiveError::MismatchedBrackets {
                    open: open.to_string(),
                    start,
                });
            }
        }
    }
}

/// Byte index of the next occurrence of `token` at or after `from`.
fn find_from(text: &str, token: &str, from: usize) -> Option<usize> {
    text.get(from..)?.find(token).map(|i| i + from)
}
