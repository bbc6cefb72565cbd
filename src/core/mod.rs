//! Core types and error handling.
//!
//! Home of the tool-wide error stack: the typed [`GqldocsError`], the
//! [`ErrorContext`] wrapper that carries user-facing suggestions, and the
//! [`user_friendly_error`] conversion the CLI uses before printing.

pub mod error;

pub use error::{ErrorContext, GqldocsError, user_friendly_error};
