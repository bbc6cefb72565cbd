//! gqldocs — GraphQL schema documentation generator.
//!
//! gqldocs fetches a GraphQL schema via the standard introspection query and
//! renders it into a static HTML site through user-supplied Tera templates.
//! Along the way it cleans every description: GraphQL descriptions are
//! free-form text that often embed directive-like annotations
//! (`@deprecated(reason: "use X instead")`) in the middle of ordinary prose,
//! and templates want those separated — prose for the page body, annotations
//! as structured data.
//!
//! # Core Modules
//!
//! - [`directives`] — the embedded-directive extractor: balanced-bracket
//!   region search and the prose/annotation splitter. Pure functions over
//!   strings; the one piece of this tool that is an algorithm rather than
//!   plumbing.
//! - [`introspection`] — the introspection query document, the wire-format
//!   schema model, and the HTTP client.
//! - [`schema`] — the template-facing model: introspection types with every
//!   description run through the splitter.
//! - [`render`] — Tera renderer and site generation (partials by file stem,
//!   one page per site template, one page per named type).
//!
//! # Supporting Modules
//!
//! - [`cli`] — clap command layer (`generate`, `fetch`)
//! - [`config`] — optional `gqldocs.toml` project file
//! - [`core`] — typed errors and user-friendly error reporting
//!
//! # Library Usage
//!
//! The binary is the primary interface, but the pipeline is callable:
//!
//! ```rust,no_run
//! use gqldocs::render::{SiteLayout, generate_site};
//! use gqldocs::schema::parse_schema;
//! use std::path::PathBuf;
//!
//! # fn main() -> anyhow::Result<()> {
//! let schema = gqldocs::introspection::load_schema_file("schema.json".as_ref())?;
//! let data = parse_schema(schema)?;
//! let layout = SiteLayout {
//!     templates_dir: PathBuf::from("./templates"),
//!     partials_dir: PathBuf::from("./partials"),
//!     output_dir: PathBuf::from("./docs"),
//!     type_template: "Type.html".to_string(),
//! };
//! generate_site(&layout, &data)?;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod directives;
pub mod introspection;
pub mod render;
pub mod schema;
