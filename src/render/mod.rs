//! Tera rendering pipeline.
//!
//! Templates are entirely user-supplied: a *partials* directory whose files
//! are registered under their file stem (so `partials/TypeRef.html` is
//! available as `{% include "TypeRef" %}`), and a *templates* directory of
//! pages to emit. One of those pages is the **type template**, rendered once
//! per named schema type; every other page is rendered once against the
//! whole schema.
//!
//! The renderer registers kind testers so templates can branch on what a
//! type is without string-comparing the `kind` field:
//!
//! ```html
//! {% for t in types %}
//!   {% if t is enum %}{% include "Enum" %}{% endif %}
//! {% endfor %}
//! ```
//!
//! Available testers: `object`, `interface`, `enum`, `union`,
//! `input_object`, `scalar`.

use std::fs;
use std::path::{Path, PathBuf};

use tera::{Context, Tera, Value};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::core::GqldocsError;
use crate::schema::SchemaData;

/// Where templates live and where pages go.
#[derive(Debug, Clone)]
pub struct SiteLayout {
    /// Directory of page templates.
    pub templates_dir: PathBuf,
    /// Directory of partials, registered by file stem.
    pub partials_dir: PathBuf,
    /// Output directory, created if missing.
    pub output_dir: PathBuf,
    /// File name (within `templates_dir`) of the per-type template.
    pub type_template: String,
}

/// Tera wrapper with the partials and kind testers registered.
pub struct DocRenderer {
    tera: Tera,
}

impl DocRenderer {
    /// Build a renderer with every file under `partials_dir` registered as a
    /// template named by its file stem.
    ///
    /// A missing partials directory is allowed (not every site uses
    /// partials); it is logged and skipped.
    ///
    /// # Errors
    ///
    /// Fails when a partial cannot be read or does not compile.
    pub fn new(partials_dir: &Path) -> Result<Self, GqldocsError> {
        let mut tera = Tera::default();
        register_kind_testers(&mut tera);

        if !partials_dir.is_dir() {
            warn!(
                "partials directory {} not found, continuing without partials",
                partials_dir.display()
            );
            return Ok(Self { tera });
        }

        for entry in WalkDir::new(partials_dir)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_file())
        {
            let path = entry.path();
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let source = fs::read_to_string(path)?;
            tera.add_raw_template(stem, &source)
                .map_err(|e| render_failed(stem, &e))?;
            debug!("partial added: {} from {}", stem, path.display());
        }

        Ok(Self { tera })
    }

    /// Register a page template under `name` and render it against `context`.
    ///
    /// # Errors
    ///
    /// [`GqldocsError::TemplateRenderFailed`] with Tera's cause chain.
    pub fn render_page(
        &mut self,
        name: &str,
        source: &str,
        context: &Context,
    ) -> Result<String, GqldocsError> {
        // Re-registering an existing name replaces it, which is what we want
        // for the type template rendered once per type.
        self.tera
            .add_raw_template(name, source)
            .map_err(|e| render_failed(name, &e))?;
        self.tera.render(name, context).map_err(|e| render_failed(name, &e))
    }
}

/// Generate the documentation site: one page per site template, one page per
/// non-internal schema type.
///
/// Returns the paths of all written pages.
///
/// # Errors
///
/// Fails when the templates directory or the type template is missing, when
/// a template does not render, or when output cannot be written.
pub fn generate_site(
    layout: &SiteLayout,
    data: &SchemaData,
) -> Result<Vec<PathBuf>, GqldocsError> {
    if !layout.templates_dir.is_dir() {
        return Err(GqldocsError::TemplateDirNotFound {
            path: layout.templates_dir.display().to_string(),
        });
    }

    let mut renderer = DocRenderer::new(&layout.partials_dir)?;
    fs::create_dir_all(&layout.output_dir)?;

    let schema_context = Context::from_serialize(data)?;
    let mut written = Vec::new();

    // Site-level pages: every template except the per-type one.
    let mut entries: Vec<_> = fs::read_dir(&layout.templates_dir)?
        .filter_map(Result::ok)
        .filter(|e| e.path().is_file())
        .collect();
    entries.sort_by_key(std::fs::DirEntry::file_name);

    for entry in &entries {
        let path = entry.path();
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if file_name == layout.type_template {
            continue;
        }

        let source = fs::read_to_string(&path)?;
        let html = renderer.render_page(file_name, &source, &schema_context)?;
        let destination = layout.output_dir.join(file_name);
        fs::write(&destination, html)?;
        info!(
            "template rendered: {} ---> {}",
            path.display(),
            destination.display()
        );
        written.push(destination);
    }

    // Per-type pages.
    let type_template_path = layout.templates_dir.join(&layout.type_template);
    let type_source = fs::read_to_string(&type_template_path).map_err(|_| {
        GqldocsError::TemplateRenderFailed {
            template: layout.type_template.clone(),
            reason: format!("not found in {}", layout.templates_dir.display()),
        }
    })?;

    for parsed_type in data.types.iter().filter(|t| !t.is_internal()) {
        let context = Context::from_serialize(parsed_type)?;
        let html = renderer.render_page(&layout.type_template, &type_source, &context)?;
        let destination = layout.output_dir.join(format!("{}.html", parsed_type.name));
        fs::write(&destination, html)?;
        info!(
            "template rendered: {} ---> {}",
            type_template_path.display(),
            destination.display()
        );
        written.push(destination);
    }

    Ok(written)
}

/// Testers mirroring the type kinds, so templates can write
/// `{% if t is enum %}` instead of comparing `t.kind` strings.
fn register_kind_testers(tera: &mut Tera) {
    const KINDS: [(&str, &str); 6] = [
        ("object", "OBJECT"),
        ("interface", "INTERFACE"),
        ("enum", "ENUM"),
        ("union", "UNION"),
        ("input_object", "INPUT_OBJECT"),
        ("scalar", "SCALAR"),
    ];

    for (name, kind) in KINDS {
        tera.register_tester(name, move |value: Option<&Value>, _args: &[Value]| {
            Ok(value
                .and_then(|v| v.get("kind"))
                .and_then(Value::as_str)
                == Some(kind))
        });
    }
}

/// Flatten a Tera error (whose message alone is often just "Failed to render
/// 'x'") into its full cause chain.
fn render_failed(template: &str, error: &tera::Error) -> GqldocsError {
    let mut reason = error.to_string();
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        reason.push_str(&format!(": {cause}"));
        source = cause.source();
    }

    GqldocsError::TemplateRenderFailed {
        template: template.to_string(),
        reason,
    }
}
