//! HTML template resource.
//!
//! The template is loaded once at startup (built-in or from a file) and
//! handed to the renderer. Placeholders use `{{ name }}` syntax and are
//! substituted in a single pass, so substituted text is never re-expanded.

use crate::utils::error::TemplateError;
use log::debug;
use std::path::Path;

const BUILTIN_TEMPLATE: &str = include_str!("../../templates/report.html");

/// Placeholders every template must contain
const REQUIRED_PLACEHOLDERS: &[&str] = &["sections"];

/// A validated report template
#[derive(Debug, Clone)]
pub struct ReportTemplate {
    source: String,
}

impl ReportTemplate {
    /// The template shipped with the binary
    pub fn builtin() -> Self {
        Self {
            source: BUILTIN_TEMPLATE.to_string(),
        }
    }

    /// Load a template from disk
    ///
    /// # Errors
    /// * `TemplateError::Io` - file cannot be read
    /// * `TemplateError::MissingPlaceholder` - a required slot is absent
    pub fn load(path: &Path) -> Result<Self, TemplateError> {
        debug!("Loading template from: {}", path.display());

        let source = std::fs::read_to_string(path).map_err(|source| TemplateError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_source(source)
    }

    pub fn from_source(source: String) -> Result<Self, TemplateError> {
        let template = Self { source };

        for name in REQUIRED_PLACEHOLDERS {
            if !template.placeholders().any(|p| p == *name) {
                return Err(TemplateError::MissingPlaceholder(name.to_string()));
            }
        }

        Ok(template)
    }

    /// Substitute `{{ key }}` slots with the given values
    ///
    /// Unknown placeholders are left untouched.
    pub fn render(&self, values: &[(&str, &str)]) -> String {
        let mut out = String::with_capacity(self.source.len());
        let mut rest = self.source.as_str();

        while let Some(start) = rest.find("{{") {
            out.push_str(&rest[..start]);
            let after_open = &rest[start + 2..];

            let Some(end) = after_open.find("}}") else {
                // Unterminated: emit the remainder verbatim
                out.push_str(&rest[start..]);
                return out;
            };

            let key = after_open[..end].trim();
            match values.iter().find(|(k, _)| *k == key) {
                Some((_, value)) => out.push_str(value),
                None => out.push_str(&rest[start..start + 2 + end + 2]),
            }

            rest = &after_open[end + 2..];
        }

        out.push_str(rest);
        out
    }

    /// Names of all `{{ ... }}` slots in the template
    fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.source.split("{{").skip(1).filter_map(|chunk| {
            chunk.find("}}").map(|end| chunk[..end].trim())
        })
    }
}
