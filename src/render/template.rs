use crate::page::PageData;
use anyhow::{Context, Result as AnyhowResult};
use log::debug;
use minijinja::{Environment, UndefinedBehavior};
use std::path::Path;

/// A gemtext template resource, held as source until rendered.
#[derive(Debug, Clone)]
pub struct PageTemplate {
    name: String,
    source: String,
}

impl PageTemplate {
    /// Reads a template from disk. The template is named after its file name.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the template file (e.g. "index.gmi").
    ///
    /// # Returns
    ///
    /// * `Ok(PageTemplate)` - The template source, not yet parsed.
    /// * `Err(anyhow::Error)` - The file is missing or not valid UTF-8.
    pub fn load<P: AsRef<Path>>(path: P) -> AnyhowResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read template {}", path.display()))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        debug!("Loaded template {} ({} bytes)", name, source.len());
        Ok(Self { name, source })
    }

    /// Builds a template from in-memory source.
    pub fn from_source(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Renders the template against the page data.
    ///
    /// Parsing happens here, so syntax errors surface as render failures just like errors raised
    /// while evaluating the template (e.g. an unknown filter). Referring to a value the page data
    /// does not have is an error too, and the source's trailing newline is kept.
    ///
    /// # Arguments
    ///
    /// * `data` - The page data exposed to the template as `Domain`, `Files` and `Users`.
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The rendered body, with whatever line endings the template produced.
    /// * `Err(anyhow::Error)` - The template failed to parse or render.
    pub fn render(&self, data: &PageData) -> AnyhowResult<String> {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_keep_trailing_newline(true);
        env.set_undefined_behavior(UndefinedBehavior::Strict);

        let template = env
            .template_from_named_str(&self.name, &self.source)
            .with_context(|| format!("Failed to parse template {}", self.name))?;
        template
            .render(data)
            .with_context(|| format!("Failed to render template {}", self.name))
    }
}
