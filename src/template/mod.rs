//! Template registry and assembly.
//!
//! A template is a named tree of files with an optional parent. Assembly
//! materializes the parent's tree first and overlays the child's on top, so
//! a derived template only has to override the files it changes.

mod render;

pub use render::{HtmlRenderer, ReportRenderer};

use indexmap::IndexMap;

use crate::build::BuildContext;
use crate::error::{LogweaveError, Result};

/// A registered report template.
#[derive(Debug, Clone, Copy)]
pub struct TemplateDef {
    pub key: &'static str,
    /// The file the renderer loads from the assembled tree.
    pub base_file: &'static str,
    pub parent: Option<&'static str>,
    /// Template-relative path -> embedded content.
    pub files: &'static [(&'static str, &'static str)],
    /// File or directory names copied alongside the report after promotion.
    pub copy_files: &'static [&'static str],
}

pub const DEFAULT_TEMPLATE: TemplateDef = TemplateDef {
    key: "default",
    base_file: "base.html",
    parent: None,
    files: &[
        ("base.html", include_str!("default/base.html")),
        ("report.css", include_str!("default/report.css")),
        ("report.js", include_str!("default/report.js")),
    ],
    copy_files: &[],
};

/// A minimal restyle of `default`: same markup and scripts, plain styling.
pub const SIMPLE_TEMPLATE: TemplateDef = TemplateDef {
    key: "simple",
    base_file: "base.html",
    parent: Some("default"),
    files: &[("report.css", include_str!("simple/report.css"))],
    copy_files: &[],
};

pub struct TemplateRegistry {
    templates: IndexMap<&'static str, TemplateDef>,
}

impl TemplateRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            templates: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(DEFAULT_TEMPLATE);
        registry.register(SIMPLE_TEMPLATE);
        registry
    }

    pub fn register(&mut self, def: TemplateDef) {
        self.templates.insert(def.key, def);
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.templates.keys().copied()
    }

    /// # Errors
    /// Returns `UnknownTemplate` for an unregistered key.
    pub fn get(&self, key: &str) -> Result<&TemplateDef> {
        self.templates
            .get(key)
            .ok_or_else(|| LogweaveError::UnknownTemplate(key.to_string()))
    }

    /// Materialize the template's file tree into the build context.
    ///
    /// Parent trees are written first; a child file under the same relative
    /// path overwrites the parent's copy. Returns the selected (leaf)
    /// template for its `base_file` and `copy_files`.
    ///
    /// # Errors
    /// Returns an error for an unknown key, an inheritance cycle, or a
    /// failed write.
    pub fn assemble(&self, key: &str, ctx: &BuildContext) -> Result<&TemplateDef> {
        let chain = self.inheritance_chain(key)?;
        for def in &chain {
            for (rel, content) in def.files {
                ctx.write_template_file(rel, content)?;
            }
        }
        self.get(key)
    }

    /// Root-most parent first, requested template last.
    fn inheritance_chain(&self, key: &str) -> Result<Vec<&TemplateDef>> {
        let mut chain = Vec::new();
        let mut current = Some(key);
        while let Some(k) = current {
            if chain.len() > self.templates.len() {
                return Err(LogweaveError::Config(format!(
                    "Template inheritance cycle involving '{key}'"
                )));
            }
            let def = self.get(k)?;
            chain.push(def);
            current = def.parent;
        }
        chain.reverse();
        Ok(chain)
    }
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
