//! Strategy interface and the artifacts strategies produce

use super::post_process::post_process;
use super::syntax::{render, CompilationUnit, Language};
use crate::config::Preferences;
use crate::error::Result;
use crate::parser::Table;

/// How an artifact's raw text becomes its final content
#[derive(Debug, Clone, PartialEq)]
pub enum ArtifactKind {
    /// Rendered source that still needs the post-processing stage
    Source {
        language: Language,
        collection_type: String,
        imports: Vec<String>,
    },
    /// Finished XML document
    Xml,
}

/// One output file
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
    pub file_name: String,
    /// Text written first; for source artifacts the raw rendering
    pub raw: String,
    pub kind: ArtifactKind,
}

impl Artifact {
    /// Render a compilation unit in the configured language
    pub fn source(
        file_name: String,
        unit: &CompilationUnit,
        prefs: &Preferences,
        imports: &[&str],
    ) -> Self {
        Self {
            file_name,
            raw: render(unit, prefs.language),
            kind: ArtifactKind::Source {
                language: prefs.language,
                collection_type: prefs.collection_type.clone(),
                imports: imports.iter().map(|s| s.to_string()).collect(),
            },
        }
    }

    pub fn xml(file_name: String, content: String) -> Self {
        Self {
            file_name,
            raw: content,
            kind: ArtifactKind::Xml,
        }
    }

    /// Final content for text read back from the raw write
    pub fn finish(&self, written: &str) -> String {
        match &self.kind {
            ArtifactKind::Source {
                language,
                collection_type,
                imports,
            } => post_process(written, *language, collection_type, imports),
            ArtifactKind::Xml => written.to_string(),
        }
    }

    /// Final content without a round trip through the filesystem
    pub fn content(&self) -> String {
        self.finish(&self.raw)
    }
}

/// A stateless generation strategy
pub trait Generator {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Produce the artifacts for one table
    fn generate(&self, table: &Table, prefs: &Preferences) -> Result<Vec<Artifact>>;
}
