//! Engine configuration loaded from TOML
//!
//! Every section is optional; an empty file yields the defaults for the
//! five-page house lease.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::pages::{PageId, ValueClass};

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Document set identity and page order
    #[serde(default)]
    pub document: DocumentConfig,
    /// Markup written around substituted values
    #[serde(default)]
    pub render: RenderConfig,
    /// Where the directory sink writes pages
    #[serde(default)]
    pub output: OutputConfig,
}

impl EngineConfig {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the TOML is malformed
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string
    ///
    /// ```
    /// use lease_engine::EngineConfig;
    ///
    /// # fn example() -> anyhow::Result<()> {
    /// let config = EngineConfig::from_str(r#"
    ///     [render]
    ///     body_class = "hrt cs200"
    /// "#)?;
    /// assert_eq!(config.render.body_class, "hrt cs200");
    /// assert_eq!(config.document.pages.len(), 5);
    /// # Ok(())
    /// # }
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> anyhow::Result<Self> {
        toml::from_str(s).context("Failed to parse TOML configuration")
    }
}

/// Document set identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentConfig {
    /// File name stem; pages are `<name>_<n>.html`
    #[serde(default = "default_document_name")]
    pub name: String,
    /// Pages in generation order
    #[serde(default = "default_pages")]
    pub pages: Vec<PageId>,
}

impl DocumentConfig {
    pub fn file_name(&self, page: PageId) -> String {
        format!("{}_{}.html", self.name, page.0)
    }
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            name: default_document_name(),
            pages: default_pages(),
        }
    }
}

fn default_document_name() -> String {
    "House_Lease_Agreement".to_string()
}

fn default_pages() -> Vec<PageId> {
    (1..=5).map(PageId).collect()
}

/// Span classes wrapping values written into nested slots
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderConfig {
    #[serde(default = "default_body_class")]
    pub body_class: String,
    #[serde(default = "default_signature_class")]
    pub signature_class: String,
}

impl RenderConfig {
    pub fn class_for(&self, class: ValueClass) -> &str {
        match class {
            ValueClass::Body => &self.body_class,
            ValueClass::Signature => &self.signature_class,
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            body_class: default_body_class(),
            signature_class: default_signature_class(),
        }
    }
}

fn default_body_class() -> String {
    "hrt cs106".to_string()
}

fn default_signature_class() -> String {
    "hrt cs83".to_string()
}

/// Output location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_directory")]
    pub directory: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_directory(),
        }
    }
}

fn default_output_directory() -> PathBuf {
    PathBuf::from("generated")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = EngineConfig::from_str("").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.document.name, "House_Lease_Agreement");
        assert_eq!(config.render.class_for(ValueClass::Signature), "hrt cs83");
    }

    #[test]
    fn test_partial_config() {
        let config = EngineConfig::from_str(
            r#"
            [document]
            pages = [1, 3]

            [output]
            directory = "out/contracts"
            "#,
        )
        .unwrap();

        assert_eq!(config.document.pages, vec![PageId(1), PageId(3)]);
        assert_eq!(config.document.name, "House_Lease_Agreement");
        assert_eq!(config.output.directory, PathBuf::from("out/contracts"));
        assert_eq!(config.render.body_class, "hrt cs106");
    }

    #[test]
    fn test_file_name() {
        let document = DocumentConfig::default();
        assert_eq!(document.file_name(PageId(2)), "House_Lease_Agreement_2.html");
    }

    #[test]
    fn test_malformed_config() {
        assert!(EngineConfig::from_str("[document\nname = 1").is_err());
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("engine.toml");
        fs::write(&path, "[render]\nsignature_class = \"hrt cs90\"\n").unwrap();

        let config = EngineConfig::from_file(&path).unwrap();
        assert_eq!(config.render.signature_class, "hrt cs90");
        assert!(EngineConfig::from_file(dir.path().join("missing.toml")).is_err());
    }
}
