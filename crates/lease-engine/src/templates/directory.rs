//! Templates read from a directory on disk

use std::path::PathBuf;

use async_trait::async_trait;

use super::TemplateSource;
use crate::config::DocumentConfig;
use crate::error::TemplateError;
use crate::pages::PageId;

/// Reads `<name>_<n>.html` from `root`
#[derive(Debug, Clone)]
pub struct DirectoryTemplates {
    root: PathBuf,
    document: DocumentConfig,
}

impl DirectoryTemplates {
    pub fn new(root: impl Into<PathBuf>, document: DocumentConfig) -> Self {
        Self {
            root: root.into(),
            document,
        }
    }

    pub fn path_for(&self, page: PageId) -> PathBuf {
        self.root.join(self.document.file_name(page))
    }
}

#[async_trait]
impl TemplateSource for DirectoryTemplates {
    async fn load(&self, page: PageId) -> Result<String, TemplateError> {
        let path = self.path_for(page);
        match tokio::fs::read_to_string(&path).await {
            Ok(markup) => Ok(markup),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(TemplateError::NotFound(path.display().to_string()))
            }
            Err(e) => Err(TemplateError::Io(e)),
        }
    }
}
