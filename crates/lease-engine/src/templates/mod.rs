//! Template sources: where page markup comes from

pub mod directory;
pub mod embedded;

pub use directory::DirectoryTemplates;
pub use embedded::EmbeddedTemplates;

use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::TemplateError;
use crate::pages::PageId;

/// Supplies the pristine markup of a page
#[async_trait]
pub trait TemplateSource: Send + Sync {
    async fn load(&self, page: PageId) -> Result<String, TemplateError>;
}

/// In-memory template set
#[derive(Debug, Clone, Default)]
pub struct MemoryTemplates {
    pages: HashMap<PageId, String>,
}

impl MemoryTemplates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, page: PageId, markup: impl Into<String>) -> Self {
        self.pages.insert(page, markup.into());
        self
    }
}

#[async_trait]
impl TemplateSource for MemoryTemplates {
    async fn load(&self, page: PageId) -> Result<String, TemplateError> {
        self.pages
            .get(&page)
            .cloned()
            .ok_or_else(|| TemplateError::NotFound(page.to_string()))
    }
}
