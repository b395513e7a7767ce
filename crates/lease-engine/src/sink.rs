//! Output sinks: where populated pages go

use std::path::PathBuf;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::composer::GeneratedPage;
use crate::config::DocumentConfig;
use crate::error::SinkError;
use crate::pages::PageId;

/// Receives each populated page once it has rendered
#[async_trait]
pub trait OutputSink: Send + Sync {
    async fn emit(&self, page: PageId, markup: &str) -> Result<(), SinkError>;
}

/// Writes `<name>_<n>.html` into `out_dir`, creating it when needed
#[derive(Debug, Clone)]
pub struct DirectorySink {
    out_dir: PathBuf,
    document: DocumentConfig,
}

impl DirectorySink {
    pub fn new(out_dir: impl Into<PathBuf>, document: DocumentConfig) -> Self {
        Self {
            out_dir: out_dir.into(),
            document,
        }
    }

    pub fn path_for(&self, page: PageId) -> PathBuf {
        self.out_dir.join(self.document.file_name(page))
    }
}

#[async_trait]
impl OutputSink for DirectorySink {
    async fn emit(&self, page: PageId, markup: &str) -> Result<(), SinkError> {
        tokio::fs::create_dir_all(&self.out_dir).await?;
        let path = self.path_for(page);
        tokio::fs::write(&path, markup).await?;
        tracing::info!(path = %path.display(), "Page written");
        Ok(())
    }
}

/// Collects emitted pages in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    pages: Mutex<Vec<GeneratedPage>>,
}

impl MemorySink {
    /// Pages emitted so far, in emission order
    pub fn pages(&self) -> Vec<GeneratedPage> {
        match self.pages.lock() {
            Ok(pages) => pages.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

#[async_trait]
impl OutputSink for MemorySink {
    async fn emit(&self, page: PageId, markup: &str) -> Result<(), SinkError> {
        let mut pages = self
            .pages
            .lock()
            .map_err(|_| SinkError::Rejected("memory sink poisoned".to_string()))?;
        pages.push(GeneratedPage {
            page,
            text: markup.to_string(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_directory_sink_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let out_dir = dir.path().join("nested/out");
        let sink = DirectorySink::new(&out_dir, DocumentConfig::default());

        sink.emit(PageId(3), "<p>3</p>").await.unwrap();

        let written =
            std::fs::read_to_string(out_dir.join("House_Lease_Agreement_3.html")).unwrap();
        assert_eq!(written, "<p>3</p>");
    }

    #[tokio::test]
    async fn test_memory_sink_pages_survive_poisoned_lock() {
        let sink = std::sync::Arc::new(MemorySink::default());
        sink.emit(PageId(1), "a").await.unwrap();

        let holder = sink.clone();
        let _ = std::thread::spawn(move || {
            let _guard = holder.pages.lock().unwrap();
            panic!("poison the lock");
        })
        .join();

        assert!(sink.pages.is_poisoned());
        assert_eq!(sink.pages().len(), 1);
        assert!(matches!(
            sink.emit(PageId(2), "b").await,
            Err(SinkError::Rejected(_))
        ));
    }

    #[tokio::test]
    async fn test_memory_sink_keeps_order() {
        let sink = MemorySink::default();
        sink.emit(PageId(2), "b").await.unwrap();
        sink.emit(PageId(1), "a").await.unwrap();

        let ids: Vec<PageId> = sink.pages().iter().map(|p| p.page).collect();
        assert_eq!(ids, vec![PageId(2), PageId(1)]);
    }
}
