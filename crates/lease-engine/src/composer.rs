//! Document composer
//!
//! Walks the configured pages in order: load the pristine markup, run the
//! page's renderer chain, hand the result to the output sink. The first
//! failure ends the run.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use crate::config::EngineConfig;
use crate::error::{GenerationError, RenderError};
use crate::locator::{FieldLocator, RegexLocator};
use crate::pages::{PageId, PageTable};
use crate::record::ContractRecord;
use crate::renderers::{render_page, RenderContext};
use crate::sink::OutputSink;
use crate::templates::TemplateSource;

/// One populated page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedPage {
    pub page: PageId,
    pub text: String,
}

/// Populated pages in generation order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSet {
    pages: Vec<GeneratedPage>,
}

impl DocumentSet {
    pub fn push(&mut self, page: PageId, text: String) {
        self.pages.push(GeneratedPage { page, text });
    }

    pub fn page(&self, id: PageId) -> Option<&str> {
        self.pages
            .iter()
            .find(|generated| generated.page == id)
            .map(|generated| generated.text.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &GeneratedPage> {
        self.pages.iter()
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

impl IntoIterator for DocumentSet {
    type Item = GeneratedPage;
    type IntoIter = std::vec::IntoIter<GeneratedPage>;

    fn into_iter(self) -> Self::IntoIter {
        self.pages.into_iter()
    }
}

/// Generates a document set from a contract record
pub struct DocumentComposer<S, O> {
    source: S,
    sink: O,
    table: PageTable,
    locator: Arc<dyn FieldLocator>,
    config: EngineConfig,
    cancel: CancellationToken,
}

impl<S, O> DocumentComposer<S, O>
where
    S: TemplateSource,
    O: OutputSink,
{
    pub fn new(source: S, sink: O, table: PageTable, config: EngineConfig) -> Self {
        Self {
            source,
            sink,
            table,
            locator: Arc::new(RegexLocator),
            config,
            cancel: CancellationToken::new(),
        }
    }

    /// Replace the field locator
    pub fn with_locator(mut self, locator: Arc<dyn FieldLocator>) -> Self {
        self.locator = locator;
        self
    }

    /// Stop the run at the next page boundary once `token` is cancelled
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn sink(&self) -> &O {
        &self.sink
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run the renderer chain of `page` over `markup`. Pages without a
    /// chain come back unchanged.
    pub fn render_page(
        &self,
        page: PageId,
        markup: String,
        record: &ContractRecord,
    ) -> Result<String, RenderError> {
        let Some(spec) = self.table.get(page) else {
            debug!(%page, "No renderer chain, page passed through");
            return Ok(markup);
        };

        let ctx = RenderContext {
            record,
            locator: self.locator.as_ref(),
            value_class: self.config.render.class_for(spec.value_class),
        };
        render_page(markup, &spec.rules, &ctx)
    }

    /// Generate every configured page.
    ///
    /// Pages are processed sequentially. Each one is emitted to the sink as
    /// soon as it renders; the returned set holds all of them in order.
    ///
    /// # Errors
    /// - `TemplateLoad` - the source could not supply a page
    /// - `Render` - a renderer failed; no document set is returned
    /// - `OutputSink` - a rendered page could not be delivered; pages
    ///   delivered before it are attached
    /// - `Cancelled` - the token fired between pages; nothing further is
    ///   loaded or emitted
    #[instrument(skip_all, fields(fields = record.len()))]
    pub async fn generate(&self, record: &ContractRecord) -> Result<DocumentSet, GenerationError> {
        info!(
            document = %self.config.document.name,
            pages = self.config.document.pages.len(),
            "Generating contract documents"
        );
        let mut documents = DocumentSet::default();

        for &page in &self.config.document.pages {
            if self.cancel.is_cancelled() {
                warn!(%page, "Generation cancelled");
                return Err(GenerationError::Cancelled { page });
            }

            let markup = self.source.load(page).await.map_err(|source| {
                warn!(%page, error = %source, "Template load failed");
                GenerationError::TemplateLoad { page, source }
            })?;

            let rendered = self.render_page(page, markup, record).map_err(|source| {
                warn!(%page, error = %source, "Render failed");
                GenerationError::Render { page, source }
            })?;

            if self.cancel.is_cancelled() {
                warn!(%page, "Generation cancelled");
                return Err(GenerationError::Cancelled { page });
            }

            if let Err(source) = self.sink.emit(page, &rendered).await {
                warn!(%page, error = %source, "Output sink failed");
                return Err(GenerationError::OutputSink {
                    page,
                    source,
                    delivered: documents,
                });
            }

            debug!(%page, bytes = rendered.len(), "Page generated");
            documents.push(page, rendered);
        }

        info!(pages = documents.len(), "Contract documents generated");
        Ok(documents)
    }
}
