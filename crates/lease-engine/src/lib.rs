//! Lease contract document generation engine
//!
//! This crate fills the fixed HTML pages of the Korean residential lease
//! agreement (주택임대차 표준계약서) from a flat contract record, including:
//! - Label-anchored field location inside page markup
//! - Money rendering with thousands separators and native numeral spelling
//! - Date, checkbox and signature-block substitution
//! - A composer that walks the page set through injected template sources
//!   and output sinks
//!
//! # Example
//! ```no_run
//! use lease_engine::{
//!     ContractRecord, DocumentComposer, EmbeddedTemplates, EngineConfig, MemorySink, PageTable,
//! };
//!
//! # async fn example() -> anyhow::Result<()> {
//! let record = ContractRecord::new()
//!     .with("landlord_name", "김철수")
//!     .with("deposit", 100_000_000);
//!
//! let composer = DocumentComposer::new(
//!     EmbeddedTemplates,
//!     MemorySink::default(),
//!     PageTable::house_lease()?,
//!     EngineConfig::default(),
//! );
//! let documents = composer.generate(&record).await?;
//! println!("Generated {} pages", documents.len());
//! # Ok(())
//! # }
//! ```

pub mod composer;
pub mod config;
pub mod error;
pub mod locator;
pub mod numerals;
pub mod pages;
pub mod record;
pub mod renderers;
pub mod sink;
pub mod templates;

pub use composer::{DocumentComposer, DocumentSet, GeneratedPage};
pub use config::EngineConfig;
pub use error::{GenerationError, RenderError, SinkError, TemplateError};
pub use locator::{FieldLocator, FieldPattern, RegexLocator, Slot, SlotKind};
pub use numerals::{format_amount, number_to_native_numerals};
pub use pages::{PageId, PageSpec, PageTable, ValueClass};
pub use record::{ContractRecord, FieldValue};
pub use sink::{DirectorySink, MemorySink, OutputSink};
pub use templates::{DirectoryTemplates, EmbeddedTemplates, MemoryTemplates, TemplateSource};
