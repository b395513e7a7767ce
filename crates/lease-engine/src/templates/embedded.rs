//! Embedded template loader
//!
//! This module loads the lease pages from the crate's `templates/` directory
//! at compile time, embedding them directly in the binary.

use async_trait::async_trait;

use super::TemplateSource;
use crate::error::TemplateError;
use crate::pages::PageId;

/// Page 1 - parties, property, money terms, period
const PAGE_1: &str = include_str!("../../templates/House_Lease_Agreement_1.html");

/// Page 2 - clauses and special terms
const PAGE_2: &str = include_str!("../../templates/House_Lease_Agreement_2.html");

/// Page 3 - signatures
const PAGE_3: &str = include_str!("../../templates/House_Lease_Agreement_3.html");

/// Page 4 - legal notices
const PAGE_4: &str = include_str!("../../templates/House_Lease_Agreement_4.html");

/// Page 5 - renewal refusal notice
const PAGE_5: &str = include_str!("../../templates/House_Lease_Agreement_5.html");

/// Get an embedded page by number
pub fn get_embedded_page(page: PageId) -> Option<&'static str> {
    match page.0 {
        1 => Some(PAGE_1),
        2 => Some(PAGE_2),
        3 => Some(PAGE_3),
        4 => Some(PAGE_4),
        5 => Some(PAGE_5),
        _ => None,
    }
}

/// The house lease pages compiled into the binary
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedTemplates;

#[async_trait]
impl TemplateSource for EmbeddedTemplates {
    async fn load(&self, page: PageId) -> Result<String, TemplateError> {
        get_embedded_page(page)
            .map(str::to_string)
            .ok_or_else(|| TemplateError::NotFound(page.to_string()))
    }
}
