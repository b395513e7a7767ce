//! Field location inside page markup
//!
//! A field is found by its label, then by the next empty insertion slot of
//! the shape its [`SlotKind`] describes. Renderers only talk to the
//! [`FieldLocator`] trait, so the matching strategy can change without
//! touching them.

pub mod regex_locator;

pub use regex_locator::RegexLocator;

use std::fmt;
use std::ops::Range;

use regex::Regex;

use crate::error::RenderError;

/// Where the value goes relative to the label
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotKind {
    /// Directly after the label, before a literal terminator such as `원정`
    Inline { terminator: String },
    /// Inside a single empty container separated from the label only by
    /// closing tags
    Adjacent,
    /// Inside the innermost of up to three nested empty `div` containers,
    /// separated from the label by markup only
    Nested,
}

impl SlotKind {
    pub fn inline(terminator: impl Into<String>) -> Self {
        SlotKind::Inline {
            terminator: terminator.into(),
        }
    }
}

impl fmt::Display for SlotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotKind::Inline { terminator } => write!(f, "inline '{}'", terminator),
            SlotKind::Adjacent => write!(f, "adjacent container"),
            SlotKind::Nested => write!(f, "nested container"),
        }
    }
}

/// Label expression plus the slot shape expected after it
#[derive(Debug, Clone)]
pub struct FieldPattern {
    label: Regex,
    slot: SlotKind,
}

impl FieldPattern {
    /// Compile a label pattern. `.` matches newlines so labels may span
    /// intervening markup.
    pub fn new(label: &str, slot: SlotKind) -> Result<Self, RenderError> {
        let label = Regex::new(&format!("(?s){}", label)).map_err(|e| {
            RenderError::InvalidPattern {
                pattern: label.to_string(),
                message: e.to_string(),
            }
        })?;
        Ok(Self { label, slot })
    }

    pub fn inline(label: &str, terminator: &str) -> Result<Self, RenderError> {
        Self::new(label, SlotKind::inline(terminator))
    }

    pub fn adjacent(label: &str) -> Result<Self, RenderError> {
        Self::new(label, SlotKind::Adjacent)
    }

    pub fn nested(label: &str) -> Result<Self, RenderError> {
        Self::new(label, SlotKind::Nested)
    }

    pub fn label_regex(&self) -> &Regex {
        &self.label
    }

    /// Label source without the `(?s)` prefix
    pub fn label(&self) -> &str {
        self.label.as_str().trim_start_matches("(?s)")
    }

    pub fn slot(&self) -> &SlotKind {
        &self.slot
    }
}

/// A located insertion slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    /// Byte range replaced by the rendered value. For inline slots this
    /// covers the whitespace and terminator after the label.
    pub range: Range<usize>,
    pub kind: SlotKind,
}

/// Finds insertion slots for labeled fields
pub trait FieldLocator: Send + Sync {
    /// Locate the slot for the first occurrence of the pattern's label.
    ///
    /// Returns `Ok(None)` when the label does not occur, and
    /// `RenderError::MalformedTemplate` when it occurs without the expected
    /// slot after it.
    fn locate(
        &self,
        page: &str,
        field: &str,
        pattern: &FieldPattern,
    ) -> Result<Option<Slot>, RenderError>;
}

/// Locate a field and splice in the rendered replacement for its slot.
///
/// `render` receives the slot and its current text. A missing label returns
/// the page unchanged.
pub fn locate_and_replace<F>(
    page: String,
    field: &str,
    pattern: &FieldPattern,
    locator: &dyn FieldLocator,
    render: F,
) -> Result<String, RenderError>
where
    F: FnOnce(&Slot, &str) -> String,
{
    let Some(slot) = locator.locate(&page, field, pattern)? else {
        tracing::debug!(field, label = pattern.label(), "Label not found, field skipped");
        return Ok(page);
    };

    let replacement = render(&slot, &page[slot.range.clone()]);
    let mut updated = String::with_capacity(page.len() + replacement.len());
    updated.push_str(&page[..slot.range.start]);
    updated.push_str(&replacement);
    updated.push_str(&page[slot.range.end..]);
    Ok(updated)
}
