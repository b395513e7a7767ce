//! Regex-backed field locator

use lazy_static::lazy_static;
use regex::Regex;

use super::{FieldLocator, FieldPattern, Slot, SlotKind};
use crate::error::RenderError;

lazy_static! {
    /// Closing tags, then one empty container. Group 1 is the container body.
    static ref ADJACENT_SLOT: Regex = Regex::new(
        r"\A(?:\s*</[a-zA-Z0-9]+>)*\s*<(?:div|span|td)(?:\s[^>]*)?>(\s*)</(?:div|span|td)>"
    )
    .unwrap();

    /// Markup-only gap, then one to three nested empty divs. Group 1 is the
    /// innermost body.
    static ref NESTED_SLOT: Regex = Regex::new(
        r"\A(?:\s*<[^>]+>)*?\s*<div(?:\s[^>]*)?>(?:\s*<div(?:\s[^>]*)?>){0,2}(\s*)</div>"
    )
    .unwrap();
}

/// Locates slots with the label regex followed by an anchored slot regex
#[derive(Debug, Clone, Copy, Default)]
pub struct RegexLocator;

impl FieldLocator for RegexLocator {
    fn locate(
        &self,
        page: &str,
        field: &str,
        pattern: &FieldPattern,
    ) -> Result<Option<Slot>, RenderError> {
        let Some(label) = pattern.label_regex().find(page) else {
            return Ok(None);
        };
        let tail = &page[label.end()..];

        let range = match pattern.slot() {
            SlotKind::Inline { terminator } => {
                let gap = tail.len() - tail.trim_start().len();
                if tail[gap..].starts_with(terminator.as_str()) {
                    Some(0..gap + terminator.len())
                } else {
                    None
                }
            }
            SlotKind::Adjacent => ADJACENT_SLOT
                .captures(tail)
                .and_then(|caps| caps.get(1))
                .map(|body| body.range()),
            SlotKind::Nested => NESTED_SLOT
                .captures(tail)
                .and_then(|caps| caps.get(1))
                .map(|body| body.range()),
        };

        match range {
            Some(range) => Ok(Some(Slot {
                range: label.end() + range.start..label.end() + range.end,
                kind: pattern.slot().clone(),
            })),
            None => Err(RenderError::MalformedTemplate {
                field: field.to_string(),
                label: pattern.label().to_string(),
                expected: pattern.slot().to_string(),
            }),
        }
    }
}
