//! Plain text substitution

use std::borrow::Cow;

use super::RenderContext;
use crate::error::RenderError;
use crate::locator::{locate_and_replace, FieldPattern, Slot, SlotKind};

/// Escape the characters that would otherwise be parsed as markup
pub fn escape_html(value: &str) -> Cow<'_, str> {
    if !value.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(value);
    }

    let mut escaped = String::with_capacity(value.len() + 8);
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    Cow::Owned(escaped)
}

/// Render already-escaped markup into a located slot.
///
/// `existing` is the slot's current text; for inline slots it holds the
/// terminator, which is kept after the value.
pub fn fill_slot(slot: &Slot, existing: &str, markup: &str, value_class: &str) -> String {
    match slot.kind {
        SlotKind::Inline { .. } => format!(" {}{}", markup, existing.trim_start()),
        SlotKind::Adjacent => markup.to_string(),
        SlotKind::Nested => format!(r#"<span class="{}">{}</span>"#, value_class, markup),
    }
}

pub(crate) fn render_text(
    page: String,
    field: &str,
    pattern: &FieldPattern,
    value: &str,
    multiline: bool,
    ctx: &RenderContext<'_>,
) -> Result<String, RenderError> {
    let escaped = escape_html(value);
    let markup = if multiline {
        escaped
            .lines()
            .map(str::trim_end)
            .collect::<Vec<_>>()
            .join("<br/>")
    } else {
        escaped.into_owned()
    };

    let updated = locate_and_replace(page, field, pattern, ctx.locator, |slot, existing| {
        fill_slot(slot, existing, &markup, ctx.value_class)
    })?;
    tracing::debug!(field, "Text field rendered");
    Ok(updated)
}
