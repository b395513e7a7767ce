//! Mutually exclusive checkbox groups toggled by glyph

use crate::error::RenderError;
use crate::record::ContractRecord;

pub const UNCHECKED: char = '☐';
pub const CHECKED: char = '☑';

/// A set of options of which at most one is checked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckboxGroup {
    /// Record field holding the selected tag
    pub field: &'static str,
    /// `(tag, option text)` pairs; the text follows the glyph and a space
    pub options: &'static [(&'static str, &'static str)],
}

impl CheckboxGroup {
    pub const fn new(
        field: &'static str,
        options: &'static [(&'static str, &'static str)],
    ) -> Self {
        Self { field, options }
    }

    /// Check the option selected by the record, unchecking its siblings
    pub fn apply(&self, page: String, record: &ContractRecord) -> Result<String, RenderError> {
        let Some(tag) = record.tag(self.field) else {
            if let Some(value) = record.text(self.field) {
                return Err(self.invalid(&value));
            }
            return Ok(page);
        };

        let Some((_, selected)) = self.options.iter().find(|(option, _)| *option == tag) else {
            return Err(self.invalid(tag));
        };

        let mut page = page;
        for (_, text) in self.options {
            page = page.replace(&glyph(CHECKED, text), &glyph(UNCHECKED, text));
        }

        let unchecked = glyph(UNCHECKED, selected);
        if !page.contains(&unchecked) {
            tracing::debug!(field = self.field, option = selected, "Checkbox option not found, field skipped");
            return Ok(page);
        }

        tracing::debug!(field = self.field, option = selected, "Checkbox toggled");
        Ok(page.replacen(&unchecked, &glyph(CHECKED, selected), 1))
    }

    fn invalid(&self, value: &str) -> RenderError {
        RenderError::InvalidFieldValue {
            field: self.field.to_string(),
            value: value.to_string(),
        }
    }
}

fn glyph(mark: char, text: &str) -> String {
    format!("{} {}", mark, text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const CONTRACT_TYPE: CheckboxGroup = CheckboxGroup::new(
        "contract_type",
        &[
            ("new", "신규 계약"),
            ("renewal", "합의에 의한 재계약"),
            ("extension", "계약갱신요구권 행사에 의한 갱신계약"),
        ],
    );

    const PAGE: &str =
        "<span>☐ 신규 계약</span> <span>☐ 합의에 의한 재계약</span> <span>☐ 계약갱신요구권 행사에 의한 갱신계약</span>";

    fn record(tag: &str) -> ContractRecord {
        ContractRecord::new().with("contract_type", tag)
    }

    #[test]
    fn test_exactly_one_option_checked() {
        let updated = CONTRACT_TYPE.apply(PAGE.to_string(), &record("renewal")).unwrap();

        assert_eq!(updated.matches(CHECKED).count(), 1);
        assert!(updated.contains("☑ 합의에 의한 재계약"));
        assert!(updated.contains("☐ 신규 계약"));
        assert!(updated.contains("☐ 계약갱신요구권"));
    }

    #[test]
    fn test_checked_sibling_is_reset() {
        let page = PAGE.replace("☐ 신규 계약", "☑ 신규 계약");
        let updated = CONTRACT_TYPE.apply(page, &record("extension")).unwrap();

        assert_eq!(updated.matches(CHECKED).count(), 1);
        assert!(updated.contains("☑ 계약갱신요구권 행사에 의한 갱신계약"));
    }

    #[test]
    fn test_unknown_tag_is_invalid() {
        let err = CONTRACT_TYPE.apply(PAGE.to_string(), &record("sublease")).unwrap_err();
        assert_eq!(
            err,
            RenderError::InvalidFieldValue {
                field: "contract_type".to_string(),
                value: "sublease".to_string(),
            }
        );
    }

    #[test]
    fn test_absent_field_leaves_page() {
        let updated = CONTRACT_TYPE
            .apply(PAGE.to_string(), &ContractRecord::new())
            .unwrap();
        assert_eq!(updated, PAGE);
    }

    #[test]
    fn test_other_groups_untouched() {
        let page = format!("{} <span>☑ 전세</span>", PAGE);
        let updated = CONTRACT_TYPE.apply(page, &record("new")).unwrap();

        assert!(updated.contains("☑ 전세"));
        assert!(updated.contains("☑ 신규 계약"));
    }
}
