//! Field renderers
//!
//! Every page is described by an ordered list of [`FieldRule`]s. A rule reads
//! its field(s) from the record and mutates the page text through the
//! [`FieldLocator`]. Rules whose field is absent leave the page untouched.

pub mod checkbox;
pub mod date;
pub mod money;
pub mod signature;
pub mod text;

pub use checkbox::CheckboxGroup;
pub use date::DatePattern;
pub use signature::PartyRole;

use crate::error::RenderError;
use crate::locator::{FieldLocator, FieldPattern};
use crate::record::ContractRecord;

/// Inputs shared by every rule on a page
pub struct RenderContext<'a> {
    pub record: &'a ContractRecord,
    pub locator: &'a dyn FieldLocator,
    /// CSS class of the span wrapping values written into nested slots
    pub value_class: &'a str,
}

/// Precondition for a guarded rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Guard {
    /// The field is present
    Present(&'static str),
    /// The field holds the given tag
    Equals(&'static str, &'static str),
}

impl Guard {
    fn holds(&self, record: &ContractRecord) -> bool {
        match self {
            Guard::Present(field) => record.contains(field),
            Guard::Equals(field, tag) => record.tag(field) == Some(tag),
        }
    }
}

/// One declarative field substitution
#[derive(Debug, Clone)]
pub enum FieldRule {
    /// Plain text value
    Text {
        field: &'static str,
        pattern: FieldPattern,
        multiline: bool,
    },
    /// Amount with separators, optionally followed by its native numeral spelling
    Money {
        field: &'static str,
        pattern: FieldPattern,
        with_numerals: bool,
    },
    /// Date written into every blank date following the anchor
    Date {
        field: &'static str,
        pattern: DatePattern,
    },
    /// Mutually exclusive checkbox options
    Checkbox(CheckboxGroup),
    /// Party identity block
    Signature(PartyRole),
    /// Rule applied only when the guard holds
    Guarded { guard: Guard, rule: Box<FieldRule> },
}

impl FieldRule {
    pub fn text(field: &'static str, pattern: FieldPattern) -> Self {
        FieldRule::Text {
            field,
            pattern,
            multiline: false,
        }
    }

    pub fn multiline(field: &'static str, pattern: FieldPattern) -> Self {
        FieldRule::Text {
            field,
            pattern,
            multiline: true,
        }
    }

    pub fn money(field: &'static str, pattern: FieldPattern) -> Self {
        FieldRule::Money {
            field,
            pattern,
            with_numerals: true,
        }
    }

    pub fn money_plain(field: &'static str, pattern: FieldPattern) -> Self {
        FieldRule::Money {
            field,
            pattern,
            with_numerals: false,
        }
    }

    pub fn date(field: &'static str, pattern: DatePattern) -> Self {
        FieldRule::Date { field, pattern }
    }

    /// Wrap this rule so it only runs when `guard` holds
    pub fn when(self, guard: Guard) -> Self {
        FieldRule::Guarded {
            guard,
            rule: Box::new(self),
        }
    }

    /// Apply the rule to the page text
    pub fn apply(&self, page: String, ctx: &RenderContext<'_>) -> Result<String, RenderError> {
        match self {
            FieldRule::Text {
                field,
                pattern,
                multiline,
            } => match ctx.record.text(field) {
                Some(value) => text::render_text(page, field, pattern, &value, *multiline, ctx),
                None => Ok(page),
            },
            FieldRule::Money {
                field,
                pattern,
                with_numerals,
            } => match ctx.record.amount(field)? {
                Some(amount) => {
                    money::render_money(page, field, pattern, amount, *with_numerals, ctx)
                }
                None => Ok(page),
            },
            FieldRule::Date { field, pattern } => match ctx.record.date(field)? {
                Some(date) => Ok(pattern.apply(page, field, date)),
                None => Ok(page),
            },
            FieldRule::Checkbox(group) => group.apply(page, ctx.record),
            FieldRule::Signature(role) => role.apply(page, ctx),
            FieldRule::Guarded { guard, rule } => {
                if guard.holds(ctx.record) {
                    rule.apply(page, ctx)
                } else {
                    Ok(page)
                }
            }
        }
    }
}

/// Run a renderer chain over one page
pub fn render_page(
    page: String,
    rules: &[FieldRule],
    ctx: &RenderContext<'_>,
) -> Result<String, RenderError> {
    rules.iter().try_fold(page, |page, rule| rule.apply(page, ctx))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locator::RegexLocator;
    use pretty_assertions::assert_eq;

    const MONEY_ROWS: &str = concat!(
        r#"<span class="hrt cs1">보증금</span></div><div class="hcI"><span class="hrt cs1">금             원정</span></div>"#,
        r#"<span class="hrt cs1">계약금</span></div><div class="hcI"><span class="hrt cs1">금             원정은 계약시에 지불한다.</span></div>"#,
    );

    fn ctx(record: &ContractRecord) -> RenderContext<'_> {
        RenderContext {
            record,
            locator: &RegexLocator,
            value_class: "hrt cs106",
        }
    }

    fn deposit_rule() -> FieldRule {
        FieldRule::money(
            "deposit",
            FieldPattern::inline(r">\s*보증금\s*<.*?>\s*금", "원정").unwrap(),
        )
    }

    fn contract_money_rule() -> FieldRule {
        FieldRule::money(
            "contract_money",
            FieldPattern::inline(r">\s*계약금\s*<.*?>\s*금", "원정").unwrap(),
        )
    }

    #[test]
    fn test_disjoint_rules_commute() {
        let record = ContractRecord::new()
            .with("deposit", 50_000_000)
            .with("contract_money", 5_000_000);
        let ctx = ctx(&record);

        let forward = render_page(
            MONEY_ROWS.to_string(),
            &[deposit_rule(), contract_money_rule()],
            &ctx,
        )
        .unwrap();
        let reverse = render_page(
            MONEY_ROWS.to_string(),
            &[contract_money_rule(), deposit_rule()],
            &ctx,
        )
        .unwrap();

        assert_eq!(forward, reverse);
        assert!(forward.contains("금 50,000,000원정(₩ 오천만)"));
        assert!(forward.contains("금 5,000,000원정(₩ 오백만)은 계약시에"));
    }

    #[test]
    fn test_guard_skips_rule() {
        let record = ContractRecord::new()
            .with("repair_needed", "none")
            .with("repair_content", "도배");
        let rule = FieldRule::text(
            "repair_content",
            FieldPattern::inline(r"수리할 내용\s*:", ")").unwrap(),
        )
        .when(Guard::Equals("repair_needed", "has"));
        let page = "(수리할 내용:        )".to_string();

        assert_eq!(rule.apply(page.clone(), &ctx(&record)).unwrap(), page);
    }

    #[test]
    fn test_guard_runs_rule() {
        let record = ContractRecord::new()
            .with("repair_needed", "has")
            .with("repair_content", "도배");
        let rule = FieldRule::text(
            "repair_content",
            FieldPattern::inline(r"수리할 내용\s*:", ")").unwrap(),
        )
        .when(Guard::Equals("repair_needed", "has"));

        let page = rule
            .apply("(수리할 내용:        )".to_string(), &ctx(&record))
            .unwrap();
        assert_eq!(page, "(수리할 내용: 도배)");
    }

    #[test]
    fn test_invalid_amount_fails() {
        let record = ContractRecord::new().with("deposit", "일억");
        let err = render_page(MONEY_ROWS.to_string(), &[deposit_rule()], &ctx(&record))
            .unwrap_err();

        assert!(matches!(err, RenderError::InvalidFieldValue { .. }));
    }
}
