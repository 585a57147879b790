use super::{Condition, DepRule, Effect};

pub const INLINE_SIZING_WARNING: &str =
    "Width and height have no effect on inline elements. Use block or inline-block instead.";

const SIZING_KEYS: &[&str] = &[
    "width",
    "height",
    "min-width",
    "min-height",
    "max-width",
    "max-height",
];

/// `display: inline` ignores box sizing
pub fn inline_disallow_sizing() -> DepRule {
    DepRule::new("inline-disallow-sizing", Condition::equals("display", "inline"))
        .targets(SIZING_KEYS.iter().copied())
        .effect(Effect::Disable(true))
        .effect(Effect::Warn(INLINE_SIZING_WARNING.to_string()))
        .reason("display:inline ignores width/height")
        .priority(10)
}

/// Vertical margins stay editable on inline elements but do not move lines
pub fn inline_vertical_margin() -> DepRule {
    DepRule::new("inline-vertical-margin", Condition::equals("display", "inline"))
        .targets(["margin-top", "margin-bottom"])
        .effect(Effect::Warn(
            "Vertical margins do not affect the layout of inline elements.".to_string(),
        ))
        .reason("display:inline ignores vertical margins")
        .priority(5)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::evaluate;
    use atelier_model::StyleMap;

    #[test]
    fn test_vertical_margin_warns_without_disabling() {
        let mut styles = StyleMap::new();
        styles.insert("display".into(), "inline".into());

        let outcome = evaluate(&styles, &[inline_vertical_margin()], Some("margin-top"));
        assert!(!outcome.disabled);
        assert!(outcome.warning.is_some());

        let outcome = evaluate(&styles, &[inline_vertical_margin()], Some("margin-left"));
        assert!(outcome.warning.is_none());
    }

    #[test]
    fn test_inline_block_keeps_sizing() {
        let mut styles = StyleMap::new();
        styles.insert("display".into(), "inline-block".into());

        let outcome = evaluate(&styles, &[inline_disallow_sizing()], Some("height"));
        assert!(!outcome.disabled);
    }
}
