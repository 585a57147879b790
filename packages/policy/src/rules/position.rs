use super::{Condition, DepRule, Effect};

/// Offsets only apply to positioned elements
pub fn static_position_offsets() -> DepRule {
    DepRule::new(
        "static-position-offsets",
        Condition::none_of("position", ["relative", "absolute", "fixed", "sticky"]),
    )
    .targets(["top", "right", "bottom", "left", "z-index"])
    .effect(Effect::Disable(true))
    .reason("offsets require position other than static")
    .priority(10)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::evaluate;
    use atelier_model::StyleMap;

    #[test]
    fn test_offsets_disabled_until_positioned() {
        let rules = [static_position_offsets()];
        let mut styles = StyleMap::new();

        assert!(evaluate(&styles, &rules, Some("top")).disabled);

        styles.insert("position".into(), "static".into());
        assert!(evaluate(&styles, &rules, Some("z-index")).disabled);

        styles.insert("position".into(), "absolute".into());
        assert!(!evaluate(&styles, &rules, Some("top")).disabled);
    }
}
