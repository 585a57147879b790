use super::{Condition, DepRule, Effect};

/// Applies to every control: editing is allowed but nothing is rendered
pub fn display_none_notice() -> DepRule {
    DepRule::new("display-none-notice", Condition::equals("display", "none"))
        .effect(Effect::Warn(
            "This element is not rendered while display is none.".to_string(),
        ))
        .reason("display:none")
        .priority(20)
}
