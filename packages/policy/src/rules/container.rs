use super::{Condition, DepRule, Effect};

const FLEX_DISPLAYS: &[&str] = &["flex", "inline-flex"];
const GRID_DISPLAYS: &[&str] = &["grid", "inline-grid"];

/// Flex container properties only show on flex containers
pub fn flex_container_props() -> DepRule {
    DepRule::new(
        "flex-container-props",
        Condition::none_of("display", FLEX_DISPLAYS.iter().copied()),
    )
    .targets([
        "flex-direction",
        "flex-wrap",
        "justify-content",
        "align-items",
        "align-content",
    ])
    .effect(Effect::Hide(true))
    .reason("flex container properties require display:flex")
}

/// Grid container properties only show on grid containers
pub fn grid_container_props() -> DepRule {
    DepRule::new(
        "grid-container-props",
        Condition::none_of("display", GRID_DISPLAYS.iter().copied()),
    )
    .targets([
        "grid-template-columns",
        "grid-template-rows",
        "grid-auto-flow",
        "justify-items",
    ])
    .effect(Effect::Hide(true))
    .reason("grid container properties require display:grid")
}

/// Gaps need a flex or grid container
pub fn gap_requires_container() -> DepRule {
    DepRule::new(
        "gap-requires-container",
        Condition::none_of(
            "display",
            FLEX_DISPLAYS.iter().chain(GRID_DISPLAYS).copied(),
        ),
    )
    .targets(["gap", "row-gap", "column-gap"])
    .effect(Effect::Disable(true))
    .reason("gap requires display:flex or display:grid")
}
