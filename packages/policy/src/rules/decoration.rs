use super::{Condition, DepRule, Effect};

/// Image-specific background controls need an image
pub fn background_image_details() -> DepRule {
    DepRule::new(
        "background-image-details",
        Condition::any(vec![
            Condition::absent("background-image"),
            Condition::equals("background-image", "none"),
        ]),
    )
    .targets([
        "background-size",
        "background-position",
        "background-repeat",
        "background-attachment",
    ])
    .effect(Effect::Hide(true))
    .reason("no background image set")
}

/// Border width and colour render only with a visible border style
pub fn border_style_none() -> DepRule {
    DepRule::new(
        "border-style-none",
        Condition::any(vec![
            Condition::absent("border-style"),
            Condition::one_of("border-style", ["none", "hidden"]),
        ]),
    )
    .targets(["border-width", "border-color"])
    .effect(Effect::Disable(true))
    .effect(Effect::Warn("Choose a border style to edit width and colour.".to_string()))
    .reason("border-style is none")
}
