use atelier_model::{
    ComponentDefinition, EditorState, ModePolicy, Node, Project, StaticRegistry, StylePolicy,
};
use atelier_policy::{
    compute_effective_policy, get_group_visibility, inspect_control, Condition, DepRule, Effect,
    RuleRegistry, PROPS_GROUP,
};

fn fixture() -> (EditorState, StaticRegistry) {
    let registry = StaticRegistry::from_definitions(vec![
        ComponentDefinition::new("page"),
        ComponentDefinition::new("text")
            .leaf()
            .with_policy(
                StylePolicy::default()
                    .with_basic(
                        ModePolicy::default()
                            .allow_styles(["color", "font-size", "width", "display"])
                            .allow_props(["content"]),
                    )
                    .with_expert(ModePolicy::default().deny_props(["dangerouslySetHtml"])),
            ),
    ]);

    let text = Node::new("t1", "text")
        .with_style("display", "inline")
        .with_style("color", "red");
    let mut project = Project::new(Node::new("root", "page").with_children(["t1"]));
    project.nodes.insert(text.id.clone(), text);

    (EditorState::new(project), registry)
}

#[test]
fn basic_mode_inspector_for_inline_text() {
    let (state, registry) = fixture();
    let node = state.project.node("t1").unwrap();
    let policy = compute_effective_policy(&state, node, &registry);
    let rules = RuleRegistry::new();

    let color = inspect_control(&policy, &rules, &node.styles, "styles:color");
    assert!(color.visible && !color.disabled);

    let width = inspect_control(&policy, &rules, &node.styles, "styles:width");
    assert!(width.visible);
    assert!(width.disabled);
    assert!(width.warning.is_some());

    let margin = inspect_control(&policy, &rules, &node.styles, "styles:margin-left");
    assert!(!margin.visible);

    assert!(get_group_visibility(&policy, "typography"));
    assert!(!get_group_visibility(&policy, "border"));
    assert!(get_group_visibility(&policy, PROPS_GROUP));
}

#[test]
fn expert_mode_opens_everything_but_denies() {
    let (mut state, registry) = fixture();
    state.ui.expert_mode = true;
    let node = state.project.node("t1").unwrap().clone();
    let policy = compute_effective_policy(&state, &node, &registry);
    let rules = RuleRegistry::empty();

    assert!(inspect_control(&policy, &rules, &node.styles, "styles:margin-left").visible);
    assert!(!inspect_control(&policy, &rules, &node.styles, "props:dangerouslySetHtml").visible);
}

#[test]
fn custom_rule_overrides_builtin_by_priority() {
    let (state, registry) = fixture();
    let node = state.project.node("t1").unwrap();
    let policy = compute_effective_policy(&state, node, &registry);

    let mut rules = RuleRegistry::new();
    rules.add_rule(
        DepRule::new("allow-inline-width", Condition::equals("display", "inline"))
            .targets(["width"])
            .effect(Effect::Disable(false))
            .priority(100),
    );

    let width = inspect_control(&policy, &rules, &node.styles, "styles:width");
    assert!(!width.disabled);
    // The built-in warning still applies
    assert!(width.warning.is_some());
}

#[test]
fn props_are_untouched_by_style_rules() {
    let (state, registry) = fixture();
    let node = state.project.node("t1").unwrap();
    let policy = compute_effective_policy(&state, node, &registry);
    let mut rules = RuleRegistry::new();
    rules.add_rule(
        DepRule::new("content-needs-block", Condition::equals("display", "inline"))
            .targets(["content"])
            .effect(Effect::Hide(true)),
    );

    let content = inspect_control(&policy, &rules, &node.styles, "props:content");
    assert!(content.visible);
    assert!(!content.disabled);
    assert!(content.reasons.is_empty());

    assert!(!inspect_control(&policy, &rules, &node.styles, "props:href").visible);
}
