use atelier_model::{ModePolicy, PolicyMode, StyleMap, StylePolicy};
use atelier_policy::{inspect_control, resolve_layers, RuleRegistry, STYLE_GROUPS};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn styles(pairs: &[(&str, &str)]) -> StyleMap {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn evaluate_single_control(c: &mut Criterion) {
    let registry = RuleRegistry::new();
    let values = styles(&[("display", "inline"), ("position", "static")]);

    c.bench_function("evaluate_single_control", |b| {
        b.iter(|| registry.evaluate(black_box(&values), Some(black_box("width"))))
    });
}

fn evaluate_full_inspector(c: &mut Criterion) {
    let registry = RuleRegistry::new();
    let values = styles(&[
        ("display", "flex"),
        ("position", "relative"),
        ("border-style", "solid"),
        ("background-image", "url(/hero.png)"),
    ]);
    let keys: Vec<&str> = STYLE_GROUPS
        .iter()
        .flat_map(|group| group.controls.iter().copied())
        .collect();

    c.bench_function("evaluate_full_inspector", |b| {
        b.iter(|| registry.evaluate_keys(black_box(&values), keys.iter().copied()))
    });
}

fn inspect_with_layered_policy(c: &mut Criterion) {
    let definition = StylePolicy::default().with_basic(
        ModePolicy::default()
            .allow_styles(["color", "width", "height", "display", "margin-top"])
            .deny_props(["href"]),
    );
    let project = StylePolicy::default().with_basic(ModePolicy::default().deny_styles(["height"]));
    let registry = RuleRegistry::new();
    let values = styles(&[("display", "inline")]);

    c.bench_function("inspect_with_layered_policy", |b| {
        b.iter(|| {
            let policy = resolve_layers(&[&definition, &project], PolicyMode::Basic);
            inspect_control(&policy, &registry, black_box(&values), black_box("styles:width"))
        })
    });
}

criterion_group!(
    benches,
    evaluate_single_control,
    evaluate_full_inspector,
    inspect_with_layered_policy
);
criterion_main!(benches);
