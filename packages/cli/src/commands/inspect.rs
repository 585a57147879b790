use anyhow::{bail, Context, Result};
use atelier_editor::DocumentStore;
use atelier_model::{ComponentDefinition, Node, Project, StaticRegistry};
use atelier_policy::{ControlPath, ControlState, PROPS_GROUP, STYLE_GROUPS};
use clap::Args;
use colored::{ColoredString, Colorize};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;
use std::rc::Rc;

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// JSON fixture with `project` and `definitions`
    pub fixture: PathBuf,

    /// Id of the node to inspect
    #[arg(short, long)]
    pub node: String,

    /// Resolve the expert half of the style policy
    #[arg(long)]
    pub expert: bool,

    /// Directory containing atelier.config.json
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Also list controls hidden by the policy
    #[arg(short, long)]
    pub all: bool,
}

#[derive(Debug, Deserialize)]
struct Fixture {
    project: Project,

    #[serde(default)]
    definitions: Vec<ComponentDefinition>,
}

fn parse_fixture(source: &str) -> Result<Fixture> {
    Ok(serde_json::from_str(source)?)
}

pub fn inspect(args: InspectArgs) -> Result<()> {
    let mut config = super::load_config(args.config.as_deref())?;
    config.expert_mode |= args.expert;

    let source = fs::read_to_string(&args.fixture)
        .with_context(|| format!("Cannot read fixture {}", args.fixture.display()))?;
    let fixture = parse_fixture(&source)
        .with_context(|| format!("Invalid fixture {}", args.fixture.display()))?;

    let store = DocumentStore::builder(fixture.project)
        .registry(Rc::new(StaticRegistry::from_definitions(fixture.definitions)))
        .config(config)
        .build()
        .with_context(|| format!("Fixture {} is not a valid tree", args.fixture.display()))?;

    let Some(node) = store.tree().node(&args.node) else {
        bail!("Node not found: {}", args.node);
    };
    let Some(policy) = store.styles().effective_policy(&node.id) else {
        bail!("Node not found: {}", args.node);
    };

    println!(
        "🔎 {} {} ({})",
        "Inspecting".green().bold(),
        node.id.bold(),
        node.component_id
    );
    println!("   Mode: {:?}", policy.mode);
    println!();

    for group in STYLE_GROUPS {
        let visible = store.styles().group_visible(&node.id, group.name).unwrap_or(true);
        if !visible && !args.all {
            continue;
        }
        print_group(group.label, visible);

        for control in group.controls {
            let path = ControlPath::styles(*control).to_string();
            if let Some(state) = store.styles().control_state(&node.id, &path) {
                print_control(control, node.styles.get(*control).map(String::as_str), &state, args.all);
            }
        }
        println!();
    }

    let prop_keys = prop_keys(&store, &node);
    let props_visible = store.styles().group_visible(&node.id, PROPS_GROUP).unwrap_or(true);
    if !prop_keys.is_empty() && (props_visible || args.all) {
        print_group("Properties", props_visible);
        for key in &prop_keys {
            let path = ControlPath::props(key.as_str()).to_string();
            if let Some(state) = store.styles().control_state(&node.id, &path) {
                let value = node.props.get(key).map(|value| value.to_string());
                print_control(key, value.as_deref(), &state, args.all);
            }
        }
    }

    Ok(())
}

/// Props set on the node plus the ones its definition provides
fn prop_keys(store: &DocumentStore, node: &Node) -> BTreeSet<String> {
    let mut keys: BTreeSet<String> = node.props.keys().cloned().collect();
    if let Some(definition) = store.registry().definition(&node.component_id) {
        keys.extend(definition.default_props.keys().cloned());
    }
    keys
}

fn print_group(label: &str, visible: bool) {
    if visible {
        println!("{}", label.bold());
    } else {
        println!("{} {}", label.bold().dimmed(), "(hidden)".dimmed());
    }
}

fn print_control(name: &str, value: Option<&str>, state: &ControlState, all: bool) {
    if !state.visible && !all {
        return;
    }

    println!(
        "   {:<24} {:<10} {}",
        name,
        status(state),
        value.unwrap_or("").dimmed()
    );
    if let Some(warning) = &state.warning {
        println!("   {:<24} {} {}", "", "⚠".yellow(), warning.yellow());
    }
    for reason in &state.reasons {
        println!("   {:<24} {}", "", reason.dimmed());
    }
}

fn status(state: &ControlState) -> ColoredString {
    if !state.visible {
        "hidden".dimmed()
    } else if state.disabled {
        "disabled".yellow()
    } else {
        "enabled".green()
    }
}
