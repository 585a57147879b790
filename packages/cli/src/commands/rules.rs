use anyhow::{bail, Result};
use atelier_policy::{DepRule, Effect};
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct RulesArgs {
    /// Directory containing atelier.config.json
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    pub format: String,
}

pub fn rules(args: RulesArgs) -> Result<()> {
    let config = super::load_config(args.config.as_deref())?;
    let registry = config.rule_registry();
    let ordered = registry.ordered();

    match args.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&ordered)?),
        "text" => {
            println!("📐 {} {} rules", "Active".green().bold(), ordered.len());
            println!();
            for rule in ordered {
                print_rule(rule);
            }
        }
        other => bail!("Unknown format: {}. Use: text or json", other),
    }

    Ok(())
}

fn print_rule(rule: &DepRule) {
    let targets = match &rule.target_keys {
        Some(keys) => keys.join(", "),
        None => "all controls".to_string(),
    };
    let effects: Vec<&str> = rule.effects.iter().map(effect_label).collect();

    println!("{:>4}  {}", rule.priority, rule.id.bold());
    println!("      targets: {}", targets);
    println!("      effects: {}", effects.join(", "));
    if let Some(reason) = &rule.reason {
        println!("      {}", reason.dimmed());
    }
}

fn effect_label(effect: &Effect) -> &'static str {
    match effect {
        Effect::Disable(true) => "disable",
        Effect::Disable(false) => "enable",
        Effect::Hide(true) => "hide",
        Effect::Hide(false) => "show",
        Effect::Warn(_) => "warn",
    }
}
