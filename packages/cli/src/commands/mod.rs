pub mod inspect;
pub mod rules;

pub use inspect::{inspect, InspectArgs};
pub use rules::{rules, RulesArgs};

use anyhow::Result;
use atelier_editor::{EditorConfig, DEFAULT_CONFIG_NAME};
use std::path::Path;

/// Config from `dir`, or from the working directory if none is given
pub(crate) fn load_config(dir: Option<&Path>) -> Result<EditorConfig> {
    let dir = dir.unwrap_or_else(|| Path::new("."));
    tracing::debug!(path = %dir.join(DEFAULT_CONFIG_NAME).display(), "loading config");
    Ok(EditorConfig::load(dir)?)
}
