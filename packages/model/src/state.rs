use crate::node::Node;
use crate::project::Project;
use crate::ui::UiState;
use serde::{Deserialize, Serialize};

/// Root of the editor state. One instance per editor, replaced only by
/// committing a new version through the document store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorState {
    pub project: Project,

    pub ui: UiState,

    /// Bumped on every committed mutation
    #[serde(rename = "__version__", default)]
    pub version: u64,
}

impl EditorState {
    pub fn new(project: Project) -> Self {
        Self {
            project,
            ui: UiState::default(),
            version: 0,
        }
    }

    pub fn with_ui(mut self, ui: UiState) -> Self {
        self.ui = ui;
        self
    }

    pub fn selected_node(&self) -> Option<&Node> {
        self.ui
            .selected_id
            .as_deref()
            .and_then(|id| self.project.node(id))
    }
}
