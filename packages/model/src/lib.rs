//! # Atelier Model
//!
//! Typed schema of the editor state: the persisted project tree, the
//! transient UI state, component definitions and their style policies.
//!
//! Everything here is plain data. Mutation rules live in `atelier-editor`,
//! visibility resolution in `atelier-policy`.

mod node;
mod policy;
mod project;
mod registry;
mod state;
mod ui;

pub use node::{Node, NodeId, PropMap, StyleMap};
pub use policy::{ModePolicy, PolicyMode, StylePolicy};
pub use project::{Asset, AssetKind, Fragment, Project, Stylesheet};
pub use registry::{ComponentDefinition, ComponentRegistry, StaticRegistry};
pub use state::EditorState;
pub use ui::{
    EditorMode, Notification, NotificationLevel, PanelLayout, PanelSide, PanelState, UiState,
    DEFAULT_BOTTOM_PANEL_HEIGHT, DEFAULT_LEFT_PANEL_WIDTH, DEFAULT_RIGHT_PANEL_WIDTH,
    MAX_PANEL_SIZE, MIN_PANEL_SIZE,
};
