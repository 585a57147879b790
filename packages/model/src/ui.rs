use crate::node::NodeId;
use serde::{Deserialize, Serialize};

pub const DEFAULT_LEFT_PANEL_WIDTH: u32 = 280;
pub const DEFAULT_RIGHT_PANEL_WIDTH: u32 = 320;
pub const DEFAULT_BOTTOM_PANEL_HEIGHT: u32 = 200;
pub const MIN_PANEL_SIZE: u32 = 160;
pub const MAX_PANEL_SIZE: u32 = 960;

/// What the canvas is currently editing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditorMode {
    #[default]
    Page,
    Component,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelSide {
    Left,
    Right,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelState {
    pub open: bool,
    /// Width for side panels, height for the bottom panel
    pub size: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelLayout {
    pub left: PanelState,
    pub right: PanelState,
    pub bottom: PanelState,
}

impl Default for PanelLayout {
    fn default() -> Self {
        Self {
            left: PanelState {
                open: true,
                size: DEFAULT_LEFT_PANEL_WIDTH,
            },
            right: PanelState {
                open: true,
                size: DEFAULT_RIGHT_PANEL_WIDTH,
            },
            bottom: PanelState {
                open: false,
                size: DEFAULT_BOTTOM_PANEL_HEIGHT,
            },
        }
    }
}

impl PanelLayout {
    pub fn panel(&self, side: PanelSide) -> &PanelState {
        match side {
            PanelSide::Left => &self.left,
            PanelSide::Right => &self.right,
            PanelSide::Bottom => &self.bottom,
        }
    }

    pub fn panel_mut(&mut self, side: PanelSide) -> &mut PanelState {
        match side {
            PanelSide::Left => &mut self.left,
            PanelSide::Right => &mut self.right,
            PanelSide::Bottom => &mut self.bottom,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: u64,
    pub level: NotificationLevel,
    pub message: String,
}

/// Transient editor state, never persisted with the project
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiState {
    #[serde(default)]
    pub selected_id: Option<NodeId>,

    #[serde(default)]
    pub mode: EditorMode,

    #[serde(default)]
    pub expert_mode: bool,

    #[serde(default)]
    pub panels: PanelLayout,

    #[serde(default)]
    pub editing_fragment_id: Option<String>,

    #[serde(default)]
    pub notifications: Vec<Notification>,
}
