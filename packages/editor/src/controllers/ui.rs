use crate::mutations::MutationError;
use crate::store::DocumentStore;
use atelier_model::{
    EditorMode, Notification, NotificationLevel, PanelLayout, PanelSide, UiState, MAX_PANEL_SIZE,
    MIN_PANEL_SIZE,
};

pub struct UiController<'a> {
    store: &'a DocumentStore,
}

impl<'a> UiController<'a> {
    pub(crate) fn new(store: &'a DocumentStore) -> Self {
        Self { store }
    }

    pub fn state(&self) -> UiState {
        self.store.get_state().ui.clone()
    }

    pub fn panels(&self) -> PanelLayout {
        self.store.get_state().ui.panels
    }

    pub fn expert_mode(&self) -> bool {
        self.store.get_state().ui.expert_mode
    }

    pub fn set_expert_mode(&self, expert_mode: bool) -> Result<(), MutationError> {
        self.store.update(|draft| draft.ui.expert_mode = expert_mode)
    }

    pub fn toggle_expert_mode(&self) -> Result<bool, MutationError> {
        let expert_mode = !self.expert_mode();
        self.set_expert_mode(expert_mode)?;
        Ok(expert_mode)
    }

    pub fn set_mode(&self, mode: EditorMode) -> Result<(), MutationError> {
        self.store.update(|draft| draft.ui.mode = mode)
    }

    pub fn set_panel_open(&self, side: PanelSide, open: bool) -> Result<(), MutationError> {
        self.store
            .update(|draft| draft.ui.panels.panel_mut(side).open = open)
    }

    /// Resize a panel; the size is clamped to the allowed range
    pub fn set_panel_size(&self, side: PanelSide, size: u32) -> Result<u32, MutationError> {
        let size = size.clamp(MIN_PANEL_SIZE, MAX_PANEL_SIZE);
        self.store
            .update(|draft| draft.ui.panels.panel_mut(side).size = size)?;
        Ok(size)
    }

    /// Show a notification; returns its id
    pub fn push_notification(
        &self,
        level: NotificationLevel,
        message: impl Into<String>,
    ) -> Result<u64, MutationError> {
        let message = message.into();
        self.store.try_update(|draft| {
            let id = draft
                .ui
                .notifications
                .iter()
                .map(|n| n.id)
                .max()
                .map_or(1, |max| max + 1);
            draft.ui.notifications.push(Notification { id, level, message });
            Ok(id)
        })
    }

    pub fn dismiss_notification(&self, id: u64) -> Result<bool, MutationError> {
        if !self.state().notifications.iter().any(|n| n.id == id) {
            return Ok(false);
        }

        self.store
            .update(|draft| draft.ui.notifications.retain(|n| n.id != id))?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use crate::controllers::fixtures;
    use atelier_model::{EditorMode, NotificationLevel, PanelSide, MAX_PANEL_SIZE, MIN_PANEL_SIZE};

    #[test]
    fn test_panel_size_is_clamped() {
        let store = fixtures::store();

        assert_eq!(store.ui().set_panel_size(PanelSide::Left, 10), Ok(MIN_PANEL_SIZE));
        assert_eq!(store.ui().set_panel_size(PanelSide::Right, 5_000), Ok(MAX_PANEL_SIZE));
        assert_eq!(store.ui().set_panel_size(PanelSide::Bottom, 240), Ok(240));

        let panels = store.ui().panels();
        assert_eq!(panels.left.size, MIN_PANEL_SIZE);
        assert_eq!(panels.bottom.size, 240);
    }

    #[test]
    fn test_panel_toggle_and_mode() {
        let store = fixtures::store();

        store.ui().set_panel_open(PanelSide::Bottom, true).unwrap();
        store.ui().set_mode(EditorMode::Component).unwrap();

        let ui = store.ui().state();
        assert!(ui.panels.bottom.open);
        assert_eq!(ui.mode, EditorMode::Component);
        assert_eq!(store.ui().toggle_expert_mode(), Ok(true));
        assert!(store.ui().expert_mode());
    }

    #[test]
    fn test_notifications() {
        let store = fixtures::store();

        let first = store.ui().push_notification(NotificationLevel::Info, "Saved").unwrap();
        let second = store
            .ui()
            .push_notification(NotificationLevel::Error, "Publish failed")
            .unwrap();
        assert_ne!(first, second);

        assert_eq!(store.ui().dismiss_notification(first), Ok(true));
        assert_eq!(store.ui().dismiss_notification(first), Ok(false));

        let notifications = store.ui().state().notifications;
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].message, "Publish failed");
    }
}
