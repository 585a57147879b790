//! Typed reader/writer pairs over the document store, one per editor
//! feature. Writers pre-check that their target exists and return
//! `Ok(false)`/`Ok(None)` instead of committing when it does not.

mod assets;
mod fragments;
mod props;
mod selection;
mod style;
mod stylesheets;
mod tree;
mod ui;

pub use assets::AssetController;
pub use fragments::FragmentController;
pub use props::PropsController;
pub use selection::SelectionController;
pub use style::StyleController;
pub use stylesheets::StylesheetController;
pub use tree::TreeController;
pub use ui::UiController;

use crate::store::DocumentStore;

impl DocumentStore {
    pub fn tree(&self) -> TreeController<'_> {
        TreeController::new(self)
    }

    pub fn selection(&self) -> SelectionController<'_> {
        SelectionController::new(self)
    }

    pub fn styles(&self) -> StyleController<'_> {
        StyleController::new(self)
    }

    pub fn props(&self) -> PropsController<'_> {
        PropsController::new(self)
    }

    pub fn fragments(&self) -> FragmentController<'_> {
        FragmentController::new(self)
    }

    pub fn stylesheets(&self) -> StylesheetController<'_> {
        StylesheetController::new(self)
    }

    pub fn assets(&self) -> AssetController<'_> {
        AssetController::new(self)
    }

    pub fn ui(&self) -> UiController<'_> {
        UiController::new(self)
    }
}
