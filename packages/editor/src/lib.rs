//! # Atelier Editor
//!
//! Reactive state engine behind the visual editor.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ controllers: typed readers/writers per      │
//! │ feature (tree, styles, fragments, ui, ...)  │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ store: single EditorState, transactional    │
//! │  - draft → post-effects → integrity check   │
//! │  - history snapshots, batches               │
//! │  - version bump on every commit             │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ coalescer: one flush per scheduling tick    │
//! │ selectors: memoized slices for the UI       │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **One source of truth**: every read goes through `get_state`
//! 2. **Atomic commits**: a failed mutator leaves no trace
//! 3. **Stable snapshots**: unchanged slices keep their identity
//! 4. **Coalesced notifications**: bursts of commits cause one re-render
//!
//! ## Usage
//!
//! ```rust,ignore
//! use atelier_editor::{DocumentStore, Selector};
//! use atelier_model::{Node, Project};
//!
//! let store = DocumentStore::new(Project::new(Node::new("root", "page")))?;
//!
//! let selected = Selector::new(&store, |state| state.ui.selected_id.clone());
//! let _sub = selected.subscribe(|| println!("selection changed"));
//!
//! store.tree().insert_component("root", "box", None)?;
//! store.undo()?;
//! ```

mod coalescer;
mod config;
mod controllers;
mod errors;
mod history;
mod ids;
mod mutations;
mod post_effects;
mod selector;
mod store;
mod subscription;

pub use coalescer::{ImmediateScheduler, RenderCoalescer, Scheduler, Task, TaskQueue};
pub use config::{EditorConfig, DEFAULT_CONFIG_NAME, DEFAULT_HISTORY_LIMIT, DEFAULT_ID_PREFIX};
pub use controllers::{
    AssetController, FragmentController, PropsController, SelectionController, StyleController,
    StylesheetController, TreeController, UiController,
};
pub use errors::EditorError;
pub use history::{History, HistoryEntry};
pub use ids::IdGenerator;
pub use mutations::{Mutation, MutationError};
pub use post_effects::{
    ClearDanglingFragmentEditing, ClearDanglingSelection, PostEffect, PostEffectEngine,
    PruneDetachedFragments,
};
pub use selector::{token, Selector};
pub use store::{DocumentStore, DocumentStoreBuilder, WeakStore};
pub use subscription::Subscription;
