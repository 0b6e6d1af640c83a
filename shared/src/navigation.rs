//! View activation and scroll restoration.
//!
//! [`NavigationCoordinator`] owns the [`ViewStateStore`] and decides when the
//! persisted scroll offset is applied and when the current one is recorded.
//! The frontend drives it from DOM lifecycle and `popstate` events; the
//! container itself is reached through [`ScrollContainer`].

use crate::filter::TagSelection;
use crate::view_state::{KeyValueStore, ViewStateStore};

/// Scrollable element holding the server list.
pub trait ScrollContainer {
    fn scroll_offset(&self) -> u32;
    fn apply_scroll_offset(&self, offset: u32);
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewPhase {
    #[default]
    Uninitialized,
    Restoring,
    Active,
    TornDown,
}

#[derive(Debug)]
pub struct NavigationCoordinator<S> {
    state: ViewStateStore<S>,
    phase: ViewPhase,
    // Offset restored at mount, re-applied once the first list is attached.
    pending_restore: Option<u32>,
}

impl<S: KeyValueStore> NavigationCoordinator<S> {
    pub fn new(backing: S) -> Self {
        Self {
            state: ViewStateStore::new(backing),
            phase: ViewPhase::Uninitialized,
            pending_restore: None,
        }
    }

    #[cfg(test)]
    pub fn phase(&self) -> ViewPhase {
        self.phase
    }

    pub fn view_state(&self) -> &ViewStateStore<S> {
        &self.state
    }

    /// Restores the persisted tag and scroll offset.
    ///
    /// Returns `None` when the view is already active, so a repeated mount
    /// notification neither restores twice nor asks for a second listener.
    pub fn mount(&mut self, container: Option<&dyn ScrollContainer>) -> Option<TagSelection> {
        if self.phase == ViewPhase::Active {
            return None;
        }
        self.phase = ViewPhase::Restoring;
        let tag = self.state.get_tag();
        self.pending_restore = self.restore_scroll(container);
        self.phase = ViewPhase::Active;
        Some(tag)
    }

    /// History navigation back to the view.
    pub fn view_activated(&mut self, container: Option<&dyn ScrollContainer>) {
        if self.phase != ViewPhase::Active {
            return;
        }
        self.restore_scroll(container);
    }

    /// The populated list was attached to the container.
    pub fn content_attached(&mut self, container: Option<&dyn ScrollContainer>) {
        if self.phase != ViewPhase::Active {
            return;
        }
        if let (Some(offset), Some(container)) = (self.pending_restore, container) {
            container.apply_scroll_offset(offset);
            self.pending_restore = None;
        }
    }

    /// Persists the new tag and the current scroll offset. Call before the
    /// tag is shown, so a reload never loses a selection the user saw.
    ///
    /// Returns `false`, persisting nothing, when the view is not active.
    pub fn tag_changed(&mut self, tag: &TagSelection, container: Option<&dyn ScrollContainer>) -> bool {
        if self.phase != ViewPhase::Active {
            return false;
        }
        self.state.set_tag(tag);
        let offset = container.map_or(0, |container| container.scroll_offset());
        self.state.set_scroll(offset);
        self.pending_restore = None;
        true
    }

    pub fn teardown(&mut self) {
        self.phase = ViewPhase::TornDown;
        self.pending_restore = None;
    }

    fn restore_scroll(&self, container: Option<&dyn ScrollContainer>) -> Option<u32> {
        let offset = self.state.stored_scroll()?;
        if let Some(container) = container {
            container.apply_scroll_offset(offset);
        }
        Some(offset)
    }
}
