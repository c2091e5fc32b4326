// Collaborator contract for the embedding browser runtime.
// Everything the extension needs from the host goes through this trait so
// the ordering/undo logic can be driven without a live browser.

use serde::Serialize;
use thiserror::Error;

use crate::state::{Tab, TabId, WindowId};

/// Failure reported by a host capability call.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("no tab with id {0}")]
    NoSuchTab(TabId),
    #[error("no window with id {0}")]
    NoSuchWindow(WindowId),
    #[error("menu entry with id {0:?} already exists")]
    DuplicateMenuId(String),
    #[error("host call rejected: {0}")]
    Rejected(String),
}

/// Tab query filter. `None` means "do not filter on this attribute",
/// matching the host query API.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TabQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlighted: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_window: Option<bool>,
}

impl TabQuery {
    /// The selection the reorder actions operate on.
    pub fn highlighted_in_current_window() -> Self {
        TabQuery { highlighted: Some(true), current_window: Some(true) }
    }

    /// Every tab of the current window, highlighted or not.
    pub fn current_window() -> Self {
        TabQuery { highlighted: None, current_window: Some(true) }
    }
}

/// A context-menu entry keyed by string id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuEntry {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    pub contexts: Vec<String>,
}

/// One requested repositioning: move `tab` to `index`, optionally into a
/// specific window (used by undo to target the recorded window).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveIntent {
    pub tab: TabId,
    pub index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window_id: Option<WindowId>,
}

/// Fire-and-forget user-visible toast.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub title: String,
    pub message: String,
    pub icon_url: String,
}

/// Host capabilities consumed by the menu controller and reorder engine.
///
/// The host serializes menu-click dispatch to one handler invocation at a
/// time, so the trait is synchronous; an embedding adapter owns whatever
/// async plumbing the real runtime needs. Moving a tab may renumber other
/// tabs' indices as a side effect.
pub trait Host {
    /// Clears every menu entry registered by this extension.
    fn remove_all_menu_entries(&mut self) -> Result<(), HostError>;

    /// Registers one menu entry; fails on a duplicate id.
    fn create_menu_entry(&mut self, entry: &MenuEntry) -> Result<(), HostError>;

    /// Returns matching tabs ordered by ascending position index.
    fn query_tabs(&mut self, query: &TabQuery) -> Result<Vec<Tab>, HostError>;

    /// Repositions a single tab. A target index past the end of the window
    /// clamps to the end.
    fn move_tab(&mut self, intent: &MoveIntent) -> Result<(), HostError>;

    /// Displays a toast. Best-effort from the user's point of view.
    fn notify(&mut self, notification: &Notification) -> Result<(), HostError>;
}

#[cfg(test)]
pub(crate) mod fake {
    // In-memory host double replicating browser tab-move semantics:
    // remove from the current slot, insert at min(index, len), renumber.

    use std::collections::BTreeMap;

    use super::*;

    pub struct FakeHost {
        windows: BTreeMap<WindowId, Vec<Tab>>,
        pub current_window: WindowId,
        pub menu_entries: Vec<MenuEntry>,
        pub notifications: Vec<Notification>,
        pub issued_moves: Vec<MoveIntent>,
        pub fail_queries: bool,
        next_id: TabId,
    }

    impl FakeHost {
        pub fn new() -> Self {
            FakeHost {
                windows: BTreeMap::from([(1, Vec::new())]),
                current_window: 1,
                menu_entries: Vec::new(),
                notifications: Vec::new(),
                issued_moves: Vec::new(),
                fail_queries: false,
                next_id: 100,
            }
        }

        /// Appends a tab to the current window and returns its id.
        pub fn open_tab(&mut self, title: &str, url: &str) -> TabId {
            let id = self.next_id;
            self.next_id += 1;
            let window_id = self.current_window;
            let tabs = self.windows.entry(window_id).or_default();
            tabs.push(Tab {
                id,
                index: tabs.len(),
                title: title.to_string(),
                url: url.to_string(),
                window_id,
                highlighted: false,
            });
            id
        }

        /// Marks exactly `ids` as highlighted in the current window.
        pub fn highlight(&mut self, ids: &[TabId]) {
            if let Some(tabs) = self.windows.get_mut(&self.current_window) {
                for tab in tabs.iter_mut() {
                    tab.highlighted = ids.contains(&tab.id);
                }
            }
        }

        pub fn close_tab(&mut self, id: TabId) {
            for tabs in self.windows.values_mut() {
                if let Some(pos) = tabs.iter().position(|t| t.id == id) {
                    tabs.remove(pos);
                    Self::renumber(tabs);
                    return;
                }
            }
        }

        pub fn titles(&self) -> Vec<String> {
            self.windows[&self.current_window]
                .iter()
                .map(|t| t.title.clone())
                .collect()
        }

        pub fn ids(&self) -> Vec<TabId> {
            self.windows[&self.current_window].iter().map(|t| t.id).collect()
        }

        fn renumber(tabs: &mut [Tab]) {
            for (index, tab) in tabs.iter_mut().enumerate() {
                tab.index = index;
            }
        }
    }

    impl Host for FakeHost {
        fn remove_all_menu_entries(&mut self) -> Result<(), HostError> {
            self.menu_entries.clear();
            Ok(())
        }

        fn create_menu_entry(&mut self, entry: &MenuEntry) -> Result<(), HostError> {
            if self.menu_entries.iter().any(|e| e.id == entry.id) {
                return Err(HostError::DuplicateMenuId(entry.id.clone()));
            }
            self.menu_entries.push(entry.clone());
            Ok(())
        }

        fn query_tabs(&mut self, query: &TabQuery) -> Result<Vec<Tab>, HostError> {
            if self.fail_queries {
                return Err(HostError::Rejected("query failed".to_string()));
            }
            let tabs: Vec<Tab> = match query.current_window {
                Some(true) => self.windows[&self.current_window].clone(),
                _ => self.windows.values().flatten().cloned().collect(),
            };
            Ok(tabs
                .into_iter()
                .filter(|t| query.highlighted.map_or(true, |h| t.highlighted == h))
                .collect())
        }

        fn move_tab(&mut self, intent: &MoveIntent) -> Result<(), HostError> {
            self.issued_moves.push(*intent);

            let source_window = self
                .windows
                .iter()
                .find(|(_, tabs)| tabs.iter().any(|t| t.id == intent.tab))
                .map(|(id, _)| *id)
                .ok_or(HostError::NoSuchTab(intent.tab))?;
            let target_window = intent.window_id.unwrap_or(source_window);
            if !self.windows.contains_key(&target_window) {
                return Err(HostError::NoSuchWindow(target_window));
            }

            let source = self.windows.get_mut(&source_window).unwrap();
            let pos = source.iter().position(|t| t.id == intent.tab).unwrap();
            let mut tab = source.remove(pos);
            Self::renumber(source);

            let target = self.windows.get_mut(&target_window).unwrap();
            tab.window_id = target_window;
            target.insert(intent.index.min(target.len()), tab);
            Self::renumber(target);
            Ok(())
        }

        fn notify(&mut self, notification: &Notification) -> Result<(), HostError> {
            self.notifications.push(notification.clone());
            Ok(())
        }
    }
}
