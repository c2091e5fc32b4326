// Shared state structs to avoid circular dependencies.
// These mirror the host's tab records and hold the single undo slot.

use std::sync::Mutex;

use serde::{Deserialize, Serialize};

/// Host-assigned tab identifier. Stable for the lifetime of the tab.
pub type TabId = u32;

/// Host-assigned window identifier.
pub type WindowId = u32;

/// A host-managed tab as returned by a tab query.
///
/// The host owns these entirely; this crate never creates or destroys tabs,
/// only reads them and requests repositioning. Field names serialize in the
/// camelCase shape the host API uses (`windowId`).
#[derive(Clone, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Tab {
    pub id: TabId,
    pub index: usize,
    pub title: String,
    pub url: String,
    pub window_id: WindowId,
    pub highlighted: bool,
}

/// A tab's position at the moment a snapshot was taken.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabPosition {
    pub id: TabId,
    pub index: usize,
}

/// Pre-operation layout of the tabs involved in the last rearrangement.
///
/// Recorded ids may refer to tabs that no longer exist by the time undo
/// runs; restoration treats each one as best-effort.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UndoRecord {
    pub window_id: WindowId,
    pub positions: Vec<TabPosition>,
}

impl UndoRecord {
    /// Captures the current layout of `selection` (assumed sorted by index).
    pub fn capture(window_id: WindowId, selection: &[Tab]) -> Self {
        UndoRecord {
            window_id,
            positions: selection
                .iter()
                .map(|tab| TabPosition { id: tab.id, index: tab.index })
                .collect(),
        }
    }
}

/// Process-wide single-slot store for the most recent undo record.
///
/// Every rearranging action overwrites the slot via `replace`; only undo
/// consumes it via `take`. The slot is volatile and lost on restart.
#[derive(Debug, Default)]
pub struct UndoSlot {
    record: Mutex<Option<UndoRecord>>,
}

impl UndoSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrites whatever record was held before.
    pub fn replace(&self, record: UndoRecord) {
        *self.record.lock().unwrap() = Some(record);
    }

    /// Consumes the record, leaving the slot empty.
    pub fn take(&self) -> Option<UndoRecord> {
        self.record.lock().unwrap().take()
    }

    pub fn is_empty(&self) -> bool {
        self.record.lock().unwrap().is_none()
    }
}
