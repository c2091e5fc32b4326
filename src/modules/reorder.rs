// Reorder engine: computes target positions for the highlighted tabs and
// replays them as sequential move requests against the host.
//
// One menu click maps to one invocation. The handler is the error boundary:
// whatever a host call throws is logged here and the engine returns to idle,
// never leaving a half-finished operation that blocks the next click.

use rand::Rng;

use crate::host::{Host, HostError, MoveIntent, Notification, TabQuery};
use crate::modules::collate;
use crate::modules::menu::{Action, Rearrangement};
use crate::state::{Tab, TabId, UndoRecord, UndoSlot};

const NOTIFICATION_TITLE: &str = "Tab Tools";
const NOTIFICATION_ICON: &str = "icons/icon-48.png";

impl Notification {
    fn toast(message: String) -> Self {
        Notification {
            title: NOTIFICATION_TITLE.to_string(),
            message,
            icon_url: NOTIFICATION_ICON.to_string(),
        }
    }

    fn completed(action: Action) -> Self {
        Self::toast(format!("Action \"{}\" completed.", action.label()))
    }

    fn nothing_to_undo() -> Self {
        Self::toast("Nothing to undo.".to_string())
    }
}

/// Host-facing dispatch for the menu-click signal. Ids that do not belong to
/// this extension's menu tree are ignored.
pub fn on_menu_clicked<H: Host>(host: &mut H, undo: &UndoSlot, menu_item_id: &str) {
    match Action::from_menu_id(menu_item_id) {
        Some(action) => handle_action(host, undo, action),
        None => log::debug!("ignoring click on foreign menu item {:?}", menu_item_id),
    }
}

/// Runs one action to completion. Host-call failures are caught and logged
/// here; moves already issued before a failure remain applied and no retry
/// is attempted.
pub fn handle_action<H: Host>(host: &mut H, undo: &UndoSlot, action: Action) {
    let result = match action {
        Action::Undo => restore_last(host, undo),
        Action::Rearrange(op) => rearrange(host, undo, op, &mut rand::thread_rng()),
    };

    match result {
        Ok(()) => log::info!("action {:?} completed", action.menu_id()),
        Err(err) => log::error!("action {:?} abandoned: {}", action.menu_id(), err),
    }
}

fn rearrange<H: Host>(
    host: &mut H,
    undo: &UndoSlot,
    op: Rearrangement,
    rng: &mut impl Rng,
) -> Result<(), HostError> {
    let mut selection = host.query_tabs(&TabQuery::highlighted_in_current_window())?;

    // Reordering is meaningless for 0-1 tabs; not an error, no notification.
    if selection.len() < 2 {
        log::info!("fewer than two tabs highlighted, nothing to reorder");
        return Ok(());
    }

    selection.sort_by_key(|tab| tab.index);

    // Snapshot before any mutation so every rearrangement is undoable.
    undo.replace(UndoRecord::capture(selection[0].window_id, &selection));

    let first_index = selection[0].index;
    let intents = match op {
        Rearrangement::Reverse => block_intents(reversed(&selection), first_index),
        Rearrangement::SortByTitle => {
            block_intents(sorted_ids(&selection, |tab| tab.title.as_str()), first_index)
        }
        Rearrangement::SortByUrl => {
            block_intents(sorted_ids(&selection, |tab| tab.url.as_str()), first_index)
        }
        Rearrangement::Randomize => block_intents(shuffled(&selection, rng), first_index),
        Rearrangement::MoveToStart => absolute_intents(&selection, 0),
        Rearrangement::MoveToEnd => {
            // Re-query the total count at the moment of the move; only the
            // selected tabs are moving.
            let total = host.query_tabs(&TabQuery::current_window())?.len();
            absolute_intents(&selection, total)
        }
    };

    issue(host, &intents);
    host.notify(&Notification::completed(Action::Rearrange(op)))?;
    Ok(())
}

/// Restores the layout recorded by the last rearrangement. The slot is
/// cleared up front, so the record is gone whether or not every individual
/// move succeeds.
fn restore_last<H: Host>(host: &mut H, undo: &UndoSlot) -> Result<(), HostError> {
    let Some(mut record) = undo.take() else {
        host.notify(&Notification::nothing_to_undo())?;
        return Ok(());
    };

    // Ascending by original index: earlier positions are filled before later
    // ones move, avoiding transient index collisions.
    record.positions.sort_by_key(|position| position.index);

    let intents: Vec<MoveIntent> = record
        .positions
        .iter()
        .map(|position| MoveIntent {
            tab: position.id,
            index: position.index,
            window_id: Some(record.window_id),
        })
        .collect();

    issue(host, &intents);
    host.notify(&Notification::completed(Action::Undo))?;
    Ok(())
}

/// Selection ids in reversed relative order.
fn reversed(selection: &[Tab]) -> Vec<TabId> {
    selection.iter().rev().map(|tab| tab.id).collect()
}

/// Selection ids stably sorted by the given string key.
fn sorted_ids<F>(selection: &[Tab], key: F) -> Vec<TabId>
where
    F: Fn(&Tab) -> &str,
{
    let mut tabs: Vec<&Tab> = selection.iter().collect();
    tabs.sort_by(|a, b| collate::compare(key(a), key(b)));
    tabs.into_iter().map(|tab| tab.id).collect()
}

/// Uniform random permutation of the selection ids: in-place Fisher-Yates
/// from the last index down to 1, swapping with a uniformly chosen
/// earlier-or-equal index.
fn shuffled(selection: &[Tab], rng: &mut impl Rng) -> Vec<TabId> {
    let mut ids: Vec<TabId> = selection.iter().map(|tab| tab.id).collect();
    for i in (1..ids.len()).rev() {
        let j = rng.gen_range(0..=i);
        ids.swap(i, j);
    }
    ids
}

/// Moves each id of `order` into the contiguous block of positions starting
/// at `first_index`, one position per step. Permutes the block's contents
/// while leaving its location in the window unchanged.
fn block_intents(order: Vec<TabId>, first_index: usize) -> Vec<MoveIntent> {
    order
        .into_iter()
        .enumerate()
        .map(|(offset, tab)| MoveIntent { tab, index: first_index + offset, window_id: None })
        .collect()
}

/// Moves the selection, in its original relative order, to the absolute
/// indices starting at `base`.
fn absolute_intents(selection: &[Tab], base: usize) -> Vec<MoveIntent> {
    selection
        .iter()
        .enumerate()
        .map(|(offset, tab)| MoveIntent { tab: tab.id, index: base + offset, window_id: None })
        .collect()
}

/// Issues the batch sequentially. Each move is independent and best-effort:
/// a rejected move (e.g. a tab closed since the snapshot) is logged and the
/// rest of the batch still runs.
fn issue<H: Host>(host: &mut H, intents: &[MoveIntent]) {
    for intent in intents {
        if let Err(err) = host.move_tab(intent) {
            log::warn!("move of tab {} to index {} failed: {}", intent.tab, intent.index, err);
        }
    }
}
