// Menu controller: the fixed context-menu tree and its lifecycle hooks.
// Registration is idempotent so install/startup can both replay it.

use crate::host::{Host, HostError, MenuEntry};

pub const MENU_PARENT_ID: &str = "tab-tools";
pub const MENU_PARENT_TITLE: &str = "Tab Sorting Tools";

/// The only context the menu tree is shown in.
pub const TAB_CONTEXT: &str = "tab";

/// An action that permutes or repositions the highlighted tabs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rearrangement {
    Reverse,
    SortByTitle,
    SortByUrl,
    Randomize,
    MoveToStart,
    MoveToEnd,
}

/// A child entry of the context menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Rearrange(Rearrangement),
    Undo,
}

impl Action {
    /// Every child action, in menu display order.
    pub const ALL: [Action; 7] = [
        Action::Rearrange(Rearrangement::Reverse),
        Action::Rearrange(Rearrangement::SortByTitle),
        Action::Rearrange(Rearrangement::SortByUrl),
        Action::Rearrange(Rearrangement::Randomize),
        Action::Rearrange(Rearrangement::MoveToStart),
        Action::Rearrange(Rearrangement::MoveToEnd),
        Action::Undo,
    ];

    /// Stable menu item id delivered back on click.
    pub fn menu_id(self) -> &'static str {
        match self {
            Action::Rearrange(Rearrangement::Reverse) => "reverse",
            Action::Rearrange(Rearrangement::SortByTitle) => "sort-title",
            Action::Rearrange(Rearrangement::SortByUrl) => "sort-url",
            Action::Rearrange(Rearrangement::Randomize) => "randomize",
            Action::Rearrange(Rearrangement::MoveToStart) => "move-start",
            Action::Rearrange(Rearrangement::MoveToEnd) => "move-end",
            Action::Undo => "undo",
        }
    }

    pub fn menu_title(self) -> &'static str {
        match self {
            Action::Rearrange(Rearrangement::Reverse) => "Reverse Selected Tabs",
            Action::Rearrange(Rearrangement::SortByTitle) => "Sort Selected Tabs by Title",
            Action::Rearrange(Rearrangement::SortByUrl) => "Sort Selected Tabs by URL",
            Action::Rearrange(Rearrangement::Randomize) => "Randomize Selected Tabs",
            Action::Rearrange(Rearrangement::MoveToStart) => "Move Selected Tabs to Start",
            Action::Rearrange(Rearrangement::MoveToEnd) => "Move Selected Tabs to End",
            Action::Undo => "Undo Last Rearrangement",
        }
    }

    /// Maps a clicked menu item id back to its action. Ids from other menus
    /// (or a stale menu tree) map to `None` and are ignored by the caller.
    pub fn from_menu_id(id: &str) -> Option<Action> {
        Action::ALL.into_iter().find(|action| action.menu_id() == id)
    }

    /// Human-readable form used in the completion toast.
    pub fn label(self) -> String {
        self.menu_id().replace('-', " ")
    }
}

/// Lifecycle signals that trigger menu (re)registration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifecycleEvent {
    Installed,
    Startup,
}

/// (Re)establishes the fixed menu tree: one parent plus the seven child
/// actions, all scoped to the tab context.
///
/// Clears pre-existing entries first so re-registration after a host restart
/// cannot fail on duplicate ids. If clearing itself fails, the host reports
/// the duplicate on create and the error propagates.
pub fn register_menus<H: Host>(host: &mut H) -> Result<(), HostError> {
    host.remove_all_menu_entries()?;

    host.create_menu_entry(&MenuEntry {
        id: MENU_PARENT_ID.to_string(),
        title: MENU_PARENT_TITLE.to_string(),
        parent_id: None,
        contexts: vec![TAB_CONTEXT.to_string()],
    })?;

    for action in Action::ALL {
        host.create_menu_entry(&MenuEntry {
            id: action.menu_id().to_string(),
            title: action.menu_title().to_string(),
            parent_id: Some(MENU_PARENT_ID.to_string()),
            contexts: vec![TAB_CONTEXT.to_string()],
        })?;
    }

    Ok(())
}

/// Install and startup both rebuild the menu so it survives host restarts.
pub fn on_lifecycle<H: Host>(host: &mut H, event: LifecycleEvent) -> Result<(), HostError> {
    log::info!("registering context menus on {:?}", event);
    register_menus(host)
}
