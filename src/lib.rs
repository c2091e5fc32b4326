// Tab Tools Library Entry Point
// Context-menu reordering for highlighted browser tabs: reverse, sort by
// title or URL, randomize, move to start/end, and one level of undo.
//
// The crate holds the ordering/undo logic only. Everything the feature
// needs from the browser (menu registration, tab query/move, notifications)
// goes through the `host::Host` trait, so an embedding runtime wires the
// real capabilities in and the logic stays testable without a live host.

// Collaborator contract (menu/tab/notification capabilities)
pub mod host;

// Shared state (tab records, undo slot)
pub mod state;

// Pure logic modules (no host imports beyond the trait)
pub mod modules;
