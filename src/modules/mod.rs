// Module exports for pure logic
pub mod collate; // Natural string comparison for sort actions
pub mod menu;    // Context-menu tree and lifecycle hooks
pub mod reorder; // Reorder engine and undo
