// Depth chart core: position groups, splice reordering, and optimistic
// reconciliation against the engine's authoritative order.

pub mod drag;
pub mod order;
pub mod reconcile;
