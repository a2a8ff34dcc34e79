//! Procura Store - shared in-memory state
//!
//! All services operate on one [`MemoryStore`], an `RwLock` around the
//! full application [`State`]. Each service method takes a single lock
//! guard for its whole operation, so a check-then-mutate sequence is
//! atomic with respect to other callers.
//!
//! [`seed::demo_state`] builds the demo dataset the rest of the system
//! is exercised against: four users (one per role), six vendors, four
//! cost-center budgets, five requisitions in assorted states, three
//! approval rules, two RFQs and three purchase orders.

pub mod seed;
pub mod state;
pub mod store;

pub use state::State;
pub use store::MemoryStore;
