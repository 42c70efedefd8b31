//! Real-time chat relay library.
//!
//! WebSocket sessions create and join rooms; messages sent to a room are
//! persisted through `ChatStorage` and fanned out to every live session in it.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
