//! Real-time multiplayer chess server library.
//!
//! One global game room: authenticated connections are seated as White or
//! Black on a first-come basis, everybody else spectates, and every accepted
//! move is broadcast to all connections over WebSocket.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
