//! Collaborative whiteboard server: rooms, live strokes, history replay,
//! chat and invitations over WebSocket.

pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
