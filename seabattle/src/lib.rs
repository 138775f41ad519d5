//! Implementation of the classic game Battleship for two players who share a
//! single console.
//!
//! The [`board`] module owns the per-player grid state: ship placement with
//! its validation rules, and shot resolution. The [`game`] module coordinates
//! two boards through the placement and shooting phases and tracks whose turn
//! it is. Console rendering and input live in the companion `battleship`
//! binary crate; nothing in this crate reads or writes the terminal.

pub mod board;
pub mod game;
pub mod ships;
