//! Smart contract bindings.

pub mod guessing_game;
