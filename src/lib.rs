//! Forest: lure the wandering orcs into trees without drowning, falling off
//! a mountain, or getting caught yourself. A terminal rework of a small
//! canvas game; the binary in `main.rs` owns the bracket-terminal shell,
//! everything else is plain state driven by `GameState`.

pub mod config;
pub mod effects;
pub mod game;
pub mod map;
pub mod render;
pub mod scripted_input;
