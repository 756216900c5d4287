//! Neon Snake - a grid-based snake game for the terminal
//!
//! This library provides:
//! - Core game logic and the tick-driven controller (game module)
//! - Drawing traits, the neon renderer and the terminal surface (render module)
//! - Keyboard mapping (input module)
//! - The interactive terminal mode (modes module)

pub mod game;
pub mod input;
pub mod modes;
pub mod render;
