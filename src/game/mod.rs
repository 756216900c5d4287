//! Core game logic module for Snake
//!
//! Grid geometry, the snake state machine, food placement, collision checks,
//! the color cycle and the controller that sequences them tick by tick. The
//! controller reaches the outside world only through the [`DisplaySink`] and
//! [`RenderSurface`] traits, so everything here runs headless in tests.
//!
//! [`DisplaySink`]: crate::render::DisplaySink
//! [`RenderSurface`]: crate::render::RenderSurface

pub mod action;
pub mod collision;
pub mod config;
pub mod controller;
pub mod food;
pub mod geometry;
pub mod palette;
pub mod scheduler;
pub mod state;

// Re-export commonly used types
pub use action::{Direction, Heading};
pub use collision::{CollisionVerdict, detect};
pub use config::GameConfig;
pub use controller::{GameController, GamePhase, TickOutcome};
pub use food::FoodSpawner;
pub use geometry::{Grid, PixelRect};
pub use palette::{ColorCycle, Rgba, neon_palette};
pub use scheduler::{Due, Scheduler, TaskHandle, TaskKind};
pub use state::{Cell, GameState, Snake};
