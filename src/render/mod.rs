pub mod display;
pub mod renderer;
pub mod screen;
pub mod surface;
pub mod terminal;

pub use display::DisplaySink;
pub use renderer::Renderer;
pub use screen::Screen;
pub use surface::{CellStyle, ColorStop, Fill, Inset, RenderSurface, Stroke};
pub use terminal::{Hud, TerminalSurface};
