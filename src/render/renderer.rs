//! Turns a [`GameState`] into draw calls. No game decisions are made here.

use crate::game::{GameState, Grid, Rgba};

use super::surface::{CellStyle, ColorStop, Fill, Inset, RenderSurface, Stroke};

const FOOD_CORE: Rgba = Rgba::rgb(0xff, 0x00, 0x00);
const FOOD_MID: Rgba = Rgba::rgb(0xff, 0x33, 0x33);
const FOOD_EDGE: Rgba = Rgba::rgb(0xcc, 0x00, 0x00);
const FOOD_PULSE: Rgba = Rgba::rgb(0xff, 0x66, 0x66).with_alpha(0x88);
const FLASH_ALPHA: u8 = 0x20;

pub struct Renderer {
    tick_ms: u64,
}

impl Renderer {
    /// `tick_ms` converts the tick counter into the clock that drives the food pulse
    pub fn new(tick_ms: u64) -> Self {
        Self { tick_ms }
    }

    /// Draw a full frame: clear, snake head-first, then the food
    pub fn render<S: RenderSurface + ?Sized>(&self, state: &GameState, surface: &mut S) {
        surface.clear();

        let color = state.colors.current();
        let unit = state.grid.grid_unit() as f32;

        for (index, segment) in state.snake.segments().enumerate() {
            let style = if index == 0 {
                head_style(color, unit)
            } else {
                body_style(color, unit)
            };
            surface.draw_cell(segment, &style);
        }

        if let Some(food) = state.food {
            let elapsed_ms = state.ticks * self.tick_ms;
            surface.draw_cell(food, &food_style(unit, elapsed_ms));
        }
    }

    /// Tint the whole field with the new snake color, on top of the current frame
    pub fn render_flash<S: RenderSurface + ?Sized>(&self, grid: &Grid, color: Rgba, surface: &mut S) {
        let style = CellStyle::solid(color.with_alpha(FLASH_ALPHA));
        for cell in grid.cells() {
            surface.draw_cell(cell, &style);
        }
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(100)
    }
}

fn centered_inset(unit: f32, margin: f32, color: Rgba) -> Inset {
    Inset {
        x: margin,
        y: margin,
        width: unit - 2.0 * margin,
        height: unit - 2.0 * margin,
        color,
    }
}

pub fn head_style(color: Rgba, unit: f32) -> CellStyle {
    CellStyle {
        fill: Fill::RadialGradient(vec![
            ColorStop::new(0.0, color),
            ColorStop::new(0.7, color.with_alpha(0xcc)),
            ColorStop::new(1.0, color.with_alpha(0x66)),
        ]),
        stroke: Some(Stroke {
            color: Rgba::WHITE,
            width: 2,
        }),
        highlights: vec![centered_inset(unit, unit * 0.3, Rgba::WHITE)],
    }
}

pub fn body_style(color: Rgba, unit: f32) -> CellStyle {
    CellStyle {
        fill: Fill::LinearGradient(vec![
            ColorStop::new(0.0, color.with_alpha(0xdd)),
            ColorStop::new(0.5, color.with_alpha(0xaa)),
            ColorStop::new(1.0, color.with_alpha(0x77)),
        ]),
        stroke: Some(Stroke { color, width: 1 }),
        highlights: vec![centered_inset(unit, unit * 0.2, color.with_alpha(0x44))],
    }
}

pub fn food_style(unit: f32, elapsed_ms: u64) -> CellStyle {
    let pulse = (elapsed_ms as f32 * 0.01).sin() * 2.0;
    CellStyle {
        fill: Fill::RadialGradient(vec![
            ColorStop::new(0.0, FOOD_CORE),
            ColorStop::new(0.5, FOOD_MID),
            ColorStop::new(1.0, FOOD_EDGE),
        ]),
        stroke: Some(Stroke {
            color: Rgba::WHITE,
            width: 3,
        }),
        highlights: vec![
            centered_inset(unit, unit * 0.3, Rgba::WHITE),
            centered_inset(unit, 2.0 + pulse, FOOD_PULSE),
        ],
    }
}
