use crate::game::{Cell, Rgba};

/// Drawing primitives the renderer needs from whatever shows the grid
pub trait RenderSurface {
    fn clear(&mut self);

    fn draw_cell(&mut self, cell: Cell, style: &CellStyle);
}

/// One stop of a gradient, `offset` in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub offset: f32,
    pub color: Rgba,
}

impl ColorStop {
    pub fn new(offset: f32, color: Rgba) -> Self {
        Self { offset, color }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Fill {
    Solid(Rgba),
    /// Diagonal, from the top-left corner of the cell to the bottom-right
    LinearGradient(Vec<ColorStop>),
    /// From the cell center out to half the cell width
    RadialGradient(Vec<ColorStop>),
}

impl Fill {
    /// The color a surface that cannot draw gradients should use
    pub fn primary(&self) -> Rgba {
        match self {
            Fill::Solid(color) => *color,
            Fill::LinearGradient(stops) | Fill::RadialGradient(stops) => stops
                .first()
                .map(|stop| stop.color)
                .unwrap_or(Rgba::BLACK.with_alpha(0)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Rgba,
    pub width: u32,
}

/// Rectangle painted inside a cell, offsets in pixels from the cell's top-left
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Inset {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub color: Rgba,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CellStyle {
    pub fill: Fill,
    pub stroke: Option<Stroke>,
    /// Painted in order, on top of the fill
    pub highlights: Vec<Inset>,
}

impl CellStyle {
    pub fn solid(color: Rgba) -> Self {
        Self {
            fill: Fill::Solid(color),
            stroke: None,
            highlights: Vec::new(),
        }
    }
}
