//! Terminal-side collaborators: a character-cell surface and the score HUD.

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

use crate::game::{Cell, Grid, Rgba};

use super::display::DisplaySink;
use super::surface::{CellStyle, RenderSurface};

const HEAVY: &str = "■ ";
const LIGHT: &str = "□ ";
const EMPTY: &str = ". ";
const EMPTY_COLOR: Rgba = Rgba::rgb(0x44, 0x44, 0x44);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Paint {
    color: Rgba,
    glyph: &'static str,
}

/// Rasterizes draw calls into one glyph and one color per grid cell.
///
/// Gradients collapse to their first stop composited over what is already in
/// the cell. A white highlight marks a cell as heavy (head, food), any other
/// stroked cell is drawn light, and unstroked fills only tint.
pub struct TerminalSurface {
    side: i32,
    background: Rgba,
    cells: Vec<Option<Paint>>,
}

impl TerminalSurface {
    pub fn new(grid: &Grid) -> Self {
        let side = grid.cell_count();
        Self {
            side,
            background: Rgba::BLACK,
            cells: vec![None; grid.total_cells()],
        }
    }

    fn index(&self, cell: Cell) -> Option<usize> {
        let inside = (0..self.side).contains(&cell.col) && (0..self.side).contains(&cell.row);
        inside.then(|| (cell.row * self.side + cell.col) as usize)
    }

    /// Color drawn at `cell`, `None` for untouched or off-grid cells
    pub fn color_at(&self, cell: Cell) -> Option<Rgba> {
        self.index(cell)
            .and_then(|i| self.cells[i])
            .map(|paint| paint.color)
    }

    pub fn glyph_at(&self, cell: Cell) -> Option<&'static str> {
        self.index(cell)
            .and_then(|i| self.cells[i])
            .map(|paint| paint.glyph)
    }

    pub fn lines(&self) -> Vec<Line<'static>> {
        self.cells
            .chunks(self.side.max(1) as usize)
            .map(|row| {
                let spans: Vec<Span<'static>> = row
                    .iter()
                    .map(|paint| match paint {
                        Some(paint) => {
                            let mut style = Style::default().fg(to_color(paint.color));
                            if paint.glyph == HEAVY {
                                style = style.add_modifier(Modifier::BOLD);
                            }
                            Span::styled(paint.glyph, style)
                        }
                        None => Span::styled(EMPTY, Style::default().fg(to_color(EMPTY_COLOR))),
                    })
                    .collect();
                Line::from(spans)
            })
            .collect()
    }
}

impl RenderSurface for TerminalSurface {
    fn clear(&mut self) {
        self.cells.fill(None);
    }

    fn draw_cell(&mut self, cell: Cell, style: &CellStyle) {
        let Some(index) = self.index(cell) else {
            return;
        };
        let below = self.cells[index];

        let color = style
            .fill
            .primary()
            .over(below.map_or(self.background, |paint| paint.color));
        let glyph = if style.highlights.iter().any(|h| h.color == Rgba::WHITE) {
            HEAVY
        } else if style.stroke.is_some() {
            LIGHT
        } else {
            below.map_or(EMPTY, |paint| paint.glyph)
        };

        self.cells[index] = Some(Paint { color, glyph });
    }
}

fn to_color(color: Rgba) -> Color {
    Color::Rgb(color.r, color.g, color.b)
}

/// Score line and game-over banner state, drawn by the screen each frame
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Hud {
    pub score: u32,
    /// Final score while the banner is visible
    pub game_over: Option<u32>,
    pub countdown: Option<u32>,
}

impl DisplaySink for Hud {
    fn set_score(&mut self, score: u32) {
        self.score = score;
    }

    fn show_game_over(&mut self, final_score: u32) {
        self.game_over = Some(final_score);
    }

    fn hide_game_over(&mut self) {
        self.game_over = None;
        self.countdown = None;
    }

    fn set_countdown(&mut self, remaining: u32) {
        self.countdown = Some(remaining);
    }
}
