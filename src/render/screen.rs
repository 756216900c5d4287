use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::game::Rgba;

use super::terminal::{Hud, TerminalSurface};

/// Lays out the score header, the grid, the controls footer and the
/// game-over banner in a terminal frame
pub struct Screen;

impl Screen {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, surface: &TerminalSurface, hud: &Hud, snake_color: Rgba) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(hud, snake_color), chunks[0]);

        let game_area = chunks[1];
        frame.render_widget(self.render_grid(surface, snake_color), game_area);

        if let Some(final_score) = hud.game_over {
            let popup = centered(game_area, 36, 8);
            frame.render_widget(Clear, popup);
            frame.render_widget(self.render_game_over(final_score, hud.countdown), popup);
        }

        frame.render_widget(self.render_controls(), chunks[2]);
    }

    fn render_grid(&self, surface: &TerminalSurface, snake_color: Rgba) -> Paragraph<'static> {
        let accent = Color::Rgb(snake_color.r, snake_color.g, snake_color.b);
        Paragraph::new(surface.lines())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(accent))
                    .title(" Neon Snake "),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, hud: &Hud, snake_color: Rgba) -> Paragraph<'static> {
        let text = vec![Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                hud.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Color: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                snake_color.to_string(),
                Style::default().fg(Color::Rgb(snake_color.r, snake_color.g, snake_color.b)),
            ),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_game_over(&self, final_score: u32, countdown: Option<u32>) -> Paragraph<'static> {
        let mut text = vec![
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    final_score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
        ];

        if let Some(remaining) = countdown {
            text.push(Line::from(""));
            text.push(Line::from(vec![
                Span::styled("Restarting in ", Style::default().fg(Color::Gray)),
                Span::styled(
                    remaining.to_string(),
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
            ]));
        }

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self) -> Paragraph<'static> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);
    cell
}
