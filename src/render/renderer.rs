use std::collections::HashMap;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::game::config::POWER_UP_LIFESPAN_MS;
use crate::game::{EffectKind, Phase, Position, Snapshot};
use crate::metrics::GameMetrics;

/// Power-ups blink for the last 3 s before they vanish
const EXPIRY_WARNING_MS: u64 = 3_000;

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, snapshot: &Snapshot, metrics: &GameMetrics) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Stats
                Constraint::Length(1), // Active effects
                Constraint::Min(0),    // Game area
                Constraint::Length(1), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(snapshot, metrics), chunks[0]);
        frame.render_widget(self.render_effects(snapshot), chunks[1]);

        // Two columns per cell plus the border; oversized grids are clipped
        let grid_area = centered(
            chunks[2],
            to_u16(snapshot.grid_width).saturating_mul(2).saturating_add(2),
            to_u16(snapshot.grid_height).saturating_add(2),
        );
        frame.render_widget(self.render_grid(snapshot), grid_area);

        match snapshot.phase {
            Phase::Running => {}
            Phase::Paused => {
                let popup = centered(chunks[2], 26, 5);
                frame.render_widget(Clear, popup);
                frame.render_widget(self.render_paused(), popup);
            }
            Phase::GameOver => {
                let popup = centered(chunks[2], 36, 8);
                frame.render_widget(Clear, popup);
                frame.render_widget(self.render_game_over(snapshot), popup);
            }
        }

        frame.render_widget(self.render_controls(), chunks[3]);
    }

    fn render_grid(&self, snapshot: &Snapshot) -> Paragraph<'_> {
        let segments: HashMap<Position, usize> = snapshot
            .snake
            .iter()
            .enumerate()
            .rev()
            .map(|(i, pos)| (*pos, i))
            .collect();
        let invincible = snapshot.is_effect_active(EffectKind::Invincibility);

        let mut lines = Vec::with_capacity(snapshot.grid_height);

        for y in 0..snapshot.grid_height {
            let mut spans = Vec::with_capacity(snapshot.grid_width);

            for x in 0..snapshot.grid_width {
                let pos = Position::new(x as i32, y as i32);

                let cell = if let Some(&index) = segments.get(&pos) {
                    snake_cell(index, invincible)
                } else if pos == snapshot.food {
                    Span::styled(
                        "O ",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )
                } else if let Some(power_up) = snapshot.power_up_at(pos) {
                    let mut style = Style::default()
                        .fg(power_up_color(power_up.kind))
                        .add_modifier(Modifier::BOLD);
                    if is_expiring(power_up.age_ms) {
                        style = style.add_modifier(Modifier::SLOW_BLINK);
                    }
                    Span::styled("◆ ", style)
                } else if snapshot.decorations.get(x, y) > 8 {
                    Span::styled(": ", Style::default().fg(Color::DarkGray))
                } else {
                    Span::styled(". ", Style::default().fg(Color::Rgb(48, 48, 48)))
                };

                spans.push(cell);
            }

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::White))
                .title(" Snake "),
        )
    }

    fn render_stats(&self, snapshot: &Snapshot, metrics: &GameMetrics) -> Paragraph<'_> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let text = Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(snapshot.score.to_string(), value.add_modifier(Modifier::BOLD)),
            Span::raw("    "),
            Span::styled("Level: ", label),
            Span::styled(snapshot.level.to_string(), value),
            Span::raw("    "),
            Span::styled("Speed: ", label),
            Span::styled(snapshot.speed.to_string(), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
            Span::raw("    "),
            Span::styled("Best: ", label),
            Span::styled(metrics.session_best.to_string(), value),
        ]);

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_effects(&self, snapshot: &Snapshot) -> Paragraph<'_> {
        if snapshot.active_effects.is_empty() {
            return Paragraph::new("");
        }

        let mut spans = vec![Span::styled("ACTIVE: ", Style::default().fg(Color::Gray))];
        for kind in &snapshot.active_effects {
            spans.push(Span::styled(
                format!("{} ", kind.label()),
                Style::default()
                    .fg(power_up_color(*kind))
                    .add_modifier(Modifier::BOLD),
            ));
        }

        Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
    }

    fn render_paused(&self) -> Paragraph<'_> {
        let text = vec![
            Line::from(Span::styled(
                "PAUSED",
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled("P", Style::default().fg(Color::Cyan)),
                Span::styled(" to continue", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL))
    }

    fn render_game_over(&self, snapshot: &Snapshot) -> Paragraph<'_> {
        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    snapshot.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "R",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to restart or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("P", Style::default().fg(Color::Cyan)),
            Span::raw(" to pause | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

fn snake_cell(index: usize, invincible: bool) -> Span<'static> {
    if index == 0 {
        let mut style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        if invincible {
            style = style.bg(Color::Blue);
        }
        return Span::styled("■ ", style);
    }

    // Tail fades out towards the end
    let green = 255u8.saturating_sub((index * 5).min(100) as u8).max(50);
    let mut style = Style::default().fg(Color::Rgb(0, green, 0));
    if invincible {
        style = style.bg(Color::Blue);
    }
    Span::styled("□ ", style)
}

fn is_expiring(age_ms: u64) -> bool {
    age_ms.saturating_add(EXPIRY_WARNING_MS) >= POWER_UP_LIFESPAN_MS
}

fn to_u16(cells: usize) -> u16 {
    u16::try_from(cells).unwrap_or(u16::MAX)
}

fn power_up_color(kind: EffectKind) -> Color {
    match kind {
        EffectKind::Speed => Color::Cyan,
        EffectKind::Slow => Color::Magenta,
        EffectKind::ScoreBoost => Color::Yellow,
        EffectKind::Invincibility => Color::White,
    }
}

/// `width` x `height` rect centred in `area`, clipped to fit
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    cell
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, GameState, PowerUp, Snake};
    use ratatui::{Terminal, backend::TestBackend};

    fn draw(snapshot: &Snapshot) -> String {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        let renderer = Renderer::new();
        let metrics = GameMetrics::new();
        terminal
            .draw(|frame| renderer.render(frame, snapshot, &metrics))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn state() -> GameState {
        GameState::new(
            Snake::new(Position::new(4, 4), Direction::Right, 3),
            Position::new(8, 1),
            10,
            10,
        )
    }

    #[test]
    fn test_running_frame() {
        let mut state = state();
        state
            .power_ups
            .push(PowerUp::new(Position::new(1, 1), EffectKind::Speed, 0));
        state.effects.activate(EffectKind::ScoreBoost, 0);
        state.score = 70;

        let screen = draw(&Snapshot::capture(&state, 100));
        assert!(screen.contains("Score: 70"));
        assert!(screen.contains("2X SCORE!"));
        assert!(screen.contains('■'));
        assert!(screen.contains('◆'));
        assert!(!screen.contains("PAUSED"));
    }

    #[test]
    fn test_paused_overlay() {
        let mut state = state();
        state.phase = Phase::Paused;
        assert!(draw(&Snapshot::capture(&state, 0)).contains("PAUSED"));
    }

    #[test]
    fn test_game_over_overlay() {
        let mut state = state();
        state.phase = Phase::GameOver;
        state.score = 30;
        let screen = draw(&Snapshot::capture(&state, 0));
        assert!(screen.contains("GAME OVER"));
        assert!(screen.contains("Final Score: 30"));
    }

    #[test]
    fn test_grid_wider_than_terminal_is_clipped() {
        // 40_000 columns would overflow u16 at two columns per cell
        let state = GameState::new(
            Snake::new(Position::new(3, 1), Direction::Right, 2),
            Position::new(39_990, 0),
            40_000,
            3,
        );
        let screen = draw(&Snapshot::capture(&state, 0));
        assert!(screen.contains("Score: 0"));
        assert!(screen.contains('■'));
    }

    #[test]
    fn test_blink_only_near_expiry() {
        assert!(!is_expiring(0));
        assert!(!is_expiring(6_999));
        assert!(is_expiring(7_000));
        assert!(is_expiring(9_999));
    }

    #[test]
    fn test_tail_fade() {
        assert_eq!(snake_cell(1, false).style.fg, Some(Color::Rgb(0, 250, 0)));
        assert_eq!(snake_cell(40, false).style.fg, Some(Color::Rgb(0, 155, 0)));
        assert_eq!(snake_cell(3, true).style.bg, Some(Color::Blue));
    }
}
