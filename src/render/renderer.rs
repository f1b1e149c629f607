use std::time::Duration;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::game::{AgentState, Cell, RunState};
use crate::metrics::RunMetrics;
use crate::planner::Tour;

/// View toggles owned by the watch loop rather than the run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hud {
    pub show_path: bool,
    pub paused: bool,
    pub tick_interval: Duration,
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        state: &AgentState,
        tour: &Tour,
        metrics: &RunMetrics,
        hud: &Hud,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Grid
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(chunks[0], state, metrics, hud);
        frame.render_widget(stats, chunks[0]);

        // Center the grid horizontally
        let grid_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        match state.run_state {
            RunState::Finished | RunState::Blocked => {
                let banner = self.render_banner(grid_area, state, metrics);
                frame.render_widget(banner, grid_area);
            }
            RunState::Idle | RunState::Running => {
                let grid = self.render_grid(grid_area, state, tour, hud.show_path);
                frame.render_widget(grid, grid_area);
            }
        }

        let controls = self.render_controls(chunks[2]);
        frame.render_widget(controls, chunks[2]);
    }

    fn render_grid(
        &self,
        _area: Rect,
        state: &AgentState,
        tour: &Tour,
        show_path: bool,
    ) -> Paragraph<'_> {
        let side = state.grid_size as i32;
        let mut lines = Vec::with_capacity(state.grid_size);

        // Row 0 is the bottom row
        for y in (0..side).rev() {
            let spans: Vec<Span> = (0..side)
                .map(|x| cell_span(Cell::new(x, y), state, tour, show_path))
                .collect();
            lines.push(Line::from(spans));
        }

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(format!(" Hamiltonian snake {0}x{0} ", state.grid_size)),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(
        &self,
        _area: Rect,
        state: &AgentState,
        metrics: &RunMetrics,
        hud: &Hud,
    ) -> Paragraph<'_> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let text = vec![Line::from(vec![
            Span::styled("Length: ", label),
            Span::styled(
                format!("{}/{}", state.len(), state.total_cells()),
                value.add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Steps: ", label),
            Span::styled(state.steps.to_string(), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
            Span::raw("    "),
            Span::styled("Tick: ", label),
            Span::styled(format!("{}ms", hud.tick_interval.as_millis()), value),
            Span::raw("    "),
            Span::styled(status_label(state.run_state, hud.paused), value),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_banner(&self, _area: Rect, state: &AgentState, metrics: &RunMetrics) -> Paragraph<'_> {
        let (title, color) = if state.is_finished() {
            ("GRID FILLED", Color::Green)
        } else {
            ("BLOCKED", Color::Red)
        };

        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                title,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Length: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    format!("{}/{}", state.len(), state.total_cells()),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("    "),
                Span::styled("Steps: ", Style::default().fg(Color::Yellow)),
                Span::styled(state.steps.to_string(), Style::default().fg(Color::White)),
                Span::raw("    "),
                Span::styled("Time: ", Style::default().fg(Color::Yellow)),
                Span::styled(metrics.format_time(), Style::default().fg(Color::White)),
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
                .border_style(Style::default().fg(color)),
        )
    }

    fn render_controls(&self, _area: Rect) -> Paragraph<'_> {
        let key = Style::default().fg(Color::Cyan);
        let text = vec![Line::from(vec![
            Span::styled("Space", key),
            Span::raw(" start/pause | "),
            Span::styled("R", key),
            Span::raw(" reset | "),
            Span::styled("+/-", key),
            Span::raw(" speed | "),
            Span::styled("[/]", key),
            Span::raw(" size | "),
            Span::styled("P", key),
            Span::raw(" path | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

fn status_label(run_state: RunState, paused: bool) -> &'static str {
    match run_state {
        RunState::Idle => "Press Space",
        RunState::Running if paused => "Paused",
        RunState::Running => "Running",
        RunState::Finished => "Finished",
        RunState::Blocked => "Blocked",
    }
}

fn cell_span(cell: Cell, state: &AgentState, tour: &Tour, show_path: bool) -> Span<'static> {
    if cell == state.head() {
        Span::styled(
            "■ ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
    } else if state.occupies(cell) {
        Span::styled("□ ", Style::default().fg(Color::Green))
    } else if state.target == Some(cell) {
        Span::styled(
            "O ",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )
    } else if show_path {
        let arrow = cell
            .direction_to(tour.successor(cell))
            .map_or('·', |direction| direction.arrow());
        Span::styled(format!("{arrow} "), Style::default().fg(Color::DarkGray))
    } else {
        Span::styled(". ", Style::default().fg(Color::DarkGray))
    }
}
