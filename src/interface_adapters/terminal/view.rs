// Terminal display surface: status line, arena canvas, controls line.

use crate::domain::{self, ConnectionStatus, DrawCommand, Role, Scene, TextAlign, TextSize, View};
use ratatui::{
    Frame, Terminal,
    backend::Backend,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        Block, Paragraph,
        canvas::{Canvas, Context, Painter, Shape},
    },
};
use tracing::warn;

const CONTROLS: &str = " W/\u{2191} up   S/\u{2193} down   +/- speed   Space restart   Q quit ";

pub struct TerminalView<B: Backend> {
    terminal: Terminal<B>,
    role: Option<String>,
    status: String,
    status_connected: bool,
    scene: Option<Scene>,
}

impl<B: Backend> TerminalView<B> {
    pub fn new(terminal: Terminal<B>) -> Self {
        Self {
            terminal,
            role: None,
            status: ConnectionStatus::Connecting.to_string(),
            status_connected: false,
            scene: None,
        }
    }

    pub fn backend(&self) -> &B {
        self.terminal.backend()
    }

    /// Repaints the last scene and texts (used on terminal resize).
    pub fn redraw(&mut self) {
        let role = self.role.as_deref();
        let status = self.status.as_str();
        let connected = self.status_connected;
        let scene = self.scene.as_ref();

        if let Err(e) = self
            .terminal
            .draw(|frame| draw_frame(frame, role, status, connected, scene))
        {
            warn!(error = %e, "terminal draw failed");
        }
    }
}

impl<B: Backend> View for TerminalView<B> {
    fn show_role(&mut self, role: &Role) {
        self.role = Some(role.to_string());
        self.redraw();
    }

    fn show_status(&mut self, status: &ConnectionStatus) {
        self.status = status.to_string();
        self.status_connected = matches!(status, ConnectionStatus::Connected);
        self.redraw();
    }

    fn draw(&mut self, scene: &Scene) {
        self.scene = Some(scene.clone());
        self.redraw();
    }
}

fn draw_frame(
    frame: &mut Frame,
    role: Option<&str>,
    status: &str,
    connected: bool,
    scene: Option<&Scene>,
) {
    let [header, arena, footer] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    let status_color = if connected { Color::Green } else { Color::Yellow };
    let header_line = Line::from(vec![
        Span::raw(" Role: "),
        Span::styled(
            role.unwrap_or("-").to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("   Status: "),
        Span::styled(status.to_string(), Style::default().fg(status_color)),
    ]);
    frame.render_widget(Paragraph::new(header_line), header);

    let block = Block::bordered().title(" pong ").title_alignment(Alignment::Center);
    match scene {
        Some(scene) => draw_scene(frame, arena, block, scene),
        None => {
            let waiting = Paragraph::new("Waiting for game state...")
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(waiting, arena);
        }
    }

    let controls = Paragraph::new(CONTROLS)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(controls, footer);
}

fn draw_scene(frame: &mut Frame, area: Rect, block: Block, scene: &Scene) {
    // Arena units covered by one terminal column, for centering labels.
    let inner_width = f64::from(area.width.saturating_sub(2).max(1));
    let units_per_cell = scene.width / inner_width;

    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::HalfBlock)
        .background_color(color(scene.background))
        .x_bounds([0.0, scene.width])
        .y_bounds([0.0, scene.height])
        .paint(|ctx| paint_scene(ctx, scene, units_per_cell));
    frame.render_widget(canvas, area);
}

fn paint_scene(ctx: &mut Context, scene: &Scene, units_per_cell: f64) {
    for command in &scene.commands {
        match command {
            DrawCommand::FillRect { x, y, w, h, color: c } => {
                ctx.draw(&FilledRect::from_arena(scene, *x, *y, *w, *h, color(*c)));
            }
            DrawCommand::Text {
                x,
                y,
                text,
                size,
                align,
                color: c,
            } => {
                let width = text.chars().count() as f64 * units_per_cell;
                let left = match align {
                    TextAlign::Left => *x,
                    TextAlign::Center => *x - width / 2.0,
                };
                let mut style = Style::default().fg(color(*c));
                if *size == TextSize::Large {
                    style = style.add_modifier(Modifier::BOLD);
                }
                // Canvas y grows upward.
                let (cx, cy) = clamp_point(scene, left, scene.height - *y);
                ctx.print(cx, cy, Line::styled(text.clone(), style));
            }
        }
    }
}

fn color(c: domain::Color) -> Color {
    Color::Rgb(c.r, c.g, c.b)
}

fn clamp_point(scene: &Scene, x: f64, y: f64) -> (f64, f64) {
    (x.clamp(0.0, scene.width), y.clamp(0.0, scene.height))
}

// Solid rectangle in canvas coordinates (y up); ratatui's `Rectangle` only
// draws the outline.
#[derive(Debug, Clone, Copy)]
struct FilledRect {
    left: f64,
    bottom: f64,
    right: f64,
    top: f64,
    color: Color,
}

impl FilledRect {
    fn from_arena(scene: &Scene, x: f64, y: f64, w: f64, h: f64, color: Color) -> Self {
        let (left, top) = clamp_point(scene, x, scene.height - y);
        let (right, bottom) = clamp_point(scene, x + w, scene.height - (y + h));
        Self {
            left,
            bottom,
            right,
            top,
            color,
        }
    }
}

impl Shape for FilledRect {
    fn draw(&self, painter: &mut Painter) {
        let (Some((x1, y1)), Some((x2, y2))) = (
            painter.get_point(self.left, self.top),
            painter.get_point(self.right, self.bottom),
        ) else {
            return;
        };
        for y in y1.min(y2)..=y1.max(y2) {
            for x in x1.min(x2)..=x1.max(x2) {
                painter.paint(x, y, self.color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Snapshot;
    use crate::use_cases::render;
    use crate::use_cases::render::tests::sample_snapshot;
    use ratatui::backend::TestBackend;

    fn view() -> TerminalView<TestBackend> {
        TerminalView::new(Terminal::new(TestBackend::new(80, 24)).expect("test terminal"))
    }

    fn screen(view: &TerminalView<TestBackend>) -> String {
        let buffer = view.backend().buffer();
        let width = usize::from(buffer.area.width);
        buffer
            .content()
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn status_line_shows_role_and_status() {
        let mut view = view();
        view.show_role(&Role::new("spectator"));
        view.show_status(&ConnectionStatus::Connected);

        let screen = screen(&view);
        let header = screen.lines().next().expect("header row");
        assert!(header.contains("Role: spectator"), "{header}");
        assert!(header.contains("Status: Connected"), "{header}");
    }

    #[test]
    fn waits_for_first_snapshot() {
        let mut view = view();
        view.redraw();
        assert!(screen(&view).contains("Waiting for game state..."));
    }

    #[test]
    fn game_over_scene_shows_banner_and_scores() {
        let mut view = view();
        let snapshot = Snapshot {
            game_over: true,
            winner: Some("left".to_string()),
            score_left: 5,
            ..sample_snapshot()
        };
        view.draw(&render(&snapshot));

        let screen = screen(&view);
        assert!(screen.contains("LEFT WINS!"), "{screen}");
        assert!(screen.contains("Press SPACE to play again"), "{screen}");
        assert!(screen.contains('5'));
        assert!(!screen.contains("Waiting for game state"));
    }

    #[test]
    fn paddles_and_ball_are_painted() {
        let mut view = view();
        view.draw(&render(&sample_snapshot()));

        let buffer = view.backend().buffer();
        let painted = buffer
            .content()
            .iter()
            .filter(|cell| cell.symbol() != " " && cell.fg == Color::Rgb(255, 255, 255))
            .count();
        assert!(painted >= 3, "expected paddle and ball cells, got {painted}");
    }
}
