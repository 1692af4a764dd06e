use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

use super::braille::{BrailleCanvas, DIGIT_HEIGHT};
use super::layout::{display_state, DisplayRect, Orientation};
use super::overlay::{render_overlay, OverlayMessage};
use crate::config::DisplayConfig;
use crate::game::{GameSnapshot, Player};

// Layout: score header, bordered court, footer with border and hint line
// Row 0-4: Score area (Braille digits are 15px tall, under 4 rows, with padding)
// Rows 5 to N-3: Court
// Row N-2: Bottom border
// Row N-1: Hint line
const UI_HEADER_ROWS: u16 = 5;
const UI_FOOTER_ROWS: u16 = 2;

const MIN_COURT_ROWS: u16 = 4;
const MIN_WIDTH: u16 = 20;

/// What the frame loop hands the renderer each frame
#[derive(Debug, Clone, Copy)]
pub struct GameView<'a> {
    pub snapshot: &'a GameSnapshot,
    pub paused: bool,
}

/// Terminal cells the court occupies within `area`
pub fn court_area(area: Rect) -> Rect {
    Rect {
        x: area.x,
        y: area.y + UI_HEADER_ROWS.min(area.height),
        width: area.width,
        height: area
            .height
            .saturating_sub(UI_HEADER_ROWS + UI_FOOTER_ROWS),
    }
}

/// Orientation for a court drawn in `court` cells (2×4 square pixels each)
pub fn court_orientation(court: Rect) -> Orientation {
    Orientation::for_area(court.width as usize * 2, court.height as usize * 4)
}

fn rgb(color: [u8; 3]) -> Color {
    Color::Rgb(color[0], color[1], color[2])
}

pub fn render(frame: &mut Frame, view: GameView, display: &DisplayConfig) {
    let area = frame.area();

    // Draw background (true black RGB, not terminal default)
    let bg = Block::default().style(Style::default().bg(Color::Rgb(0, 0, 0)));
    frame.render_widget(bg, area);

    let court = court_area(area);
    if court.height < MIN_COURT_ROWS || area.width < MIN_WIDTH {
        let msg = Paragraph::new("Terminal too small")
            .style(Style::default().fg(Color::Yellow))
            .alignment(Alignment::Center);
        frame.render_widget(msg, area);
        return;
    }

    let mut canvas = BrailleCanvas::new(area.width as usize, area.height as usize);
    let orientation = court_orientation(court);

    canvas.set_pen(rgb(display.score_color));
    draw_braille_scores(&mut canvas, view.snapshot);

    let court_px = PixelRect {
        x: (court.x - area.x) as usize * 2,
        y: (court.y - area.y) as usize * 4,
        width: court.width as usize * 2,
        height: court.height as usize * 4,
    };

    canvas.set_pen(rgb(display.center_line_color));
    draw_walls(&mut canvas, court_px, orientation);
    draw_center_line(&mut canvas, court_px, orientation);

    let state = display_state(view.snapshot, orientation);
    canvas.set_pen(rgb(display.paddle_color));
    fill_display_rect(&mut canvas, court_px, &state.p1);
    fill_display_rect(&mut canvas, court_px, &state.p2);
    canvas.set_pen(rgb(display.ball_color));
    fill_display_rect(&mut canvas, court_px, &state.ball);

    render_braille_canvas(frame, &canvas, area);
    draw_hint(frame, area, view.paused);

    if let Some(winner) = state.winner {
        render_overlay(frame, &OverlayMessage::winner(winner), court);
    }
}

/// Court bounds in canvas pixels
#[derive(Debug, Clone, Copy)]
struct PixelRect {
    x: usize,
    y: usize,
    width: usize,
    height: usize,
}

fn fill_display_rect(canvas: &mut BrailleCanvas, court: PixelRect, rect: &DisplayRect) {
    let to_px = |fraction: f32, span: usize| (fraction.max(0.0) * span as f32).round() as usize;

    let x = court.x + to_px(rect.left, court.width);
    let y = court.y + to_px(rect.top, court.height);
    let width = to_px(rect.width, court.width).max(1);
    let height = to_px(rect.height, court.height).max(1);

    // Keep entities inside the court even when they touch its far edge
    let width = width.min((court.x + court.width).saturating_sub(x));
    let height = height.min((court.y + court.height).saturating_sub(y));
    canvas.fill_rect(x, y, width, height);
}

/// The walls the ball bounces off: top/bottom when horizontal, sides when vertical
fn draw_walls(canvas: &mut BrailleCanvas, court: PixelRect, orientation: Orientation) {
    match orientation {
        Orientation::Horizontal => {
            canvas.draw_horizontal_line(court.y.saturating_sub(1));
            canvas.draw_horizontal_line(court.y + court.height);
        }
        Orientation::Vertical => {
            let bottom = court.y + court.height;
            canvas.draw_vertical_line(court.x, court.y, bottom);
            canvas.draw_vertical_line(court.x + court.width - 1, court.y, bottom);
        }
    }
}

fn draw_center_line(canvas: &mut BrailleCanvas, court: PixelRect, orientation: Orientation) {
    match orientation {
        Orientation::Horizontal => {
            let center_x = court.x + court.width / 2;
            for y in (0..court.height).step_by(4) {
                canvas.set_pixel(center_x, court.y + y);
                canvas.set_pixel(center_x, court.y + y + 1);
            }
        }
        Orientation::Vertical => {
            let center_y = court.y + court.height / 2;
            for x in (0..court.width).step_by(4) {
                canvas.set_pixel(court.x + x, center_y);
                canvas.set_pixel(court.x + x + 1, center_y);
            }
        }
    }
}

fn render_braille_canvas(frame: &mut Frame, canvas: &BrailleCanvas, area: Rect) {
    for y in 0..canvas.height() {
        // Group runs of cells sharing a color into one span
        let mut spans: Vec<Span> = Vec::new();
        let mut run = String::new();
        let mut run_color = canvas.color_at(0, y);
        for x in 0..canvas.width() {
            let color = canvas.color_at(x, y);
            if color != run_color && !run.is_empty() {
                spans.push(Span::styled(
                    std::mem::take(&mut run),
                    Style::default().fg(run_color),
                ));
            }
            run_color = color;
            run.push(canvas.to_char(x, y));
        }
        if !run.is_empty() {
            spans.push(Span::styled(run, Style::default().fg(run_color)));
        }

        let row_area = Rect {
            x: area.x,
            y: area.y + y as u16,
            width: area.width,
            height: 1,
        };

        frame.render_widget(Paragraph::new(Line::from(spans)), row_area);
    }
}

fn draw_braille_scores(canvas: &mut BrailleCanvas, snapshot: &GameSnapshot) {
    let width = canvas.pixel_width();
    // Center the digits vertically in the 20px header
    let score_y = (UI_HEADER_ROWS as usize * 4).saturating_sub(DIGIT_HEIGHT) / 2;

    canvas.draw_number(snapshot.score.get(Player::P1), width / 3, score_y);
    canvas.draw_number(snapshot.score.get(Player::P2), width * 2 / 3, score_y);
}

fn draw_hint(frame: &mut Frame, area: Rect, paused: bool) {
    let (text, color) = if paused {
        ("Get ready...", Color::Yellow)
    } else {
        ("Esc: Menu  Q: Quit", Color::DarkGray)
    };

    let hint = Paragraph::new(text)
        .style(Style::default().fg(color))
        .alignment(Alignment::Center);

    let hint_area = Rect {
        x: area.x,
        y: area.y + area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    frame.render_widget(hint, hint_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Game;
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

    fn row_text(buffer: &Buffer, y: u16, width: u16) -> String {
        let start = (y * buffer.area.width) as usize;
        buffer.content[start..start + width as usize]
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_court_area_leaves_header_and_footer() {
        let court = court_area(Rect::new(0, 0, 80, 24));
        assert_eq!(court, Rect::new(0, 5, 80, 17));
        assert_eq!(court_area(Rect::new(0, 0, 10, 3)).height, 0);
    }

    #[test]
    fn test_wide_terminal_is_horizontal() {
        assert_eq!(
            court_orientation(Rect::new(0, 5, 80, 17)),
            Orientation::Horizontal
        );
        assert_eq!(
            court_orientation(Rect::new(0, 5, 30, 40)),
            Orientation::Vertical
        );
    }

    #[test]
    fn test_render_draws_court_and_hint() {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        let game = Game::with_seed(1);
        let snapshot = game.snapshot();

        terminal
            .draw(|f| {
                render(
                    f,
                    GameView {
                        snapshot: &snapshot,
                        paused: true,
                    },
                    &DisplayConfig::default(),
                )
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        assert!(row_text(buffer, 23, 80).contains("Get ready"));
        // Something drawn where P1's paddle sits
        let paddle_row = row_text(buffer, 13, 10);
        assert!(paddle_row.chars().any(|c| c != '\u{2800}' && c != ' '));
    }

    #[test]
    fn test_tiny_terminal_shows_message() {
        let backend = TestBackend::new(30, 6);
        let mut terminal = Terminal::new(backend).unwrap();
        let snapshot = Game::with_seed(1).snapshot();
        terminal
            .draw(|f| {
                render(
                    f,
                    GameView {
                        snapshot: &snapshot,
                        paused: false,
                    },
                    &DisplayConfig::default(),
                )
            })
            .unwrap();
        assert!(row_text(terminal.backend().buffer(), 0, 30).contains("Terminal too small"));
    }
}
