// Menu rendering with Ratatui

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

use super::state::{
    bound_key, controls_summary, key_label, ControlsRow, MenuItem, MenuState, Screen,
};
use crate::controls::Controls;
use crate::game::Player;
use crate::ui::{render_overlay, OverlayMessage};

/// Render whichever menu screen is open
pub fn render_menu(frame: &mut Frame, menu: &MenuState, controls: &Controls, game_active: bool) {
    let area = frame.area();

    // Draw background
    let bg = Block::default().style(Style::default().bg(Color::Rgb(0, 0, 0)));
    frame.render_widget(bg, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7), // Title area
            Constraint::Min(6),    // Menu items
            Constraint::Length(3), // Controls hint
        ])
        .split(area);

    let title_style = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let title_text: Vec<Line> = [
        "",
        "  ██████╗  ██████╗ ███╗   ██╗ ██████╗ ",
        "  ██╔══██╗██╔═══██╗████╗  ██║██╔════╝ ",
        "  ██████╔╝██║   ██║██╔██╗ ██║██║  ███╗",
        "  ██╔═══╝ ██║   ██║██║╚██╗██║██║   ██║",
        "  ██║     ╚██████╔╝██║ ╚████║╚██████╔╝",
        "  ╚═╝      ╚═════╝ ╚═╝  ╚═══╝ ╚═════╝ ",
    ]
    .iter()
    .map(|row| Line::from(Span::styled(*row, title_style)))
    .collect();

    let title = Paragraph::new(title_text).alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    let (labels, footer) = match menu.screen {
        Screen::Main => {
            let labels: Vec<String> = MenuItem::available(game_active)
                .iter()
                .map(|item| item.display_text().to_string())
                .collect();
            let footer = Player::ALL
                .iter()
                .map(|&p| controls_summary(controls, p))
                .collect::<Vec<_>>()
                .join("    ");
            (labels, footer)
        }
        Screen::Controls => {
            let labels = ControlsRow::for_controls(controls)
                .iter()
                .map(|row| row.label(controls))
                .collect();
            (labels, String::new())
        }
    };

    let selected = menu.selection(labels.len());
    let mut menu_items: Vec<Line> = labels
        .iter()
        .enumerate()
        .map(|(i, label)| {
            let is_selected = i == selected;
            let prefix = if is_selected { "  > " } else { "    " };
            let text = format!("{}{}", prefix, label);

            if is_selected {
                Line::from(Span::styled(
                    text,
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(Span::styled(text, Style::default().fg(Color::White)))
            }
        })
        .collect();

    if !footer.is_empty() {
        menu_items.push(Line::from(""));
        menu_items.push(Line::from(Span::styled(
            footer,
            Style::default().fg(Color::DarkGray),
        )));
    }

    let menu_widget = Paragraph::new(menu_items).alignment(Alignment::Center);
    frame.render_widget(menu_widget, chunks[1]);

    let back = match menu.screen {
        Screen::Main if game_active => "Esc: Continue  Q: Quit",
        Screen::Main => "Q: Quit",
        Screen::Controls => "Esc: Back",
    };
    let controls_hint = vec![Line::from(vec![
        Span::styled("↑/↓", Style::default().fg(Color::Gray)),
        Span::styled(": Navigate  ", Style::default().fg(Color::DarkGray)),
        Span::styled("Enter", Style::default().fg(Color::Gray)),
        Span::styled(": Select  ", Style::default().fg(Color::DarkGray)),
        Span::styled(back, Style::default().fg(Color::Gray)),
    ])];

    let hint_widget = Paragraph::new(controls_hint).alignment(Alignment::Center);
    frame.render_widget(hint_widget, chunks[2]);

    if let Some(slot) = menu.capturing {
        let current = bound_key(controls, slot).unwrap_or_default();
        let mut lines = vec![
            format!("Press a key for {} (now {})", slot.player.label(), key_label(&current)),
            String::new(),
            "Esc to cancel".to_string(),
        ];
        let message = match &menu.notice {
            Some(notice) => {
                lines.insert(1, notice.clone());
                OverlayMessage::warning(lines)
            }
            None => OverlayMessage::info(lines),
        };
        render_overlay(frame, &message.with_title("Rebind Key"), area);
    }
}
