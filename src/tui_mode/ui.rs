use super::app::{App, PAN_STEP, ZOOM_IN_FACTOR, ZOOM_OUT_FACTOR};
use super::helpers::{format_number, highlight_expression};
use crate::graph_engine::Bounds;
use crate::render_help::render_help;
use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEventKind};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame, Terminal,
};
use std::time::Duration;
use unicode_width::UnicodeWidthStr;

const MIN_TERMINAL_WIDTH: u16 = 50;
const MIN_TERMINAL_HEIGHT: u16 = 10;

pub fn run_ui_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        terminal.draw(|f| {
            if app.show_help {
                render_help(f, app);
            } else {
                ui(f, app);
            }
        })?;

        if app.should_quit {
            break;
        }

        if crossterm::event::poll(Duration::from_millis(50))? {
            match crossterm::event::read()? {
                Event::Key(KeyEvent {
                    code,
                    modifiers,
                    kind,
                    ..
                }) if kind == KeyEventKind::Press => {
                    handle_key_event(app, code, modifiers);
                }
                Event::Mouse(event) => {
                    handle_mouse_event(app, event);
                }
                _ => {}
            }
        }
    }
    Ok(())
}

fn handle_key_event(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    if app.show_help {
        match code {
            KeyCode::Down => app.help_scroll = app.help_scroll.saturating_add(1),
            KeyCode::Up => app.help_scroll = app.help_scroll.saturating_sub(1),
            KeyCode::PageDown => app.help_scroll = app.help_scroll.saturating_add(10),
            KeyCode::PageUp => app.help_scroll = app.help_scroll.saturating_sub(10),
            KeyCode::Esc => {
                app.show_help = false;
                app.help_scroll = 0;
            }
            _ => {}
        }
    } else {
        match code {
            KeyCode::Char('u') | KeyCode::Char('U')
                if modifiers.contains(KeyModifiers::CONTROL) =>
            {
                app.clear_input();
            }
            KeyCode::Char(c) if modifiers.is_empty() || modifiers == KeyModifiers::SHIFT => {
                let byte_idx = App::char_index_to_byte_index(&app.input, app.cursor_position);
                app.input.insert(byte_idx, c);
                app.cursor_position += 1;
            }
            KeyCode::Backspace => {
                if app.cursor_position > 0 {
                    app.cursor_position -= 1;
                    let byte_idx = App::char_index_to_byte_index(&app.input, app.cursor_position);
                    let next_char = app.input[byte_idx..].chars().next();
                    if let Some(c) = next_char {
                        let end = byte_idx + c.len_utf8();
                        app.input.drain(byte_idx..end);
                    }
                }
            }
            KeyCode::Delete => {
                let byte_idx = App::char_index_to_byte_index(&app.input, app.cursor_position);
                let next_char = app.input[byte_idx..].chars().next();
                if let Some(c) = next_char {
                    let end = byte_idx + c.len_utf8();
                    app.input.drain(byte_idx..end);
                }
            }
            KeyCode::Left if modifiers.contains(KeyModifiers::CONTROL) => {
                app.pan_by(-PAN_STEP, 0);
            }
            KeyCode::Right if modifiers.contains(KeyModifiers::CONTROL) => {
                app.pan_by(PAN_STEP, 0);
            }
            KeyCode::Up if modifiers.contains(KeyModifiers::CONTROL) => {
                app.pan_by(0, PAN_STEP);
            }
            KeyCode::Down if modifiers.contains(KeyModifiers::CONTROL) => {
                app.pan_by(0, -PAN_STEP);
            }
            KeyCode::Left => app.move_cursor(-1),
            KeyCode::Right => app.move_cursor(1),
            KeyCode::Home => {
                app.cursor_position = 0;
                app.input_scroll = 0;
            }
            KeyCode::End => {
                app.cursor_position = app.input.chars().count();
            }
            KeyCode::Up => app.navigate_history(-1),
            KeyCode::Down => app.navigate_history(1),
            KeyCode::PageUp => app.zoom_by(ZOOM_IN_FACTOR),
            KeyCode::PageDown => app.zoom_by(ZOOM_OUT_FACTOR),
            KeyCode::Enter => app.submit(),
            KeyCode::F(1) => {
                app.show_help = true;
                app.help_scroll = 0;
            }
            KeyCode::Esc => app.show_help = false,
            _ => {}
        }
    }
}

fn handle_mouse_event(app: &mut App, event: crossterm::event::MouseEvent) {
    if app.show_help {
        match event.kind {
            MouseEventKind::ScrollDown => app.help_scroll = app.help_scroll.saturating_add(3),
            MouseEventKind::ScrollUp => app.help_scroll = app.help_scroll.saturating_sub(3),
            _ => {}
        }
    } else {
        match event.kind {
            MouseEventKind::ScrollUp => app.zoom_by(ZOOM_IN_FACTOR),
            MouseEventKind::ScrollDown => app.zoom_by(ZOOM_OUT_FACTOR),
            _ => {}
        }
    }
}

fn ui(frame: &mut Frame, app: &mut App) {
    let terminal_size = frame.size();

    app.terminal_too_small =
        terminal_size.width < MIN_TERMINAL_WIDTH || terminal_size.height < MIN_TERMINAL_HEIGHT;

    if app.terminal_too_small {
        render_resize_message(frame, terminal_size);
        return;
    }

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![
            Constraint::Length(3),
            Constraint::Length(status_height(app, terminal_size.width)),
            Constraint::Min(6),
        ])
        .split(terminal_size);

    render_input(frame, app, layout[0]);
    render_status(frame, app, layout[1]);
    render_graph(frame, app, layout[2]);
}

fn render_resize_message(frame: &mut Frame, area: Rect) {
    let message = format!(
        "Terminal too small! Min size: {}x{}. Current: {}x{}",
        MIN_TERMINAL_WIDTH, MIN_TERMINAL_HEIGHT, area.width, area.height
    );

    let text = vec![
        Line::from(Span::styled(
            message,
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Please resize your terminal window",
            Style::default().fg(Color::Yellow),
        )),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .title(" Resize Required ")
        .title_alignment(Alignment::Center);

    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}

// The grid is sized to the pane: one column per cell, and three lines held
// back for the corner readout and the two borders.
fn bounds_for_area(area: Rect) -> Bounds {
    let width = i32::from(area.width.max(1));
    let rows = i32::from(area.height.saturating_sub(3).max(1));
    let left = -(width / 2);
    let bottom = -(rows / 2);
    Bounds {
        left,
        right: left + width - 1,
        bottom,
        top: bottom + rows - 1,
    }
}

fn graph_title(app: &App) -> Line<'static> {
    let Some(session) = &app.session else {
        return Line::from(" Graph ");
    };
    let mut spans = vec![Span::raw(" ")];
    spans.extend(highlight_expression(
        &session.equation,
        Style::default().fg(Color::Cyan),
    ));
    spans.push(Span::styled(
        format!(
            " [pan {},{} zoom {}] ",
            session.view.pan_x,
            session.view.pan_y,
            format_number(session.view.scale)
        ),
        Style::default().fg(Color::DarkGray),
    ));
    Line::from(spans)
}

fn render_graph(frame: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(graph_title(app))
        .title_alignment(Alignment::Center);

    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    if app.session.is_none() {
        let empty_msg =
            Paragraph::new("No graph yet. Enter an equation in terms of x, like x^2 or sin(x*2).")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center);
        frame.render_widget(empty_msg, inner_area);
        return;
    }

    app.ensure_graph(bounds_for_area(inner_area));
    let paragraph = Paragraph::new(app.graph.as_str());
    frame.render_widget(paragraph, inner_area);
}

// The hint line stays a single row; a pending message takes as many rows
// as it needs to wrap, up to three.
fn status_height(app: &App, columns: u16) -> u16 {
    let Some(message) = &app.message else {
        return 1;
    };
    let columns = usize::from(columns.max(1));
    let rows = (message.width() + columns - 1) / columns;
    rows.clamp(1, 3) as u16
}

fn render_status(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(Style::default().fg(Color::DarkGray));
    frame.render_widget(block, area);

    if let Some(message) = &app.message {
        let paragraph = Paragraph::new(Span::styled(
            message.clone(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ))
        .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
        return;
    }

    let keys = [
        ("Enter", "Graph"),
        ("Up/Down", "History"),
        ("Ctrl+Arrows", "Pan"),
        ("PgUp/PgDn", "Zoom"),
        ("F1", "Help"),
        ("Ctrl+U", "Clear Input"),
    ];

    let spans: Vec<Span> = keys
        .iter()
        .flat_map(|(key, desc)| {
            vec![
                Span::styled(
                    *key,
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!(" {} ", desc), Style::default().fg(Color::DarkGray)),
            ]
        })
        .collect();

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_input(frame: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Equation ")
        .title_alignment(Alignment::Center);

    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    let visible_width = (inner_area.width.saturating_sub(2)) as usize;
    let total_chars = app.input.chars().count();
    app.adjust_input_scroll(visible_width);

    let visible_input: String = app
        .input
        .chars()
        .skip(app.input_scroll)
        .take(visible_width)
        .collect();

    let input_line = format!("> {}", visible_input);
    let paragraph = Paragraph::new(input_line);
    frame.render_widget(paragraph, inner_area);

    let visible_cursor = app.cursor_position.saturating_sub(app.input_scroll);
    let visible_prefix = visible_input
        .chars()
        .take(visible_cursor)
        .collect::<String>();
    let cursor_x = inner_area.x + 2 + visible_prefix.width() as u16;
    let cursor_y = inner_area.y;
    frame.set_cursor(cursor_x, cursor_y);

    let scroll_indicator_style = Style::default().fg(Color::DarkGray);

    if app.input_scroll > 0 {
        let left_indicator = Paragraph::new("<").style(scroll_indicator_style);
        frame.render_widget(left_indicator, Rect::new(inner_area.x, inner_area.y, 1, 1));
    }

    if total_chars > app.input_scroll + visible_width {
        let right_indicator = Paragraph::new(">").style(scroll_indicator_style);
        frame.render_widget(
            right_indicator,
            Rect::new(inner_area.x + inner_area.width - 1, inner_area.y, 1, 1),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;

    fn buffer_row(terminal: &Terminal<TestBackend>, y: u16) -> String {
        let buffer = terminal.backend().buffer();
        (0..buffer.area.width)
            .map(|x| buffer.get(x, y).symbol.as_str())
            .collect()
    }

    #[test]
    fn status_rows_follow_pending_message_width() {
        let mut app = App::new();
        assert_eq!(status_height(&app, 80), 1);

        app.message = Some("short".to_string());
        assert_eq!(status_height(&app, 80), 1);

        app.message = Some("m".repeat(140));
        assert_eq!(status_height(&app, 80), 2);
        assert_eq!(status_height(&app, 50), 3);

        // never grows past three rows
        app.message = Some("m".repeat(1000));
        assert_eq!(status_height(&app, 80), 3);
    }

    #[test]
    fn long_messages_wrap_instead_of_clipping() {
        let message = "the equation appears to be incorrectly formatted: please make sure \
                       you have the same number of open & close parentheses.";
        let mut app = App::new();
        app.message = Some(message.to_string());

        let backend = TestBackend::new(80, 14);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| ui(frame, &mut app)).unwrap();

        // input box is rows 0-2, so the status area starts at row 3 and the
        // 120-cell message gets two rows of it
        let status: String = (3u16..5).map(|y| buffer_row(&terminal, y)).collect();
        assert!(status.contains("parentheses."));
    }
}
