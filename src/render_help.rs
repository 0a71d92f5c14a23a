use crate::tui_mode::app::App;
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

fn heading(text: &'static str) -> Line<'static> {
    Line::from(Span::styled(
        text,
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::UNDERLINED),
    ))
}

pub fn render_help(frame: &mut Frame, app: &mut App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" RustGraph Help ")
        .title_alignment(Alignment::Center)
        .style(Style::default().bg(Color::Black));

    let help_text = vec![
        Line::from(Span::styled(
            "RustGraph - ASCII Graphing Calculator",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        heading("Equations:"),
        Line::from("  Type an equation in terms of x and press Enter to graph it."),
        Line::from("  Supported operands: +, -, *, /, ^, sin, cos, tan, log, ln,"),
        Line::from("  e, pi, and any real number."),
        Line::from("  Multiplication written like \"5x\" is not supported; write it"),
        Line::from("  explicitly, like \"5 * x\"."),
        Line::from("  It is recommended to use parentheses to clarify the order of"),
        Line::from("  operations for your equation."),
        Line::from(""),
        heading("Pan & Zoom Commands:"),
        Line::from("  x n : pan the graph n units in the x-direction"),
        Line::from("  y n : pan the graph n units in the y-direction"),
        Line::from("  z n : zoom the graph by a factor of n"),
        Line::from("  For zooming, if n is less than one then the graph will zoom in."),
        Line::from("  Pans take a whole number, which may be negative. Entering a new"),
        Line::from("  equation resets the pan and zoom."),
        Line::from(""),
        heading("Keyboard & Mouse:"),
        Line::from("  Enter : graph the typed equation or run a command"),
        Line::from("  Ctrl+Arrows : pan the graph"),
        Line::from("  PgUp/PgDn or mouse wheel : zoom in/out"),
        Line::from("  Up/Down : recall previous inputs"),
        Line::from("  Left/Right, Home/End : move the cursor"),
        Line::from("  Ctrl+U : clear the input line"),
        Line::from("  F1 : show this help, Esc : close it"),
        Line::from(""),
        heading("Other Commands:"),
        Line::from("  clear : clear the input history"),
        Line::from("  quit (or q, exit) : exit the calculator"),
        Line::from(""),
        heading("Examples of correctly formatted equations:"),
        Line::from("  ((sin x) * 3) ^ 1.5"),
        Line::from("  27 - ((x / -cosx) + (-2) * (log x))"),
        Line::from("  (5 - lnx) * -sin(x)"),
        Line::from("  4 * x^ -2 - 2 * tanx / ln x ^3"),
        Line::from("  ((((8 - ln x)) * e)) + 0.85"),
        Line::from(""),
        Line::from(Span::styled(
            "A final note: since ASCII text is taller than it is wide, the graph",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            "may appear stretched vertically.",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let paragraph = Paragraph::new(help_text)
        .block(block)
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: true })
        .scroll((app.help_scroll as u16, 0));

    frame.render_widget(Clear, frame.size());
    frame.render_widget(paragraph, frame.size());
}
