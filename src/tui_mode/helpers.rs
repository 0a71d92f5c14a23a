use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;

const FUNCTION_NAMES: [&str; 5] = ["sin", "cos", "tan", "log", "ln"];
const CONSTANT_NAMES: [&str; 2] = ["pi", "e"];

pub fn format_number(x: f64) -> String {
    if x.abs() > 1e10 || (x.abs() < 1e-5 && x != 0.0) {
        format!("{:.6e}", x)
    } else {
        let s = format!("{:.6}", x);
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

/// Colors a cleaned equation for display: function names, constants, the
/// variable, numbers and operators each get their own style. Words are
/// split the same way the parser reads them, so "sinx" colors as "sin"
/// plus "x".
pub fn highlight_expression(expr: &str, base_style: Style) -> Vec<Span<'static>> {
    let function_style = Style::default()
        .fg(Color::LightBlue)
        .add_modifier(Modifier::BOLD);
    let constant_style = Style::default().fg(Color::LightGreen);
    let variable_style = Style::default()
        .fg(Color::LightMagenta)
        .add_modifier(Modifier::BOLD);
    let number_style = Style::default().fg(Color::LightGreen);
    let operator_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    let mut spans = Vec::new();
    let mut word = String::new();
    let mut number = String::new();

    let flush_word = |word: &mut String, spans: &mut Vec<Span<'static>>| {
        let mut rest = word.as_str();
        'outer: while !rest.is_empty() {
            for name in FUNCTION_NAMES {
                if let Some(tail) = rest.strip_prefix(name) {
                    spans.push(Span::styled(name.to_string(), function_style));
                    rest = tail;
                    continue 'outer;
                }
            }
            for name in CONSTANT_NAMES {
                if let Some(tail) = rest.strip_prefix(name) {
                    spans.push(Span::styled(name.to_string(), constant_style));
                    rest = tail;
                    continue 'outer;
                }
            }
            if let Some(tail) = rest.strip_prefix('x') {
                spans.push(Span::styled("x".to_string(), variable_style));
                rest = tail;
                continue;
            }
            let mut chars = rest.chars();
            if let Some(c) = chars.next() {
                spans.push(Span::styled(c.to_string(), base_style));
                rest = chars.as_str();
            }
        }
        word.clear();
    };

    for c in expr.chars() {
        if c.is_alphabetic() {
            if !number.is_empty() {
                spans.push(Span::styled(number.clone(), number_style));
                number.clear();
            }
            word.push(c);
        } else if c.is_ascii_digit() || c == '.' {
            if !word.is_empty() {
                flush_word(&mut word, &mut spans);
            }
            number.push(c);
        } else {
            if !word.is_empty() {
                flush_word(&mut word, &mut spans);
            }
            if !number.is_empty() {
                spans.push(Span::styled(number.clone(), number_style));
                number.clear();
            }
            match c {
                '+' | '-' | '*' | '/' | '^' => {
                    spans.push(Span::styled(c.to_string(), operator_style));
                }
                _ => spans.push(Span::styled(c.to_string(), base_style)),
            }
        }
    }

    if !word.is_empty() {
        flush_word(&mut word, &mut spans);
    }
    if !number.is_empty() {
        spans.push(Span::styled(number, number_style));
    }

    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_number_trims_trailing_zeros() {
        assert_eq!(format_number(2.0), "2");
        assert_eq!(format_number(0.5), "0.5");
        assert_eq!(format_number(0.0), "0");
    }

    #[test]
    fn highlight_splits_words_like_the_parser() {
        let spans = highlight_expression("sinx", Style::default());
        let texts: Vec<&str> = spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(texts, vec!["sin", "x"]);

        let spans = highlight_expression("pi*2.5", Style::default());
        let texts: Vec<&str> = spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(texts, vec!["pi", "*", "2.5"]);
    }
}
