pub mod error;
pub mod expr;
pub mod parser;
pub mod render;
pub mod view;

pub use expr::Expr;
pub use parser::parse;
pub use render::{render, Bounds};
pub use view::{apply_command, ViewState};

/// Normalizes raw user input for the parser: lowercases everything and
/// removes all whitespace.
pub fn clean_expression(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Cheap pre-check run before parsing: the counts of open and close
/// parentheses must match.
pub fn parens_balanced(expr: &str) -> bool {
    let mut open = 0usize;
    let mut close = 0usize;
    for b in expr.bytes() {
        match b {
            b'(' => open += 1,
            b')' => close += 1,
            _ => {}
        }
    }
    open == close
}
