use crate::graph_engine::error::FormatError;
use crate::graph_engine::expr::{BinaryOp, Expr, UnaryOp};

const MAX_STRIP_ROUNDS: usize = 20;
const MAX_DEPTH: usize = 50;
const MAX_NUMBER_LEN: usize = 9;

// Symbols are tried in this order and the first match at parenthesis depth
// zero wins, so a mixed chain like 3-2+5 splits at the '-' and reads as
// 3-(2+5).
const SPLIT_PRIORITY: [(u8, BinaryOp); 5] = [
    (b'-', BinaryOp::Sub),
    (b'+', BinaryOp::Add),
    (b'/', BinaryOp::Div),
    (b'*', BinaryOp::Mul),
    (b'^', BinaryOp::Pow),
];

const FUNCTIONS: [(&str, UnaryOp); 5] = [
    ("sin", UnaryOp::Sin),
    ("cos", UnaryOp::Cos),
    ("tan", UnaryOp::Tan),
    ("log", UnaryOp::Log10),
    ("ln", UnaryOp::Ln),
];

/// Parses a cleaned equation (lowercase, no whitespace) into a tree.
pub fn parse(expr: &str) -> Result<Expr, FormatError> {
    parse_at_depth(expr, 0)
}

fn parse_at_depth(expr: &str, depth: usize) -> Result<Expr, FormatError> {
    if depth > MAX_DEPTH {
        return Err(FormatError::RecursionLimit);
    }
    let expr = strip_outer_parens(expr)?;

    if let Some((index, op)) = find_binary_split(expr) {
        let left = parse_at_depth(&expr[..index], depth + 1)?;
        let right = parse_at_depth(&expr[index + 1..], depth + 1)?;
        return Ok(Expr::Binary(op, Box::new(left), Box::new(right)));
    }

    if let Some(rest) = expr.strip_prefix('-') {
        let operand = parse_at_depth(rest, depth + 1)?;
        return Ok(Expr::Unary(UnaryOp::Negate, Box::new(operand)));
    }
    for (name, op) in FUNCTIONS {
        if let Some(rest) = expr.strip_prefix(name) {
            let operand = parse_at_depth(rest, depth + 1)?;
            return Ok(Expr::Unary(op, Box::new(operand)));
        }
    }

    match expr.bytes().next() {
        Some(b'x') => Ok(Expr::Variable),
        Some(b'e') => Ok(Expr::Number(2.7183)),
        Some(b'p') => Ok(Expr::Number(3.1416)),
        Some(b) if b.is_ascii_digit() => Ok(Expr::Number(leading_number(expr))),
        Some(b's' | b'c' | b't' | b'l') => Err(FormatError::MismatchedFunction(expr.to_string())),
        _ => Err(FormatError::UnrecognizedToken(expr.to_string())),
    }
}

/// Removes parenthesis pairs that enclose the whole expression, one layer per
/// round. A leading '(' whose match is not the final character leaves the
/// expression untouched.
fn strip_outer_parens(mut expr: &str) -> Result<&str, FormatError> {
    let mut rounds = 0;
    while expr.starts_with('(') {
        if rounds > MAX_STRIP_ROUNDS {
            return Err(FormatError::TooManyParens);
        }
        if !is_enclosing_pair(expr.as_bytes()) {
            break;
        }
        expr = &expr[1..expr.len() - 1];
        rounds += 1;
    }
    Ok(expr)
}

fn is_enclosing_pair(bytes: &[u8]) -> bool {
    let mut depth = 1u32;
    for (i, &b) in bytes.iter().enumerate().skip(1) {
        match b {
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return i == bytes.len() - 1;
                }
            }
            _ => {}
        }
    }
    false
}

fn find_binary_split(expr: &str) -> Option<(usize, BinaryOp)> {
    let bytes = expr.as_bytes();
    for (symbol, op) in SPLIT_PRIORITY {
        let mut depth = 0i32;
        for (i, &b) in bytes.iter().enumerate() {
            match b {
                b'(' => depth += 1,
                b')' => depth -= 1,
                b if b == symbol && depth == 0 => {
                    if symbol == b'-' && !is_subtraction(bytes, i) {
                        continue;
                    }
                    return Some((i, op));
                }
                _ => {}
            }
        }
    }
    None
}

// A '-' is a subtraction only when something a value could end with sits
// directly before it; otherwise it is a negation and must not split.
fn is_subtraction(bytes: &[u8], index: usize) -> bool {
    if index == 0 {
        return false;
    }
    matches!(bytes[index - 1], b'x' | b'i' | b'e' | b')' | b'0'..=b'9')
}

/// Reads the number literal at the head of `expr`: up to nine bytes of digits
/// with at most one decimal point. Trailing text is ignored.
fn leading_number(expr: &str) -> f64 {
    let bytes = expr.as_bytes();
    let mut len = 0;
    let mut seen_dot = false;
    while len < bytes.len() && len < MAX_NUMBER_LEN {
        match bytes[len] {
            b'0'..=b'9' => len += 1,
            b'.' if !seen_dot => {
                seen_dot = true;
                len += 1;
            }
            _ => break,
        }
    }
    expr[..len].parse().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph_engine::expr::evaluate;

    fn eval(expr: &str, x: f64) -> f64 {
        evaluate(&parse(expr).unwrap(), x)
    }

    #[test]
    fn leaves_parse() {
        assert_eq!(parse("x").unwrap(), Expr::Variable);
        assert_eq!(parse("42").unwrap(), Expr::Number(42.0));
        assert_eq!(parse("2.5").unwrap(), Expr::Number(2.5));
        assert_eq!(parse("e").unwrap(), Expr::Number(2.7183));
        assert_eq!(parse("pi").unwrap(), Expr::Number(3.1416));
    }

    #[test]
    fn number_literal_stops_at_nine_bytes() {
        assert_eq!(parse("123456789123").unwrap(), Expr::Number(123_456_789.0));
        assert_eq!(parse("2.5.6").unwrap(), Expr::Number(2.5));
    }

    #[test]
    fn binary_operators_parse() {
        assert_eq!(eval("x+2", 3.0), 5.0);
        assert_eq!(eval("x-2", 3.0), 1.0);
        assert_eq!(eval("x*3", 3.0), 9.0);
        assert_eq!(eval("x/2", 3.0), 1.5);
        assert_eq!(eval("x^2", 3.0), 9.0);
    }

    #[test]
    fn subtraction_splits_before_addition() {
        // 3-2+5 reads as 3-(2+5)
        assert_eq!(eval("3-2+5", 0.0), -4.0);
        // parentheses restore the conventional grouping
        assert_eq!(eval("(3-2)+5", 0.0), 6.0);
    }

    #[test]
    fn functions_parse() {
        assert!(eval("sinx", 0.0).abs() < 1e-12);
        assert_eq!(eval("cosx", 0.0), 1.0);
        assert!(eval("tanx", 0.0).abs() < 1e-12);
        assert_eq!(eval("log(100)", 0.0), 2.0);
        assert_eq!(eval("ln(1)", 0.0), 0.0);
    }

    #[test]
    fn named_constants_take_part_in_arithmetic() {
        assert!((eval("pi-1", 0.0) - 2.1416).abs() < 1e-12);
        assert!((eval("e^2", 0.0) - 2.7183f64.powf(2.0)).abs() < 1e-12);
    }

    #[test]
    fn leading_minus_is_negation() {
        assert_eq!(eval("-x", 4.0), -4.0);
        assert_eq!(eval("--x", 4.0), 4.0);
        assert_eq!(eval("-5", 0.0), -5.0);
    }

    #[test]
    fn minus_after_operator_is_negation() {
        assert_eq!(eval("3*-x", 2.0), -6.0);
        assert_eq!(eval("x^-1", 2.0), 0.5);
        assert_eq!(eval("5--3", 0.0), 8.0);
    }

    #[test]
    fn minus_after_open_paren_is_negation() {
        assert_eq!(
            parse("(-x)").unwrap(),
            Expr::Unary(UnaryOp::Negate, Box::new(Expr::Variable))
        );
        assert_eq!(eval("2*(-x)", 3.0), -6.0);
    }

    #[test]
    fn minus_after_value_is_subtraction() {
        assert_eq!(eval("x-1", 5.0), 4.0);
        assert_eq!(eval("(x)-1", 5.0), 4.0);
        assert_eq!(eval("2-1", 0.0), 1.0);
    }

    #[test]
    fn enclosing_parens_strip() {
        assert_eq!(parse("(((x)))").unwrap(), Expr::Variable);
        assert_eq!(eval("(x+1)*2", 3.0), 8.0);
    }

    #[test]
    fn non_enclosing_parens_do_not_strip() {
        // the leading '(' closes before the end, so nothing is removed
        assert_eq!(eval("(1)+(2)", 0.0), 3.0);
        assert_eq!(eval("(x+1)*(x-1)", 3.0), 8.0);
    }

    #[test]
    fn twenty_one_layers_parse_and_twenty_two_do_not() {
        let deep = |layers: usize| format!("{}x{}", "(".repeat(layers), ")".repeat(layers));
        assert_eq!(parse(&deep(21)).unwrap(), Expr::Variable);
        assert_eq!(parse(&deep(22)), Err(FormatError::TooManyParens));
    }

    #[test]
    fn deep_nesting_hits_the_recursion_limit() {
        let spiky = format!("{}x", "-".repeat(60));
        assert_eq!(parse(&spiky), Err(FormatError::RecursionLimit));
    }

    #[test]
    fn unbalanced_open_paren_is_rejected() {
        assert_eq!(
            parse("(x+1"),
            Err(FormatError::UnrecognizedToken("(x+1".to_string()))
        );
    }

    #[test]
    fn unknown_function_names_are_rejected() {
        assert_eq!(
            parse("secx"),
            Err(FormatError::MismatchedFunction("secx".to_string()))
        );
        assert_eq!(
            parse("cot(x)"),
            Err(FormatError::MismatchedFunction("cot(x)".to_string()))
        );
    }

    #[test]
    fn garbage_is_rejected() {
        assert_eq!(
            parse("q+1"),
            Err(FormatError::UnrecognizedToken("q".to_string()))
        );
        assert_eq!(parse(""), Err(FormatError::UnrecognizedToken(String::new())));
        assert_eq!(parse("()"), Err(FormatError::UnrecognizedToken(String::new())));
    }

    #[test]
    fn operators_inside_parens_do_not_split() {
        assert_eq!(eval("(x+1)/(x-1)", 3.0), 2.0);
        assert_eq!(eval("sin(x*0)", 5.0), 0.0);
    }
}
