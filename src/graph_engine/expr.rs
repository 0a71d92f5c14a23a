/// A parsed equation. Built once by the parser, never mutated afterwards;
/// evaluation is a pure function of the tree and the input value.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    Variable,
    Unary(UnaryOp, Box<Expr>),
    Binary(BinaryOp, Box<Expr>, Box<Expr>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Negate,
    Sin,
    Cos,
    Tan,
    Log10,
    Ln,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

/// Computes the value of `node` at the input `x`. Total: division by zero,
/// logarithms of non-positive values and the like follow IEEE 754 semantics
/// (±infinity or NaN) instead of raising an error.
pub fn evaluate(node: &Expr, x: f64) -> f64 {
    match node {
        Expr::Number(value) => *value,
        Expr::Variable => x,
        Expr::Unary(op, operand) => {
            let v = evaluate(operand, x);
            match op {
                UnaryOp::Negate => -v,
                UnaryOp::Sin => v.sin(),
                UnaryOp::Cos => v.cos(),
                UnaryOp::Tan => v.tan(),
                UnaryOp::Log10 => v.log10(),
                UnaryOp::Ln => v.ln(),
            }
        }
        Expr::Binary(op, left, right) => {
            let l = evaluate(left, x);
            let r = evaluate(right, x);
            match op {
                BinaryOp::Add => l + r,
                BinaryOp::Sub => l - r,
                BinaryOp::Mul => l * r,
                BinaryOp::Div => l / r,
                BinaryOp::Pow => l.powf(r),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unary(op: UnaryOp, operand: Expr) -> Expr {
        Expr::Unary(op, Box::new(operand))
    }

    fn binary(op: BinaryOp, left: Expr, right: Expr) -> Expr {
        Expr::Binary(op, Box::new(left), Box::new(right))
    }

    #[test]
    fn leaves() {
        assert_eq!(evaluate(&Expr::Number(4.5), 0.0), 4.5);
        assert_eq!(evaluate(&Expr::Variable, -3.0), -3.0);
    }

    #[test]
    fn binary_arithmetic() {
        let sum = binary(BinaryOp::Add, Expr::Variable, Expr::Number(2.0));
        assert_eq!(evaluate(&sum, 3.0), 5.0);

        let diff = binary(BinaryOp::Sub, Expr::Number(1.0), Expr::Variable);
        assert_eq!(evaluate(&diff, 4.0), -3.0);

        let product = binary(BinaryOp::Mul, Expr::Variable, Expr::Variable);
        assert_eq!(evaluate(&product, -2.0), 4.0);

        let power = binary(BinaryOp::Pow, Expr::Variable, Expr::Number(3.0));
        assert_eq!(evaluate(&power, 2.0), 8.0);
    }

    #[test]
    fn division_follows_ieee() {
        let quotient = binary(BinaryOp::Div, Expr::Number(1.0), Expr::Variable);
        assert!(evaluate(&quotient, 0.0).is_infinite());
        assert_eq!(evaluate(&quotient, 2.0), 0.5);

        let zero_over_zero = binary(BinaryOp::Div, Expr::Variable, Expr::Variable);
        assert!(evaluate(&zero_over_zero, 0.0).is_nan());
    }

    #[test]
    fn unary_functions_use_radians() {
        assert_eq!(evaluate(&unary(UnaryOp::Cos, Expr::Variable), 0.0), 1.0);
        let half_pi = std::f64::consts::FRAC_PI_2;
        assert!((evaluate(&unary(UnaryOp::Sin, Expr::Variable), half_pi) - 1.0).abs() < 1e-12);
        assert!(evaluate(&unary(UnaryOp::Tan, Expr::Variable), 0.0).abs() < 1e-12);
    }

    #[test]
    fn logarithms_follow_ieee() {
        let ln = unary(UnaryOp::Ln, Expr::Variable);
        assert_eq!(evaluate(&ln, 0.0), f64::NEG_INFINITY);
        assert!(evaluate(&ln, -1.0).is_nan());

        let log = unary(UnaryOp::Log10, Expr::Variable);
        assert_eq!(evaluate(&log, 100.0), 2.0);
    }

    #[test]
    fn negation() {
        let negated = unary(UnaryOp::Negate, Expr::Variable);
        assert_eq!(evaluate(&negated, 7.0), -7.0);
        assert_eq!(evaluate(&negated, -7.0), 7.0);
    }
}
