use crate::graph_engine::error::DimensionError;
use crate::graph_engine::expr::{evaluate, Expr};
use crate::graph_engine::view::ViewState;

/// Grid bounds in cell coordinates, all four edges inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub left: i32,
    pub right: i32,
    pub bottom: i32,
    pub top: i32,
}

/// The default grid is wider than it is tall to offset the aspect ratio of
/// a character cell, which keeps the plot visually close to square.
impl Default for Bounds {
    fn default() -> Self {
        Bounds {
            left: -86,
            right: 86,
            bottom: -36,
            top: 36,
        }
    }
}

/// Draws `tree` over the grid as text: a corner-coordinate line, a border,
/// one row per `y` from top to bottom, and a closing border. A cell gets
/// `*` when the function lands on it, `|` on the x=0 column, `_` on the
/// y=0 row, and a space otherwise. The curve overrides the axes.
pub fn render(tree: &Expr, bounds: Bounds, view: &ViewState) -> Result<String, DimensionError> {
    if bounds.left > bounds.right || bounds.bottom > bounds.top {
        return Err(DimensionError {
            left: bounds.left,
            right: bounds.right,
            bottom: bounds.bottom,
            top: bounds.top,
        });
    }

    let width = (i64::from(bounds.right) - i64::from(bounds.left) + 1) as usize;
    let height = (i64::from(bounds.top) - i64::from(bounds.bottom) + 1) as usize;
    let mut out = String::with_capacity((width + 1) * (height + 3));

    let corner_x = |c: i32| f64::from(c) * view.scale + f64::from(view.pan_x);
    let corner_y = |c: i32| f64::from(c) * view.scale + f64::from(view.pan_y);
    out.push_str(&format!(
        "Top left [X:{:.6}, Y:{:.6}], ",
        corner_x(bounds.left),
        corner_y(bounds.top)
    ));
    out.push_str(&format!(
        "Top right [X:{:.6}, Y:{:.6}], ",
        corner_x(bounds.right),
        corner_y(bounds.top)
    ));
    out.push_str(&format!(
        "Bottom left [X:{:.6}, Y:{:.6}], ",
        corner_x(bounds.left),
        corner_y(bounds.bottom)
    ));
    out.push_str(&format!(
        "Bottom right [X:{:.6}, Y:{:.6}]\n",
        corner_x(bounds.right),
        corner_y(bounds.bottom)
    ));

    let border_blocks = ((i64::from(bounds.right) - i64::from(bounds.left)) / 2) as usize;
    let border = "[]".repeat(border_blocks);
    out.push_str(&border);
    out.push('\n');

    // One sample per column. A sample that is NaN or infinite compares
    // unequal to every row and simply marks nothing.
    let plotted: Vec<f64> = (bounds.left..=bounds.right)
        .map(|x| {
            let dx = f64::from(x) * view.scale - f64::from(view.pan_x);
            evaluate(tree, dx).round() - f64::from(view.pan_y)
        })
        .collect();

    for y in (bounds.bottom..=bounds.top).rev() {
        for (column, x) in (bounds.left..=bounds.right).enumerate() {
            let cell = if plotted[column] == f64::from(y) {
                '*'
            } else if x == 0 {
                '|'
            } else if y == 0 {
                '_'
            } else {
                ' '
            };
            out.push(cell);
        }
        out.push('\n');
    }

    out.push_str(&border);
    out.push('\n');
    Ok(out)
}
