use crate::graph_engine::error::FormatError;

/// Pan and zoom applied when the renderer samples the function. Units are
/// grid cells for the pans, a multiplier for the scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewState {
    pub pan_x: i32,
    pub pan_y: i32,
    pub scale: f64,
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState {
            pan_x: 0,
            pan_y: 0,
            scale: 1.0,
        }
    }
}

/// Applies one pan or zoom command ("x n", "y n" or "z n") to the view.
/// The argument is validated in full before anything is touched, so a
/// rejected command leaves the view exactly as it was.
pub fn apply_command(cmd: &str, view: &mut ViewState) -> Result<(), FormatError> {
    let bytes = cmd.as_bytes();
    if bytes.len() < 2 || bytes[1] != b' ' || !matches!(bytes[0], b'x' | b'y' | b'z') {
        return Err(FormatError::UnknownCommand(cmd.to_string()));
    }
    let kind = bytes[0] as char;
    let arg = &cmd[2..];

    match kind {
        'z' => {
            let factor = parse_zoom_argument(arg)?;
            view.scale *= factor;
        }
        'x' => {
            let amount = parse_pan_argument('x', arg)?;
            view.pan_x = view.pan_x.saturating_add(amount);
        }
        _ => {
            let amount = parse_pan_argument('y', arg)?;
            view.pan_y = view.pan_y.saturating_sub(amount);
        }
    }
    Ok(())
}

// Digits with at most one decimal point, and the point may not come first.
fn parse_zoom_argument(arg: &str) -> Result<f64, FormatError> {
    let mut seen_digit = false;
    let mut seen_dot = false;
    for b in arg.bytes() {
        match b {
            b'0'..=b'9' => seen_digit = true,
            b'.' if seen_digit && !seen_dot => seen_dot = true,
            _ => return Err(FormatError::BadZoomArgument(arg.to_string())),
        }
    }
    if !seen_digit {
        return Err(FormatError::BadZoomArgument(arg.to_string()));
    }
    arg.parse()
        .map_err(|_| FormatError::BadZoomArgument(arg.to_string()))
}

// An optional single leading '-', then at least one digit.
fn parse_pan_argument(kind: char, arg: &str) -> Result<i32, FormatError> {
    let digits = arg.strip_prefix('-').unwrap_or(arg);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FormatError::BadPanArgument(kind, arg.to_string()));
    }
    arg.parse()
        .map_err(|_| FormatError::BadPanArgument(kind, arg.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_view_is_neutral() {
        let view = ViewState::default();
        assert_eq!(view.pan_x, 0);
        assert_eq!(view.pan_y, 0);
        assert_eq!(view.scale, 1.0);
    }

    #[test]
    fn zoom_multiplies_the_scale() {
        let mut view = ViewState::default();
        apply_command("z 2", &mut view).unwrap();
        assert_eq!(view.scale, 2.0);
        apply_command("z 0.5", &mut view).unwrap();
        assert_eq!(view.scale, 1.0);
    }

    #[test]
    fn pans_accumulate() {
        let mut view = ViewState::default();
        apply_command("x 5", &mut view).unwrap();
        apply_command("x -2", &mut view).unwrap();
        assert_eq!(view.pan_x, 3);

        // positive y input shifts the plot upward, stored negated
        apply_command("y 4", &mut view).unwrap();
        assert_eq!(view.pan_y, -4);
        apply_command("y -1", &mut view).unwrap();
        assert_eq!(view.pan_y, -3);
    }

    #[test]
    fn rejected_commands_leave_the_view_untouched() {
        let mut view = ViewState::default();
        apply_command("x 7", &mut view).unwrap();
        let before = view;

        assert!(apply_command("x --5", &mut view).is_err());
        assert!(apply_command("x 5x", &mut view).is_err());
        assert!(apply_command("z .5", &mut view).is_err());
        assert!(apply_command("z 1.2.3", &mut view).is_err());
        assert!(apply_command("y ", &mut view).is_err());
        assert!(apply_command("z -2", &mut view).is_err());
        assert_eq!(view, before);
    }

    #[test]
    fn zoom_accepts_trailing_dot_but_not_leading() {
        let mut view = ViewState::default();
        apply_command("z 5.", &mut view).unwrap();
        assert_eq!(view.scale, 5.0);
        assert_eq!(
            apply_command("z .5", &mut view),
            Err(FormatError::BadZoomArgument(".5".to_string()))
        );
    }

    #[test]
    fn pan_arguments_must_fit_in_an_integer() {
        let mut view = ViewState::default();
        assert_eq!(
            apply_command("x 99999999999", &mut view),
            Err(FormatError::BadPanArgument('x', "99999999999".to_string()))
        );
        assert_eq!(view, ViewState::default());
    }

    #[test]
    fn non_commands_are_reported_as_such() {
        let mut view = ViewState::default();
        assert_eq!(
            apply_command("pan 5", &mut view),
            Err(FormatError::UnknownCommand("pan 5".to_string()))
        );
        assert_eq!(
            apply_command("x", &mut view),
            Err(FormatError::UnknownCommand("x".to_string()))
        );
    }
}
