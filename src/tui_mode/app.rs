use crate::graph_engine::{
    apply_command, clean_expression, parens_balanced, parse, render, Bounds, Expr, ViewState,
};

pub const PAN_STEP: i32 = 5;
pub const ZOOM_IN_FACTOR: f64 = 0.5;
pub const ZOOM_OUT_FACTOR: f64 = 2.0;

/// The equation currently on screen. Replaced wholesale when a new equation
/// is accepted; pan/zoom commands only touch the view.
pub struct GraphSession {
    pub equation: String,
    pub tree: Expr,
    pub view: ViewState,
}

pub struct App {
    pub input: String,
    pub cursor_position: usize,
    pub input_scroll: usize,
    pub history: Vec<String>,
    pub cursor_history: usize,
    pub session: Option<GraphSession>,
    pub graph: String,
    pub graph_bounds: Option<Bounds>,
    pub graph_dirty: bool,
    pub message: Option<String>,
    pub should_quit: bool,
    pub show_help: bool,
    pub help_scroll: usize,
    pub terminal_too_small: bool,
}

impl App {
    pub fn new() -> Self {
        App {
            input: String::new(),
            cursor_position: 0,
            input_scroll: 0,
            history: Vec::new(),
            cursor_history: 0,
            session: None,
            graph: String::new(),
            graph_bounds: None,
            graph_dirty: false,
            message: None,
            should_quit: false,
            show_help: false,
            help_scroll: 0,
            terminal_too_small: false,
        }
    }

    pub fn adjust_input_scroll(&mut self, visible_width: usize) {
        let total_chars = self.input.chars().count();
        let cursor_pos = self.cursor_position;

        if cursor_pos < self.input_scroll {
            self.input_scroll = cursor_pos;
        } else if cursor_pos >= self.input_scroll + visible_width {
            self.input_scroll = cursor_pos - visible_width + 1;
        }

        if self.input_scroll > total_chars.saturating_sub(visible_width) {
            self.input_scroll = total_chars.saturating_sub(visible_width);
        }
    }

    pub fn submit(&mut self) {
        let input = self.input.trim().to_string();
        if input.is_empty() {
            return;
        }

        match input.to_lowercase().as_str() {
            "q" | "quit" | "exit" => {
                self.should_quit = true;
                return;
            }
            "i" | "help" | "instructions" => {
                self.show_help = true;
                self.help_scroll = 0;
                self.clear_input();
                return;
            }
            "clear" | "reset" => {
                self.history.clear();
                self.cursor_history = 0;
                self.message = None;
                self.clear_input();
                return;
            }
            "anything else" => {
                self.message = Some("Yeah, very funny.".to_string());
                self.clear_input();
                return;
            }
            _ => {}
        }

        self.history.push(input.clone());
        self.cursor_history = self.history.len();
        self.clear_input();

        let bytes = input.as_bytes();
        if bytes.len() >= 2 && bytes[1] == b' ' && matches!(bytes[0], b'x' | b'y' | b'z') {
            let Some(session) = self.session.as_mut() else {
                self.message =
                    Some("There is no graph to pan or zoom yet. Enter an equation first.".to_string());
                return;
            };
            match apply_command(&input, &mut session.view) {
                Ok(()) => {
                    self.graph_dirty = true;
                    self.message = None;
                }
                Err(e) => self.message = Some(e.to_string()),
            }
            return;
        }

        let cleaned = clean_expression(&input);
        if cleaned.is_empty() {
            return;
        }
        if !parens_balanced(&cleaned) {
            self.message = Some(
                "The equation appears to be incorrectly formatted: the number of open \
                 and close parentheses differs."
                    .to_string(),
            );
            return;
        }

        match parse(&cleaned) {
            Ok(tree) => {
                // принятое уравнение сбрасывает панораму и масштаб
                self.session = Some(GraphSession {
                    equation: cleaned,
                    tree,
                    view: ViewState::default(),
                });
                self.graph_dirty = true;
                self.message = None;
            }
            Err(e) => self.message = Some(format!("{} (press F1 for the formatting guide)", e)),
        }
    }

    /// Re-renders the cached graph text when the view changed or the pane
    /// was resized since the last draw.
    pub fn ensure_graph(&mut self, bounds: Bounds) {
        let Some(session) = &self.session else {
            self.graph.clear();
            self.graph_bounds = None;
            return;
        };
        if !self.graph_dirty && self.graph_bounds == Some(bounds) {
            return;
        }
        match render(&session.tree, bounds, &session.view) {
            Ok(output) => self.graph = output,
            Err(e) => {
                self.graph.clear();
                self.message = Some(e.to_string());
            }
        }
        self.graph_bounds = Some(bounds);
        self.graph_dirty = false;
    }

    /// Slides the plot by whole cells; positive `step_y` moves it upward.
    pub fn pan_by(&mut self, step_x: i32, step_y: i32) {
        if let Some(session) = self.session.as_mut() {
            session.view.pan_x = session.view.pan_x.saturating_add(step_x);
            session.view.pan_y = session.view.pan_y.saturating_sub(step_y);
            self.graph_dirty = true;
        }
    }

    pub fn zoom_by(&mut self, factor: f64) {
        if let Some(session) = self.session.as_mut() {
            session.view.scale *= factor;
            self.graph_dirty = true;
        }
    }

    pub fn move_cursor(&mut self, direction: i32) {
        match direction {
            -1 => self.cursor_position = self.cursor_position.saturating_sub(1),
            1 => self.cursor_position = (self.cursor_position + 1).min(self.input.chars().count()),
            _ => {}
        }
    }

    pub fn navigate_history(&mut self, direction: i32) {
        if direction < 0 {
            if self.cursor_history > 0 {
                self.cursor_history -= 1;
            }
        } else if self.cursor_history < self.history.len() {
            self.cursor_history += 1;
        }

        if self.cursor_history < self.history.len() {
            self.input = self.history[self.cursor_history].clone();
        } else {
            self.input.clear();
        }
        self.cursor_position = self.input.chars().count();
        self.input_scroll = 0;
    }

    pub fn clear_input(&mut self) {
        self.input.clear();
        self.cursor_position = 0;
        self.input_scroll = 0;
    }

    pub fn char_index_to_byte_index(s: &str, char_index: usize) -> usize {
        s.char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or_else(|| s.len())
    }
}
