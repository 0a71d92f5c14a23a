#[cfg(feature = "line")]
use crate::graph_engine::{
    apply_command, clean_expression, parens_balanced, parse, render, Bounds, Expr, ViewState,
};
#[cfg(feature = "line")]
use std::io::{stdin, stdout, Write};
#[cfg(feature = "line")]
use termion::{
    clear::CurrentLine as ClearLine,
    cursor::{DetectCursorPos, Goto},
    event::Key,
    input::TermRead,
    raw::IntoRawMode,
};

// Функция для преобразования позиции символа в байтовую позицию
#[cfg(feature = "line")]
fn char_index_to_byte_index(s: &str, char_index: usize) -> usize {
    s.char_indices()
        .nth(char_index)
        .map(|(i, _)| i)
        .unwrap_or_else(|| s.len())
}

#[cfg(feature = "line")]
fn print_instructions() {
    let text = "\
-------------------------------------------------------------------------------
How to use this graphing calculator:
At any time, you can type 'q' to quit, or type 'i' to read these instructions.
You can also type in an equation to graph. This calculator supports the
following operands: +, -, *, /, ^, sin, cos, tan, log, ln, e, pi, and any real
number. All equations should be formatted in terms of x. Note that
multiplication written like \"5x\" is not supported; multiplication must be
done explicitly, like \"5 * x\". Also, it is recommended to use parentheses to
clarify the order of operations for your equation. Once you have graphed an
equation, you can pan n units in the x-direction by typing \"x n\", or pan
n units in the y-direction by typing \"y n\", or zoom by a factor of n by
typing \"z n\". For zooming, if n is less than one then the graph will zoom in.

Here are some examples of correctly formatted equations:
((sin x) * 3) ^ 1.5
27 - ((x / -cosx) + (-2) * (log x))
(5 - lnx) * -sin(x)
4 * x^ -2 - 2 * tanx / ln x ^3
((((8 - ln x)) * e)) + 0.85

A final note: Since ASCII text is taller than it is wide, the graph output
may appear stretched vertically.
-------------------------------------------------------------------------------";
    for line in text.lines() {
        print!("\r\n{}", line);
    }
    println!("\r");
}

#[cfg(feature = "line")]
fn print_graph(output: &str) {
    for line in output.lines() {
        print!("\r\n{}", line);
    }
    print!("\r\nPan with \"x n\" or \"y n\", zoom by a factor of n with \"z n\".");
    println!("\r\nType a new equation to graph something else.\r");
}

#[cfg(feature = "line")]
pub fn run_line() {
    println!("Welcome to the ASCII graphing calculator!");
    println!("For instructions on how to use this calculator, type \"i\" at any time.");
    println!("To quit, type \"q\" at any time.");
    println!("Navigation: ←/→, Backspace/Delete, Home/End, ↑/↓ for history");
    println!("-------------------------------------------------------------------------------\n");

    let mut stdout = stdout().into_raw_mode().unwrap();
    let mut history: Vec<String> = Vec::new();
    let mut history_index = 0;

    // Текущий график: дерево и вид
    let mut current: Option<Expr> = None;
    let mut view = ViewState::default();

    loop {
        write!(stdout, "{}Equation: ", ClearLine).unwrap();
        stdout.flush().unwrap();

        let mut expression = String::new();
        let mut cursor_pos = 0; // позиция курсора в символах
        let (_, initial_y) = stdout.cursor_pos().unwrap();

        let stdin = stdin();
        let mut keys = stdin.keys();

        loop {
            write!(
                stdout,
                "{}{}Equation: {}",
                Goto(1, initial_y),
                ClearLine,
                expression
            )
            .unwrap();

            // Вычисляем байтовую позицию для отображения курсора
            let byte_pos = char_index_to_byte_index(&expression, cursor_pos);
            write!(stdout, "{}", Goto((11 + byte_pos) as u16, initial_y)).unwrap();
            stdout.flush().unwrap();

            match keys.next().unwrap().unwrap() {
                Key::Char('\n') => break,
                Key::Char(c) => {
                    // Вставляем символ по правильной позиции
                    let byte_idx = char_index_to_byte_index(&expression, cursor_pos);
                    expression.insert(byte_idx, c);
                    cursor_pos += 1;
                }
                Key::Backspace if cursor_pos > 0 => {
                    cursor_pos -= 1;
                    let byte_idx = char_index_to_byte_index(&expression, cursor_pos);
                    let next_char = expression[byte_idx..].chars().next();
                    if let Some(c) = next_char {
                        let end = byte_idx + c.len_utf8();
                        expression.drain(byte_idx..end);
                    }
                }
                Key::Delete if cursor_pos < expression.chars().count() => {
                    let byte_idx = char_index_to_byte_index(&expression, cursor_pos);
                    let next_char = expression[byte_idx..].chars().next();
                    if let Some(c) = next_char {
                        let end = byte_idx + c.len_utf8();
                        expression.drain(byte_idx..end);
                    }
                }
                Key::Left if cursor_pos > 0 => cursor_pos -= 1,
                Key::Right if cursor_pos < expression.chars().count() => cursor_pos += 1,
                Key::Home => cursor_pos = 0,
                Key::End => cursor_pos = expression.chars().count(),
                Key::Up => {
                    if history_index > 0 {
                        history_index -= 1;
                        expression = history[history_index].clone();
                        cursor_pos = expression.chars().count();
                    }
                }
                Key::Down => {
                    if history_index < history.len().saturating_sub(1) {
                        history_index += 1;
                        expression = history[history_index].clone();
                        cursor_pos = expression.chars().count();
                    } else {
                        history_index = history.len();
                        expression.clear();
                        cursor_pos = 0;
                    }
                }
                _ => {}
            }
        }

        let input = expression.trim();
        if input.is_empty() {
            continue;
        }

        match input.to_lowercase().as_str() {
            "q" | "quit" | "exit" => {
                println!("\r\nExiting...");
                return;
            }
            "i" | "help" | "instructions" => {
                print_instructions();
                continue;
            }
            "clear" | "reset" => {
                history.clear();
                history_index = 0;
                println!("\r\nHistory cleared\r");
                continue;
            }
            "anything else" => {
                println!("\r\nYeah, very funny.\r");
                continue;
            }
            _ => {}
        }

        history.push(input.to_string());
        history_index = history.len();

        let bytes = input.as_bytes();
        if bytes.len() >= 2 && bytes[1] == b' ' && matches!(bytes[0], b'x' | b'y' | b'z') {
            let Some(tree) = &current else {
                println!("\r\nThere is no graph to pan or zoom yet. Enter an equation first.\r");
                continue;
            };
            match apply_command(input, &mut view) {
                Ok(()) => match render(tree, Bounds::default(), &view) {
                    Ok(output) => print_graph(&output),
                    Err(e) => println!("\r\n{}\r", e),
                },
                Err(e) => println!("\r\n{}\r", e),
            }
            continue;
        }

        let cleaned = clean_expression(input);
        if cleaned.is_empty() {
            continue;
        }
        if !parens_balanced(&cleaned) {
            println!(
                "\r\nThe equation appears to be incorrectly formatted. Please make sure \
                 you have the same number of open & close parentheses.\r"
            );
            continue;
        }

        match parse(&cleaned) {
            Ok(tree) => {
                // Новое уравнение сбрасывает панораму и масштаб
                view = ViewState::default();
                match render(&tree, Bounds::default(), &view) {
                    Ok(output) => {
                        print_graph(&output);
                        current = Some(tree);
                    }
                    Err(e) => println!("\r\n{}\r", e),
                }
            }
            Err(e) => {
                println!("\r\n{}\r", e);
                println!("\rType \"i\" to see the formatting guide.\r");
            }
        }
    }
}
