#![allow(clippy::module_inception)]

use std::{fmt::Write, rc::Rc};

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod type_checker;

extern crate regex;

/// Byte offset into a source file, together with the file's name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position(pub u32, pub Rc<String>);

#[cfg(test)]
impl Position {
    pub fn null() -> Self {
        Position(0, Rc::new(String::from("<null>")))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

#[cfg(test)]
impl Span {
    pub fn null() -> Self {
        Span {
            start: Position::null(),
            end: Position::null(),
        }
    }
}

/// Finds the line containing `position`.
///
/// Returns the 1-based line number, the line's text and the offset of
/// `position` within that line, or `None` when the position lies past the
/// end of `source`.
pub fn get_line_at_position(source: &str, position: u32) -> Option<(usize, String, usize)> {
    let pos = position as usize;

    if pos >= source.len() {
        return None;
    }

    let mut start = 0;

    for (index, line) in source.split_inclusive('\n').enumerate() {
        let end = start + line.len();

        if (start..end).contains(&pos) {
            return Some((index + 1, line.to_string(), pos - start));
        }

        start = end;
    }

    None
}

/// Renders a headline followed by the source line `position` points at.
///
/// ```text
/// Error: message
/// -> script.bt
///    |
/// 20 | @x = foo;
///    | -----^
/// ```
pub fn render_report(headline: &str, position: &Position, source: &str) -> String {
    let mut report = String::new();
    let _ = writeln!(report, "Error: {}", headline);
    let _ = writeln!(report, "-> {}", position.1);

    let Some((line, line_text, line_pos)) = get_line_at_position(source, position.0) else {
        return report;
    };

    let line_str = line.to_string();
    let padding = line_str.len() + 2;

    let _ = writeln!(report, "{:>padding$}", "|");

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    let _ = writeln!(report, "{} | {}", line_str, line_text_removed.trim_end());

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;
    let _ = writeln!(report, "{:>padding$} {:->arrows$}", "|", "^");

    report
}

fn remove_starting_whitespace(string: &str) -> (&str, usize) {
    let trimmed = string.trim_start_matches([' ', '\t']);
    (trimmed, string.len() - trimmed.len())
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::{get_line_at_position, render_report, Position};

    const SOURCE: &str = "Hello, world!\nsecond\n\n    Testing { }\n";

    #[test]
    fn test_get_line_at_position() {
        let (line_number, line, line_pos) = get_line_at_position(SOURCE, 10).unwrap();
        assert_eq!(line_number, 1);
        assert_eq!(line, "Hello, world!\n");
        assert_eq!(line_pos, 10);

        let (line_number, line, line_pos) = get_line_at_position(SOURCE, 34).unwrap();
        assert_eq!(line_number, 4);
        assert_eq!(line, "    Testing { }\n");
        assert_eq!(line_pos, 12);
    }

    #[test]
    fn test_get_line_past_end() {
        assert!(get_line_at_position(SOURCE, 400).is_none());
    }

    #[test]
    fn test_render_report_points_at_column() {
        let position = Position(34, Rc::new(String::from("test.bt")));
        let report = render_report("UnexpectedToken", &position, SOURCE);

        assert_eq!(
            report,
            "Error: UnexpectedToken\n-> test.bt\n  |\n4 | Testing { }\n  | --------^\n"
        );
    }
}
