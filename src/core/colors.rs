//! Color mapping for conflict markers and on/off settings.
//!
//! # Public API
//! - [`MarkerKind`] / [`classify_marker_line`]: Recognize conflict marker lines
//! - [`format_conflict_line`]: Numbered, colored line for the conflict viewer
//! - [`get_flag_colored`]: Green `true` / red `false`
//!
//! # Color Scheme
//! - **`<<<<<<<`**: Red, start of the local side
//! - **`=======`**: Yellow, separator
//! - **`>>>>>>>`**: Green, end of the incoming side
//! - **Inside a conflict**: White
//! - **Outside a conflict**: Dimmed

use colored::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    Start,
    Separator,
    End,
}

pub fn classify_marker_line(line: &str) -> Option<MarkerKind> {
    if line.starts_with("<<<<<<<") {
        Some(MarkerKind::Start)
    } else if line.starts_with("=======") {
        Some(MarkerKind::Separator)
    } else if line.starts_with(">>>>>>>") {
        Some(MarkerKind::End)
    } else {
        None
    }
}

/// Single function to apply color styling to a conflict marker kind
pub fn get_marker_color_style(kind: MarkerKind) -> Box<dyn Fn(&str) -> ColoredString> {
    match kind {
        MarkerKind::Start => Box::new(|text: &str| text.red().bold()),
        MarkerKind::Separator => Box::new(|text: &str| text.yellow().bold()),
        MarkerKind::End => Box::new(|text: &str| text.green().bold()),
    }
}

/// `{number:4} | {line}` colored by marker kind and conflict position.
pub fn format_conflict_line(number: usize, line: &str, in_conflict: bool) -> String {
    let gutter = format!("{number:4} |").bright_black();
    let body = match classify_marker_line(line) {
        Some(kind) => get_marker_color_style(kind)(line),
        None if in_conflict => line.white(),
        None => line.dimmed(),
    };
    format!("{gutter} {body}")
}

pub fn get_flag_colored(value: bool) -> ColoredString {
    if value {
        "true".green()
    } else {
        "false".red()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_marker_lines() {
        assert_eq!(classify_marker_line("<<<<<<< HEAD"), Some(MarkerKind::Start));
        assert_eq!(classify_marker_line("======="), Some(MarkerKind::Separator));
        assert_eq!(
            classify_marker_line(">>>>>>> feature/login"),
            Some(MarkerKind::End)
        );
        assert_eq!(classify_marker_line("let x = 1;"), None);
        assert_eq!(classify_marker_line(" <<<<<<< indented"), None);
    }

    #[test]
    fn test_format_conflict_line_keeps_text() {
        let result = format_conflict_line(7, "<<<<<<< HEAD", true);
        assert!(result.contains("   7 |"));
        assert!(result.contains("<<<<<<< HEAD"));

        let plain = format_conflict_line(12, "fn main() {}", false);
        assert!(plain.contains("  12 |"));
        assert!(plain.contains("fn main() {}"));
    }

    #[test]
    fn test_flag_colored_text() {
        assert!(get_flag_colored(true).to_string().contains("true"));
        assert!(get_flag_colored(false).to_string().contains("false"));
    }
}
