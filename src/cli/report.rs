//! Human-readable error output for the terminal.

use lanekit::{ColorMode, DecodeError, ParseError, ParseErrorKind};
use std::fmt::Write;
use std::io::IsTerminal;

const RED: &str = "\x1b[1;31m";
const CYAN: &str = "\x1b[1;36m";
const RESET: &str = "\x1b[0m";

/// Check if colored output should be used
pub fn should_use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            // Respect NO_COLOR environment variable
            std::env::var_os("NO_COLOR").is_none() && std::io::stderr().is_terminal()
        }
    }
}

fn paint(text: &str, code: &str, color: bool) -> String {
    if color {
        format!("{code}{text}{RESET}")
    } else {
        text.to_string()
    }
}

fn headline(message: &dyn std::fmt::Display, color: bool) -> String {
    format!("{} {message}", paint("error:", RED, color))
}

fn push_hint(out: &mut String, hint: &str, color: bool) {
    let _ = write!(out, "\n\n{} {hint}", paint("hint:", CYAN, color));
}

/// Renders any top-level error, with extra detail for the kernel errors.
pub fn render_error(err: &(dyn std::error::Error + 'static), color: bool) -> String {
    if let Some(e) = err.downcast_ref::<DecodeError>() {
        render_decode_error(e, color)
    } else if let Some(e) = err.downcast_ref::<ParseError>() {
        render_parse_error(e, color)
    } else {
        headline(err, color)
    }
}

pub fn render_decode_error(err: &DecodeError, color: bool) -> String {
    let mut out = headline(err, color);
    match err {
        DecodeError::InvalidCharacter { byte: b'=', .. } => push_hint(
            &mut out,
            "padding is not accepted; strip trailing '=' characters",
            color,
        ),
        DecodeError::InvalidCharacter { .. } => push_hint(
            &mut out,
            "valid characters: A-Z a-z 0-9 + /",
            color,
        ),
        DecodeError::InvalidLength { .. } => push_hint(
            &mut out,
            "unpadded input must have a length that is a multiple of 4",
            color,
        ),
    }
    out
}

pub fn render_parse_error(err: &ParseError, color: bool) -> String {
    let mut out = headline(err, color);

    // Carets only line up when every byte prints as one column.
    let input = err.input();
    if input.bytes().all(|b| b.is_ascii_graphic()) {
        if let Some((start, width)) = span(err) {
            let carets = paint(&"^".repeat(width.max(1)), RED, color);
            let _ = write!(out, "\n\n  {input}\n  {}{carets}", " ".repeat(start));
        }
    }

    match err.kind() {
        ParseErrorKind::LeadingZero { .. } => {
            push_hint(&mut out, "write the octet without leading zeros", color)
        }
        ParseErrorKind::ValueTooLarge { .. } => {
            push_hint(&mut out, "each octet must be between 0 and 255", color)
        }
        ParseErrorKind::Length { .. } => push_hint(
            &mut out,
            "an address is 7 to 15 characters, like 192.168.0.1",
            color,
        ),
        _ => {}
    }
    out
}

/// Byte column and width of the part of the input an error points at.
fn span(err: &ParseError) -> Option<(usize, usize)> {
    match err.kind() {
        ParseErrorKind::UnexpectedCharacter { position } => Some((position, 1)),
        kind => {
            let field = kind.field()?;
            let start: usize = err
                .input()
                .split('.')
                .take(field)
                .map(|f| f.len() + 1)
                .sum();
            Some((start, err.fragment().map_or(1, str::len)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_never_and_always() {
        assert!(!should_use_color(ColorMode::Never));
        assert!(should_use_color(ColorMode::Always));
    }

    #[test]
    fn test_parse_error_carets_under_field() {
        let err = lanekit::parse("10.300.1.1").unwrap_err();
        let text = render_parse_error(&err, false);
        assert!(text.starts_with("error: parse \"10.300.1.1\": IPv4 field has value >255"));
        assert!(text.contains("\n  10.300.1.1\n     ^^^"));
        assert!(text.ends_with("hint: each octet must be between 0 and 255"));
    }

    #[test]
    fn test_parse_error_caret_under_character() {
        let err = lanekit::parse("1.2.3.4x").unwrap_err();
        let text = render_parse_error(&err, false);
        assert!(text.contains("\n  1.2.3.4x\n         ^"));
    }

    #[test]
    fn test_decode_padding_hint() {
        let err = lanekit::try_decode(b"YQ==").unwrap_err();
        let text = render_decode_error(&err, false);
        assert!(text.starts_with("error: invalid character '=' at position 2"));
        assert!(text.contains("hint: padding is not accepted"));
    }

    #[test]
    fn test_colored_headline() {
        let err = lanekit::try_decode(b"abc").unwrap_err();
        let text = render_decode_error(&err, true);
        assert!(text.starts_with("\x1b[1;31merror:\x1b[0m invalid length"));
    }

    #[test]
    fn test_render_error_falls_back_to_display() {
        let err: Box<dyn std::error::Error> = "something broke".into();
        assert_eq!(render_error(&*err, false), "error: something broke");
    }
}
