use std::fmt;

use thiserror::Error;

/// Errors that can occur during base64 decoding.
///
/// Decoding is all-or-nothing: any error means no bytes were produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Input length is not a multiple of the 4-byte chunk size
    #[error("invalid length for decode: {actual} is not a multiple of 4")]
    InvalidLength { actual: usize },
    /// A chunk contains a byte outside the standard base64 alphabet
    #[error("invalid character '{}' at position {position}", .byte.escape_ascii())]
    InvalidCharacter { byte: u8, position: usize },
}

/// What went wrong while parsing an IPv4 address.
///
/// Field indices count from 0 at the leftmost octet; positions are byte
/// offsets into the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("IPv4 address string too short or too long")]
    Length { len: usize },
    #[error("unexpected character")]
    UnexpectedCharacter { position: usize },
    #[error("invalid dot count")]
    DotCount { count: usize },
    #[error("invalid field length")]
    FieldLength { field: usize },
    #[error("IPv4 field has octet with leading zero")]
    LeadingZero { field: usize },
    #[error("IPv4 field has value >255")]
    ValueTooLarge { field: usize },
}

impl ParseErrorKind {
    /// The octet this error belongs to, for per-field errors.
    pub fn field(&self) -> Option<usize> {
        match *self {
            ParseErrorKind::FieldLength { field }
            | ParseErrorKind::LeadingZero { field }
            | ParseErrorKind::ValueTooLarge { field } => Some(field),
            _ => None,
        }
    }
}

/// Error returned by [`crate::parse`].
///
/// Carries the original input, the cause, and optionally the offending
/// character or field text. Rendering is left to the caller; `Display`
/// gives a single-line form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    input: String,
    kind: ParseErrorKind,
    at: Option<String>,
}

impl ParseError {
    pub(crate) fn new(input: &str, kind: ParseErrorKind) -> Self {
        ParseError {
            input: input.to_string(),
            kind,
            at: None,
        }
    }

    pub(crate) fn at(mut self, fragment: impl Into<String>) -> Self {
        self.at = Some(fragment.into());
        self
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn kind(&self) -> ParseErrorKind {
        self.kind
    }

    /// The offending character or field, when one can be named.
    pub fn fragment(&self) -> Option<&str> {
        self.at.as_deref()
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "parse {:?}: {}", self.input, self.kind)?;
        if let Some(at) = &self.at {
            write!(f, " (at {:?})", at)?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = ParseError::new("256.1.1.1", ParseErrorKind::ValueTooLarge { field: 0 }).at("256");
        assert_eq!(
            err.to_string(),
            r#"parse "256.1.1.1": IPv4 field has value >255 (at "256")"#
        );

        let err = ParseError::new("1.2.3", ParseErrorKind::Length { len: 5 });
        assert_eq!(
            err.to_string(),
            r#"parse "1.2.3": IPv4 address string too short or too long"#
        );
        assert_eq!(err.fragment(), None);
    }

    #[test]
    fn test_kind_field() {
        assert_eq!(ParseErrorKind::LeadingZero { field: 2 }.field(), Some(2));
        assert_eq!(ParseErrorKind::DotCount { count: 4 }.field(), None);
    }

    #[test]
    fn test_decode_error_display() {
        let err = DecodeError::InvalidCharacter {
            byte: b'=',
            position: 7,
        };
        assert_eq!(err.to_string(), "invalid character '=' at position 7");

        let err = DecodeError::InvalidCharacter {
            byte: 0x00,
            position: 0,
        };
        assert_eq!(err.to_string(), r"invalid character '\x00' at position 0");

        let err = DecodeError::InvalidLength { actual: 5 };
        assert_eq!(
            err.to_string(),
            "invalid length for decode: 5 is not a multiple of 4"
        );
    }
}
