//! Convenient re-exports for common usage.
//!
//! # Example
//!
//! ```
//! use lanekit::prelude::*;
//!
//! let (bytes, ok) = decode(b"SGVsbG8h");
//! assert!(ok);
//! assert_eq!(bytes, b"Hello!");
//!
//! assert_eq!(parse("10.0.0.1").unwrap(), [10, 0, 0, 1]);
//! ```

pub use crate::{
    DecodeError, LaneMask, Lanes, ParseError, ParseErrorKind, decode, parse, parse_addr, swizzle,
    try_decode,
};

#[cfg(feature = "cli")]
pub use crate::Settings;
