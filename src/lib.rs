//! Lane-parallel byte kernels.
//!
//! Validation and transformation of fixed-width byte chunks using only
//! elementwise lane operations and horizontal reductions, with no
//! per-byte branching:
//!
//! - [`decode`]: base64 decode-and-validate over 4-byte chunks
//! - [`parse`]: IPv4 dotted-quad parsing over a 16-byte padded buffer
//!
//! The [`lanes`] module provides the vector type both kernels are written
//! against.

#[cfg(feature = "cli")]
pub mod config;
mod errors;
pub mod kernels;
pub mod lanes;
pub mod prelude;

#[cfg(feature = "cli")]
pub use config::{ColorMode, DecodeFormat, Settings};
pub use errors::{DecodeError, ParseError, ParseErrorKind};
pub use kernels::base64::{decode, decode_chunk, try_decode};
pub use kernels::ipv4::{parse, parse_addr};
pub use lanes::{Backend, LaneMask, Lanes, active_backend, swizzle};
