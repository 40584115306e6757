//! Kernels built on the lane library.
//!
//! Both kernels are pure functions of their input: no state is shared
//! between calls and the lookup tables are constants.

pub mod base64;
pub mod ipv4;
