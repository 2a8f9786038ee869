//! Internal helpers shared by the function modules.
//!
//! Everything here is `pub(crate)`; it is not part of the public API.
//!
//! # Clippy suppressions
//!
//! Table modules carry `#![allow(clippy::excessive_precision)]`: the
//! coefficients are written with more digits than f64 holds so that the
//! literals match the fits they came from.

pub(crate) mod constants;
pub(crate) mod reduce;
