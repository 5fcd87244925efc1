//! Position notation.
//!
//! Compact text encoding of a full board position, used for configuring
//! the engine and for recording self-play games.

pub mod notation;

pub use notation::{encode_notation, parse_notation, NotationError};
