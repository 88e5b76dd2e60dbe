//! Placeholder scanning for translation templates.

mod placeholder;

pub use placeholder::{Piece, parse_pieces, placeholder_names};
