//! # Print State
//!
//! The toggle model mirrored by a print session. The printer itself keeps
//! the same state; the session keeps a copy so that relative operations
//! (double width, double height) can be computed and so that a reset can
//! re-emit known values.

/// Smallest accepted character size multiplier.
pub const MIN_SIZE: u8 = 1;

/// Largest accepted character size multiplier.
pub const MAX_SIZE: u8 = 8;

/// Current formatting state of a print session.
///
/// `width` and `height` are character size multipliers and are always in
/// `MIN_SIZE..=MAX_SIZE`. The remaining fields are raw toggle levels
/// (`0` = off).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintState {
    pub width: u8,
    pub height: u8,
    pub underline: u8,
    pub emphasize: u8,
    pub upside_down: u8,
    pub rotate: u8,
    pub reverse: u8,
    pub smooth: u8,
}

impl Default for PrintState {
    fn default() -> Self {
        Self {
            width: 1,
            height: 1,
            underline: 0,
            emphasize: 0,
            upside_down: 0,
            rotate: 0,
            reverse: 0,
            smooth: 0,
        }
    }
}

impl PrintState {
    /// Restore every field to its power-on value.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Whether `width` x `height` is an accepted character size.
    pub fn is_valid_size(width: u8, height: u8) -> bool {
        (MIN_SIZE..=MAX_SIZE).contains(&width) && (MIN_SIZE..=MAX_SIZE).contains(&height)
    }
}
