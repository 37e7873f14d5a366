//! # ESC/POS Text Styling Commands
//!
//! Builders for the formatting commands that the print session keeps in
//! its toggle model, plus the name tables used to select alignment, font
//! and language from node parameters.
//!
//! ## Toggle Commands
//!
//! Each toggle takes a raw level byte (`0` = off, `1` = on; some firmware
//! accepts `2` for a heavier variant).
//!
//! | Style | Command | Bytes |
//! |-------|---------|-------|
//! | Underline | ESC - n | 1B 2D n |
//! | Emphasize | ESC G n | 1B 47 n |
//! | Upside down | ESC { n | 1B 7B n |
//! | Rotate | ESC R n | 1B 52 n |
//! | Reverse | GS B n | 1D 42 n |
//! | Smoothing | GS b n | 1D 62 n |
//!
//! ## Character Size (GS ! n)
//!
//! ```text
//! bit: 7 6 5 4 | 3 2 1 0
//!      width-1 | height-1
//! ```

use std::str::FromStr;

use super::commands::{ESC, GS};
use crate::error::EscposError;

// ============================================================================
// TEXT ALIGNMENT
// ============================================================================

/// Text alignment options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left = 0,
    Center = 1,
    Right = 2,
}

impl FromStr for Alignment {
    type Err = EscposError;

    /// Only `left`, `center` and `right` are accepted. Anything else is a
    /// configuration error.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(Alignment::Left),
            "center" => Ok(Alignment::Center),
            "right" => Ok(Alignment::Right),
            other => Err(EscposError::InvalidAlignment(other.to_string())),
        }
    }
}

/// # Select Justification (ESC a n)
///
/// | Format  | Bytes   |
/// |---------|---------|
/// | ASCII   | ESC a n |
/// | Hex     | 1B 61 n |
///
/// ```
/// use escpos_press::protocol::text::{align, Alignment};
///
/// assert_eq!(align(Alignment::Center), vec![0x1B, 0x61, 0x01]);
/// ```
pub fn align(alignment: Alignment) -> Vec<u8> {
    vec![ESC, b'a', alignment as u8]
}

// ============================================================================
// FONT SELECTION
// ============================================================================

/// Available fonts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Font {
    #[default]
    A = 0,
    B = 1,
    C = 2,
}

impl Font {
    /// Map a font letter to a font. The mapping is total: anything other
    /// than `A`, `B` or `C` (including the empty string) selects font A.
    pub fn from_name(name: &str) -> Font {
        match name {
            "B" => Font::B,
            "C" => Font::C,
            _ => Font::A,
        }
    }
}

/// # Select Character Font (ESC M n)
///
/// | Format  | Bytes   |
/// |---------|---------|
/// | Hex     | 1B 4D n |
pub fn font(f: Font) -> Vec<u8> {
    vec![ESC, b'M', f as u8]
}

// ============================================================================
// INTERNATIONAL CHARACTER SET
// ============================================================================

/// Supported language codes and their character-set indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    English = 0,
    French = 1,
    German = 2,
    Uk = 3,
    Danish = 4,
    Swedish = 5,
    Italian = 6,
    Spanish = 7,
    Japanese = 8,
    Norwegian = 9,
}

impl Language {
    /// Every supported language, in index order.
    pub const ALL: [Language; 10] = [
        Language::English,
        Language::French,
        Language::German,
        Language::Uk,
        Language::Danish,
        Language::Swedish,
        Language::Italian,
        Language::Spanish,
        Language::Japanese,
        Language::Norwegian,
    ];

    /// Two-letter code for this language.
    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::French => "fr",
            Language::German => "de",
            Language::Uk => "uk",
            Language::Danish => "da",
            Language::Swedish => "sv",
            Language::Italian => "it",
            Language::Spanish => "es",
            Language::Japanese => "ja",
            Language::Norwegian => "no",
        }
    }
}

impl FromStr for Language {
    type Err = EscposError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::ALL
            .into_iter()
            .find(|lang| lang.code() == s)
            .ok_or_else(|| EscposError::InvalidLanguage(s.to_string()))
    }
}

/// # Select International Character Set (ESC R n)
///
/// Shares its opcode with [`rotate`].
pub fn lang(language: Language) -> Vec<u8> {
    vec![ESC, b'R', language as u8]
}

// ============================================================================
// CHARACTER SIZE
// ============================================================================

/// # Select Character Size (GS ! n)
///
/// `width` and `height` are multipliers in `1..=8`. Range checking is the
/// caller's job; this only packs the nibbles.
///
/// ```
/// use escpos_press::protocol::text::font_size;
///
/// assert_eq!(font_size(1, 1), vec![0x1D, 0x21, 0x00]);
/// assert_eq!(font_size(2, 3), vec![0x1D, 0x21, 0x12]);
/// ```
pub fn font_size(width: u8, height: u8) -> Vec<u8> {
    let n = (width.wrapping_sub(1) << 4) | height.wrapping_sub(1);
    vec![GS, b'!', n]
}

// ============================================================================
// TOGGLES
// ============================================================================

/// Underline (ESC - n)
#[inline]
pub fn underline(level: u8) -> Vec<u8> {
    vec![ESC, b'-', level]
}

/// Emphasize / double-strike (ESC G n)
#[inline]
pub fn emphasize(level: u8) -> Vec<u8> {
    vec![ESC, b'G', level]
}

/// Upside-down printing (ESC { n)
#[inline]
pub fn upside_down(level: u8) -> Vec<u8> {
    vec![ESC, b'{', level]
}

/// Rotation (ESC R n)
#[inline]
pub fn rotate(level: u8) -> Vec<u8> {
    vec![ESC, b'R', level]
}

/// Reverse video, white on black (GS B n)
#[inline]
pub fn reverse(level: u8) -> Vec<u8> {
    vec![GS, b'B', level]
}

/// Smoothing (GS b n)
#[inline]
pub fn smooth(level: u8) -> Vec<u8> {
    vec![GS, b'b', level]
}

// ============================================================================
// TESTS
// ============================================================================
