//! # Sample Pages
//!
//! Built-in documents for checking a printer end to end.
//!
//! - `asciitable`: the printer's code page laid out as a boxed 16x13 grid
//! - `demo`: a node document touching every node kind

use crate::error::EscposError;
use crate::node::{Node, ParamKey, Params};
use crate::printer::Escpos;

// CP437 box drawing
const BOX_TOP_LEFT: u8 = 0xDA;
const BOX_TOP_RIGHT: u8 = 0xBF;
const BOX_BOTTOM_LEFT: u8 = 0xC0;
const BOX_BOTTOM_RIGHT: u8 = 0xD9;
const BOX_HORIZONTAL: u8 = 0xC4;
const BOX_VERTICAL: u8 = 0xB3;
const BOX_TEE_LEFT: u8 = 0xC3;

/// First printable column (0x30..0x3F).
const FIRST_COLUMN: usize = 3;
const COLUMNS: usize = 16;

/// 16x2 dot checker strip, already in raster form.
const DEMO_RASTER: &str = "/wAA/w==";

// ============================================================================
// SAMPLES
// ============================================================================

/// The code page table.
///
/// Columns are the high nibble (3..F), rows the low nibble, so every byte
/// from `0x30` to `0xFF` is printed once in the printer's active code page.
pub fn ascii_table() -> Vec<u8> {
    let mut p = Escpos::buffer();
    p.init()
        .set_smooth(1)
        .set_font_size(2, 3)
        .set_font("A")
        .write("ASCII TABLE")
        .linefeed()
        .linefeed();

    // Two characters per column plus the closing space.
    let rule = (COLUMNS - FIRST_COLUMN) * 2 + 1;

    p.set_font("A")
        .set_line_spacing(26)
        .linefeed()
        .write("  ")
        .write_byte(BOX_TOP_LEFT)
        .write_repeat(rule, &[BOX_HORIZONTAL])
        .write_byte(BOX_TOP_RIGHT)
        .linefeed()
        .write_raw(b"  \xB3 3 4 5 6 7 8 9 A B C D E F \xB3")
        .linefeed()
        .write("  ")
        .write_byte(BOX_TEE_LEFT)
        .write_repeat(rule, &[BOX_HORIZONTAL])
        .write_byte(BOX_VERTICAL)
        .linefeed();

    for row in 0..COLUMNS {
        p.writef(format_args!("{:x} ", row))
            .write_byte(BOX_VERTICAL)
            .write(" ");
        for column in FIRST_COLUMN..COLUMNS {
            p.write_raw(&[(column * 16 + row) as u8, b' ']);
        }
        p.write_byte(BOX_VERTICAL).linefeed();
    }

    p.write("  ")
        .write_byte(BOX_BOTTOM_LEFT)
        .write_repeat(rule, &[BOX_HORIZONTAL])
        .write_byte(BOX_BOTTOM_RIGHT)
        .linefeed()
        .formfeed_n(2)
        .cut()
        .end();

    p.into_bytes()
}

/// A short receipt as a node document.
pub fn demo_nodes() -> Vec<Node> {
    vec![
        Node::text(
            Params::new()
                .with(ParamKey::Align, "center")
                .with(ParamKey::Smooth, "1")
                .with(ParamKey::Dw, "1")
                .with(ParamKey::Dh, "1"),
            "ESCPOS PRESS",
        ),
        Node::feed(Params::new().with(ParamKey::Line, "1")),
        Node::text(
            Params::new()
                .with(ParamKey::Align, "left")
                .with(ParamKey::Font, "font_b"),
            "Fish &amp; chips&#9;4.50&#10;Tea&#9;&#9;1.20&#10;",
        ),
        Node::text(
            Params::new().with(ParamKey::Em, "1").with(ParamKey::Ul, "1"),
            "TOTAL&#9;&#9;5.70",
        ),
        Node::feed(Params::new().with(ParamKey::Unit, "40")),
        Node::image(
            Params::new()
                .with(ParamKey::Align, "center")
                .with(ParamKey::Width, "16")
                .with(ParamKey::Height, "2"),
            DEMO_RASTER,
        ),
        Node::feed(Params::new().with(ParamKey::Line, "3")),
        Node::cut(Params::new().with(ParamKey::Type, "feed")),
        Node::pulse(),
    ]
}

/// [`demo_nodes`] encoded, framed by init and end.
pub fn demo() -> Result<Vec<u8>, EscposError> {
    let mut p = Escpos::buffer();
    p.init().write_nodes(&demo_nodes())?.end();
    Ok(p.into_bytes())
}

// ============================================================================
// LOOKUP FUNCTIONS
// ============================================================================

/// List available samples
pub fn list_samples() -> &'static [&'static str] {
    &["asciitable", "demo"]
}

/// Listed name for `name`, accepting aliases and any letter case.
fn canonical_name(name: &str) -> Option<&'static str> {
    match name.to_lowercase().as_str() {
        "asciitable" | "ascii-table" | "ascii_table" => Some("asciitable"),
        "demo" => Some("demo"),
        _ => None,
    }
}

pub fn is_sample(name: &str) -> bool {
    canonical_name(name).is_some()
}

/// Get sample bytes by name. Unknown names give `Ok(None)`.
pub fn by_name(name: &str) -> Result<Option<Vec<u8>>, EscposError> {
    match canonical_name(name) {
        Some("asciitable") => Ok(Some(ascii_table())),
        Some("demo") => demo().map(Some),
        _ => Ok(None),
    }
}
