//! # ESC/POS Protocol Implementation
//!
//! Low-level command builders for ESC/POS receipt printers. Every builder
//! returns the bytes for one command as a `Vec<u8>`; nothing here holds
//! state.
//!
//! ## Module Structure
//!
//! - [`commands`]: Basic printer commands (init, cut, feed, positioning)
//! - [`text`]: Text styling (alignment, fonts, size, toggles)
//! - [`entities`]: Entity normalization for text payloads
//! - [`barcode`]: 1D barcodes
//! - [`graphics`]: Raster image transfers
//!
//! ## Usage Example
//!
//! ```
//! use escpos_press::protocol::{commands, text};
//!
//! let mut data = Vec::new();
//! data.extend(commands::init());
//! data.extend(text::align(text::Alignment::Center));
//! data.extend(text::emphasize(1));
//! data.extend(b"RECEIPT\n");
//! data.extend(text::emphasize(0));
//! data.extend(commands::cut());
//! ```

pub mod barcode;
pub mod commands;
pub mod entities;
pub mod graphics;
pub mod text;
