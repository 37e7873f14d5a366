//! # ESC/POS Graphics Commands (ESC ( L)
//!
//! Raster images go to the printer in two transfers: the first stores the
//! image in the print buffer (function `p`), the second prints the buffered
//! image (function `2`).
//!
//! ## Transfer Framing
//!
//! ```text
//! ESC ( L  pL pH  m  fn  [data...]
//!          └─┬─┘
//!   little-endian length of data + 2 (m and fn)
//! ```
//!
//! ## Raster Header
//!
//! The data of a store transfer starts with a fixed 4-byte header:
//!
//! | Byte | Value | Meaning |
//! |------|-------|---------|
//! | 0 | `'0'` | tone (monochrome) |
//! | 1 | `1` | horizontal multiplier |
//! | 2 | `1` | vertical multiplier |
//! | 3 | `'1'` | color plane count byte |
//!
//! The image bytes follow verbatim. Dimensions are not encoded; the caller
//! passes pre-encoded raster data that already carries them.

use super::commands::{ESC, u16_le};

/// Mode selector byte used for every transfer.
pub const MODE: u8 = b'0';

/// Function code: store image data in the print buffer.
pub const FN_STORE: u8 = b'p';

/// Function code: print the buffered image.
pub const FN_PRINT: u8 = b'2';

/// Fixed raster header prepended to every stored image.
pub const RASTER_HEADER: [u8; 4] = [b'0', 0x01, 0x01, b'1'];

/// # Graphics Transfer (ESC ( L pL pH m fn data)
///
/// Frames `data` under mode `m` and function `func`. The length field is
/// `data.len() + 2`, truncated to 16 bits.
///
/// ```
/// use escpos_press::protocol::graphics::transfer;
///
/// assert_eq!(
///     transfer(b'0', b'2', &[]),
///     vec![0x1B, 0x28, 0x4C, 2, 0, b'0', b'2']
/// );
/// ```
pub fn transfer(m: u8, func: u8, data: &[u8]) -> Vec<u8> {
    let len = (data.len() + 2) as u16;
    let [lo, hi] = u16_le(len);

    let mut cmd = Vec::with_capacity(7 + data.len());
    cmd.extend_from_slice(&[ESC, b'(', b'L', lo, hi, m, func]);
    cmd.extend_from_slice(data);
    cmd
}

/// Store-then-print sequence for pre-encoded raster bytes.
///
/// Returns the store transfer (header + `image`) followed by the empty
/// print transfer.
pub fn raster_image(image: &[u8]) -> Vec<u8> {
    let mut payload = Vec::with_capacity(RASTER_HEADER.len() + image.len());
    payload.extend_from_slice(&RASTER_HEADER);
    payload.extend_from_slice(image);

    let mut cmd = transfer(MODE, FN_STORE, &payload);
    cmd.extend(transfer(MODE, FN_PRINT, &[]));
    cmd
}
