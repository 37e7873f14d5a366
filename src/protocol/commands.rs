//! # ESC/POS Printer Commands
//!
//! Stateless builders for the fixed and parameterized control sequences
//! understood by ESC/POS-compatible receipt printers.
//!
//! ## Escape Sequence Structure
//!
//! Commands follow these patterns:
//! - Single byte: `LF`
//! - Two bytes: `ESC @`
//! - Multi-byte with parameters: `ESC d n`, `ESC $ nL nH`
//!
//! ## Byte Order
//!
//! Multi-byte integers use **little-endian** encoding:
//! - `u16` value 0x1234 is sent as bytes `[0x34, 0x12]`

// ============================================================================
// ESCAPE SEQUENCE CONSTANTS
// ============================================================================

/// ESC (Escape) - Command prefix byte
pub const ESC: u8 = 0x1B;

/// GS (Group Separator) - Extended command prefix
///
/// Used for character size, cutter, barcode and reverse-video commands.
pub const GS: u8 = 0x1D;

/// LF (Line Feed) - Print and advance one line
pub const LF: u8 = 0x0A;

/// End-of-job marker appended by [`end`]
pub const END: u8 = 0xFA;

// ============================================================================
// INITIALIZATION
// ============================================================================

/// # Initialize Printer (ESC @)
///
/// Resets the printer to its power-on default state.
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC @ |
/// | Hex     | 1B 40 |
/// | Decimal | 27 64 |
///
/// ## Example
///
/// ```
/// use escpos_press::protocol::commands;
///
/// assert_eq!(commands::init(), vec![0x1B, 0x40]);
/// ```
#[inline]
pub fn init() -> Vec<u8> {
    vec![ESC, b'@']
}

/// End-of-output marker (0xFA).
#[inline]
pub fn end() -> Vec<u8> {
    vec![END]
}

// ============================================================================
// CUTTER AND DRAWER
// ============================================================================

/// # Full Cut (GS V A 0)
///
/// ## Protocol Details
///
/// | Format  | Bytes       |
/// |---------|-------------|
/// | ASCII   | GS V A 0    |
/// | Hex     | 1D 56 41 30 |
///
/// Function B of `GS V`: feed by `'0'` (48) dots, then cut.
#[inline]
pub fn cut() -> Vec<u8> {
    vec![GS, b'V', b'A', b'0']
}

/// # Partial Cut (GS V 1)
///
/// Leaves a small uncut hinge so the receipt stays on the roll.
///
/// | Format  | Bytes    |
/// |---------|----------|
/// | Hex     | 1D 56 01 |
#[inline]
pub fn cut_partial() -> Vec<u8> {
    vec![GS, b'V', 1]
}

/// # Cash Drawer Kick (ESC p 0 t1 t2)
///
/// Pulses drawer pin 2 with on-time `t1 = 10` (20ms) and off-time
/// `t2 = 255` (510ms).
///
/// | Format  | Bytes          |
/// |---------|----------------|
/// | Hex     | 1B 70 00 0A FF |
#[inline]
pub fn cash() -> Vec<u8> {
    vec![ESC, b'p', 0x00, 0x0A, 0xFF]
}

/// # Drawer Pulse (ESC p 2)
///
/// Opens the drawer with `t = 2`, meaning a 2×2ms pulse. The timing is
/// fixed.
#[inline]
pub fn pulse() -> Vec<u8> {
    vec![ESC, b'p', 0x02]
}

// ============================================================================
// PAPER FEED
// ============================================================================

/// Single line feed.
#[inline]
pub fn linefeed() -> Vec<u8> {
    vec![LF]
}

/// # Print and Feed n Lines (ESC d n)
///
/// | Format  | Bytes    |
/// |---------|----------|
/// | ASCII   | ESC d n  |
/// | Hex     | 1B 64 n  |
///
/// `n` is a raw count byte; callers holding wider integers truncate modulo
/// 256 before calling.
///
/// ```
/// use escpos_press::protocol::commands;
///
/// assert_eq!(commands::formfeed_n(3), vec![0x1B, 0x64, 3]);
/// ```
#[inline]
pub fn formfeed_n(n: u8) -> Vec<u8> {
    vec![ESC, b'd', n]
}

/// # Set Line Spacing (ESC 3 n)
///
/// Sets the line spacing to `n` motion units.
#[inline]
pub fn line_spacing(n: u8) -> Vec<u8> {
    vec![ESC, b'3', n]
}

// ============================================================================
// ABSOLUTE POSITIONING
// ============================================================================

/// # Absolute Horizontal Position (ESC $ nL nH)
///
/// Moves the print position to `x` dots from the start of the line.
///
/// | Format  | Bytes          |
/// |---------|----------------|
/// | ASCII   | ESC $ nL nH    |
/// | Hex     | 1B 24 nL nH    |
///
/// ```
/// use escpos_press::protocol::commands;
///
/// // 300 = 0x012C -> [0x2C, 0x01]
/// assert_eq!(commands::move_x(300), vec![0x1B, 0x24, 44, 1]);
/// ```
#[inline]
pub fn move_x(x: u16) -> Vec<u8> {
    let [lo, hi] = u16_le(x);
    vec![ESC, b'$', lo, hi]
}

/// # Absolute Vertical Position (GS $ nL nH)
///
/// Same encoding as [`move_x`] under the `GS` prefix.
#[inline]
pub fn move_y(y: u16) -> Vec<u8> {
    let [lo, hi] = u16_le(y);
    vec![GS, b'$', lo, hi]
}

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Encode a u16 value as little-endian bytes [low, high]
///
/// ```
/// use escpos_press::protocol::commands::u16_le;
///
/// assert_eq!(u16_le(0x1234), [0x34, 0x12]);
/// assert_eq!(u16_le(300), [44, 1]);
/// ```
#[inline]
pub const fn u16_le(value: u16) -> [u8; 2] {
    [(value % 256) as u8, (value / 256) as u8]
}

// ============================================================================
// TESTS
// ============================================================================
