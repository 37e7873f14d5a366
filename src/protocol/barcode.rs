//! # ESC/POS Barcode Command (GS k)
//!
//! ## Format Codes
//!
//! Callers select a barcode symbology with a numeric format code. Known
//! codes map to a type byte; any other code falls back to type `0`.
//!
//! | Format code | Type byte | Symbology |
//! |-------------|-----------|-----------|
//! | 0 | 0x00 | UPC-A |
//! | 1 | 0x01 | UPC-E |
//! | 2 | 0x02 | EAN13 |
//! | 3 | 0x03 | EAN8 |
//! | 4 | 0x04 | CODE39 |
//! | 73 | 0x49 | CODE128 |
//!
//! ## Framing
//!
//! The format code also decides how the data is framed, with `69` as the
//! pivot:
//!
//! ```text
//! code >  69:  GS k type len data...     (length-prefixed, function B)
//! code <  69:  GS k type data... NUL     (null-terminated, function A)
//! code == 69:  data...                   (raw passthrough, no command)
//! ```

use super::commands::GS;

/// Format code at which framing switches from null-terminated to
/// length-prefixed. The code itself gets no framing at all.
pub const FRAMING_PIVOT: i32 = 69;

/// Type byte for a format code. Unknown codes map to `0`.
///
/// ```
/// use escpos_press::protocol::barcode::type_code;
///
/// assert_eq!(type_code(73), 0x49);
/// assert_eq!(type_code(5), 0x00);
/// ```
pub fn type_code(format: i32) -> u8 {
    match format {
        0 => 0x00,
        1 => 0x01,
        2 => 0x02,
        3 => 0x03,
        4 => 0x04,
        73 => 0x49,
        _ => 0x00,
    }
}

/// Whether `format` is one of the codes in the type table.
pub fn is_known_format(format: i32) -> bool {
    matches!(format, 0..=4 | 73)
}

/// # Print Barcode (GS k)
///
/// Builds the barcode command for `data` under `format`. See the module
/// docs for the framing rule. In the length-prefixed form the length byte
/// is the data length modulo 256.
///
/// ```
/// use escpos_press::protocol::barcode::barcode;
///
/// assert_eq!(barcode(b"12345", 73), b"\x1Dk\x49\x0512345".to_vec());
/// assert_eq!(barcode(b"12345", 2), b"\x1Dk\x0212345\x00".to_vec());
/// assert_eq!(barcode(b"12345", 69), b"12345".to_vec());
/// ```
pub fn barcode(data: &[u8], format: i32) -> Vec<u8> {
    let code = type_code(format);

    if format > FRAMING_PIVOT {
        let mut cmd = Vec::with_capacity(4 + data.len());
        cmd.extend_from_slice(&[GS, b'k', code, data.len() as u8]);
        cmd.extend_from_slice(data);
        cmd
    } else if format < FRAMING_PIVOT {
        let mut cmd = Vec::with_capacity(4 + data.len());
        cmd.extend_from_slice(&[GS, b'k', code]);
        cmd.extend_from_slice(data);
        cmd.push(0x00);
        cmd
    } else {
        data.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_table() {
        assert_eq!(type_code(0), 0x00);
        assert_eq!(type_code(1), 0x01);
        assert_eq!(type_code(2), 0x02);
        assert_eq!(type_code(3), 0x03);
        assert_eq!(type_code(4), 0x04);
        assert_eq!(type_code(73), 0x49);
    }

    #[test]
    fn test_unknown_formats_use_zero() {
        for format in [-1, 5, 10, 68, 69, 70, 72, 74, 100] {
            assert_eq!(type_code(format), 0x00, "format {}", format);
            assert!(!is_known_format(format));
        }
        assert!(is_known_format(73));
    }

    #[test]
    fn test_length_prefixed_above_pivot() {
        assert_eq!(
            barcode(b"12345", 100),
            vec![0x1D, 0x6B, 0x00, 5, b'1', b'2', b'3', b'4', b'5']
        );
        assert_eq!(
            barcode(b"ABC", 73),
            vec![0x1D, 0x6B, 0x49, 3, b'A', b'B', b'C']
        );
    }

    #[test]
    fn test_null_terminated_below_pivot() {
        assert_eq!(
            barcode(b"12345", 10),
            vec![0x1D, 0x6B, 0x00, b'1', b'2', b'3', b'4', b'5', 0x00]
        );
        let mut expected = vec![0x1D, 0x6B, 0x00];
        expected.extend_from_slice(b"012345678905");
        expected.push(0x00);
        assert_eq!(barcode(b"012345678905", 0), expected);
    }

    #[test]
    fn test_pivot_is_raw() {
        assert_eq!(barcode(b"12345", 69), b"12345".to_vec());
        assert_eq!(barcode(b"", 69), Vec::<u8>::new());
    }

    #[test]
    fn test_boundaries_either_side_of_pivot() {
        assert_eq!(barcode(b"1", 68), vec![0x1D, 0x6B, 0x00, b'1', 0x00]);
        assert_eq!(barcode(b"1", 70), vec![0x1D, 0x6B, 0x00, 1, b'1']);
    }

    #[test]
    fn test_length_byte_wraps() {
        let data = vec![b'7'; 300];
        let cmd = barcode(&data, 73);
        assert_eq!(cmd[3], (300 % 256) as u8);
        assert_eq!(cmd.len(), 4 + 300);
    }
}
