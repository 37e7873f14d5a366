//! # Print Session
//!
//! [`Escpos`] is the stateful builder that turns calls into ESC/POS bytes.
//! It owns a [`PrintState`] toggle model and a [`ByteSink`]; every method
//! updates the state (if it has any) and writes its command to the sink
//! before returning. There is no deferred evaluation and no hidden global
//! state, so independent sessions never interfere.
//!
//! Methods return `&mut Self` for chaining. The few operations that can hit
//! a configuration error (unknown alignment or language) return
//! `Result<&mut Self, EscposError>` instead, so the chain continues with `?`.
//!
//! ## Example
//!
//! ```
//! use escpos_press::Escpos;
//!
//! let mut p = Escpos::buffer();
//! p.init()
//!     .set_smooth(1)
//!     .set_font_size(2, 3)
//!     .set_font("A")
//!     .write("TITLE")
//!     .linefeed();
//! p.set_align("center")?.write("centered").linefeed().cut();
//!
//! assert_eq!(&p.bytes()[0..2], &[0x1B, 0x40]);
//! # Ok::<(), escpos_press::EscposError>(())
//! ```

pub mod state;

use std::fmt;
use std::io::Write;

use crate::error::EscposError;
use crate::protocol::text::{self, Alignment, Font, Language};
use crate::protocol::{barcode, commands, graphics};
use crate::sink::{ByteSink, WriterSink};

pub use state::PrintState;

/// # ESC/POS print session
///
/// A single job's worth of state plus the sink its bytes go to. A session
/// belongs to one caller at a time; share jobs across threads by giving
/// each one its own session.
pub struct Escpos<S: ByteSink = Vec<u8>> {
    sink: S,
    state: PrintState,
}

impl Escpos<Vec<u8>> {
    /// Session writing into an in-memory buffer.
    pub fn buffer() -> Self {
        Self::new(Vec::new())
    }

    /// Bytes emitted so far.
    pub fn bytes(&self) -> &[u8] {
        &self.sink
    }

    pub fn len(&self) -> usize {
        self.sink.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sink.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.sink
    }
}

impl<W: Write> Escpos<WriterSink<W>> {
    /// Session forwarding every command straight to `writer`.
    pub fn with_writer(writer: W) -> Self {
        Self::new(WriterSink::new(writer))
    }

    /// Flush the writer and return it, surfacing the first write failure.
    pub fn finish(self) -> Result<W, EscposError> {
        Ok(self.sink.finish()?)
    }
}

impl<S: ByteSink> Escpos<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            state: PrintState::default(),
        }
    }

    pub fn state(&self) -> &PrintState {
        &self.state
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    // ========================================================================
    // RAW OUTPUT
    // ========================================================================

    /// Write raw bytes. Empty slices are skipped.
    pub fn write_raw(&mut self, data: &[u8]) -> &mut Self {
        if !data.is_empty() {
            self.sink.push_bytes(data);
        }
        self
    }

    fn emit(&mut self, cmd: Vec<u8>) -> &mut Self {
        self.write_raw(&cmd)
    }

    /// Write a single byte.
    pub fn write_byte(&mut self, byte: u8) -> &mut Self {
        self.write_raw(&[byte])
    }

    /// Write a string as raw bytes. No transcoding is applied.
    pub fn write(&mut self, data: &str) -> &mut Self {
        self.write_raw(data.as_bytes())
    }

    /// Write formatted text, e.g. `p.writef(format_args!("{:x} ", row))`.
    pub fn writef(&mut self, args: fmt::Arguments<'_>) -> &mut Self {
        match args.as_str() {
            Some(s) => self.write(s),
            None => self.write(&args.to_string()),
        }
    }

    pub fn writeln(&mut self, data: &str) -> &mut Self {
        self.write(data).linefeed()
    }

    /// Write `data` repeated `count` times.
    pub fn write_repeat(&mut self, count: usize, data: &[u8]) -> &mut Self {
        self.write_raw(&data.repeat(count))
    }

    // ========================================================================
    // STATE
    // ========================================================================

    /// Restore the toggle model to its defaults. Emits nothing.
    pub fn reset(&mut self) -> &mut Self {
        self.state.reset();
        self
    }

    /// Reset the toggle model and send the hardware reset (ESC @).
    pub fn init(&mut self) -> &mut Self {
        self.reset().emit(commands::init())
    }

    /// End-of-output marker.
    pub fn end(&mut self) -> &mut Self {
        self.emit(commands::end())
    }

    // ========================================================================
    // PAPER, CUTTER, DRAWER
    // ========================================================================

    pub fn cut(&mut self) -> &mut Self {
        self.emit(commands::cut())
    }

    pub fn cut_partial(&mut self) -> &mut Self {
        self.emit(commands::cut_partial())
    }

    pub fn cash(&mut self) -> &mut Self {
        self.emit(commands::cash())
    }

    pub fn linefeed(&mut self) -> &mut Self {
        self.emit(commands::linefeed())
    }

    /// Feed `n` lines. Wider counts are truncated by the caller.
    pub fn formfeed_n(&mut self, n: u8) -> &mut Self {
        self.emit(commands::formfeed_n(n))
    }

    pub fn formfeed(&mut self) -> &mut Self {
        self.formfeed_n(1)
    }

    /// Open the cash drawer with the fixed 2x2ms pulse.
    pub fn pulse(&mut self) -> &mut Self {
        self.emit(commands::pulse())
    }

    /// Line spacing does not touch the toggle model.
    pub fn set_line_spacing(&mut self, spacing: u8) -> &mut Self {
        self.emit(commands::line_spacing(spacing))
    }

    pub fn send_move_x(&mut self, x: u16) -> &mut Self {
        self.emit(commands::move_x(x))
    }

    pub fn send_move_y(&mut self, y: u16) -> &mut Self {
        self.emit(commands::move_y(y))
    }

    // ========================================================================
    // FONT
    // ========================================================================

    /// Select font `A`, `B` or `C`. Any other name selects font A.
    pub fn set_font(&mut self, name: &str) -> &mut Self {
        self.emit(text::font(Font::from_name(name)))
    }

    /// Re-send the current character size.
    pub fn send_font_size(&mut self) -> &mut Self {
        self.emit(text::font_size(self.state.width, self.state.height))
    }

    /// Set the character size multipliers.
    ///
    /// Sizes outside `1..=8` are ignored: the state keeps its previous
    /// size and nothing is written.
    pub fn set_font_size(&mut self, width: u8, height: u8) -> &mut Self {
        if !PrintState::is_valid_size(width, height) {
            log::debug!("ignoring font size {}x{}", width, height);
            return self;
        }
        self.state.width = width;
        self.state.height = height;
        self.send_font_size()
    }

    // ========================================================================
    // TOGGLES
    // ========================================================================

    pub fn send_underline(&mut self) -> &mut Self {
        self.emit(text::underline(self.state.underline))
    }

    pub fn send_emphasize(&mut self) -> &mut Self {
        self.emit(text::emphasize(self.state.emphasize))
    }

    pub fn send_upside_down(&mut self) -> &mut Self {
        self.emit(text::upside_down(self.state.upside_down))
    }

    pub fn send_rotate(&mut self) -> &mut Self {
        self.emit(text::rotate(self.state.rotate))
    }

    pub fn send_reverse(&mut self) -> &mut Self {
        self.emit(text::reverse(self.state.reverse))
    }

    pub fn send_smooth(&mut self) -> &mut Self {
        self.emit(text::smooth(self.state.smooth))
    }

    pub fn set_underline(&mut self, level: u8) -> &mut Self {
        self.state.underline = level;
        self.send_underline()
    }

    pub fn set_emphasize(&mut self, level: u8) -> &mut Self {
        self.state.emphasize = level;
        self.send_emphasize()
    }

    pub fn set_upside_down(&mut self, level: u8) -> &mut Self {
        self.state.upside_down = level;
        self.send_upside_down()
    }

    pub fn set_rotate(&mut self, level: u8) -> &mut Self {
        self.state.rotate = level;
        self.send_rotate()
    }

    pub fn set_reverse(&mut self, level: u8) -> &mut Self {
        self.state.reverse = level;
        self.send_reverse()
    }

    pub fn set_smooth(&mut self, level: u8) -> &mut Self {
        self.state.smooth = level;
        self.send_smooth()
    }

    // ========================================================================
    // ALIGNMENT AND LANGUAGE
    // ========================================================================

    pub fn send_align(&mut self, alignment: Alignment) -> &mut Self {
        self.emit(text::align(alignment))
    }

    /// Set alignment by name. Unknown names are configuration errors and
    /// nothing is written.
    pub fn set_align(&mut self, name: &str) -> Result<&mut Self, EscposError> {
        let alignment: Alignment = name.parse()?;
        Ok(self.send_align(alignment))
    }

    /// Select the international character set by two-letter code.
    pub fn set_lang(&mut self, code: &str) -> Result<&mut Self, EscposError> {
        let language: Language = code.parse()?;
        Ok(self.emit(text::lang(language)))
    }

    // ========================================================================
    // BARCODE AND GRAPHICS
    // ========================================================================

    /// Print a barcode.
    ///
    /// Resets the toggle model and centers the line first; barcode output
    /// never inherits the caller's formatting. Unknown `format` codes are
    /// printed with type `0`. See [`barcode::barcode`] for the framing.
    pub fn barcode(&mut self, value: &str, format: i32) -> &mut Self {
        if !barcode::is_known_format(format) {
            log::debug!("unknown barcode format {}, using type 0", format);
        }
        self.reset()
            .send_align(Alignment::Center)
            .emit(barcode::barcode(value.as_bytes(), format))
    }

    /// Store and print pre-encoded raster bytes.
    pub fn image_data(&mut self, raster: &[u8]) -> &mut Self {
        self.emit(graphics::raster_image(raster))
    }
}
