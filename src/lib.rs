//! # escpos-press - ESC/POS Receipt Encoder
//!
//! escpos-press turns print instructions into the binary command stream
//! understood by ESC/POS receipt printers. It provides:
//!
//! - **Print session**: a stateful builder tracking font size, emphasis,
//!   underline, reverse video, rotation and smoothing
//! - **Node documents**: declarative `text`/`feed`/`cut`/`pulse`/`image`
//!   instructions, readable from JSON
//! - **Protocol**: ESC/POS command builders, barcode and raster framing
//! - **Transport**: IPP `Print-Job` submission and raw TCP printing
//!
//! ## Quick Start
//!
//! ```
//! use escpos_press::{Escpos, node};
//!
//! let nodes = node::from_json(r#"[
//!     {"name": "text", "params": {"align": "center", "dw": "1"}, "data": "HELLO"},
//!     {"name": "feed", "params": {"line": "2"}},
//!     {"name": "cut", "params": {"type": "feed"}}
//! ]"#)?;
//!
//! let mut p = Escpos::buffer();
//! p.init().write_nodes(&nodes)?.end();
//!
//! let bytes = p.into_bytes();
//! assert_eq!(&bytes[0..2], &[0x1B, 0x40]);
//! # Ok::<(), escpos_press::EscposError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`printer`] | Print session and toggle model |
//! | [`node`] | Instruction nodes and dispatcher |
//! | [`protocol`] | ESC/POS command builders |
//! | [`sink`] | Byte destinations |
//! | [`transport`] | IPP and raw socket job submission |
//! | [`sample`] | Built-in sample pages |
//! | [`error`] | Error types |

pub mod error;
pub mod node;
pub mod printer;
pub mod protocol;
pub mod sample;
pub mod sink;
pub mod transport;

// Re-exports for convenience
pub use error::EscposError;
pub use node::Node;
pub use printer::Escpos;
