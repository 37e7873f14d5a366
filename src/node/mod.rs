//! # Instruction Nodes
//!
//! A node is one declarative print instruction: a name, a parameter map and
//! an optional text payload. The dispatcher on [`Escpos`] routes each node
//! to the matching session operation.
//!
//! | Node | Operation | Parameters |
//! |------|-----------|------------|
//! | `text` | [`Escpos::text_block`] | `align lang smooth em ul reverse rotate font dw dh width height x y` |
//! | `feed` | [`Escpos::feed`] | `line unit` |
//! | `cut` | [`Escpos::feed_and_cut`] | `type` |
//! | `pulse` | [`Escpos::pulse`] | |
//! | `image` | [`Escpos::raster_image`] | `align width height` |
//!
//! Unknown node names are accepted and do nothing.
//!
//! ## JSON Form
//!
//! ```
//! use escpos_press::{Escpos, node::Node};
//!
//! let nodes: Vec<Node> = serde_json::from_str(r#"[
//!     {"name": "text", "params": {"em": "1", "width": "3"}, "data": "Hi"},
//!     {"name": "feed", "params": {"line": "2"}},
//!     {"name": "cut"}
//! ]"#)?;
//!
//! let mut p = Escpos::buffer();
//! p.write_nodes(&nodes)?;
//! assert!(p.bytes().starts_with(&[0x1B, 0x47, 1, 0x1D, 0x21, 0x20, b'H', b'i']));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod params;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

use crate::error::EscposError;
use crate::printer::Escpos;
use crate::protocol::entities;
use crate::protocol::text::Alignment;
use crate::sink::ByteSink;

pub use params::{ParamKey, Params};

/// Node names understood by the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NodeKind {
    Text,
    Feed,
    Cut,
    Pulse,
    Image,
    /// Any other name. Dispatching it is a no-op.
    Other(String),
}

impl NodeKind {
    pub fn name(&self) -> &str {
        match self {
            NodeKind::Text => "text",
            NodeKind::Feed => "feed",
            NodeKind::Cut => "cut",
            NodeKind::Pulse => "pulse",
            NodeKind::Image => "image",
            NodeKind::Other(name) => name,
        }
    }
}

impl From<&str> for NodeKind {
    fn from(name: &str) -> Self {
        match name {
            "text" => NodeKind::Text,
            "feed" => NodeKind::Feed,
            "cut" => NodeKind::Cut,
            "pulse" => NodeKind::Pulse,
            "image" => NodeKind::Image,
            other => NodeKind::Other(other.to_string()),
        }
    }
}

impl From<String> for NodeKind {
    fn from(name: String) -> Self {
        NodeKind::from(name.as_str())
    }
}

impl From<NodeKind> for String {
    fn from(kind: NodeKind) -> Self {
        kind.name().to_string()
    }
}

/// One declarative print instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    #[serde(rename = "name")]
    pub kind: NodeKind,
    #[serde(default, skip_serializing_if = "Params::is_empty")]
    pub params: Params,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub data: String,
}

impl Node {
    pub fn new(kind: impl Into<NodeKind>, params: Params, data: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            params,
            data: data.into(),
        }
    }

    pub fn text(params: Params, data: impl Into<String>) -> Self {
        Self::new(NodeKind::Text, params, data)
    }

    pub fn feed(params: Params) -> Self {
        Self::new(NodeKind::Feed, params, "")
    }

    pub fn cut(params: Params) -> Self {
        Self::new(NodeKind::Cut, params, "")
    }

    pub fn pulse() -> Self {
        Self::new(NodeKind::Pulse, Params::new(), "")
    }

    /// `data` is the base64-encoded raster payload.
    pub fn image(params: Params, data: impl Into<String>) -> Self {
        Self::new(NodeKind::Image, params, data)
    }
}

/// Parse a JSON array of nodes.
pub fn from_json(json: &str) -> Result<Vec<Node>, EscposError> {
    serde_json::from_str(json).map_err(|e| EscposError::InvalidNode(e.to_string()))
}

impl<S: ByteSink> Escpos<S> {
    /// Dispatch one node.
    pub fn write_node(&mut self, node: &Node) -> Result<&mut Self, EscposError> {
        match &node.kind {
            NodeKind::Text => self.text_block(&node.params, &node.data),
            NodeKind::Feed => Ok(self.feed(&node.params)),
            NodeKind::Cut => Ok(self.feed_and_cut(&node.params)),
            NodeKind::Pulse => Ok(self.pulse()),
            NodeKind::Image => self.raster_image(&node.params, &node.data),
            NodeKind::Other(name) => {
                log::debug!("ignoring unknown node '{}'", name);
                Ok(self)
            }
        }
    }

    /// Dispatch nodes in order, stopping at the first configuration error.
    pub fn write_nodes(&mut self, nodes: &[Node]) -> Result<&mut Self, EscposError> {
        for node in nodes {
            self.write_node(node)?;
        }
        Ok(self)
    }

    /// # Text block
    ///
    /// Applies the formatting parameters, then writes the normalized
    /// payload if it is not empty. Parameters are applied in this order:
    ///
    /// 1. `align`, `lang` (unknown values are errors)
    /// 2. `smooth`, `em`, `ul`, `reverse`, `rotate` (flags, switch on)
    /// 3. `font`: the sixth character of the value, upper-cased, is the
    ///    font letter (`"font_b"` selects font B)
    /// 4. `dw`, `dh`: double width / height, keeping the other dimension
    /// 5. `width`, `height`: explicit size (non-numeric values are errors)
    /// 6. `x`, `y`: absolute position (non-numeric values are errors)
    ///
    /// Numeric values wider than the command field are truncated.
    pub fn text_block(&mut self, params: &Params, data: &str) -> Result<&mut Self, EscposError> {
        if let Some(align) = params.get(ParamKey::Align) {
            self.set_align(align)?;
        }
        if let Some(lang) = params.get(ParamKey::Lang) {
            self.set_lang(lang)?;
        }

        if params.flag(ParamKey::Smooth) {
            self.set_smooth(1);
        }
        if params.flag(ParamKey::Em) {
            self.set_emphasize(1);
        }
        if params.flag(ParamKey::Ul) {
            self.set_underline(1);
        }
        if params.flag(ParamKey::Reverse) {
            self.set_reverse(1);
        }
        if params.flag(ParamKey::Rotate) {
            self.set_rotate(1);
        }

        if let Some(font) = params.get(ParamKey::Font) {
            let letter = font.get(5..6).unwrap_or_default().to_uppercase();
            self.set_font(&letter);
        }

        if params.flag(ParamKey::Dw) {
            let height = self.state().height;
            self.set_font_size(2, height);
        }
        if params.flag(ParamKey::Dh) {
            let width = self.state().width;
            self.set_font_size(width, 2);
        }

        if let Some(width) = params.int(ParamKey::Width)? {
            let height = self.state().height;
            self.set_font_size(width as u8, height);
        }
        if let Some(height) = params.int(ParamKey::Height)? {
            let width = self.state().width;
            self.set_font_size(width, height as u8);
        }

        if let Some(x) = params.int(ParamKey::X)? {
            self.send_move_x(x as u16);
        }
        if let Some(y) = params.int(ParamKey::Y)? {
            self.send_move_y(y as u16);
        }

        let text = entities::normalize(data);
        Ok(self.write(&text))
    }

    /// # Feed
    ///
    /// Feeds `line` lines and/or moves to dot row `unit` (malformed values
    /// are skipped), sends a line feed, then resets the toggle model and
    /// re-sends every reset value so the printer matches it.
    ///
    /// Underline is re-sent twice, before and after upside-down and size.
    /// Printers see the same state either way; the sequence is kept
    /// byte-for-byte for output compatibility.
    pub fn feed(&mut self, params: &Params) -> &mut Self {
        if let Some(lines) = params.int_lenient(ParamKey::Line) {
            self.formfeed_n(lines as u8);
        }
        if let Some(units) = params.int_lenient(ParamKey::Unit) {
            self.send_move_y(units as u16);
        }

        self.linefeed()
            .reset()
            .send_emphasize()
            .send_rotate()
            .send_smooth()
            .send_reverse()
            .send_underline()
            .send_upside_down()
            .send_font_size()
            .send_underline()
    }

    /// Cut, after one form feed when `type` is `"feed"`.
    pub fn feed_and_cut(&mut self, params: &Params) -> &mut Self {
        if params.get(ParamKey::Type) == Some("feed") {
            self.formfeed();
        }
        self.cut()
    }

    /// # Raster image
    ///
    /// `data` is base64-encoded, pre-rasterized image bytes; line breaks in
    /// the payload are ignored. An unknown `align` is an error even when
    /// the image itself is rejected. `width` and `height` must both be
    /// present and numeric and `data` must decode; otherwise nothing is
    /// written and the session is returned unchanged. When the image is
    /// accepted, the alignment is sent first and the image is stored and
    /// printed.
    pub fn raster_image(&mut self, params: &Params, data: &str) -> Result<&mut Self, EscposError> {
        let align = params
            .get(ParamKey::Align)
            .map(str::parse::<Alignment>)
            .transpose()?;

        let (Some(width), Some(height)) = (
            params.int_lenient(ParamKey::Width),
            params.int_lenient(ParamKey::Height),
        ) else {
            log::debug!("skipping image without numeric width and height");
            return Ok(self);
        };

        let payload: String = data
            .chars()
            .filter(|c| !matches!(c, '\r' | '\n'))
            .collect();
        let raster = match STANDARD.decode(payload.trim()) {
            Ok(raster) => raster,
            Err(err) => {
                log::debug!("skipping {}x{} image: {}", width, height, err);
                return Ok(self);
            }
        };

        if let Some(align) = align {
            self.send_align(align);
        }
        Ok(self.image_data(&raster))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> Params {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_node_kind_names() {
        for name in ["text", "feed", "cut", "pulse", "image"] {
            assert_eq!(NodeKind::from(name).name(), name);
        }
        assert_eq!(NodeKind::from("qr"), NodeKind::Other("qr".into()));
    }

    #[test]
    fn test_text_em_and_width() {
        let mut p = Escpos::buffer();
        p.text_block(&params(&[("em", "1"), ("width", "3")]), "Hi")
            .unwrap();
        assert_eq!(
            p.bytes(),
            &[0x1B, b'G', 1, 0x1D, b'!', 0x20, b'H', b'i']
        );
        assert_eq!(p.state().width, 3);
        assert_eq!(p.state().height, 1);
    }

    #[test]
    fn test_text_parameter_order() {
        let mut p = Escpos::buffer();
        p.text_block(
            &params(&[
                ("y", "2"),
                ("x", "1"),
                ("rotate", "true"),
                ("align", "center"),
                ("smooth", "1"),
            ]),
            "",
        )
        .unwrap();
        assert_eq!(
            p.bytes(),
            &[
                0x1B, b'a', 1, // align
                0x1D, b'b', 1, // smooth
                0x1B, b'R', 1, // rotate
                0x1B, b'$', 1, 0, // x
                0x1D, b'$', 2, 0, // y
            ]
        );
    }

    #[test]
    fn test_text_flags_ignore_other_values() {
        let mut p = Escpos::buffer();
        p.text_block(&params(&[("em", "yes"), ("ul", "0")]), "")
            .unwrap();
        assert!(p.is_empty());
    }

    #[test]
    fn test_text_font_offset() {
        let mut p = Escpos::buffer();
        p.text_block(&params(&[("font", "font_b")]), "").unwrap();
        p.text_block(&params(&[("font", "font:c")]), "").unwrap();
        p.text_block(&params(&[("font", "ab")]), "").unwrap();
        assert_eq!(
            p.bytes(),
            &[0x1B, b'M', 1, 0x1B, b'M', 2, 0x1B, b'M', 0]
        );
    }

    #[test]
    fn test_text_double_width_height() {
        let mut p = Escpos::buffer();
        p.text_block(&params(&[("dw", "1"), ("dh", "true")]), "")
            .unwrap();
        assert_eq!(p.bytes(), &[0x1D, b'!', 0x10, 0x1D, b'!', 0x11]);
        assert_eq!((p.state().width, p.state().height), (2, 2));
    }

    #[test]
    fn test_text_out_of_range_size_is_ignored() {
        let mut p = Escpos::buffer();
        p.text_block(&params(&[("width", "12")]), "").unwrap();
        assert!(p.is_empty());
        assert_eq!(p.state().width, 1);
    }

    #[test]
    fn test_text_invalid_numbers_are_fatal() {
        for key in ["width", "height", "x", "y"] {
            let mut p = Escpos::buffer();
            let err = p.text_block(&params(&[(key, "abc")]), "x").err().unwrap();
            assert!(err.is_fatal_config(), "{}", key);
            assert!(p.is_empty());
        }
    }

    #[test]
    fn test_text_invalid_align_and_lang_are_fatal() {
        let mut p = Escpos::buffer();
        assert!(matches!(
            p.text_block(&params(&[("align", "middle")]), "x"),
            Err(EscposError::InvalidAlignment(_))
        ));
        assert!(matches!(
            p.text_block(&params(&[("lang", "zz")]), "x"),
            Err(EscposError::InvalidLanguage(_))
        ));
        assert!(p.is_empty());
    }

    #[test]
    fn test_text_normalizes_payload() {
        let mut p = Escpos::buffer();
        p.text_block(&Params::new(), "A&amp;B&lt;C&#10;").unwrap();
        assert_eq!(p.bytes(), b"A&B<C\n");
    }

    #[test]
    fn test_feed_reset_sequence() {
        let mut p = Escpos::buffer();
        p.set_emphasize(1).set_font_size(2, 2);
        let before = p.len();
        p.feed(&params(&[("line", "3"), ("unit", "300")]));

        assert_eq!(p.state(), &crate::printer::PrintState::default());
        assert_eq!(
            &p.bytes()[before..],
            &[
                0x1B, b'd', 3, // line
                0x1D, b'$', 44, 1, // unit
                0x0A, // linefeed
                0x1B, b'G', 0, // emphasize
                0x1B, b'R', 0, // rotate
                0x1D, b'b', 0, // smooth
                0x1D, b'B', 0, // reverse
                0x1B, b'-', 0, // underline
                0x1B, b'{', 0, // upside down
                0x1D, b'!', 0, // size
                0x1B, b'-', 0, // underline again
            ]
        );
    }

    #[test]
    fn test_feed_skips_malformed_counts() {
        let mut p = Escpos::buffer();
        p.feed(&params(&[("line", "two"), ("unit", "")]));
        assert_eq!(p.bytes()[0], 0x0A);
        assert_eq!(p.len(), 1 + 8 * 3);
    }

    #[test]
    fn test_feed_line_wraps_to_byte() {
        let mut p = Escpos::buffer();
        p.feed(&params(&[("line", "258")]));
        assert_eq!(&p.bytes()[0..3], &[0x1B, b'd', 2]);
    }

    #[test]
    fn test_cut() {
        let mut p = Escpos::buffer();
        p.feed_and_cut(&Params::new());
        assert_eq!(p.bytes(), &[0x1D, 0x56, 0x41, 0x30]);

        let mut p = Escpos::buffer();
        p.feed_and_cut(&params(&[("type", "feed")]));
        assert_eq!(p.bytes(), &[0x1B, 0x64, 1, 0x1D, 0x56, 0x41, 0x30]);

        let mut p = Escpos::buffer();
        p.feed_and_cut(&params(&[("type", "partial")]));
        assert_eq!(p.len(), 4);
    }

    #[test]
    fn test_image_requires_dimensions() {
        let mut p = Escpos::buffer();
        p.raster_image(&params(&[("width", "8")]), "AQI=").unwrap();
        p.raster_image(&params(&[("height", "8")]), "AQI=").unwrap();
        p.raster_image(&params(&[("width", "8"), ("height", "x")]), "AQI=")
            .unwrap();
        assert!(p.is_empty());
    }

    #[test]
    fn test_image_missing_height_skips_align() {
        let mut p = Escpos::buffer();
        p.raster_image(&params(&[("width", "8"), ("align", "center")]), "AQI=")
            .unwrap();
        assert!(p.is_empty());
    }

    #[test]
    fn test_image_invalid_align_is_fatal() {
        let mut p = Escpos::buffer();
        let result = p.raster_image(&params(&[("width", "8"), ("align", "middle")]), "AQI=");
        assert!(matches!(result, Err(EscposError::InvalidAlignment(_))));

        let result = p.raster_image(
            &params(&[("width", "8"), ("height", "1"), ("align", "middle")]),
            "not base64!",
        );
        assert!(matches!(result, Err(EscposError::InvalidAlignment(_))));
        assert!(p.is_empty());
    }

    #[test]
    fn test_image_wrapped_base64() {
        let mut p = Escpos::buffer();
        p.raster_image(&params(&[("width", "8"), ("height", "1")]), "AQID\r\nBAU=\n")
            .unwrap();
        assert_eq!(
            p.bytes(),
            &[
                0x1B, b'(', b'L', 11, 0, b'0', b'p', b'0', 1, 1, b'1', 1, 2, 3, 4, 5, // store
                0x1B, b'(', b'L', 2, 0, b'0', b'2', // print
            ]
        );
    }

    #[test]
    fn test_image_bad_base64_is_ignored() {
        let mut p = Escpos::buffer();
        p.raster_image(&params(&[("width", "8"), ("height", "1")]), "not base64!")
            .unwrap();
        assert!(p.is_empty());
    }

    #[test]
    fn test_image_transfers() {
        let mut p = Escpos::buffer();
        p.raster_image(
            &params(&[("width", "16"), ("height", "1"), ("align", "right")]),
            "AQI=",
        )
        .unwrap();
        assert_eq!(
            p.bytes(),
            &[
                0x1B, b'a', 2, // align
                0x1B, b'(', b'L', 8, 0, b'0', b'p', b'0', 1, 1, b'1', 0x01, 0x02, // store
                0x1B, b'(', b'L', 2, 0, b'0', b'2', // print
            ]
        );
    }

    #[test]
    fn test_write_node_dispatch() {
        let mut p = Escpos::buffer();
        p.write_node(&Node::pulse()).unwrap();
        assert_eq!(p.bytes(), &[0x1B, 0x70, 0x02]);

        let mut p = Escpos::buffer();
        p.write_node(&Node::new("barcode", params(&[("em", "1")]), "123"))
            .unwrap();
        assert!(p.is_empty());
    }

    #[test]
    fn test_write_nodes_stops_at_error() {
        let nodes = vec![
            Node::text(Params::new(), "ok"),
            Node::text(params(&[("align", "diagonal")]), "never"),
            Node::pulse(),
        ];
        let mut p = Escpos::buffer();
        assert!(p.write_nodes(&nodes).is_err());
        assert_eq!(p.bytes(), b"ok");
    }

    #[test]
    fn test_from_json() {
        let nodes = from_json(
            r#"[{"name":"text","params":{"ul":"1","color":"red"},"data":"x"},{"name":"pulse"}]"#,
        )
        .unwrap();
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].kind, NodeKind::Text);
        assert_eq!(nodes[0].params.len(), 1);
        assert_eq!(nodes[1], Node::pulse());

        assert!(matches!(
            from_json(r#"{"name":"text"}"#),
            Err(EscposError::InvalidNode(_))
        ));
    }

    #[test]
    fn test_node_serializes_compactly() {
        let json = serde_json::to_string(&Node::pulse()).unwrap();
        assert_eq!(json, r#"{"name":"pulse"}"#);
    }
}
