//! # Text Entity Normalization
//!
//! Node payloads usually come out of XML-ish templates, so a handful of
//! character references are rewritten to their literal characters before
//! the text is sent to the printer:
//!
//! | Entity | Literal |
//! |--------|---------|
//! | `&#9;` `&#x9;` | horizontal tab |
//! | `&#10;` `&#xA;` | line feed |
//! | `&apos;` | `'` |
//! | `&quot;` | `"` |
//! | `&gt;` | `>` |
//! | `&lt;` | `<` |
//! | `&amp;` | `&` |
//!
//! `&amp;` is always substituted last, so `&amp;lt;` comes out as `&lt;`
//! rather than `<`. Running the normalizer twice is not idempotent for
//! such input.

use std::borrow::Cow;

/// Substitutions applied before `&amp;`. Order among these does not matter.
const ENTITIES: &[(&str, &str)] = &[
    ("&#9;", "\t"),
    ("&#x9;", "\t"),
    ("&#10;", "\n"),
    ("&#xA;", "\n"),
    ("&apos;", "'"),
    ("&quot;", "\""),
    ("&gt;", ">"),
    ("&lt;", "<"),
];

const AMPERSAND: (&str, &str) = ("&amp;", "&");

/// Replace the known entities in `data` with their literal characters.
///
/// ```
/// use escpos_press::protocol::entities::normalize;
///
/// assert_eq!(normalize("A&amp;B&lt;C"), "A&B<C");
/// ```
pub fn normalize(data: &str) -> Cow<'_, str> {
    if !data.contains('&') {
        return Cow::Borrowed(data);
    }

    let mut out = data.to_string();
    for (entity, literal) in ENTITIES.iter().chain(std::iter::once(&AMPERSAND)) {
        if out.contains(entity) {
            out = out.replace(entity, literal);
        }
    }
    Cow::Owned(out)
}
