//! Typed parameter maps for instruction nodes.
//!
//! Node parameters travel as string keys and string values. Only the keys
//! in [`ParamKey`] mean anything; everything else is dropped when the map
//! is built. Booleans are the literal strings `"true"` or `"1"`, integers
//! are decimal text.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::error::EscposError;

/// Every parameter key a node can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ParamKey {
    Align,
    Lang,
    Smooth,
    Em,
    Ul,
    Reverse,
    Rotate,
    Font,
    Dw,
    Dh,
    Width,
    Height,
    X,
    Y,
    Line,
    Unit,
    Type,
}

impl ParamKey {
    pub const ALL: [ParamKey; 17] = [
        ParamKey::Align,
        ParamKey::Lang,
        ParamKey::Smooth,
        ParamKey::Em,
        ParamKey::Ul,
        ParamKey::Reverse,
        ParamKey::Rotate,
        ParamKey::Font,
        ParamKey::Dw,
        ParamKey::Dh,
        ParamKey::Width,
        ParamKey::Height,
        ParamKey::X,
        ParamKey::Y,
        ParamKey::Line,
        ParamKey::Unit,
        ParamKey::Type,
    ];

    /// Wire name of the key.
    pub fn as_str(self) -> &'static str {
        match self {
            ParamKey::Align => "align",
            ParamKey::Lang => "lang",
            ParamKey::Smooth => "smooth",
            ParamKey::Em => "em",
            ParamKey::Ul => "ul",
            ParamKey::Reverse => "reverse",
            ParamKey::Rotate => "rotate",
            ParamKey::Font => "font",
            ParamKey::Dw => "dw",
            ParamKey::Dh => "dh",
            ParamKey::Width => "width",
            ParamKey::Height => "height",
            ParamKey::X => "x",
            ParamKey::Y => "y",
            ParamKey::Line => "line",
            ParamKey::Unit => "unit",
            ParamKey::Type => "type",
        }
    }

    pub fn from_name(name: &str) -> Option<ParamKey> {
        ParamKey::ALL.into_iter().find(|key| key.as_str() == name)
    }
}

/// Parameter set of one node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "HashMap<String, String>", into = "BTreeMap<String, String>")]
pub struct Params {
    values: BTreeMap<ParamKey, String>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    ///
    /// ```
    /// use escpos_press::node::{ParamKey, Params};
    ///
    /// let params = Params::new().with(ParamKey::Em, "1").with(ParamKey::Width, "3");
    /// assert!(params.flag(ParamKey::Em));
    /// ```
    pub fn with(mut self, key: ParamKey, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: ParamKey, value: impl Into<String>) -> Option<String> {
        self.values.insert(key, value.into())
    }

    /// Insert by wire name. Unknown names are ignored and `false` is
    /// returned.
    pub fn insert_named(&mut self, name: &str, value: impl Into<String>) -> bool {
        match ParamKey::from_name(name) {
            Some(key) => {
                self.insert(key, value);
                true
            }
            None => {
                log::debug!("ignoring unknown node parameter '{}'", name);
                false
            }
        }
    }

    pub fn get(&self, key: ParamKey) -> Option<&str> {
        self.values.get(&key).map(String::as_str)
    }

    pub fn contains(&self, key: ParamKey) -> bool {
        self.values.contains_key(&key)
    }

    /// `true` when the key is present with value `"true"` or `"1"`.
    pub fn flag(&self, key: ParamKey) -> bool {
        matches!(self.get(key), Some("true" | "1"))
    }

    /// Integer value of a key that must be numeric when present.
    ///
    /// Absent keys give `Ok(None)`; a present but unparseable value is a
    /// configuration error.
    pub fn int(&self, key: ParamKey) -> Result<Option<i64>, EscposError> {
        match self.get(key) {
            None => Ok(None),
            Some(value) => value
                .parse::<i64>()
                .map(Some)
                .map_err(|_| EscposError::InvalidNumber {
                    param: key.as_str(),
                    value: value.to_string(),
                }),
        }
    }

    /// Integer value of a key whose malformed values are simply ignored.
    pub fn int_lenient(&self, key: ParamKey) -> Option<i64> {
        self.get(key).and_then(|value| value.parse().ok())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        for (name, value) in iter {
            params.insert_named(name.as_ref(), value);
        }
        params
    }
}

impl From<HashMap<String, String>> for Params {
    fn from(map: HashMap<String, String>) -> Self {
        map.into_iter().collect()
    }
}

impl From<Params> for BTreeMap<String, String> {
    fn from(params: Params) -> Self {
        params
            .values
            .into_iter()
            .map(|(key, value)| (key.as_str().to_string(), value))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_names_round_trip() {
        for key in ParamKey::ALL {
            assert_eq!(ParamKey::from_name(key.as_str()), Some(key));
        }
        assert_eq!(ParamKey::from_name("bold"), None);
        assert_eq!(ParamKey::from_name("Width"), None);
    }

    #[test]
    fn test_unknown_keys_are_dropped() {
        let params: Params = [("em", "1"), ("bold", "1"), ("width", "2")]
            .into_iter()
            .collect();
        assert_eq!(params.len(), 2);
        assert!(params.contains(ParamKey::Em));
        assert_eq!(params.get(ParamKey::Width), Some("2"));
    }

    #[test]
    fn test_flag() {
        let params = Params::new()
            .with(ParamKey::Em, "true")
            .with(ParamKey::Ul, "1")
            .with(ParamKey::Reverse, "yes")
            .with(ParamKey::Rotate, "0");
        assert!(params.flag(ParamKey::Em));
        assert!(params.flag(ParamKey::Ul));
        assert!(!params.flag(ParamKey::Reverse));
        assert!(!params.flag(ParamKey::Rotate));
        assert!(!params.flag(ParamKey::Smooth));
    }

    #[test]
    fn test_int() {
        let params = Params::new()
            .with(ParamKey::Width, "3")
            .with(ParamKey::X, "-20")
            .with(ParamKey::Height, "tall");
        assert_eq!(params.int(ParamKey::Width).unwrap(), Some(3));
        assert_eq!(params.int(ParamKey::X).unwrap(), Some(-20));
        assert_eq!(params.int(ParamKey::Y).unwrap(), None);

        let err = params.int(ParamKey::Height).unwrap_err();
        assert!(matches!(
            err,
            EscposError::InvalidNumber { param: "height", ref value } if value == "tall"
        ));
    }

    #[test]
    fn test_int_lenient() {
        let params = Params::new()
            .with(ParamKey::Line, "2")
            .with(ParamKey::Unit, "lots");
        assert_eq!(params.int_lenient(ParamKey::Line), Some(2));
        assert_eq!(params.int_lenient(ParamKey::Unit), None);
        assert_eq!(params.int_lenient(ParamKey::Type), None);
    }

    #[test]
    fn test_serde() {
        let params: Params = serde_json::from_str(r#"{"align":"center","nope":"x"}"#).unwrap();
        assert_eq!(params.get(ParamKey::Align), Some("center"));
        assert_eq!(params.len(), 1);

        let json = serde_json::to_string(&params).unwrap();
        assert_eq!(json, r#"{"align":"center"}"#);
    }
}
