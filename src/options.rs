//! Configuration accepted by an [`Engine`][`crate::Engine`].
//!
//! Every field is optional when deserializing, and missing fields fall back
//! to the defaults described on each type. This lets configuration text name
//! only what it changes:
//!
//! ```
//! use curly::Options;
//!
//! let options = Options::from_json(r#"{ "removeUnmatched": true, "tags": { "raw": ["<%", "%>"] } }"#)
//!     .unwrap();
//!
//! assert!(options.remove_unmatched);
//! assert_eq!(options.tags.raw, ("<%".to_string(), "%>".to_string()));
//! assert_eq!(options.tags.encoded, ("{{{".to_string(), "}}}".to_string()));
//! ```
use crate::log::{Error, INVALID_OPTIONS};
use indexmap::IndexMap;
use serde::Deserialize;

/// Options that control how templates are tokenized and how values are written.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Options {
    /// Collapse every run of whitespace in the output to a single space.
    pub collapse: bool,
    /// Replacements applied, in order, to values written through encoded tags.
    pub encode: IndexMap<String, String>,
    /// Strings that receive a leading backslash in every written value.
    pub escape: Vec<String>,
    /// Delimiters recognized in template text.
    pub tags: Tags,
    /// Render unresolved tags as empty text instead of their original markup.
    pub remove_unmatched: bool,
}

impl Options {
    /// Create a new set of [`Options`] with the default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read [`Options`] from JSON text, using defaults for any missing field.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the text is not valid JSON, a field has the wrong shape,
    /// or a delimiter is empty.
    pub fn from_json(text: &str) -> Result<Self, Error> {
        let options: Self = serde_json::from_str(text)
            .map_err(|e| Error::build(INVALID_OPTIONS).with_help(e.to_string()))?;
        options.tags.validate()?;

        Ok(options)
    }

    /// Set the collapse flag.
    #[inline]
    pub fn collapse(mut self, collapse: bool) -> Self {
        self.collapse = collapse;
        self
    }

    /// Replace the encode table.
    pub fn encode<I, K, V>(mut self, table: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.encode = table
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self
    }

    /// Replace the escape list.
    pub fn escape<I, S>(mut self, list: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.escape = list.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the delimiters.
    #[inline]
    pub fn tags(mut self, tags: Tags) -> Self {
        self.tags = tags;
        self
    }

    /// Set the remove unmatched flag.
    #[inline]
    pub fn remove_unmatched(mut self, remove: bool) -> Self {
        self.remove_unmatched = remove;
        self
    }
}

impl Default for Options {
    fn default() -> Self {
        Self {
            collapse: false,
            encode: default_encode(),
            escape: vec![],
            tags: Tags::default(),
            remove_unmatched: false,
        }
    }
}

/// The default encode table, which makes values safe to place in HTML.
fn default_encode() -> IndexMap<String, String> {
    [
        ("&", "&amp;"),
        ("<", "&lt;"),
        (">", "&gt;"),
        ("\"", "&quot;"),
        ("'", "&#39;"),
        ("/", "&#x2F;"),
        ("`", "&#x60;"),
        ("=", "&#x3D;"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

/// Delimiters that identify variable tags and sections within templates.
///
/// Defaults:
///
/// Raw variables: {{ name }}
/// Encoded variables: {{{ name }}}
/// Sections: {{#each items }} ... {{/each}}
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Tags {
    /// Open and close delimiters of a variable written without encoding.
    pub raw: (String, String),
    /// Open and close delimiters of a variable written with encoding.
    pub encoded: (String, String),
    /// Start, finish and close delimiters of a section.
    pub section: (String, String, String),
}

impl Tags {
    /// Set the raw variable delimiters.
    ///
    /// # Panics
    ///
    /// Panics if either delimiter is empty.
    pub fn raw(mut self, open: &str, close: &str) -> Self {
        assert!(!open.is_empty() && !close.is_empty());
        self.raw = (open.into(), close.into());

        self
    }

    /// Set the encoded variable delimiters.
    ///
    /// # Panics
    ///
    /// Panics if either delimiter is empty.
    pub fn encoded(mut self, open: &str, close: &str) -> Self {
        assert!(!open.is_empty() && !close.is_empty());
        self.encoded = (open.into(), close.into());

        self
    }

    /// Set the section delimiters.
    ///
    /// # Panics
    ///
    /// Panics if any delimiter is empty.
    pub fn section(mut self, start: &str, finish: &str, close: &str) -> Self {
        assert!(!start.is_empty() && !finish.is_empty() && !close.is_empty());
        self.section = (start.into(), finish.into(), close.into());

        self
    }

    /// Check that every delimiter is non-empty.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] naming the first empty delimiter.
    pub fn validate(&self) -> Result<(), Error> {
        let delimiters = [
            ("raw open", &self.raw.0),
            ("raw close", &self.raw.1),
            ("encoded open", &self.encoded.0),
            ("encoded close", &self.encoded.1),
            ("section start", &self.section.0),
            ("section finish", &self.section.1),
            ("section close", &self.section.2),
        ];

        match delimiters.iter().find(|(_, delimiter)| delimiter.is_empty()) {
            Some((name, _)) => Err(Error::build(INVALID_OPTIONS)
                .with_help(format!("the {name} delimiter must not be empty"))),
            None => Ok(()),
        }
    }
}

impl Default for Tags {
    fn default() -> Self {
        Self {
            raw: ("{{".into(), "}}".into()),
            encoded: ("{{{".into(), "}}}".into()),
            section: ("{{#".into(), "{{/".into(), "}}".into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Options, Tags};
    use crate::log::INVALID_OPTIONS;

    #[test]
    fn test_default_encode_order() {
        let options = Options::default();
        let keys: Vec<_> = options.encode.keys().map(String::as_str).collect();

        assert_eq!(keys, vec!["&", "<", ">", "\"", "'", "/", "`", "="]);
    }

    #[test]
    fn test_from_json_partial() {
        let options = Options::from_json(r#"{ "collapse": true, "escape": ["\""] }"#).unwrap();

        assert!(options.collapse);
        assert_eq!(options.escape, vec!["\"".to_string()]);
        assert_eq!(options.encode, Options::default().encode);
        assert_eq!(options.tags, Tags::default());
    }

    #[test]
    fn test_from_json_replaces_encode() {
        let options = Options::from_json(r#"{ "encode": { "<": "[", ">": "]" } }"#).unwrap();

        assert_eq!(options.encode.len(), 2);
        assert_eq!(options.encode.get("<").map(String::as_str), Some("["));
    }

    #[test]
    fn test_from_json_section_tags() {
        let options =
            Options::from_json(r#"{ "tags": { "section": ["<#", "</", ">"] } }"#).unwrap();

        assert_eq!(
            options.tags.section,
            ("<#".to_string(), "</".to_string(), ">".to_string())
        );
        assert_eq!(options.tags.raw, Tags::default().raw);
    }

    #[test]
    fn test_from_json_invalid() {
        assert!(Options::from_json(r#"{ "collapse": "yes" }"#).is_err());
        assert!(Options::from_json("not json").is_err());
    }

    #[test]
    fn test_from_json_empty_delimiter() {
        let error = Options::from_json(r#"{ "tags": { "raw": ["", "}}"] } }"#).unwrap_err();

        assert_eq!(error.reason(), INVALID_OPTIONS);
        assert_eq!(error.help(), Some("the raw open delimiter must not be empty"));

        let error =
            Options::from_json(r#"{ "tags": { "section": ["{{#", "{{/", ""] } }"#).unwrap_err();

        assert_eq!(error.help(), Some("the section close delimiter must not be empty"));
    }

    #[test]
    fn test_validate_default_tags() {
        assert!(Tags::default().validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let options = Options::new()
            .collapse(true)
            .remove_unmatched(true)
            .escape(["'"])
            .encode([("a", "b")])
            .tags(Tags::default().raw("[[", "]]"));

        assert!(options.collapse);
        assert!(options.remove_unmatched);
        assert_eq!(options.escape, vec!["'".to_string()]);
        assert_eq!(options.encode.get("a").map(String::as_str), Some("b"));
        assert_eq!(options.tags.raw, ("[[".to_string(), "]]".to_string()));
    }

    #[test]
    #[should_panic]
    fn test_empty_delimiter() {
        Tags::default().raw("", "}}");
    }
}
