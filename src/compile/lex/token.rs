use std::fmt::Display;

/// Types emitted by the Lexer.
///
/// Template text is split into literal text and the tags found between it.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Token<'source> {
    /// Text outside of any tag, which may be empty.
    Literal(&'source str),
    /// A variable tag such as {{ user.name }} or {{{ user.bio }}}.
    Variable {
        /// Dotted path naming the value.
        path: &'source str,
        /// True when the tag was opened with the encoded delimiter.
        encoded: bool,
    },
    /// A section block such as {{#each items }} ... {{/each}}.
    Section {
        /// The kind named in the section header.
        kind: Kind,
        /// Text between the kind name and the header close delimiter.
        arguments: &'source str,
        /// Text between the header and the matching finish delimiter.
        body: &'source str,
    },
}

/// The kinds of section recognized by the renderer.
///
/// Any other name is still lexed as a section, and renders as empty text.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Kind {
    /// Repeat the body for every member of an object.
    Each,
    /// Render the body once if a value is truthy.
    If,
    /// Repeat the body for a range of indices into an array.
    For,
    /// An unrecognized section name.
    Unknown,
}

impl From<&str> for Kind {
    fn from(name: &str) -> Self {
        match name {
            "each" => Self::Each,
            "if" => Self::If,
            "for" => Self::For,
            _ => Self::Unknown,
        }
    }
}

impl Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Kind::Each => write!(f, "each"),
            Kind::If => write!(f, "if"),
            Kind::For => write!(f, "for"),
            Kind::Unknown => write!(f, "unknown"),
        }
    }
}

impl Display for Token<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Literal(_) => write!(f, "literal"),
            Token::Variable { encoded: true, .. } => write!(f, "encoded variable"),
            Token::Variable { encoded: false, .. } => write!(f, "raw variable"),
            Token::Section { kind, .. } => write!(f, "{kind} section"),
        }
    }
}
