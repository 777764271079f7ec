//! Compilation of template text.
//!
//! A [`Lexer`] splits text into literal text and tags, and the [`Parser`]
//! turns those tokens into a [`Template`]: an ordered list of slots holding
//! literal text or placeholders, a map from each variable path to the slots
//! that display it, and the sections found in the text.
mod lex;
mod parse;
mod syntax;
mod template;

pub use crate::compile::{
    lex::token::Kind,
    parse::Parser,
    syntax::to_syntax,
    template::{Reference, Section, Template},
};
