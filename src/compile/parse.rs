use crate::{
    compile::{
        lex::{token::Token, Lexer},
        template::{Reference, Section, Template},
    },
    Engine,
};
use std::collections::{HashMap, HashSet};

/// Builds a [`Template`] from the tokens produced by a [`Lexer`].
pub struct Parser<'source> {
    /// Lexer used to pull from source as tokens instead of raw text.
    lexer: Lexer<'source>,
    /// Engine whose options decide what unresolved tags display.
    engine: &'source Engine,
}

impl<'source> Parser<'source> {
    /// Create a new Parser over the given source.
    #[inline]
    pub fn new(source: &'source str, engine: &'source Engine) -> Self {
        Self {
            lexer: Lexer::new(source, engine.finder(), &engine.options().tags),
            engine,
        }
    }

    /// Compile the template.
    ///
    /// Compilation never fails. Text that does not form a tag is kept as
    /// literal text, and section arguments are not checked until render.
    pub fn compile(self) -> Template<'source> {
        let source = self.lexer.source;
        let remove_unmatched = self.engine.options().remove_unmatched;

        let mut slots: Vec<&'source str> = vec![];
        let mut references: HashMap<&'source str, Vec<Reference>> = HashMap::new();
        let mut prefixes: HashSet<&'source str> = HashSet::new();
        let mut sections: Vec<Section<'source>> = vec![];

        for (token, region) in self.lexer {
            let placeholder = if remove_unmatched {
                ""
            } else {
                region.literal(source)
            };

            match token {
                Token::Literal(text) => {
                    if !text.is_empty() {
                        slots.push(text);
                    }
                }
                Token::Variable { path, encoded } => {
                    slots.push(placeholder);
                    prefixes.extend(path.match_indices('.').map(|(i, _)| &path[..i]));
                    prefixes.insert(path);
                    references.entry(path).or_default().push(Reference {
                        slot: slots.len() - 1,
                        encode: encoded,
                    });
                }
                Token::Section {
                    kind,
                    arguments,
                    body,
                } => {
                    slots.push(placeholder);
                    sections.push(Section {
                        slot: slots.len() - 1,
                        kind,
                        arguments,
                        body,
                        region,
                    });
                }
            }
        }

        tracing::debug!(
            slots = slots.len(),
            references = references.len(),
            sections = sections.len(),
            "compiled template"
        );

        Template {
            engine: self.engine,
            source,
            slots,
            references,
            prefixes,
            sections,
        }
    }
}
