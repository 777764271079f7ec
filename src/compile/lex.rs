pub mod token;

use crate::{options::Tags, region::Region};

use self::token::{Kind, Token};

use morel::Finder;

/// Reads template text as a sequence of [`Token`] instances.
///
/// Literal text and tags always alternate, beginning and ending with a
/// [`Token::Literal`] that may be empty:
///
/// literal, tag, literal, tag, ..., literal
pub struct Lexer<'source> {
    /// Reference to the source text.
    pub source: &'source str,
    /// Position within source.
    pub cursor: usize,
    /// Compiled [`Finder`] instance used to search for opening delimiters
    /// in the source text.
    finder: &'source Finder,
    /// Delimiters used to recognize the remainder of each tag.
    tags: &'source Tags,
    /// Temporary storage for a tag that will be returned on the following
    /// call to `.next`.
    buffer: Option<(Token<'source>, Region)>,
    /// Set once the trailing literal has been returned.
    finished: bool,
}

impl<'source> Lexer<'source> {
    /// Create a new [`Lexer`] from the given source, [`Finder`] and [`Tags`].
    ///
    /// The `Finder` must have been built from the same `Tags`.
    #[inline]
    pub fn new(source: &'source str, finder: &'source Finder, tags: &'source Tags) -> Self {
        Self {
            source,
            cursor: 0,
            finder,
            tags,
            buffer: None,
            finished: false,
        }
    }

    /// Return the first tag found at or after `from`.
    ///
    /// Each position holding an opening delimiter is tried as a section first,
    /// then as a variable. When neither matches, the search continues with
    /// the following character.
    fn find_tag(&self, from: usize) -> Option<(Token<'source>, Region)> {
        let mut at = from;

        while let Some((_, begin, _)) = self.finder.next(self.source, at) {
            let found = self
                .lex_section(begin)
                .or_else(|| self.lex_variable(begin));
            if found.is_some() {
                return found;
            }

            at = begin
                + self.source[begin..]
                    .chars()
                    .next()
                    .map_or(1, char::len_utf8);
        }

        None
    }

    /// Return a [`Token::Section`] if a complete section begins at `begin`.
    ///
    /// The header must read `start KIND ARGUMENTS close`, with a single space
    /// after the kind. The block ends at the `finish KIND close` that balances
    /// it, so sections of the same kind may be nested.
    fn lex_section(&self, begin: usize) -> Option<(Token<'source>, Region)> {
        let (start, finish, close) = &self.tags.section;
        let rest = self.source[begin..].strip_prefix(start.as_str())?;

        let name_len = rest
            .char_indices()
            .find(|(_, c)| !is_ident_continue(*c))
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        if name_len == 0 || !rest[name_len..].starts_with(' ') {
            return None;
        }
        let name = &rest[..name_len];

        let arguments_begin = begin + start.len() + name_len + 1;
        let arguments_end = arguments_begin + self.source[arguments_begin..].find(close.as_str())?;
        let body_begin = arguments_end + close.len();

        let opener = format!("{start}{name} ");
        let closer = format!("{finish}{name}{close}");
        let mut depth = 1;
        let mut at = body_begin;
        let body_end = loop {
            let next_close = at + self.source[at..].find(&closer)?;
            match self.source[at..next_close].find(&opener) {
                Some(offset) => {
                    depth += 1;
                    at += offset + opener.len();
                }
                None => {
                    depth -= 1;
                    if depth == 0 {
                        break next_close;
                    }
                    at = next_close + closer.len();
                }
            }
        };

        let token = Token::Section {
            kind: Kind::from(name),
            arguments: &self.source[arguments_begin..arguments_end],
            body: &self.source[body_begin..body_end],
        };

        Some((token, (begin..body_end + closer.len()).into()))
    }

    /// Return a [`Token::Variable`] if a variable tag begins at `begin`.
    ///
    /// The encoded opening delimiter is preferred over the raw one, and
    /// either closing delimiter may end the tag.
    fn lex_variable(&self, begin: usize) -> Option<(Token<'source>, Region)> {
        let (raw_open, _) = &self.tags.raw;
        let (encoded_open, _) = &self.tags.encoded;

        self.lex_variable_with(begin, encoded_open, true)
            .or_else(|| self.lex_variable_with(begin, raw_open, false))
    }

    fn lex_variable_with(
        &self,
        begin: usize,
        open: &str,
        encoded: bool,
    ) -> Option<(Token<'source>, Region)> {
        let rest = self.source[begin..].strip_prefix(open)?;
        let path_begin = begin + open.len() + (rest.len() - rest.trim_start().len());
        let candidate = &self.source[path_begin..];

        let prefix = if candidate.starts_with('@') { 1 } else { 0 };
        // Every char boundary that could end the path, shortest first.
        let ends: Vec<usize> = candidate[prefix..]
            .char_indices()
            .take_while(|(_, c)| is_path_char(*c))
            .map(|(i, c)| prefix + i + c.len_utf8())
            .collect();

        for end in ends.into_iter().rev() {
            let after = &candidate[end..];
            let close_begin = path_begin + end + (after.len() - after.trim_start().len());
            if let Some(close) = self.match_close(close_begin) {
                let token = Token::Variable {
                    path: &candidate[..end],
                    encoded,
                };

                return Some((token, (begin..close_begin + close.len()).into()));
            }
        }

        None
    }

    /// Return the closing delimiter found at `at`, preferring the encoded one.
    fn match_close(&self, at: usize) -> Option<&'source str> {
        let rest = &self.source[at..];
        let (_, encoded_close) = &self.tags.encoded;
        let (_, raw_close) = &self.tags.raw;

        [encoded_close, raw_close]
            .into_iter()
            .find(|close| rest.starts_with(close.as_str()))
            .map(String::as_str)
    }
}

impl<'source> Iterator for Lexer<'source> {
    type Item = (Token<'source>, Region);

    /// Return the next [`Token`] and [`Region`].
    fn next(&mut self) -> Option<Self::Item> {
        // Always prefer taking from the buffer when possible.
        if let Some(next) = self.buffer.take() {
            return Some(next);
        }
        if self.finished {
            return None;
        }

        let source = self.source;
        let from = self.cursor;
        match self.find_tag(from) {
            Some((token, region)) => {
                self.cursor = region.end;
                self.buffer = Some((token, region));

                Some((
                    Token::Literal(&source[from..region.begin]),
                    (from..region.begin).into(),
                ))
            }
            None => {
                let end = source.len();
                self.cursor = end;
                self.finished = true;

                Some((Token::Literal(&source[from..end]), (from..end).into()))
            }
        }
    }
}

/// Return true if the given character may appear in a section name or
/// variable path, meaning an `xid_continue`.
fn is_ident_continue(c: char) -> bool {
    unicode_ident::is_xid_continue(c)
}

/// Return true if the given character may appear in a variable path.
fn is_path_char(c: char) -> bool {
    c == '.' || is_ident_continue(c)
}
