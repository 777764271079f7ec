use crate::{
    compile::{to_syntax, Parser, Template},
    log::Error,
    options::Options,
    Store,
};
use morel::Finder;

/// Compiles templates according to a set of [`Options`].
///
/// The delimiters are searched for with a [`Finder`] that is built once, when
/// the `Engine` is created, and shared by every [`Template`] it compiles.
pub struct Engine {
    /// Options applied to every template compiled by this engine.
    options: Options,
    /// Compiled search over the opening delimiters.
    finder: Finder,
}

impl Engine {
    /// Create a new instance of [`Engine`] with the given [`Options`].
    ///
    /// # Examples
    ///
    /// ```
    /// use curly::{Engine, Options, Store, Tags};
    ///
    /// let engine = Engine::new(Options::new().tags(Tags::default().raw("<%", "%>")));
    /// let output = engine.render("hello, <% name %>!", &Store::new().with_must("name", "taylor"));
    ///
    /// assert_eq!(output.unwrap(), "hello, taylor!");
    /// ```
    pub fn new(options: Options) -> Self {
        let finder = Finder::new(to_syntax(&options.tags));

        Self { options, finder }
    }

    /// Compile a new [`Template`].
    ///
    /// Compilation never fails, text that does not form a tag is kept as-is.
    ///
    /// # Examples
    ///
    /// ```
    /// use curly::{Engine, Store};
    ///
    /// let engine = Engine::default();
    /// let template = engine.compile("hello, {{ name }}!");
    /// let result = template.render(&Store::new().with_must("name", "taylor"));
    ///
    /// assert_eq!(result.unwrap(), "hello, taylor!");
    /// ```
    #[inline]
    pub fn compile<'source>(&'source self, text: &'source str) -> Template<'source> {
        Parser::new(text, self).compile()
    }

    /// Compile the given text and render it with the given [`Store`].
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if rendering fails, see [`Template::render`].
    #[inline]
    pub fn render(&self, text: &str, store: &Store) -> Result<String, Error> {
        self.compile(text).render(store)
    }

    /// Return the [`Options`] used by this engine.
    #[inline]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Return the [`Finder`] used to search for opening delimiters.
    #[inline]
    pub(crate) fn finder(&self) -> &Finder {
        &self.finder
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(Options::default())
    }
}
