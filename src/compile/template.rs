use crate::{compile::Kind, log::Error, region::Region, render::Renderer, Engine, Store};
use std::collections::{HashMap, HashSet};

/// A compiled [`Template`] that can be rendered with a [`Store`].
///
/// Rendering never modifies the `Template`, every call works on its own copy
/// of the slots, so one `Template` may be rendered any number of times with
/// different data.
pub struct Template<'source> {
    /// The engine that compiled this template, used again to compile section bodies.
    pub(crate) engine: &'source Engine,
    /// Reference to the source data from which this [`Template`] was generated.
    pub source: &'source str,
    /// The content of each slot before any data is applied.
    ///
    /// Literal text, or for a tag either its original markup or an empty
    /// string, depending on the engine options.
    pub(crate) slots: Vec<&'source str>,
    /// Slots that display each variable path.
    pub(crate) references: HashMap<&'source str, Vec<Reference>>,
    /// Every referenced path and each of its dotted prefixes.
    pub(crate) prefixes: HashSet<&'source str>,
    /// Sections in the order they appear in the source.
    pub(crate) sections: Vec<Section<'source>>,
}

/// A slot that displays the value of a variable path.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct Reference {
    /// Index of the slot.
    pub slot: usize,
    /// True when the value is encoded before it is escaped.
    pub encode: bool,
}

/// A section and the slot that receives its output.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct Section<'source> {
    /// Index of the slot.
    pub slot: usize,
    pub kind: Kind,
    pub arguments: &'source str,
    pub body: &'source str,
    /// Area of the source covered by the whole section.
    pub region: Region,
}

impl<'source> Template<'source> {
    /// Render the [`Template`] with the given [`Store`].
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if an `each` section reads a member of a missing value.
    ///
    /// # Examples
    ///
    /// ```
    /// use curly::{Engine, Store};
    ///
    /// let engine = Engine::default();
    /// let template = engine.compile("hello, {{ name }}!");
    ///
    /// let first = template.render(&Store::new().with_must("name", "taylor"));
    /// let second = template.render(&Store::new().with_must("name", "jordan"));
    ///
    /// assert_eq!(first.unwrap(), "hello, taylor!");
    /// assert_eq!(second.unwrap(), "hello, jordan!");
    /// ```
    pub fn render(&self, store: &Store) -> Result<String, Error> {
        Renderer::new(self, store).render()
    }

    /// Return the slots that display the given path.
    pub fn references(&self, path: &str) -> &[Reference] {
        self.references.get(path).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Return true if the given path, or any path beneath it, is displayed
    /// by this [`Template`].
    pub fn is_referenced(&self, path: &str) -> bool {
        self.prefixes.contains(path)
    }

    /// Return the sections in source order.
    pub fn sections(&self) -> &[Section<'source>] {
        &self.sections
    }
}

impl std::fmt::Debug for Template<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Template")
            .field("source", &self.source)
            .field("slots", &self.slots)
            .field("references", &self.references)
            .field("sections", &self.sections)
            .finish()
    }
}
