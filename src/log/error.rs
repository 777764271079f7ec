use super::{Pointer, RED, RESET};
use crate::{log::Visual, region::Region};
use std::fmt::{Debug, Display, Formatter, Result};

/// Describes an error, and allows adding a contextual help text and visualization.
///
/// # Examples
///
/// ```
/// use curly::{Error, Region};
///
/// let error = Error::build("data shape mismatch")
///     .with_pointer("{{#each user.posts }}{{/each}}", Region::new(0..22))
///     .with_help("cannot read `posts` while resolving `user.posts`");
///
/// assert_eq!(error.reason(), "data shape mismatch");
/// ```
///
/// When printed with `println!("{:#}", error)` the [`Error`] produces this output:
///
/// ```text
/// error: data shape mismatch
///   --> 1:1
///    |
///  1 | {{#each user.posts }}{{/each}}
///    | ^^^^^^^^^^^^^^^^^^^^^^
///    |
///   = help: cannot read `posts` while resolving `user.posts`
/// ```
pub struct Error {
    /// Describes the cause of the [`Error`].
    reason: String,
    /// A visualization to help illustrate the [`Error`].
    visual: Option<Box<dyn Visual>>,
    /// Additional information to display with the [`Error`].
    help: Option<String>,
}

impl Error {
    /// Create a new [`Error`] with the given reason text.
    ///
    /// The additional fields may be populated using the various methods
    /// defined on `Error`.
    pub fn build<T>(reason: T) -> Self
    where
        T: Into<String>,
    {
        Error {
            reason: reason.into(),
            visual: None,
            help: None,
        }
    }

    /// Set the [`Visual`], which is a visualization that helps illustrate the
    /// cause of the error.
    pub fn with_visual(mut self, visual: impl Visual + 'static) -> Self {
        self.visual = Some(Box::new(visual));

        self
    }

    /// Set the visualization to a new [`Pointer`] with the given source text and
    /// [`Region`].
    ///
    /// This is a shortcut for creating a `Pointer` yourself and passing it to
    /// `with_visual`.
    pub fn with_pointer<T>(self, source: &str, region: T) -> Self
    where
        T: Into<Region>,
    {
        self.with_visual(Pointer::new(source, region.into()))
    }

    /// Set the help text, which is contextual information to accompany the
    /// reason text.
    pub fn with_help<T>(mut self, text: T) -> Self
    where
        T: Into<String>,
    {
        self.help = Some(text.into());

        self
    }

    /// Return the reason text.
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Return the help text, if any.
    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }
}

impl Debug for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.debug_struct("Error")
            .field("reason", &self.reason)
            .field("visual", &self.visual)
            .field("help", &self.help)
            .finish()
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let header = format!("{RED}error{RESET}");
        write!(f, "{header}: {}", self.reason)?;

        if f.alternate() {
            match &self.visual {
                Some(visual) => return visual.display(f, self.help.as_deref()),
                None => {
                    if let Some(help) = &self.help {
                        write!(f, "\n  = help: {help}")?;
                    }
                }
            }
        }

        Ok(())
    }
}

impl std::error::Error for Error {}

impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        self.reason == other.reason && self.help == other.help
    }
}
