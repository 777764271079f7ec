use crate::options::Tags;
use morel::Syntax;

/// Identifies the opening delimiters that may begin a tag.
///
/// Closing delimiters are never searched for on their own, they are only
/// checked once an opening delimiter has been found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    BeginRaw = 0,
    BeginEncoded = 1,
    BeginSection = 2,
}

impl From<Marker> for usize {
    fn from(k: Marker) -> Self {
        k as usize
    }
}

/// Return a Syntax containing every opening delimiter in the given [`Tags`].
pub fn to_syntax(tags: &Tags) -> Syntax {
    let markers = vec![
        (Marker::BeginRaw.into(), tags.raw.0.clone()),
        (Marker::BeginEncoded.into(), tags.encoded.0.clone()),
        (Marker::BeginSection.into(), tags.section.0.clone()),
    ];

    Syntax::new(markers)
}
