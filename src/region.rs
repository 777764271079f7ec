use std::ops::{Index, Range};

/// Represents an area within source text.
#[derive(Debug, PartialEq, Copy, Clone)]
pub struct Region {
    /// The beginning of the range, inclusive.
    pub begin: usize,
    /// The ending of the range, exclusive.
    pub end: usize,
}

impl Region {
    /// Create a new Region from the given range.
    pub fn new(position: Range<usize>) -> Self {
        Self {
            begin: position.start,
            end: position.end,
        }
    }

    /// Access the literal value of a [`Region`].
    ///
    /// Returns an empty string if the `Region` is out of bounds in the given source text.
    pub fn literal<'source>(&self, source: &'source str) -> &'source str {
        source.get(self.begin..self.end).unwrap_or_default()
    }
}

impl Index<Region> for str {
    type Output = str;

    fn index(&self, region: Region) -> &Self::Output {
        let Region { begin, end } = region;

        &self[begin..end]
    }
}

impl From<Range<usize>> for Region {
    fn from(value: Range<usize>) -> Self {
        Self {
            begin: value.start,
            end: value.end,
        }
    }
}
