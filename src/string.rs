use std::io::Cursor;

use crate::store::IndexedLineStore;

/// An `IndexedLineStore` over in-memory data
pub type IndexedString<'a> = IndexedLineStore<Cursor<&'a [u8]>>;

impl<'a> IndexedLineStore<Cursor<&'a [u8]>> {
    /// Create a new store over borrowed text
    #[inline]
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &'a str) -> IndexedString<'a> {
        Self::from_bytes(s.as_bytes())
    }

    #[inline]
    pub fn from_bytes(data: &'a [u8]) -> IndexedString<'a> {
        Self::new(Cursor::new(data))
    }
}
