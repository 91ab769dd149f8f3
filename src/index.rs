use std::slice;

use crate::{error::Error, Result};

/// Location of a single line within the stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordInfo {
    /// Offset of the lines first content byte
    pub position: u64,
    /// Amount of content bytes, without the terminator
    pub length: u64,
}

impl RecordInfo {
    #[inline]
    pub fn new(position: u64, length: u64) -> Self {
        Self { position, length }
    }

    /// Offset of the first byte after the lines content
    #[inline]
    pub fn end(&self) -> u64 {
        self.position + self.length
    }
}

/// Contains an in-memory line-index which only grows forward. Besides the discovered lines it
/// keeps track of how far the underlying stream has been scanned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordIndex {
    /// The index within the Vec represents the line-index in the file
    inner: Vec<RecordInfo>,
    /// Offset of the first byte which hasn't been scanned yet
    scan_cursor: u64,
    end_of_stream: bool,
}

impl RecordIndex {
    /// Create a new, empty Index
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a newly discovered line and moves the scan cursor behind its terminator.
    /// `position` has to be the current scan cursor, no bytes may be skipped.
    pub fn append(&mut self, position: u64, length: u64, terminator_width: u64) {
        debug_assert_eq!(position, self.scan_cursor);

        self.inner.push(RecordInfo::new(position, length));
        self.scan_cursor = position + length + terminator_width;
    }

    /// Moves the scan cursor over `width` bytes which don't belong to any line.
    #[inline]
    pub fn skip(&mut self, width: u64) {
        self.scan_cursor += width;
    }

    /// Get the entry of line `pos`
    #[inline]
    pub fn get(&self, pos: usize) -> Result<RecordInfo> {
        self.inner.get(pos).copied().ok_or(Error::OutOfRange {
            index: pos,
            len: self.len(),
        })
    }

    #[inline]
    pub fn last(&self) -> Option<RecordInfo> {
        self.inner.last().copied()
    }

    /// Returns the amount of lines indexed so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, RecordInfo> {
        self.inner.iter()
    }

    #[inline]
    pub fn scan_cursor(&self) -> u64 {
        self.scan_cursor
    }

    /// Marks the stream as fully scanned. Can't be undone.
    #[inline]
    pub fn mark_end_of_stream(&mut self) {
        self.end_of_stream = true;
    }

    #[inline]
    pub fn is_end_of_stream(&self) -> bool {
        self.end_of_stream
    }
}

impl<'a> IntoIterator for &'a RecordIndex {
    type Item = &'a RecordInfo;
    type IntoIter = slice::Iter<'a, RecordInfo>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
