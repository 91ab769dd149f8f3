use std::io::{Read, Seek};

use tracing::{debug, trace};

use crate::{
    bufreader::PositionedReader,
    decoder::{Decoder, Utf8},
    error::Error,
    index::RecordIndex,
    Result,
};

/// Default capacity of the internal read buffer
pub const DEFAULT_BUFFER_CAPACITY: usize = 8 * 1024;

/// How lines without any content are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlankLines {
    /// Blank lines are neither indexed nor returned
    Skip,
    /// Blank lines are indexed as zero-length records and returned as empty strings
    Keep,
}

impl Default for BlankLines {
    fn default() -> Self {
        Self::Skip
    }
}

/// How a final line without terminator is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrailingLine {
    /// The unterminated line is never indexed or returned
    Drop,
    /// The unterminated line is indexed like any other line
    Keep,
}

impl Default for TrailingLine {
    fn default() -> Self {
        Self::Drop
    }
}

/// Configuration of an `IndexedLineStore`.
#[derive(Debug, Clone)]
pub struct StoreOptions {
    /// Capacity of the read buffer in bytes (default: 8 KiB).
    pub buffer_capacity: usize,
    pub blank_lines: BlankLines,
    pub trailing_line: TrailingLine,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
            blank_lines: BlankLines::default(),
            trailing_line: TrailingLine::default(),
        }
    }
}

/// Reads ranges of lines from a seekable stream. Lines are indexed the first time they are
/// scanned, later reads of the same lines seek directly to them.
///
/// The store owns the stream. It gets released on `close`, `into_inner` or when the store is
/// dropped.
#[derive(Debug)]
pub struct IndexedLineStore<R: Read + Seek, D: Decoder = Utf8> {
    reader: Option<PositionedReader<R>>,
    index: RecordIndex,
    decoder: D,
    options: StoreOptions,
}

impl<R: Read + Seek> IndexedLineStore<R> {
    /// Creates a new store over `stream` decoding lines as UTF-8.
    #[inline]
    pub fn new(stream: R) -> Self {
        Self::with_decoder(stream, Utf8)
    }
}

impl<R: Read + Seek, D: Decoder> IndexedLineStore<R, D> {
    #[inline]
    pub fn with_decoder(stream: R, decoder: D) -> Self {
        Self::with_options(stream, decoder, StoreOptions::default())
    }

    pub fn with_options(stream: R, decoder: D, options: StoreOptions) -> Self {
        let reader = PositionedReader::with_capacity(options.buffer_capacity, stream);
        Self {
            reader: Some(reader),
            index: RecordIndex::new(),
            decoder,
            options,
        }
    }

    /// Returns the lines `start..start + count`. If the stream ends before, less lines get
    /// returned. Only lines not indexed yet get scanned.
    pub fn get_records(&mut self, start: usize, count: usize) -> Result<Vec<String>> {
        if self.reader.is_none() {
            return Err(Error::StreamClosed);
        }

        let end = start.saturating_add(count);
        let indexed = self.index.len();

        let mut records = Vec::with_capacity(count.min(1024));

        if indexed < start {
            // Nothing of the requested range is indexed yet
            self.scan_into(start, end, &mut records)?;
        } else if indexed > end {
            self.read_cached(start, end, &mut records)?;
        } else {
            self.read_cached(start, indexed, &mut records)?;
            self.scan_into(start, end, &mut records)?;
        }

        Ok(records)
    }

    /// Reads a single line. Returns `None` if the stream has less lines.
    pub fn read_line(&mut self, line: usize) -> Result<Option<String>> {
        Ok(self.get_records(line, 1)?.pop())
    }

    /// Scans the whole remaining stream and returns the total amount of indexed lines. Lines are
    /// not decoded.
    pub fn index_to_end(&mut self) -> Result<usize> {
        if self.reader.is_none() {
            return Err(Error::StreamClosed);
        }

        let before = self.index.len();
        while self.scan_line()?.is_some() {}

        debug!(
            new_lines = self.index.len() - before,
            total = self.index.len(),
            "indexed stream to end"
        );

        Ok(self.index.len())
    }

    /// Returns `true` if a previous scan reached the end of the stream
    #[inline]
    pub fn is_end_of_stream(&self) -> bool {
        self.index.is_end_of_stream()
    }

    /// Returns the amount of lines discovered so far
    #[inline]
    pub fn indexed_lines(&self) -> usize {
        self.index.len()
    }

    #[inline]
    pub fn index(&self) -> &RecordIndex {
        &self.index
    }

    #[inline]
    pub fn decoder(&self) -> &D {
        &self.decoder
    }

    /// Allows reconfiguring the decoder. Already indexed lines stay valid since the index only
    /// holds byte ranges.
    #[inline]
    pub fn decoder_mut(&mut self) -> &mut D {
        &mut self.decoder
    }

    #[inline]
    pub fn options(&self) -> &StoreOptions {
        &self.options
    }

    /// Releases the underlying stream. Calling it multiple times has no effect. All further reads
    /// fail with `Error::StreamClosed`.
    pub fn close(&mut self) {
        if self.reader.take().is_some() {
            debug!(indexed = self.index.len(), "store closed");
        }
    }

    #[inline]
    pub fn is_closed(&self) -> bool {
        self.reader.is_none()
    }

    /// Consumes the store and returns the underlying stream, or `None` if it was closed already.
    /// The streams position is unspecified.
    #[inline]
    pub fn into_inner(self) -> Option<R> {
        self.reader.map(PositionedReader::into_inner)
    }

    /// Reads the already indexed lines `start..end`
    fn read_cached(&mut self, start: usize, end: usize, out: &mut Vec<String>) -> Result<()> {
        let reader = self.reader.as_mut().ok_or(Error::StreamClosed)?;

        trace!(start, end, "reading cached lines");

        for line in start..end {
            let info = self.index.get(line)?;
            reader.seek_to(info.position)?;
            let bytes = reader.read_exact_len(info.length)?;
            out.push(self.decoder.decode(bytes)?);
        }

        Ok(())
    }

    /// Extends the index until it holds `end` lines or the stream ends. Each new line with an
    /// index >= `start` gets decoded into `out`.
    fn scan_into(&mut self, start: usize, end: usize, out: &mut Vec<String>) -> Result<()> {
        let before = self.index.len();

        while self.index.len() < end {
            let bytes = match self.scan_line()? {
                Some(bytes) => bytes,
                None => break,
            };

            if self.index.len() - 1 >= start {
                out.push(self.decoder.decode(bytes)?);
            }
        }

        if self.index.len() > before {
            debug!(
                from = before,
                to = self.index.len(),
                cursor = self.index.scan_cursor(),
                "extended index"
            );
        }

        Ok(())
    }

    /// Discovers the next line at the scan cursor, appends it to the index and returns its raw
    /// content. Returns `None` once the end of the stream is reached.
    fn scan_line(&mut self) -> Result<Option<Vec<u8>>> {
        let reader = self.reader.as_mut().ok_or(Error::StreamClosed)?;

        if self.index.is_end_of_stream() {
            return Ok(None);
        }

        let mut buf = Vec::new();

        loop {
            let position = self.index.scan_cursor();
            reader.seek_to(position)?;

            buf.clear();
            let terminator = reader.read_line_content(&mut buf)?;
            let length = buf.len() as u64;

            match terminator {
                Some(width) if buf.is_empty() && self.options.blank_lines == BlankLines::Skip => {
                    self.index.skip(width);
                }
                Some(width) => {
                    self.index.append(position, length, width);
                    return Ok(Some(buf));
                }
                None => {
                    debug!(lines = self.index.len(), "reached end of stream");
                    self.index.mark_end_of_stream();

                    if !buf.is_empty() && self.options.trailing_line == TrailingLine::Keep {
                        self.index.append(position, length, 0);
                        return Ok(Some(buf));
                    }

                    return Ok(None);
                }
            }
        }
    }
}
