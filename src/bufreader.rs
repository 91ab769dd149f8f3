use std::io::{prelude::*, BufReader, ErrorKind, Read, SeekFrom};

use crate::Result;

/// A wrapper around `BufReader<R>` which remembers the position it is at. Seeking to the
/// position the reader already sits at is a no-op, so sequential access keeps the read buffer.
#[derive(Debug)]
pub(crate) struct PositionedReader<R: Read + Seek> {
    reader: BufReader<R>,
    /// `None` if unknown, eg. after a failed read
    curr_pos: Option<u64>,
}

impl<R: Read + Seek> PositionedReader<R> {
    #[inline]
    pub(crate) fn with_capacity(capacity: usize, inner: R) -> Self {
        Self {
            reader: BufReader::with_capacity(capacity, inner),
            curr_pos: None,
        }
    }

    pub(crate) fn seek_to(&mut self, pos: u64) -> Result<()> {
        // We don't need to seek if we're sequencially reading the stream
        if self.curr_pos == Some(pos) {
            return Ok(());
        }

        self.curr_pos = None;
        self.reader.seek(SeekFrom::Start(pos))?;
        self.curr_pos = Some(pos);
        Ok(())
    }

    /// Reads exactly `len` bytes from the current position. Fails with `UnexpectedEof` if the
    /// stream ends early.
    pub(crate) fn read_exact_len(&mut self, len: u64) -> Result<Vec<u8>> {
        let mut buf = vec![0; len as usize];

        if let Err(e) = self.reader.read_exact(&mut buf) {
            self.curr_pos = None;
            return Err(e.into());
        }

        self.advance(len);
        Ok(buf)
    }

    /// Reads the content of the current line into `buf`, omitting the terminator. Returns the
    /// width of the consumed terminator or `None` if the stream ended before one was found.
    /// A bare `\r` terminates a line just like `\n` and `\r\n`.
    pub(crate) fn read_line_content(&mut self, buf: &mut Vec<u8>) -> Result<Option<u64>> {
        loop {
            let available = match self.reader.fill_buf() {
                Ok(available) => available,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.curr_pos = None;
                    return Err(e.into());
                }
            };

            if available.is_empty() {
                return Ok(None);
            }

            match available.iter().position(|b| *b == b'\r' || *b == b'\n') {
                Some(i) => {
                    let is_cr = available[i] == b'\r';
                    buf.extend_from_slice(&available[..i]);
                    self.consume(i + 1);

                    if is_cr && self.next_is_lf()? {
                        self.consume(1);
                        return Ok(Some(2));
                    }

                    return Ok(Some(1));
                }
                None => {
                    let n = available.len();
                    buf.extend_from_slice(available);
                    self.consume(n);
                }
            }
        }
    }

    #[inline]
    pub(crate) fn into_inner(self) -> R {
        self.reader.into_inner()
    }

    fn next_is_lf(&mut self) -> Result<bool> {
        loop {
            match self.reader.fill_buf() {
                Ok(available) => return Ok(available.first() == Some(&b'\n')),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.curr_pos = None;
                    return Err(e.into());
                }
            }
        }
    }

    #[inline]
    fn consume(&mut self, amt: usize) {
        self.reader.consume(amt);
        self.advance(amt as u64);
    }

    #[inline]
    fn advance(&mut self, amt: u64) {
        if let Some(pos) = self.curr_pos.as_mut() {
            *pos += amt;
        }
    }
}
